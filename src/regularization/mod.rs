mod config;
mod regularizer;
mod set;
mod smooth_sparse_phi;
mod transform;

pub use config::{RegularizerConfig, RegularizerKind, SmoothSparsePhiConfig};
pub use regularizer::{PhiRegularizer, create_regularizer};
pub use set::RegularizerSet;
pub use smooth_sparse_phi::SmoothSparsePhi;
pub use transform::{TransformConfig, TransformFunction};
