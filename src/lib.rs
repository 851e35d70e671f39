pub mod batch;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod generation;
pub mod phi;
pub mod regularization;

pub use batch::{Batch, BatchId, BatchTask};
pub use config::GenerationConfig;
pub use dictionary::{Dictionary, DictionaryLookup, DictionaryStore};
pub use error::{CoreErr, Result};
pub use generation::{Generation, GenerationHandle};
pub use phi::{PhiMatrix, Token};
pub use regularization::{PhiRegularizer, RegularizerConfig, RegularizerSet, SmoothSparsePhi};
