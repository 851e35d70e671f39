use serde::{Deserialize, Serialize};

/// The specification for the `TransformFunction` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformConfig {
    Identity,
}

/// A per-cell numeric function applied to `p_wt` before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformFunction {
    #[default]
    Identity,
}

impl TransformFunction {
    /// Resolves the function named by `config`, identity when absent.
    pub fn create(config: Option<TransformConfig>) -> Self {
        match config {
            None | Some(TransformConfig::Identity) => Self::Identity,
        }
    }

    #[inline]
    pub fn apply(&self, value: f32) -> f32 {
        match self {
            Self::Identity => value,
        }
    }
}
