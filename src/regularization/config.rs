use serde::{Deserialize, Serialize};

use super::TransformConfig;
use crate::error::{CoreErr, Result};

/// The kinds of phi regularizers that can be built from a `RegularizerConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegularizerKind {
    SmoothSparsePhi,
}

/// Named envelope around the serialized configuration of one regularizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularizerConfig {
    pub name: String,
    pub kind: RegularizerKind,
    /// Weight of this regularizer's correction when combined with the others.
    pub tau: f32,
    /// JSON encoding of the typed configuration for `kind`.
    pub config: Vec<u8>,
}

impl RegularizerConfig {
    /// Wraps a `SmoothSparsePhiConfig` into an envelope.
    ///
    /// # Returns
    /// A `CorruptedMessage` error if `config` can't be encoded.
    pub fn smooth_sparse_phi(
        name: impl Into<String>,
        tau: f32,
        config: &SmoothSparsePhiConfig,
    ) -> Result<Self> {
        let config = serde_json::to_vec(config).map_err(|e| {
            CoreErr::CorruptedMessage(format!("unable to encode SmoothSparsePhiConfig: {e}"))
        })?;

        Ok(Self {
            name: name.into(),
            kind: RegularizerKind::SmoothSparsePhi,
            tau,
            config,
        })
    }
}

/// Configuration of the `SmoothSparsePhi` regularizer.
///
/// Empty `topic_name` or `class_id` means every topic or class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmoothSparsePhiConfig {
    #[serde(default)]
    pub topic_name: Vec<String>,
    #[serde(default)]
    pub class_id: Vec<String>,
    #[serde(default)]
    pub dictionary_name: Option<String>,
    #[serde(default)]
    pub transform_config: Option<TransformConfig>,
}

impl SmoothSparsePhiConfig {
    /// Decodes the blob carried by a `RegularizerConfig`.
    ///
    /// # Returns
    /// A `CorruptedMessage` error if `blob` isn't a valid configuration.
    pub fn parse(blob: &[u8]) -> Result<Self> {
        serde_json::from_slice(blob).map_err(|e| {
            CoreErr::CorruptedMessage(format!(
                "unable to parse SmoothSparsePhiConfig from RegularizerConfig.config: {e}"
            ))
        })
    }
}
