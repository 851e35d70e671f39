use super::{RegularizerConfig, RegularizerKind, SmoothSparsePhi};
use crate::{dictionary::DictionaryLookup, error::Result, phi::PhiMatrix};

/// Defines a transform that writes an additive correction for a phi matrix.
pub trait PhiRegularizer: Send + Sync {
    /// Writes this regularizer's correction into `result`.
    ///
    /// Cells the regularizer doesn't select are left untouched.
    ///
    /// # Arguments
    /// * `p_wt` - The normalized phi matrix.
    /// * `n_wt` - The raw counters, indexed like `p_wt`.
    /// * `dictionaries` - Dictionaries available during this call.
    /// * `result` - The output, indexed like `p_wt`.
    ///
    /// # Returns
    /// An error if `result` isn't indexed like `p_wt`.
    fn regularize_phi(
        &self,
        p_wt: &PhiMatrix,
        n_wt: &PhiMatrix,
        dictionaries: &dyn DictionaryLookup,
        result: &mut PhiMatrix,
    ) -> Result<()>;

    /// The configured topic names, empty meaning all topics.
    fn topics_to_regularize(&self) -> Vec<String>;

    /// The configured class ids, empty meaning all classes.
    fn class_ids_to_regularize(&self) -> Vec<String>;

    /// Replaces the configuration. On error the previous one stays active.
    fn reconfigure(&self, config: &RegularizerConfig) -> Result<()>;
}

/// Builds the regularizer described by `config`.
///
/// # Returns
/// A new regularizer, or `CorruptedMessage` if the inner blob can't be parsed.
pub fn create_regularizer(config: &RegularizerConfig) -> Result<Box<dyn PhiRegularizer>> {
    match config.kind {
        RegularizerKind::SmoothSparsePhi => Ok(Box::new(SmoothSparsePhi::from_config(config)?)),
    }
}
