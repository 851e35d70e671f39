use std::sync::Arc;

use log::{debug, warn};
use ndarray::{Axis, parallel::prelude::*};
use parking_lot::RwLock;

use super::{PhiRegularizer, RegularizerConfig, SmoothSparsePhiConfig, TransformFunction};
use crate::{dictionary::DictionaryLookup, error::Result, phi::PhiMatrix};

/// The configuration in effect for a regularization pass, with its derived transform.
#[derive(Debug)]
struct Snapshot {
    config: SmoothSparsePhiConfig,
    transform: TransformFunction,
}

impl Snapshot {
    fn new(config: SmoothSparsePhiConfig) -> Self {
        let transform = TransformFunction::create(config.transform_config);
        Self { config, transform }
    }
}

/// Smooths or sparsifies phi, optionally weighting each token by a dictionary value.
///
/// For every selected token and topic it writes
/// `coefficient * transform(p_wt[token, topic])`, where the coefficient is the
/// token's dictionary value, `0` for tokens the dictionary lacks, and `1` when
/// no dictionary is configured. Tokens outside `class_id` and topics outside
/// `topic_name` are not written.
///
/// The configuration is an immutable snapshot: each pass captures it once, and
/// `reconfigure` swaps in a new one without disturbing passes in flight.
#[derive(Debug)]
pub struct SmoothSparsePhi {
    state: RwLock<Arc<Snapshot>>,
}

impl SmoothSparsePhi {
    pub fn new(config: SmoothSparsePhiConfig) -> Self {
        Self {
            state: RwLock::new(Arc::new(Snapshot::new(config))),
        }
    }

    /// Builds the regularizer from a serialized envelope.
    pub fn from_config(config: &RegularizerConfig) -> Result<Self> {
        let config = SmoothSparsePhiConfig::parse(&config.config)?;
        Ok(Self::new(config))
    }

    /// Returns a copy of the active configuration.
    pub fn config(&self) -> SmoothSparsePhiConfig {
        self.snapshot().config.clone()
    }

    pub fn transform(&self) -> TransformFunction {
        self.snapshot().transform
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state.read())
    }
}

impl PhiRegularizer for SmoothSparsePhi {
    fn regularize_phi(
        &self,
        p_wt: &PhiMatrix,
        _n_wt: &PhiMatrix,
        dictionaries: &dyn DictionaryLookup,
        result: &mut PhiMatrix,
    ) -> Result<()> {
        let snapshot = self.snapshot();
        let Snapshot { config, transform } = &*snapshot;

        p_wt.check_same_layout(result)?;

        let topics_to_regularize: Vec<bool> = if config.topic_name.is_empty() {
            vec![true; p_wt.topic_size()]
        } else {
            p_wt.topic_names()
                .iter()
                .map(|name| config.topic_name.contains(name))
                .collect()
        };

        let use_all_classes = config.class_id.is_empty();

        let dictionary = config.dictionary_name.as_deref().and_then(|name| {
            let dictionary = dictionaries.dictionary(name);
            if dictionary.is_none() {
                warn!(dictionary = name; "dictionary not found, using a flat coefficient");
            }
            dictionary
        });

        result
            .values_mut()
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(token_id, mut row)| {
                let token = p_wt.token(token_id);
                if !use_all_classes && !config.class_id.contains(&token.class_id) {
                    return;
                }

                // tokens without value in the dictionary are not regularized
                let coefficient = match &dictionary {
                    Some(dictionary) => dictionary.entry(token).map_or(0., |entry| entry.value),
                    None => 1.,
                };

                row.iter_mut()
                    .enumerate()
                    .filter(|(topic_id, _)| topics_to_regularize[*topic_id])
                    .for_each(|(topic_id, cell)| {
                        *cell = coefficient * transform.apply(p_wt.get(token_id, topic_id));
                    });
            });

        debug!(
            tokens = p_wt.token_size(), topics = p_wt.topic_size();
            "smooth/sparse phi pass done"
        );
        Ok(())
    }

    fn topics_to_regularize(&self) -> Vec<String> {
        self.snapshot().config.topic_name.clone()
    }

    fn class_ids_to_regularize(&self) -> Vec<String> {
        self.snapshot().config.class_id.clone()
    }

    fn reconfigure(&self, config: &RegularizerConfig) -> Result<()> {
        let parsed = SmoothSparsePhiConfig::parse(&config.config)?;

        *self.state.write() = Arc::new(Snapshot::new(parsed));
        Ok(())
    }
}
