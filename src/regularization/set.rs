use log::{debug, info};
use rayon::prelude::*;

use super::{PhiRegularizer, RegularizerConfig, create_regularizer};
use crate::{dictionary::DictionaryLookup, error::Result, phi::PhiMatrix};

struct Entry {
    name: String,
    tau: f32,
    regularizer: Box<dyn PhiRegularizer>,
}

/// The named regularizers of a model, combined with their `tau` weights.
#[derive(Default)]
pub struct RegularizerSet {
    entries: Vec<Entry>,
}

impl RegularizerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a regularizer from `config` and registers it under `config.name`,
    /// replacing any previous one with that name.
    pub fn create(&mut self, config: &RegularizerConfig) -> Result<()> {
        let regularizer = create_regularizer(config)?;
        let entry = Entry {
            name: config.name.clone(),
            tau: config.tau,
            regularizer,
        };

        match self.position(&config.name) {
            Some(idx) => self.entries[idx] = entry,
            None => self.entries.push(entry),
        }

        info!(name = config.name.as_str(), tau = config.tau; "regularizer created");
        Ok(())
    }

    /// Reconfigures the regularizer named `config.name`, creating it if needed.
    ///
    /// On error the regularizer and its `tau` keep their previous values.
    pub fn reconfigure(&mut self, config: &RegularizerConfig) -> Result<()> {
        let Some(idx) = self.position(&config.name) else {
            return self.create(config);
        };

        let entry = &mut self.entries[idx];
        entry.regularizer.reconfigure(config)?;
        entry.tau = config.tau;

        info!(name = config.name.as_str(), tau = config.tau; "regularizer reconfigured");
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let len = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        self.entries.len() != len
    }

    pub fn get(&self, name: &str) -> Option<&dyn PhiRegularizer> {
        self.position(name)
            .map(|idx| self.entries[idx].regularizer.as_ref())
    }

    pub fn tau(&self, name: &str) -> Option<f32> {
        self.position(name).map(|idx| self.entries[idx].tau)
    }

    /// Names of the registered regularizers, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every regularizer and adds `tau * correction` into `result`.
    ///
    /// Each regularizer writes into its own zeroed scratch matrix, so cells it
    /// leaves untouched contribute nothing. Corrections are computed in
    /// parallel and summed in registration order.
    pub fn regularize_phi<D>(
        &self,
        p_wt: &PhiMatrix,
        n_wt: &PhiMatrix,
        dictionaries: &D,
        result: &mut PhiMatrix,
    ) -> Result<()>
    where
        D: DictionaryLookup + Sync,
    {
        p_wt.check_same_layout(result)?;

        let corrections = self
            .entries
            .par_iter()
            .map(|entry| {
                let mut correction = p_wt.zeros_like();
                entry
                    .regularizer
                    .regularize_phi(p_wt, n_wt, dictionaries, &mut correction)?;
                Ok(correction)
            })
            .collect::<Result<Vec<_>>>()?;

        for (entry, correction) in self.entries.iter().zip(&corrections) {
            result.add_scaled(entry.tau, correction)?;
            debug!(name = entry.name.as_str(), tau = entry.tau; "regularizer applied");
        }

        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }
}
