use std::{io, ops::Deref, sync::Arc};

use super::Generation;
use crate::{
    batch::{Batch, BatchTask},
    error::{CoreErr, Result},
};

/// A cloneable interface to share a `Generation` between async workers.
///
/// It bridges the async runtime with the blocking file I/O done by `Generation::load`.
#[derive(Debug, Clone)]
pub struct GenerationHandle(Arc<Generation>);

impl Deref for GenerationHandle {
    type Target = Generation;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl GenerationHandle {
    /// Creates a new `GenerationHandle`.
    ///
    /// # Arguments
    /// * `generation` - The underlying catalog.
    pub fn new(generation: Generation) -> Self {
        Self(Arc::new(generation))
    }

    /// Async call to the synchronous implementation of `Generation::load`.
    ///
    /// # Arguments
    /// * `task` - The batch to load.
    ///
    /// # Returns
    /// The loaded batch, or the error `Generation::load` returned.
    pub async fn load(&self, task: BatchTask) -> Result<Batch> {
        let generation = Arc::clone(&self.0);
        let location = task.location.clone();

        tokio::task::spawn_blocking(move || generation.load(&task))
            .await
            .map_err(|e| CoreErr::io(location, io::Error::other(e)))?
    }
}
