mod disk;
mod handle;
mod memory;

use log::info;

pub use disk::DiskGeneration;
pub use handle::GenerationHandle;
pub use memory::MemoryGeneration;

use crate::{
    batch::{Batch, BatchId, BatchTask},
    config::GenerationConfig,
    error::Result,
};

/// The catalog of batches available for a training session.
///
/// Each variant declares what it supports through `supports_add` and
/// `supports_remove`, so callers can check before mutating.
#[derive(Debug)]
pub enum Generation {
    /// Read-only snapshot of a directory of batch files.
    Disk(DiskGeneration),
    /// Mutable catalog of batches added programmatically.
    Memory(MemoryGeneration),
}

impl Generation {
    /// Builds the catalog selected by `config`.
    ///
    /// # Returns
    /// An `Io` error if the configured directory can't be scanned.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let generation = match config.disk_path() {
            Some(path) => Self::Disk(DiskGeneration::new(path)?),
            None => Self::Memory(MemoryGeneration::new()),
        };

        info!(
            supports_add = generation.supports_add(), batches = generation.len();
            "generation ready"
        );
        Ok(generation)
    }

    pub fn supports_add(&self) -> bool {
        match self {
            Self::Disk(_) => false,
            Self::Memory(_) => true,
        }
    }

    pub fn supports_remove(&self) -> bool {
        match self {
            Self::Disk(_) => false,
            Self::Memory(_) => true,
        }
    }

    /// Returns a copy of the current task list.
    pub fn tasks(&self) -> Vec<BatchTask> {
        match self {
            Self::Disk(generation) => generation.tasks(),
            Self::Memory(generation) => generation.tasks(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Disk(generation) => generation.len(),
            Self::Memory(generation) => generation.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `batch` to the catalog.
    ///
    /// # Returns
    /// The identifier under which the batch was stored, or `InvalidOperation`
    /// when the variant doesn't support additions.
    pub fn add(&self, batch: Batch) -> Result<BatchId> {
        match self {
            Self::Disk(generation) => generation.add(batch),
            Self::Memory(generation) => Ok(generation.add(batch)),
        }
    }

    /// Removes the batch named `id`. Never fails; unsupported removals are only logged.
    pub fn remove(&self, id: &BatchId) {
        match self {
            Self::Disk(generation) => generation.remove(id),
            Self::Memory(generation) => generation.remove(id),
        }
    }

    /// Materializes the batch named by `task`, owned by the caller.
    pub fn load(&self, task: &BatchTask) -> Result<Batch> {
        match self {
            Self::Disk(generation) => generation.load(task),
            Self::Memory(generation) => generation.load(task),
        }
    }
}
