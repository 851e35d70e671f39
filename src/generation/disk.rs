use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::{
    batch::{Batch, BatchId, BatchTask, list_all_batches, load_batch},
    error::{CoreErr, Result},
};

/// A read-only catalog over the batch files found in a directory.
///
/// The task list is a snapshot taken at construction, later changes on disk
/// are only picked up by building a new `DiskGeneration`.
#[derive(Debug)]
pub struct DiskGeneration {
    disk_path: PathBuf,
    tasks: Vec<BatchTask>,
}

impl DiskGeneration {
    /// Scans `disk_path` for batch files.
    ///
    /// # Arguments
    /// * `disk_path` - The directory holding `*.batch` files.
    ///
    /// # Returns
    /// A new `DiskGeneration` or an `Io` error if the directory can't be read.
    pub fn new(disk_path: impl Into<PathBuf>) -> Result<Self> {
        let disk_path = disk_path.into();
        let tasks = list_all_batches(&disk_path)?;

        info!(batches = tasks.len(); "scanned {}", disk_path.display());
        Ok(Self { disk_path, tasks })
    }

    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }

    pub fn tasks(&self) -> Vec<BatchTask> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Always fails: batches must reach a disk generation through the filesystem.
    pub fn add(&self, _batch: Batch) -> Result<BatchId> {
        Err(CoreErr::InvalidOperation(
            "Generation::add() is not allowed with the current configuration. \
             Set GenerationConfig::disk_path to None or an empty path in order to \
             enable Generation::add(). Use save_batch() to write batches to disk."
                .into(),
        ))
    }

    /// Not supported, only logs the attempt.
    pub fn remove(&self, id: &BatchId) {
        error!(batch_id = id.as_str(); "remove batch is not supported in disk generation");
    }

    /// Reads the batch at `task.location`, stamped with `task.id`.
    ///
    /// # Returns
    /// An `Io` error if the file is missing, `CorruptedMessage` if it can't be decoded.
    pub fn load(&self, task: &BatchTask) -> Result<Batch> {
        let mut batch = load_batch(&task.location)?;

        // keep batch.id and task.id in sync
        batch.id = task.id.to_string();
        batch.populate_class_id();

        debug!(batch_id = task.id.as_str(), tokens = batch.token.len(); "loaded batch");
        Ok(batch)
    }
}
