use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::{
    batch::{Batch, BatchId, BatchTask},
    error::{CoreErr, Result},
};

/// A mutable catalog of batches held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryGeneration {
    batches: RwLock<Vec<(BatchId, Arc<Batch>)>>,
}

impl MemoryGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns one task per stored batch. In-memory tasks have no location.
    pub fn tasks(&self) -> Vec<BatchTask> {
        self.batches
            .read()
            .iter()
            .map(|(id, _)| BatchTask::new(id.clone(), ""))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.batches.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.read().is_empty()
    }

    /// Stores `batch` under its own id, or a fresh one if it has none.
    ///
    /// A batch with an id already in the catalog replaces the previous one in place.
    pub fn add(&self, mut batch: Batch) -> BatchId {
        let id = if batch.id.is_empty() {
            let id = BatchId::random();
            batch.id = id.to_string();
            id
        } else {
            BatchId::new(batch.id.clone())
        };

        let mut batches = self.batches.write();
        let batch = Arc::new(batch);

        match batches.iter_mut().find(|(stored, _)| *stored == id) {
            Some((_, slot)) => *slot = batch,
            None => batches.push((id.clone(), batch)),
        }

        debug!(batch_id = id.as_str(), batches = batches.len(); "added batch");
        id
    }

    /// Drops the batch named `id`, if any.
    pub fn remove(&self, id: &BatchId) {
        let mut batches = self.batches.write();
        batches.retain(|(stored, _)| stored != id);
    }

    /// Returns an owned copy of the batch named by `task`.
    ///
    /// # Returns
    /// `UnknownBatch` if the catalog doesn't hold it.
    pub fn load(&self, task: &BatchTask) -> Result<Batch> {
        let stored = self
            .batches
            .read()
            .iter()
            .find(|(id, _)| *id == task.id)
            .map(|(_, batch)| Arc::clone(batch))
            .ok_or_else(|| CoreErr::UnknownBatch(task.id.clone()))?;

        let mut batch = Batch::clone(&stored);
        batch.id = task.id.to_string();
        batch.populate_class_id();
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(id: &str, tokens: &[&str]) -> Batch {
        Batch {
            id: id.into(),
            token: tokens.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn add_load_remove() {
        let generation = MemoryGeneration::new();
        let a = generation.add(batch("a", &["x"]));
        let b = generation.add(batch("b", &["y", "z"]));

        let ids: Vec<_> = generation.tasks().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, [a.clone(), b.clone()]);

        let loaded = generation.load(&BatchTask::new(b.clone(), "")).unwrap();
        assert_eq!(loaded.token, ["y", "z"]);
        assert_eq!(loaded.class_id.len(), 2);

        generation.remove(&a);
        generation.remove(&BatchId::new("never-added"));
        assert_eq!(generation.len(), 1);

        let err = generation.load(&BatchTask::new(a, "")).unwrap_err();
        assert!(matches!(err, CoreErr::UnknownBatch(_)));
    }

    #[test]
    fn anonymous_batches_get_an_id() {
        let generation = MemoryGeneration::new();
        let id = generation.add(Batch::default());

        let loaded = generation.load(&BatchTask::new(id.clone(), "")).unwrap();
        assert_eq!(loaded.id, id.as_str());
    }

    #[test]
    fn duplicate_ids_replace_in_place() {
        let generation = MemoryGeneration::new();
        generation.add(batch("a", &["old"]));
        generation.add(batch("b", &[]));
        generation.add(batch("a", &["new"]));

        let tasks = generation.tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id.as_str(), "a");

        let loaded = generation.load(&tasks[0]).unwrap();
        assert_eq!(loaded.token, ["new"]);
    }
}
