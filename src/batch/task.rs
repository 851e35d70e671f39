use std::path::PathBuf;

use super::BatchId;

/// Names one batch of a catalog: its identifier and where its payload lives.
///
/// In-memory batches have an empty `location`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchTask {
    pub id: BatchId,
    pub location: PathBuf,
}

impl BatchTask {
    pub fn new(id: BatchId, location: impl Into<PathBuf>) -> Self {
        Self {
            id,
            location: location.into(),
        }
    }
}
