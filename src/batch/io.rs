use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use super::{Batch, BatchId, BatchTask};
use crate::error::{CoreErr, Result};

/// File extension of persisted batches.
pub const BATCH_EXTENSION: &str = "batch";

/// Decodes the batch stored at `path`.
///
/// # Returns
/// An `Io` error if the file can't be read, or `CorruptedMessage` if its
/// contents aren't a valid batch.
pub fn load_batch(path: &Path) -> Result<Batch> {
    let bytes = fs::read(path).map_err(|e| CoreErr::io(path, e))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        CoreErr::CorruptedMessage(format!("unable to parse batch from {}: {e}", path.display()))
    })
}

/// Writes `batch` into `dir` as `<id>.batch`, creating `dir` if needed.
///
/// A batch without an id is stored under a freshly generated one.
///
/// # Returns
/// The path of the written file.
pub fn save_batch(dir: &Path, batch: &Batch) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| CoreErr::io(dir, e))?;

    let id = if batch.id.is_empty() {
        BatchId::random()
    } else {
        BatchId::new(batch.id.clone())
    };

    let path = dir.join(format!("{id}.{BATCH_EXTENSION}"));
    let batch = if batch.id.is_empty() {
        let mut owned = batch.clone();
        owned.id = id.to_string();
        Cow::Owned(owned)
    } else {
        Cow::Borrowed(batch)
    };

    let bytes = serde_json::to_vec(&*batch)
        .map_err(|e| CoreErr::CorruptedMessage(format!("unable to encode batch {id}: {e}")))?;
    fs::write(&path, bytes).map_err(|e| CoreErr::io(&path, e))?;

    debug!(batch_id = id.as_str(); "saved batch to {}", path.display());
    Ok(path)
}

/// Enumerates every `*.batch` file directly inside `dir`.
///
/// The identifier of each task is the file stem. Tasks are sorted by path so
/// the scan order doesn't depend on the filesystem. Files whose stem isn't
/// valid UTF-8 are skipped.
pub fn list_all_batches(dir: &Path) -> Result<Vec<BatchTask>> {
    let entries = fs::read_dir(dir).map_err(|e| CoreErr::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CoreErr::io(dir, e))?.path();
        let is_batch = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == BATCH_EXTENSION);

        if is_batch {
            paths.push(path);
        }
    }
    paths.sort();

    let tasks = paths
        .into_iter()
        .filter_map(|path| {
            // lossy conversion would map distinct names to the same id
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!("skipping batch with a non UTF-8 file name: {}", path.display());
                return None;
            };
            Some(BatchTask::new(BatchId::new(stem), path))
        })
        .collect();

    Ok(tasks)
}
