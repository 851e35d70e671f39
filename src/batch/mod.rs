mod data;
mod io;
mod task;

pub use data::{Batch, BatchId, DEFAULT_CLASS, Item};
pub use io::{BATCH_EXTENSION, list_all_batches, load_batch, save_batch};
pub use task::BatchTask;
