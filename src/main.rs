use std::env;

use anyhow::Context;
use log::{info, warn};

use topic_core::{Generation, GenerationConfig};

/// Lists the batches of `BATCH_DIR` and checks that each one can be loaded.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let disk_path = env::var("BATCH_DIR").context("BATCH_DIR must point to a batch directory")?;
    let generation = Generation::from_config(&GenerationConfig::disk(&disk_path))?;

    if generation.is_empty() {
        warn!("no batches found in {disk_path}");
    }

    let mut documents = 0;
    for task in generation.tasks() {
        let batch = generation
            .load(&task)
            .with_context(|| format!("loading {}", task.location.display()))?;

        info!(
            batch_id = task.id.as_str(), tokens = batch.token.len(), items = batch.item.len();
            "batch ok"
        );
        documents += batch.item.len();
    }

    println!("{} batches, {documents} documents", generation.len());
    Ok(())
}
