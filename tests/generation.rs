use std::{
    collections::HashSet,
    fs,
    ops::Deref,
    path::{Path, PathBuf},
};

use topic_core::{
    Batch, BatchId, CoreErr, Generation, GenerationConfig, GenerationHandle,
    batch::{DEFAULT_CLASS, save_batch},
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Temp directory removed when the test ends, pass or fail.
struct ScratchDir(PathBuf);

impl Deref for ScratchDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn scratch_dir(name: &str) -> ScratchDir {
    let dir = std::env::temp_dir().join(format!("topic_core-it-{name}-{}", BatchId::random()));
    fs::create_dir_all(&dir).unwrap();
    ScratchDir(dir)
}

fn batch(id: &str, tokens: &[&str]) -> Batch {
    Batch {
        id: id.into(),
        token: tokens.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

fn ids(generation: &Generation) -> Vec<String> {
    generation
        .tasks()
        .into_iter()
        .map(|task| task.id.to_string())
        .collect()
}

#[test]
fn k_files_yield_k_unique_tasks_stable_across_loads() {
    init_logger();
    const K: usize = 7;

    let dir = scratch_dir("k-files");
    for i in 0..K {
        save_batch(&dir, &batch(&format!("batch-{i}"), &["w"])).unwrap();
    }

    let generation = Generation::from_config(&GenerationConfig::disk(&*dir)).unwrap();
    let before = ids(&generation);

    assert_eq!(before.len(), K);
    assert_eq!(before.iter().collect::<HashSet<_>>().len(), K);

    for task in generation.tasks() {
        generation.load(&task).unwrap();
        generation.load(&task).unwrap();
    }

    assert_eq!(ids(&generation), before);
}

#[test]
fn loaded_batch_id_always_matches_the_task() {
    init_logger();
    let dir = scratch_dir("stamp");

    // the payload claims to be "stale" but lives in fresh.batch
    let path = save_batch(&dir, &batch("stale", &["a"])).unwrap();
    fs::rename(path, dir.join("fresh.batch")).unwrap();

    let generation = Generation::from_config(&GenerationConfig::disk(&*dir)).unwrap();
    for task in generation.tasks() {
        let loaded = generation.load(&task).unwrap();
        assert_eq!(loaded.id, task.id.as_str());
        assert_eq!(loaded.class_id, [DEFAULT_CLASS]);
    }
}

#[test]
fn disk_generation_rejects_add_and_ignores_remove() {
    init_logger();
    let dir = scratch_dir("read-only");
    save_batch(&dir, &batch("a", &["x"])).unwrap();

    let generation = Generation::from_config(&GenerationConfig::disk(&*dir)).unwrap();
    let before = ids(&generation);

    for _ in 0..3 {
        let err = generation.add(batch("new", &["y"])).unwrap_err();
        assert!(matches!(err, CoreErr::InvalidOperation(_)));
    }

    generation.remove(&BatchId::new("a"));
    generation.remove(&BatchId::new("never-existed"));

    assert_eq!(ids(&generation), before);
}

#[test]
fn end_to_end_two_batches() {
    init_logger();
    let dir = scratch_dir("e2e");
    save_batch(&dir, &batch("b", &["y"])).unwrap();
    save_batch(&dir, &batch("a", &["x"])).unwrap();

    let generation = Generation::from_config(&GenerationConfig::disk(&*dir)).unwrap();
    let tasks = generation.tasks();

    assert_eq!(ids(&generation), ["a", "b"]);
    assert_eq!(tasks[0].location, dir.join("a.batch"));
    assert_eq!(tasks[1].location, dir.join("b.batch"));

    let err = generation.add(Batch::default()).unwrap_err();
    assert!(err.to_string().contains("disk_path"));
}

#[test]
fn memory_generation_round_trip() {
    init_logger();
    let generation = Generation::from_config(&GenerationConfig::memory()).unwrap();

    let a = generation.add(batch("a", &["x", "y"])).unwrap();
    let anonymous = generation.add(batch("", &["z"])).unwrap();
    assert_eq!(generation.len(), 2);

    let tasks = generation.tasks();
    assert_eq!(tasks[0].id, a);
    assert_eq!(tasks[1].id, anonymous);

    let loaded = generation.load(&tasks[1]).unwrap();
    assert_eq!(loaded.id, anonymous.as_str());
    assert_eq!(loaded.token, ["z"]);

    generation.remove(&a);
    assert_eq!(ids(&generation), [anonymous.to_string()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn handle_loads_disk_batches_concurrently() {
    init_logger();
    let dir = scratch_dir("handle");
    for i in 0..5 {
        save_batch(&dir, &batch(&format!("{i}"), &["w"; 3])).unwrap();
    }

    let handle = GenerationHandle::new(
        Generation::from_config(&GenerationConfig::disk(&*dir)).unwrap(),
    );

    let loads: Vec<_> = handle
        .tasks()
        .into_iter()
        .map(|task| {
            let handle = handle.clone();
            tokio::spawn(async move { (task.id.clone(), handle.load(task).await) })
        })
        .collect();

    for load in loads {
        let (id, batch) = load.await.unwrap();
        let batch = batch.unwrap();
        assert_eq!(batch.id, id.as_str());
        assert_eq!(batch.token.len(), 3);
    }
}

#[tokio::test]
async fn handle_surfaces_load_errors() {
    let dir = scratch_dir("handle-missing");
    save_batch(&dir, &batch("gone", &[])).unwrap();

    let handle = GenerationHandle::new(
        Generation::from_config(&GenerationConfig::disk(&*dir)).unwrap(),
    );
    fs::remove_file(dir.join("gone.batch")).unwrap();

    let task = handle.tasks().remove(0);
    assert!(matches!(handle.load(task).await, Err(CoreErr::Io { .. })));
}
