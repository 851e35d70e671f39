use std::path::{Path, PathBuf};

/// Selects which catalog a training session reads its batches from.
#[derive(Debug, Clone, Default)]
pub struct GenerationConfig {
    /// Directory holding `*.batch` files. `None` or an empty path selects an
    /// in-memory catalog that accepts `Generation::add`.
    pub disk_path: Option<PathBuf>,
}

impl GenerationConfig {
    /// A configuration reading batches from `disk_path`.
    pub fn disk(disk_path: impl Into<PathBuf>) -> Self {
        Self {
            disk_path: Some(disk_path.into()),
        }
    }

    /// A configuration for an in-memory catalog.
    pub fn memory() -> Self {
        Self { disk_path: None }
    }

    /// Returns the configured directory, treating an empty path as unset.
    pub fn disk_path(&self) -> Option<&Path> {
        self.disk_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}
