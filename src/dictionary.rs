use std::{collections::HashMap, fs, path::Path, sync::Arc};

use log::info;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreErr, Result},
    phi::Token,
};

/// Per-token statistic stored in a dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub token: Token,
    pub value: f32,
}

/// A read-only table of per-token coefficients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "DictionaryFile", into = "DictionaryFile")]
pub struct Dictionary {
    name: String,
    entries: HashMap<Token, DictionaryEntry>,
}

/// On-disk shape of a dictionary: entries as a list, since JSON map keys must be strings.
#[derive(Serialize, Deserialize)]
struct DictionaryFile {
    name: String,
    #[serde(default)]
    entries: Vec<DictionaryEntry>,
}

impl From<DictionaryFile> for Dictionary {
    fn from(value: DictionaryFile) -> Self {
        let mut dictionary = Dictionary::new(value.name);
        for entry in value.entries {
            dictionary.insert(entry.token, entry.value);
        }
        dictionary
    }
}

impl From<Dictionary> for DictionaryFile {
    fn from(value: Dictionary) -> Self {
        let mut entries: Vec<_> = value.entries.into_values().collect();
        entries.sort_by(|a, b| a.token.cmp(&b.token));

        Self {
            name: value.name,
            entries,
        }
    }
}

impl Dictionary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Reads a dictionary stored as JSON at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| CoreErr::io(path, e))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            CoreErr::CorruptedMessage(format!(
                "unable to parse dictionary from {}: {e}",
                path.display()
            ))
        })
    }

    /// Inserts or replaces the entry for `token`.
    pub fn insert(&mut self, token: Token, value: f32) {
        let entry = DictionaryEntry {
            token: token.clone(),
            value,
        };
        self.entries.insert(token, entry);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self, token: &Token) -> Option<&DictionaryEntry> {
        self.entries.get(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves dictionaries by name for the duration of one regularization call.
pub trait DictionaryLookup {
    fn dictionary(&self, name: &str) -> Option<Arc<Dictionary>>;
}

/// A thread-safe registry of named dictionaries.
#[derive(Debug, Default)]
pub struct DictionaryStore {
    dictionaries: RwLock<HashMap<String, Arc<Dictionary>>>,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `dictionary` under its own name, replacing any previous one.
    pub fn insert(&self, dictionary: Dictionary) {
        info!(
            name = dictionary.name(), entries = dictionary.len();
            "registering dictionary"
        );
        let name = dictionary.name().to_owned();
        self.dictionaries.write().insert(name, Arc::new(dictionary));
    }

    /// Loads the dictionary at `path` and registers it.
    pub fn load(&self, path: &Path) -> Result<()> {
        let dictionary = Dictionary::load(path)?;
        self.insert(dictionary);
        Ok(())
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Dictionary>> {
        self.dictionaries.write().remove(name)
    }
}

impl DictionaryLookup for DictionaryStore {
    fn dictionary(&self, name: &str) -> Option<Arc<Dictionary>> {
        self.dictionaries.read().get(name).cloned()
    }
}
