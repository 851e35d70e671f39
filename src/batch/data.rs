use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The class assigned to tokens whose class wasn't stored with the batch.
pub const DEFAULT_CLASS: &str = "@default_class";

/// Opaque identifier of a batch inside a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random 128-bit identifier rendered as hex.
    pub fn random() -> Self {
        Self(format!("{:032x}", rand::random::<u128>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BatchId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for BatchId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One document of a batch, as a sparse bag of tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    /// Indices into the owning batch's `token` table.
    #[serde(default)]
    pub token_id: Vec<usize>,
    #[serde(default)]
    pub token_weight: Vec<f32>,
}

/// A unit of training documents processed together by one worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub token: Vec<String>,
    /// Parallel to `token`, may be shorter until populated.
    #[serde(default)]
    pub class_id: Vec<String>,
    #[serde(default)]
    pub item: Vec<Item>,
}

impl Batch {
    /// Fills in the class of every token that has none with `DEFAULT_CLASS`.
    ///
    /// Idempotent: a batch whose classes are complete is left as is.
    pub fn populate_class_id(&mut self) {
        if self.class_id.len() < self.token.len() {
            self.class_id.resize(self.token.len(), DEFAULT_CLASS.to_owned());
        }
    }

    /// Returns the class of the `idx`-th token, `DEFAULT_CLASS` when unknown.
    pub fn token_class(&self, idx: usize) -> &str {
        self.class_id
            .get(idx)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CLASS)
    }
}
