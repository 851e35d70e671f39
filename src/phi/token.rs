use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::batch::DEFAULT_CLASS;

/// Identity of a row in a phi matrix: a keyword within its modality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Token {
    pub class_id: String,
    pub keyword: String,
}

impl Token {
    pub fn new(class_id: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            keyword: keyword.into(),
        }
    }

    /// A token of the default class.
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self::new(DEFAULT_CLASS, keyword)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.class_id, self.keyword)
    }
}
