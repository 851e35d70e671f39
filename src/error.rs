use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

use crate::{batch::BatchId, phi::Token};

/// The result type used across the whole crate.
pub type Result<T> = std::result::Result<T, CoreErr>;

/// Failures surfaced by the batch catalog and the regularizers.
#[derive(Debug)]
pub enum CoreErr {
    /// The operation is not allowed with the current configuration.
    InvalidOperation(String),
    /// A serialized message (batch payload or regularizer config) could not be parsed.
    CorruptedMessage(String),
    /// Reading or writing `path` failed.
    Io { path: PathBuf, source: io::Error },
    /// The catalog holds no batch with this identifier.
    UnknownBatch(BatchId),
    /// Two matrices that must share their indexing don't.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// Two matrices name a topic differently at the same position.
    TopicMismatch {
        position: usize,
        got: String,
        expected: String,
    },
    /// Two matrices hold a different token at the same row.
    TokenMismatch {
        position: usize,
        got: Token,
        expected: Token,
    },
}

impl CoreErr {
    /// Wraps an `io::Error` together with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for CoreErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOperation(msg) => write!(f, "invalid operation: {msg}"),
            Self::CorruptedMessage(msg) => write!(f, "corrupted message: {msg}"),
            Self::Io { path, source } => write!(f, "io error at {}: {source}", path.display()),
            Self::UnknownBatch(id) => write!(f, "unknown batch {id}"),
            Self::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "{what} mismatch: got {got}, expected {expected}"),
            Self::TopicMismatch {
                position,
                got,
                expected,
            } => write!(
                f,
                "topic mismatch at position {position}: got {got}, expected {expected}"
            ),
            Self::TokenMismatch {
                position,
                got,
                expected,
            } => write!(
                f,
                "token mismatch at row {position}: got {got}, expected {expected}"
            ),
        }
    }
}

impl Error for CoreErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<CoreErr> for io::Error {
    fn from(value: CoreErr) -> Self {
        match value {
            CoreErr::Io { source, .. } => source,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
