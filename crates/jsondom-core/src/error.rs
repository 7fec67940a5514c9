//! Error types for parsing, writing and value access.

use crate::value::Kind;
use thiserror::Error;

/// Errors surfaced by the document model.
///
/// Every failure is immediate and fail-fast: nothing is retried internally,
/// and a failed parse leaves the target document empty rather than
/// half-populated.
#[derive(Error, Debug)]
pub enum Error {
    /// Structural grammar mismatch: an expected token was not found, the
    /// input ended early, or an unrecognized leading character was seen.
    /// `offset` is the byte position reported by the source.
    #[error("parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// An accessor or indexing operation was invoked against a value whose
    /// tag does not match.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// A fixed-size sink ran out of room.
    #[error("sink capacity exceeded after {written} bytes")]
    CapacityExceeded { written: usize },

    /// A source was read past its end.
    #[error("source exhausted")]
    OutOfBounds,

    /// Positional access past the end of an array.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Key lookup miss on the immutable path (the mutable path inserts
    /// instead, see `ValueMut::key`).
    #[error("key not found: {0:?}")]
    MissingKey(String),

    /// Failure in an underlying byte stream adapter.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Written output was requested as a string but was not valid UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Convenience alias used throughout jsondom-core.
pub type Result<T> = std::result::Result<T, Error>;
