//! Update error types
//!
//! Raised by the path-based operations only. Key-level operations never fail.

use thiserror::Error;

use super::path::Path;

/// Result type for update operations
pub type UpdateResult<T> = Result<T, UpdateError>;

/// Errors raised by path-based updates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateError {
    /// A path-based write needs at least one segment
    #[error("cannot update at an empty path")]
    EmptyPath,

    /// Descent hit a value that cannot hold the next segment
    #[error("cannot descend into {found} at {path}")]
    NotACollection {
        /// Path of the offending value
        path: Path,
        /// JSON type name of the offending value
        found: &'static str,
    },

    /// Array index past the end (writes may append at `len`)
    #[error("index {index} out of bounds (len: {len}) at {path}")]
    IndexOutOfBounds {
        /// Path of the array
        path: Path,
        /// Requested index
        index: usize,
        /// Array length
        len: usize,
    },
}

impl UpdateError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            UpdateError::EmptyPath => "UPDATE_EMPTY_PATH",
            UpdateError::NotACollection { .. } => "UPDATE_NOT_A_COLLECTION",
            UpdateError::IndexOutOfBounds { .. } => "UPDATE_INDEX_OUT_OF_BOUNDS",
        }
    }
}

/// Get the type name of a JSON value.
pub fn value_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
