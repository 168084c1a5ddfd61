//! Registry error types
//!
//! Error codes:
//! - REGISTRY_IO_ERROR: a definitions directory could not be listed
//! - REGISTRY_MALFORMED: a definition file is unreadable or invalid
//! - REGISTRY_UNKNOWN_TRANSFORM: a definition names a transform nobody registered
//! - REGISTRY_DUPLICATE_TYPE: a record type name is registered twice
//! - REGISTRY_UNKNOWN_TYPE: lookup of a type that was never registered
//!
//! Construction failures keep the code of the wrapped record error.

use std::io;

use thiserror::Error;

use crate::record::RecordError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Which side of a field a transform applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Get,
    Set,
}

impl TransformKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::Get => "get",
            TransformKind::Set => "set",
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record definition {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Unknown {kind} transform \"{name}\" on field \"{field}\"")]
    UnknownTransform {
        kind: TransformKind,
        name: String,
        field: String,
    },

    /// Schemas are immutable once registered
    #[error("Record type \"{name}\" is already registered")]
    DuplicateType { name: String },

    #[error("Unknown record type \"{name}\"")]
    UnknownType { name: String },

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl RegistryError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::Io { .. } => "REGISTRY_IO_ERROR",
            RegistryError::Malformed { .. } => "REGISTRY_MALFORMED",
            RegistryError::UnknownTransform { .. } => "REGISTRY_UNKNOWN_TRANSFORM",
            RegistryError::DuplicateType { .. } => "REGISTRY_DUPLICATE_TYPE",
            RegistryError::UnknownType { .. } => "REGISTRY_UNKNOWN_TYPE",
            RegistryError::Record(e) => e.code(),
        }
    }

    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        RegistryError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
