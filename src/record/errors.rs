//! Record error types
//!
//! Error codes:
//! - RECORD_SCHEMA_VIOLATION: raw data carries an undeclared key
//! - RECORD_IMMUTABLE: assignment through a field accessor
//! - RECORD_UPDATE_FAILED: the update library rejected a path operation
//!
//! None of these are retried or recovered internally.

use thiserror::Error;

use crate::update::UpdateError;

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Record errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// Raw data holds a key the schema does not declare
    #[error("Cannot create record with property \"{key}\". Must be one of {valid}")]
    SchemaViolation {
        /// The offending key
        key: String,
        /// Every declared key, comma separated, in declaration order
        valid: String,
    },

    /// A field accessor was assigned to
    #[error("Record does not support property assignment.")]
    ImmutabilityViolation {
        /// Field that was assigned to
        field: String,
    },

    /// Path operation rejected by the update library
    #[error(transparent)]
    Update(#[from] UpdateError),
}

impl RecordError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::SchemaViolation { .. } => "RECORD_SCHEMA_VIOLATION",
            RecordError::ImmutabilityViolation { .. } => "RECORD_IMMUTABLE",
            RecordError::Update(_) => "RECORD_UPDATE_FAILED",
        }
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, RecordError::SchemaViolation { .. })
    }

    pub fn is_immutability_violation(&self) -> bool {
        matches!(self, RecordError::ImmutabilityViolation { .. })
    }
}
