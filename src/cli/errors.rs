//! CLI-specific error types
//!
//! Errors returned from `run` are fatal: printed to stderr, exit status 1.
//! Per-object failures during `check` are reported on stdout instead and only
//! surface here as a final `Rejected`.

use std::fmt;
use std::io;

use crate::registry::RegistryError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (input, stdout)
    IoError,
    /// Input line is not valid JSON
    InputError,
    /// Definitions could not be loaded
    DefinitionsError,
    /// Requested record type is not registered
    UnknownType,
    /// At least one input object failed validation
    Rejected,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "RECORDKIT_CLI_CONFIG_ERROR",
            Self::IoError => "RECORDKIT_CLI_IO_ERROR",
            Self::InputError => "RECORDKIT_CLI_INPUT_ERROR",
            Self::DefinitionsError => "RECORDKIT_CLI_DEFINITIONS_ERROR",
            Self::UnknownType => "RECORDKIT_CLI_UNKNOWN_TYPE",
            Self::Rejected => "RECORDKIT_CLI_REJECTED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn input_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InputError, msg)
    }

    pub fn unknown_type(name: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownType,
            format!("Unknown record type \"{}\"", name),
        )
    }

    /// `failed` of `total` input objects were rejected
    pub fn rejected(failed: usize, total: usize) -> Self {
        Self::new(
            CliErrorCode::Rejected,
            format!("{} of {} input objects rejected", failed, total),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<RegistryError> for CliError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::UnknownType { name } => Self::unknown_type(&name),
            other => Self::new(CliErrorCode::DefinitionsError, other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("bad level");
        assert_eq!(err.to_string(), "RECORDKIT_CLI_CONFIG_ERROR: bad level");
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
        assert_eq!(err.message(), "bad level");
    }

    #[test]
    fn test_registry_errors_map() {
        let err = CliError::from(RegistryError::UnknownType { name: "X".into() });
        assert_eq!(err.code_str(), "RECORDKIT_CLI_UNKNOWN_TYPE");

        let err = CliError::from(RegistryError::DuplicateType { name: "X".into() });
        assert_eq!(err.code_str(), "RECORDKIT_CLI_DEFINITIONS_ERROR");
    }

    #[test]
    fn test_rejected_message() {
        assert_eq!(
            CliError::rejected(2, 5).message(),
            "2 of 5 input objects rejected"
        );
    }
}
