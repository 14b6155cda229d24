//! Error types for sitter-bridge
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Malformed index / field id / handle / type-list argument
    #[error("Invalid argument: {0}")]
    InvalidArgumentType(String),

    /// A handle was decoded without a tree to bind it to
    #[error("Argument must be a tree")]
    InvalidTreeArgument,

    /// An offset or point range could not be decoded
    #[error("Unresolved range: {0}")]
    UnresolvedRange(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// No bundled grammar under that name
    #[error("Unknown language '{0}'. Valid languages: {}", crate::features::languages::LANGUAGE_NAMES.join(", "))]
    UnknownLanguage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Create an argument-type error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        BridgeError::InvalidArgumentType(msg.into())
    }

    /// Create an unresolved-range error
    pub fn unresolved_range(msg: impl Into<String>) -> Self {
        BridgeError::UnresolvedRange(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        BridgeError::Parse(msg.into())
    }

    /// Soft failures are turned into empty/null results by range-filtered operations
    pub fn is_soft(&self) -> bool {
        matches!(self, BridgeError::UnresolvedRange(_))
    }
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

// PyO3 integration (only when python feature is enabled)
#[cfg(feature = "python")]
impl From<BridgeError> for pyo3::PyErr {
    fn from(err: BridgeError) -> Self {
        use pyo3::exceptions::{PyOSError, PyRuntimeError, PyTypeError, PyValueError};

        match err {
            BridgeError::InvalidArgumentType(_) | BridgeError::InvalidTreeArgument => {
                PyTypeError::new_err(err.to_string())
            }
            BridgeError::UnresolvedRange(_)
            | BridgeError::UnknownLanguage(_)
            | BridgeError::Config(_) => PyValueError::new_err(err.to_string()),
            BridgeError::Io(_) => PyOSError::new_err(err.to_string()),
            BridgeError::Parse(_) => PyRuntimeError::new_err(err.to_string()),
        }
    }
}
