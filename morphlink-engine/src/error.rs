//! Layered error types
//!
//! Compatibility, validation and registration errors describe misuse and are
//! always returned synchronously. Backend errors describe a failing analysis
//! engine and travel through whichever channel the call was made in.

use morphlink_core::MaterializeError;
use thiserror::Error;

use crate::capability::{Family, Operation};

/// The configured backend family does not provide the requested operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} is not supported by the {family} backend")]
pub struct CompatibilityError {
    /// Requested operation
    pub operation: Operation,
    /// Ineligible family
    pub family: Family,
}

/// Malformed caller input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid input: {reason}")]
pub struct ValidationError {
    /// Why the input was rejected
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The wrapped analysis engine failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("backend failure: {message}")]
pub struct BackendError {
    /// Failure description as reported by the backend
    pub message: String,
}

impl BackendError {
    /// Create a backend error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<MaterializeError> for BackendError {
    fn from(err: MaterializeError) -> Self {
        BackendError::new(format!("malformed result: {err}"))
    }
}

/// Engine-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Operation unsupported by the backend family
    #[error(transparent)]
    Compatibility(#[from] CompatibilityError),

    /// Malformed caller input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend failure
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Family supports the operation but the context holds no implementation
    #[error("no {operation} backend registered for {family}")]
    Unregistered {
        /// Requested family
        family: Family,
        /// Requested operation
        operation: Operation,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    /// Whether this error came from the analysis engine rather than from misuse
    pub fn is_backend(&self) -> bool {
        matches!(self, EngineError::Backend(_))
    }
}

impl From<MaterializeError> for EngineError {
    fn from(err: MaterializeError) -> Self {
        EngineError::Backend(err.into())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Result type backends report with
pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_error_display() {
        let err = CompatibilityError {
            operation: Operation::SentenceSplitting,
            family: Family::Kkma,
        };
        assert_eq!(
            err.to_string(),
            "sentence splitting is not supported by the kkma backend"
        );
        assert_eq!(EngineError::from(err.clone()).to_string(), err.to_string());
    }

    #[test]
    fn test_materialize_errors_surface_as_backend_errors() {
        let err: EngineError = MaterializeError::DanglingEdge {
            head: None,
            target: 4,
            len: 2,
        }
        .into();
        assert!(err.is_backend());
        assert!(err.to_string().starts_with("backend failure: malformed result"));
    }

    #[test]
    fn test_unregistered_display() {
        let err = EngineError::Unregistered {
            family: Family::Eunjeon,
            operation: Operation::Tagging,
        };
        assert_eq!(err.to_string(), "no tagging backend registered for eunjeon");
        assert!(!err.is_backend());
    }
}
