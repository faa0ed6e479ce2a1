//! Unified error handling for Firmkit Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Firmkit Core operations.
#[derive(Debug, Error, Clone)]
pub enum FirmkitError {
    /// Errors from the domain layer (rejected input).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl FirmkitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }

    /// The user declined a confirmation prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::UserCancelled))
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Cancelled,
    Internal,
}

/// Convenient result type alias.
pub type FirmkitResult<T> = Result<T, FirmkitError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn categories_follow_wrapped_error() {
        let e: FirmkitError = DomainError::MissingModuleName.into();
        assert_eq!(e.category(), ErrorCategory::Validation);

        let e: FirmkitError = ApplicationError::UnknownTarget {
            name: "Sensor".into(),
        }
        .into();
        assert_eq!(e.category(), ErrorCategory::NotFound);

        let e: FirmkitError = ApplicationError::MissingBuildFile {
            category: "includes",
            path: PathBuf::from("Build/SCons_UTest/UTest_Sensor_Include.scons"),
        }
        .into();
        assert_eq!(e.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn cancellation_is_detected() {
        let e: FirmkitError = ApplicationError::UserCancelled.into();
        assert!(e.is_cancelled());
        assert_eq!(e.category(), ErrorCategory::Cancelled);
    }
}
