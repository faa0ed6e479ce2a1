//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TemplateKind;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A file that must exist does not.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A template could not be loaded from the template store.
    #[error("Template '{kind}' not found at {}", path.display())]
    TemplateNotFound { kind: TemplateKind, path: PathBuf },

    /// A mandatory build list of a target is missing.
    #[error("Missing {category} list for target: {}", path.display())]
    MissingBuildFile {
        category: &'static str,
        path: PathBuf,
    },

    /// The target is neither registered nor the firmware image.
    #[error("Unknown target '{name}'")]
    UnknownTarget { name: String },

    /// The user declined a confirmation prompt.
    #[error("Cancelled by user")]
    UserCancelled,

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared state access failed (lock poisoned).
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { path } => vec![format!("Expected file: {}", path.display())],
            Self::TemplateNotFound { path, .. } => vec![
                format!("Create the template at {}", path.display()),
                "Or use --builtin-templates to generate from the bundled templates".into(),
            ],
            Self::MissingBuildFile { path, .. } => vec![
                format!("Create {}", path.display()),
                "Re-run 'firmkit new' for the module to regenerate its lists".into(),
            ],
            Self::UnknownTarget { name } => vec![
                format!("'{}' is not in the target registry", name),
                "Try: firmkit list to see registered targets".into(),
            ],
            Self::UserCancelled => vec!["Pass --yes to skip confirmation".into()],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::TemplateNotFound { .. } | Self::UnknownTarget { .. } => {
                ErrorCategory::NotFound
            }
            Self::MissingBuildFile { .. } => ErrorCategory::Configuration,
            Self::UserCancelled => ErrorCategory::Cancelled,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
