// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried through the application layer unchanged)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("module name required")]
    MissingModuleName,

    #[error("invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("path leaves the project directory: {path}")]
    PathEscapesProject { path: String },

    #[error("path contains whitespace: '{path}'")]
    WhitespaceInPath { path: String },

    #[error("invalid layout value for {key}: '{value}' ({reason})")]
    InvalidLayoutValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("value for tag {tag} contains another tag token: '{value}'")]
    TagValueContainsTag { tag: String, value: String },

    #[error("malformed entry in {file} at line {line}: '{content}'")]
    MalformedEntry {
        file: String,
        line: usize,
        content: String,
    },

    // ========================================================================
    // Parsing Errors
    // ========================================================================
    #[error("unknown generation mode: {0}")]
    UnknownGenerationMode(String),

    #[error("unknown build step: {0}")]
    UnknownBuildStep(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingModuleName => vec![
                "Pass the module name with --module".into(),
                "Example: firmkit new --module Sensor --path Drivers/Sensor".into(),
            ],
            Self::InvalidModuleName { name, reason } => vec![
                format!("Module name '{}' is invalid: {}", name, reason),
                "Use letters, digits and underscores only".into(),
                "Examples: Sensor, Hal_Gpio, ASch_Queue".into(),
            ],
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("'{}' is absolute", path),
                "Module paths are relative to the project directory".into(),
            ],
            Self::PathEscapesProject { path } => vec![
                format!("'{}' uses '..'", path),
                "Module paths must stay inside the project directory".into(),
            ],
            Self::WhitespaceInPath { .. } => vec![
                "Registry lines are split on whitespace".into(),
                "Use underscores instead: Hal_Api/Gpio".into(),
            ],
            Self::InvalidLayoutValue { key, .. } => vec![
                format!("Fix layout.{} in .firmkit.toml or FIRMKIT__LAYOUT__*", key),
            ],
            Self::TagValueContainsTag { tag, .. } => vec![
                format!("Remove the <__...__> token from the value of {}", tag),
            ],
            Self::MalformedEntry { file, line, .. } => vec![
                format!("Fix line {} of {}", line, file),
                "Each registry line is '<target> <root-path> [metadata...]'".into(),
            ],
            Self::UnknownGenerationMode(_) => vec![
                "Valid modes: full, source-only, header-only, header-with-tests".into(),
            ],
            Self::UnknownBuildStep(_) => {
                vec!["Valid steps: build, unit-test, coverage, cppcheck".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    ///
    /// A bad `[layout]` is a configuration problem; everything else is a
    /// rejected input.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidLayoutValue { .. } => ErrorCategory::Configuration,
            _ => ErrorCategory::Validation,
        }
    }
}
