//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `firmkit-adapters` crate provides implementations; the CLI provides
//! the terminal [`Confirm`].

use std::path::Path;

use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;

use crate::domain::TemplateKind;
use crate::error::FirmkitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `firmkit_adapters::filesystem::LocalFilesystem` (production)
/// - `firmkit_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths are passed as the services build them: the project directory
/// joined with a project-relative path.
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    ///
    /// An absent file is `ApplicationError::NotFound`.
    fn read_to_string(&self, path: &Path) -> FirmkitResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> FirmkitResult<()>;

    /// Append content to a file, creating it when absent.
    fn append_file(&self, path: &Path, content: &str) -> FirmkitResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> FirmkitResult<()>;
}

/// Port for module template retrieval.
///
/// Implemented by:
/// - `firmkit_adapters::template_store::DirectoryTemplateStore` (project `Templates/`)
/// - `firmkit_adapters::template_store::BuiltinTemplateStore` (bundled)
#[cfg_attr(test, automock)]
pub trait TemplateStore: Send + Sync {
    /// Raw template text for one kind of generated file.
    fn load(&self, kind: TemplateKind) -> FirmkitResult<String>;
}

/// Port for asking the user before files are written.
#[cfg_attr(test, automock)]
pub trait Confirm: Send + Sync {
    /// Raw answers are judged by [`ConfirmKind::accepts`]; implementations
    /// return its verdict.
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Port for the current date.
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// How strong an answer a prompt requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    /// Generating fresh files: an answer starting with `y`.
    Create,
    /// Replacing existing files: an answer starting with `yes`.
    Overwrite,
}

impl ConfirmKind {
    /// Case-insensitive prefix match of the raw answer.
    pub fn accepts(self, answer: &str) -> bool {
        let answer = answer.trim_start().to_ascii_lowercase();
        match self {
            Self::Create => answer.starts_with('y'),
            Self::Overwrite => answer.starts_with("yes"),
        }
    }

    /// Hint shown after the question.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Create => "[y/N]",
            Self::Overwrite => "[yes/NO]",
        }
    }
}

/// A question put to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub kind: ConfirmKind,
    pub message: String,
    /// Files the answer applies to, in list-file form.
    pub files: Vec<String>,
}

impl ConfirmPrompt {
    pub fn new(kind: ConfirmKind, message: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            files,
        }
    }
}
