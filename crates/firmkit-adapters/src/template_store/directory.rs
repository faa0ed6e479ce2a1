//! Templates read from a directory on disk.
//!
//! # Resolution order
//!
//! [`DirectoryTemplateStore::discover`] picks the first of:
//!
//! 1. **`$FIRMKIT_TEMPLATES_DIR`** - environment variable override.
//! 2. **`<project-dir>/<template_dir>`** - the project's own templates
//!    (`Templates/` by default).
//!
//! Each kind is read from `<dir>/<kind file name>` on every load.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use firmkit_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{RelativePath, TemplateKind},
    error::{FirmkitError, FirmkitResult},
};

/// Environment variable naming an alternative template directory.
pub const TEMPLATES_DIR_ENV: &str = "FIRMKIT_TEMPLATES_DIR";

/// Loads `cpptemplate.tmp`, `hpptemplate.tmp` and `utesttemplate.tmp` from
/// one directory.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    dir: PathBuf,
}

impl DirectoryTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store for a project, honouring `$FIRMKIT_TEMPLATES_DIR`.
    #[instrument(skip_all, fields(project_dir = %project_dir.display()))]
    pub fn discover(project_dir: &Path, template_dir: &RelativePath) -> Self {
        if let Some(dir) = std::env::var_os(TEMPLATES_DIR_ENV).filter(|d| !d.is_empty()) {
            let dir = PathBuf::from(dir);
            debug!(path = %dir.display(), "Templates from ${}", TEMPLATES_DIR_ENV);
            return Self::new(dir);
        }
        let dir = template_dir.under(project_dir);
        debug!(path = %dir.display(), "Templates from project");
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, kind: TemplateKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn load(&self, kind: TemplateKind) -> FirmkitResult<String> {
        let path = self.path_of(kind);
        debug!(path = %path.display(), %kind, "Loading template");
        std::fs::read_to_string(&path).map_err(|e| -> FirmkitError {
            if e.kind() == std::io::ErrorKind::NotFound {
                ApplicationError::TemplateNotFound { kind, path }.into()
            } else {
                ApplicationError::FilesystemError {
                    reason: format!("Failed to read template: {}", e),
                    path,
                }
                .into()
            }
        })
    }
}
