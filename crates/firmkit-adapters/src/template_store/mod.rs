//! Template store adapters.

mod builtin;
mod directory;

pub use builtin::BuiltinTemplateStore;
pub use directory::{DirectoryTemplateStore, TEMPLATES_DIR_ENV};
