//! Infrastructure adapters for Firmkit.
//!
//! This crate implements the ports defined in `firmkit-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod clock;
pub mod confirm;
pub mod filesystem;
pub mod template_store;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use confirm::AutoConfirm;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_store::{BuiltinTemplateStore, DirectoryTemplateStore};
