//! Application layer for Firmkit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, RegistryService, TargetResolver)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    LineListStore, RegistrationReport, RegistryService, ResolveOptions, ScaffoldPlan,
    ScaffoldReport, ScaffoldService, TargetResolver,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Clock, Confirm, ConfirmKind, ConfirmPrompt, Filesystem, TemplateStore};

pub use error::ApplicationError;
