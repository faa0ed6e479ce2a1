//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a module" or "resolve a target".

pub mod line_store;
pub mod registry_service;
pub mod resolver_service;
pub mod scaffold_service;

pub use line_store::LineListStore;
pub use registry_service::{AppendedLine, ListChange, RegistrationReport, RegistryService};
pub use resolver_service::{ResolveOptions, TargetResolver};
pub use scaffold_service::{PlannedFile, ScaffoldPlan, ScaffoldReport, ScaffoldService};
