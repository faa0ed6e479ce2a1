//! Firmkit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Firmkit
//! firmware module scaffolding and build-target registry tool, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           firmkit-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, RegistryService,     │
//! │   TargetResolver, LineListStore)        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateStore, Confirm,    │
//! │  Clock)                                 │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    firmkit-adapters (Infrastructure)    │
//! │ (LocalFilesystem, BuiltinTemplateStore) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (TagMapping, ModePolicy, ModuleLayout,  │
//! │  TargetRecord, BuildFileSet)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use firmkit_core::prelude::*;
//!
//! let resolver = TargetResolver::new(filesystem, "./firmware", ProjectLayout::default());
//! let set = resolver.resolve("Sensor", ResolveOptions::default())?;
//! println!("{}", set.sources.join(" "));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, LineListStore, RegistrationReport, RegistryService, ResolveOptions,
        ScaffoldPlan, ScaffoldReport, ScaffoldService, TargetResolver,
        ports::{Clock, Confirm, ConfirmKind, ConfirmPrompt, Filesystem, TemplateStore},
    };
    pub use crate::domain::{
        BuildFileSet, BuildStep, DomainError, GenerationMode, ModuleLayout, PostStep,
        ProjectLayout, RelativePath, ScaffoldRequest, TagMapping, TargetKind, TargetRecord,
        TemplateKind, TemplateVariable,
    };
    pub use crate::error::{ErrorCategory, FirmkitError, FirmkitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
