// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Firmkit.
//!
//! This module contains pure logic with no I/O. File access, templates,
//! prompting and the clock are reached through ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few crates**: std + thiserror, serde for descriptive data, chrono for dates
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    build_file_set::{BuildFileSet, PostStep},
    common::RelativePath,
    layout::{BuildFiles, ProjectLayout},
    module::{ModuleLayout, ScaffoldRequest},
    tag_mapping::{TagMapping, class_name, header_guard},
    target_record::TargetRecord,
};

pub use error::DomainError;

pub use value_objects::{
    BuildStep, GenerationMode, MODE_POLICIES, ModePolicy, TargetKind, TemplateKind,
    TemplateVariable,
};

pub use validation::DomainValidator;
