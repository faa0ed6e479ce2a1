pub mod build_file_set;
pub mod common;
pub mod layout;
pub mod module;
pub mod tag_mapping;
pub mod target_record;

pub use crate::domain::DomainError;
pub use build_file_set::BuildFileSet;
pub use layout::ProjectLayout;
pub use module::{ModuleLayout, ScaffoldRequest};
pub use tag_mapping::TagMapping;
pub use target_record::TargetRecord;
