//! Templates bundled into the binary.

use firmkit_core::{
    application::ports::TemplateStore, domain::TemplateKind, error::FirmkitResult,
};

const SOURCE: &str = include_str!("../../templates/cpptemplate.tmp");
const HEADER: &str = include_str!("../../templates/hpptemplate.tmp");
const UNIT_TEST: &str = include_str!("../../templates/utesttemplate.tmp");

/// Serves the bundled C++ module templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplateStore;

impl BuiltinTemplateStore {
    pub fn new() -> Self {
        Self
    }

    /// Bundled text for `kind`, also used by `init` to seed a project.
    pub fn text(kind: TemplateKind) -> &'static str {
        match kind {
            TemplateKind::Source => SOURCE,
            TemplateKind::Header => HEADER,
            TemplateKind::UnitTest => UNIT_TEST,
        }
    }
}

impl TemplateStore for BuiltinTemplateStore {
    fn load(&self, kind: TemplateKind) -> FirmkitResult<String> {
        Ok(Self::text(kind).to_string())
    }
}
