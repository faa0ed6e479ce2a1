//! Domain value objects: GenerationMode, ModePolicy, TemplateKind,
//! TemplateVariable, BuildStep, TargetKind.
//!
//! # Design
//!
//! Plain `Copy` values compared by content.
//! The per-mode file rules live in a single lookup table
//! ([`MODE_POLICIES`]); control flow elsewhere asks the policy, never the
//! mode directly.
//!
//! A new mode needs its variant, its `as_str`/`FromStr` arms and a
//! `MODE_POLICIES` row.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── GenerationMode ────────────────────────────────────────────────────────────

/// Which parts of a module a scaffolding run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    #[default]
    Full,
    SourceOnly,
    HeaderOnly,
    HeaderWithTests,
}

impl GenerationMode {
    pub const ALL: [Self; 4] = [
        Self::Full,
        Self::SourceOnly,
        Self::HeaderOnly,
        Self::HeaderWithTests,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::SourceOnly => "source-only",
            Self::HeaderOnly => "header-only",
            Self::HeaderWithTests => "header-with-tests",
        }
    }

    /// The file/registry policy for this mode.
    pub fn policy(self) -> ModePolicy {
        ModePolicy::for_mode(self)
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = DomainError;

    /// Accepts the kebab-case names plus the legacy `--hal` spellings
    /// (`source`, `header`, `header_with_tests`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "full" => Ok(Self::Full),
            "source-only" | "source" | "sources" => Ok(Self::SourceOnly),
            "header-only" | "header" => Ok(Self::HeaderOnly),
            "header-with-tests" => Ok(Self::HeaderWithTests),
            _ => Err(DomainError::UnknownGenerationMode(s.to_string())),
        }
    }
}

// ── ModePolicy ────────────────────────────────────────────────────────────────

/// What a generation mode produces and registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModePolicy {
    pub mode: GenerationMode,
    /// `<path>/sources/<M>.<src>` is generated.
    pub implementation: bool,
    /// `<path>/include/<M>.<hdr>` is generated.
    pub header: bool,
    /// `<path>/tests/<Prefix>_<M>.<src>` is generated.
    pub test: bool,
    /// The implementation file goes into the unit-test source list.
    pub source_list: bool,
    /// The include directory goes into the include lists.
    pub include_list: bool,
    /// The implementation file goes into the release source list.
    pub release_sources: bool,
}

/// The decision table, one row per mode.
pub const MODE_POLICIES: [ModePolicy; 4] = [
    ModePolicy {
        mode: GenerationMode::Full,
        implementation: true,
        header: true,
        test: true,
        source_list: true,
        include_list: true,
        release_sources: true,
    },
    ModePolicy {
        mode: GenerationMode::SourceOnly,
        implementation: true,
        header: false,
        test: true,
        source_list: true,
        include_list: false,
        release_sources: true,
    },
    ModePolicy {
        mode: GenerationMode::HeaderOnly,
        implementation: false,
        header: true,
        test: false,
        source_list: false,
        include_list: true,
        release_sources: false,
    },
    ModePolicy {
        mode: GenerationMode::HeaderWithTests,
        implementation: false,
        header: true,
        test: true,
        source_list: false,
        include_list: true,
        release_sources: false,
    },
];

impl ModePolicy {
    pub fn for_mode(mode: GenerationMode) -> Self {
        MODE_POLICIES
            .iter()
            .copied()
            .find(|p| p.mode == mode)
            .unwrap_or(MODE_POLICIES[0])
    }

    /// Template kinds produced under this policy, in generation order.
    pub fn template_kinds(&self) -> Vec<TemplateKind> {
        let mut kinds = Vec::with_capacity(3);
        if self.implementation {
            kinds.push(TemplateKind::Source);
        }
        if self.test {
            kinds.push(TemplateKind::UnitTest);
        }
        if self.header {
            kinds.push(TemplateKind::Header);
        }
        kinds
    }
}

// ── TemplateKind ──────────────────────────────────────────────────────────────

/// One of the three files a module consists of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Source,
    Header,
    UnitTest,
}

impl TemplateKind {
    pub const ALL: [Self; 3] = [Self::Source, Self::UnitTest, Self::Header];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Header => "header",
            Self::UnitTest => "unit-test",
        }
    }

    /// Template file name inside the template directory.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Source => "cpptemplate.tmp",
            Self::Header => "hpptemplate.tmp",
            Self::UnitTest => "utesttemplate.tmp",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TemplateVariable ──────────────────────────────────────────────────────────

/// The closed set of placeholders templates may use.
///
/// Declaration order is the substitution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateVariable {
    Module,
    Namespace,
    Author,
    Email,
    Path,
    HeaderGuard,
    Class,
    Date,
    Year,
}

impl TemplateVariable {
    pub const ALL: [Self; 9] = [
        Self::Module,
        Self::Namespace,
        Self::Author,
        Self::Email,
        Self::Path,
        Self::HeaderGuard,
        Self::Class,
        Self::Date,
        Self::Year,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Module => "MODULE",
            Self::Namespace => "NAMESPACE",
            Self::Author => "AUTHOR",
            Self::Email => "EMAIL",
            Self::Path => "PATH",
            Self::HeaderGuard => "HEADERGUARD",
            Self::Class => "CLASS",
            Self::Date => "DATE",
            Self::Year => "YEAR",
        }
    }

    /// Look up a variable by its bare name (`MODULE`, not `<__MODULE__>`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == name)
    }

    /// Literal token as it appears in templates, e.g. `<__MODULE__>`.
    pub fn token(&self) -> String {
        tag_token(self.name())
    }
}

impl fmt::Display for TemplateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Wrap a tag name in the placeholder syntax.
pub fn tag_token(name: &str) -> String {
    format!("<__{name}__>")
}

// ── BuildStep ─────────────────────────────────────────────────────────────────

/// Which stage of the build the environment is about to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildStep {
    #[default]
    Build,
    UnitTest,
    Coverage,
    Cppcheck,
}

impl BuildStep {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::UnitTest => "unit-test",
            Self::Coverage => "coverage",
            Self::Cppcheck => "cppcheck",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "build" => Ok(Self::Build),
            "unit-test" | "test" => Ok(Self::UnitTest),
            "coverage" => Ok(Self::Coverage),
            "cppcheck" => Ok(Self::Cppcheck),
            _ => Err(DomainError::UnknownBuildStep(s.to_string())),
        }
    }
}

// ── TargetKind ────────────────────────────────────────────────────────────────

/// Firmware image or one module's unit-test executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    Firmware,
    UnitTest,
}

impl TargetKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Firmware => "firmware",
            Self::UnitTest => "unit-test",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
