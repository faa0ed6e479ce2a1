//! The resolved description of one compilable target.
//!
//! Purely descriptive: paths and flags for the external build environment,
//! which owns compiling, linking and every post step listed here.

use serde::Serialize;

use crate::domain::value_objects::{BuildStep, TargetKind};

/// Everything one target needs to be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFileSet {
    pub target: String,
    pub kind: TargetKind,
    pub step: BuildStep,
    pub sources: Vec<String>,
    pub includes: Vec<String>,
    pub c_flags: Vec<String>,
    pub cxx_flags: Vec<String>,
    pub ld_flags: Vec<String>,
    pub as_flags: Vec<String>,
    /// Startup/system objects, firmware only.
    pub platform_objects: Vec<String>,
    /// One object file per entry of `sources`, same order.
    pub objects: Vec<String>,
    /// Linked executable or ELF image.
    pub output: String,
    /// Debug flags were injected into `c_flags` and `cxx_flags`.
    pub debug: bool,
    pub post_steps: Vec<PostStep>,
}

impl BuildFileSet {
    pub fn is_firmware(&self) -> bool {
        self.kind == TargetKind::Firmware
    }

    /// Whether the environment must convert the linked image to a binary.
    pub fn needs_binary_image(&self) -> bool {
        self.post_steps
            .iter()
            .any(|s| matches!(s, PostStep::BinaryImage { .. }))
    }
}

/// Work the build environment runs after linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum PostStep {
    /// ELF → raw binary conversion of the firmware image.
    BinaryImage { elf: String, bin: String },
    /// Run the unit-test executable, logging to `log`.
    RunTests { executable: String, log: String },
    /// Collect coverage for the module's unit-test source.
    Coverage { test_source: String, report: String },
    /// Static analysis over the target's sources and includes.
    StaticAnalysis { log: String },
}

/// Append `items` to `into`, skipping anything already present.
pub(crate) fn append_unique(into: &mut Vec<String>, items: impl IntoIterator<Item = String>) {
    for item in items {
        if !into.contains(&item) {
            into.push(item);
        }
    }
}
