//! Build registry aggregator.
//!
//! Keeps the per-target lists, the firmware lists and the target registry in
//! step with the modules that have been scaffolded.

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::services::line_store::LineListStore,
    domain::{DomainValidator, ModuleLayout, ProjectLayout, RelativePath, TargetRecord},
    error::FirmkitResult,
};

/// One change to a list file, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ListChange {
    /// The file is rewritten with exactly these lines.
    Overwrite { file: String, lines: Vec<String> },
    /// The line is appended unless the file already contains it.
    Append { file: String, line: String },
}

impl ListChange {
    pub fn file(&self) -> &str {
        match self {
            Self::Overwrite { file, .. } | Self::Append { file, .. } => file,
        }
    }
}

/// A line that was actually appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendedLine {
    pub file: String,
    pub line: String,
}

/// Outcome of registering one target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    pub target: String,
    /// Per-target lists rewritten.
    pub lists_written: Vec<String>,
    /// Appends that changed a file; skipped appends are absent.
    pub appended: Vec<AppendedLine>,
}

impl RegistrationReport {
    /// Whether this run added the registry line.
    pub fn newly_registered(&self, registry: &RelativePath) -> bool {
        self.appended.iter().any(|a| a.file == registry.as_str())
    }
}

/// Registers modules as build targets.
#[derive(Clone)]
pub struct RegistryService {
    store: LineListStore,
    layout: ProjectLayout,
}

impl RegistryService {
    pub fn new(store: LineListStore, layout: ProjectLayout) -> Self {
        Self { store, layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// The changes registering `module` would make. Touches nothing.
    ///
    /// The registry append is always the last change.
    pub fn changes(&self, module: &ModuleLayout) -> FirmkitResult<Vec<ListChange>> {
        let policy = module.policy;
        let name = module.module.as_str();

        let mut sources = Vec::new();
        if policy.source_list {
            sources.push(module.implementation.to_build_entry());
        }
        if policy.test {
            sources.push(module.test.to_build_entry());
        }

        let mut includes = self.layout.unit_test_common_includes.clone();
        if policy.source_list {
            includes.push(module.sources_dir.to_build_entry());
        }
        if policy.include_list {
            includes.push(module.include_dir.to_build_entry());
        }

        let mut changes = vec![
            ListChange::Overwrite {
                file: self.layout.unit_test_sources(name)?.to_string(),
                lines: sources,
            },
            ListChange::Overwrite {
                file: self.layout.unit_test_includes(name)?.to_string(),
                lines: includes,
            },
        ];

        if policy.release_sources {
            changes.push(ListChange::Append {
                file: self.layout.release_sources()?.to_string(),
                line: module.implementation.to_build_entry(),
            });
        }
        if policy.include_list {
            changes.push(ListChange::Append {
                file: self.layout.release_includes()?.to_string(),
                line: module.include_dir.to_build_entry(),
            });
        }

        let record = TargetRecord::new(name, &module.root);
        DomainValidator::validate_record(&record)?;
        changes.push(ListChange::Append {
            file: self.layout.registry()?.to_string(),
            line: record.to_line(),
        });

        Ok(changes)
    }

    /// Write the target's lists, then its registry line.
    #[instrument(skip_all, fields(target = %module.module, root = %module.root))]
    pub fn register_target(&self, module: &ModuleLayout) -> FirmkitResult<RegistrationReport> {
        let mut report = RegistrationReport {
            target: module.module.clone(),
            ..RegistrationReport::default()
        };

        for change in self.changes(module)? {
            let file = RelativePath::try_new(change.file())?;
            match change {
                ListChange::Overwrite { file: name, lines } => {
                    self.store.overwrite_list(&file, &lines)?;
                    report.lists_written.push(name);
                }
                ListChange::Append { file: name, line } => {
                    if self.store.append_line_if_absent(&file, &line)? {
                        report.appended.push(AppendedLine { file: name, line });
                    }
                }
            }
        }

        info!(
            lists = report.lists_written.len(),
            appended = report.appended.len(),
            "Target registered"
        );
        Ok(report)
    }

    /// Every registry record, in file order.
    ///
    /// A missing registry means nothing is registered yet.
    #[instrument(skip(self))]
    pub fn list_targets(&self) -> FirmkitResult<Vec<TargetRecord>> {
        let registry = self.layout.registry()?;
        if !self.store.exists(&registry) {
            return Ok(Vec::new());
        }
        self.store.read_records(&registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};
    use crate::domain::{GenerationMode, ScaffoldRequest};
    use crate::error::FirmkitError;
    use std::sync::Arc;

    fn service() -> RegistryService {
        let store = LineListStore::new(Arc::new(MockFilesystem::new()), "/p");
        RegistryService::new(store, ProjectLayout::default())
    }

    fn module(mode: GenerationMode) -> ModuleLayout {
        let req = ScaffoldRequest::new("Sensor")
            .with_path("Drivers/Sensor")
            .with_mode(mode);
        ModuleLayout::for_request(&req, &ProjectLayout::default()).unwrap()
    }

    #[test]
    fn full_mode_changes_in_order() {
        let changes = service().changes(&module(GenerationMode::Full)).unwrap();
        assert_eq!(
            changes,
            vec![
                ListChange::Overwrite {
                    file: "Build/SCons_UTest/UTest_Sensor_Sources.scons".into(),
                    lines: vec![
                        "./Drivers/Sensor/sources/Sensor.cpp".into(),
                        "./Drivers/Sensor/tests/UTest_Sensor.cpp".into(),
                    ],
                },
                ListChange::Overwrite {
                    file: "Build/SCons_UTest/UTest_Sensor_Include.scons".into(),
                    lines: vec![
                        "./Config/include".into(),
                        "./Drivers/Sensor/sources".into(),
                        "./Drivers/Sensor/include".into(),
                    ],
                },
                ListChange::Append {
                    file: "Build/SCons_Release/Sources.scons".into(),
                    line: "./Drivers/Sensor/sources/Sensor.cpp".into(),
                },
                ListChange::Append {
                    file: "Build/SCons_Release/Include.scons".into(),
                    line: "./Drivers/Sensor/include".into(),
                },
                ListChange::Append {
                    file: "Build/SCons_UTest/UTestTargets.scons".into(),
                    line: "Sensor Drivers/Sensor".into(),
                },
            ]
        );
    }

    #[test]
    fn header_only_writes_empty_sources_and_skips_release_sources() {
        let changes = service().changes(&module(GenerationMode::HeaderOnly)).unwrap();
        assert_eq!(
            changes[0],
            ListChange::Overwrite {
                file: "Build/SCons_UTest/UTest_Sensor_Sources.scons".into(),
                lines: vec![],
            }
        );
        let appended: Vec<_> = changes.iter().skip(2).map(ListChange::file).collect();
        assert_eq!(
            appended,
            vec![
                "Build/SCons_Release/Include.scons",
                "Build/SCons_UTest/UTestTargets.scons"
            ]
        );
    }

    #[test]
    fn source_only_skips_include_lists() {
        let changes = service().changes(&module(GenerationMode::SourceOnly)).unwrap();
        assert!(
            !changes
                .iter()
                .any(|c| c.file() == "Build/SCons_Release/Include.scons")
        );
        assert_eq!(
            changes.last().map(ListChange::file),
            Some("Build/SCons_UTest/UTestTargets.scons")
        );
    }

    #[test]
    fn root_module_registers_with_dot() {
        let req = ScaffoldRequest::new("Main");
        let m = ModuleLayout::for_request(&req, &ProjectLayout::default()).unwrap();
        let changes = service().changes(&m).unwrap();
        assert_eq!(
            changes.last(),
            Some(&ListChange::Append {
                file: "Build/SCons_UTest/UTestTargets.scons".into(),
                line: "Main .".into(),
            })
        );
    }

    #[test]
    fn failed_list_write_leaves_registry_untouched() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(2).returning(|p, _| {
            if p.ends_with("UTest_Sensor_Include.scons") {
                Err(ApplicationError::FilesystemError {
                    path: p.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        fs.expect_exists().never();
        fs.expect_read_to_string().never();
        fs.expect_append_file().never();
        let service = RegistryService::new(
            LineListStore::new(Arc::new(fs), "/p"),
            ProjectLayout::default(),
        );

        let err = service
            .register_target(&module(GenerationMode::Full))
            .unwrap_err();
        assert!(matches!(
            err,
            FirmkitError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
