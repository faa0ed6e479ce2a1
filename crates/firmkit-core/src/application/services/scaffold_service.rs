//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the module scaffolding workflow:
//! 1. Validate the request and derive the module layout
//! 2. Ask for confirmation (create, or overwrite when files exist)
//! 3. Render every template in memory
//! 4. Write the files
//! 5. Register the module as a build target
//!
//! Nothing is written when validation, confirmation or rendering fails.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Clock, Confirm, ConfirmKind, ConfirmPrompt, Filesystem, TemplateStore},
        services::{
            line_store::LineListStore,
            registry_service::{ListChange, RegistrationReport, RegistryService},
        },
    },
    domain::{
        DomainValidator as validator, ModuleLayout, ProjectLayout, RelativePath, ScaffoldRequest,
        TagMapping, TemplateKind,
    },
    error::FirmkitResult,
};

/// A file the run would generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub kind: TemplateKind,
    pub path: String,
    pub exists: bool,
}

/// Everything a scaffolding run would do, computed without writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub module: ModuleLayout,
    pub tags: TagMapping,
    pub files: Vec<PlannedFile>,
    pub list_changes: Vec<ListChange>,
    pub confirm: ConfirmKind,
}

impl ScaffoldPlan {
    /// Guarded files that already exist.
    pub fn overwrites(&self) -> Vec<&str> {
        self.module
            .guarded_files()
            .into_iter()
            .filter_map(|guarded| {
                self.files
                    .iter()
                    .find(|f| f.exists && f.path == guarded.as_str())
                    .map(|f| f.path.as_str())
            })
            .collect()
    }

    pub fn prompt(&self) -> ConfirmPrompt {
        let message = match self.confirm {
            ConfirmKind::Overwrite => format!(
                "Module '{}' already exists. Overwrite its files?",
                self.module.module
            ),
            ConfirmKind::Create => format!(
                "Create module '{}' ({})?",
                self.module.module, self.module.policy.mode
            ),
        };
        let files = self.files.iter().map(|f| f.path.clone()).collect();
        ConfirmPrompt::new(self.confirm, message, files)
    }
}

/// Outcome of a completed scaffolding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub module: String,
    pub root: String,
    pub files_written: Vec<String>,
    pub overwritten: bool,
    pub registration: RegistrationReport,
    /// Tag tokens left verbatim in generated files.
    pub unresolved_tags: Vec<String>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    templates: Box<dyn TemplateStore>,
    confirm: Box<dyn Confirm>,
    clock: Box<dyn Clock>,
    store: LineListStore,
    registry: RegistryService,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use firmkit_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     filesystem, // Arc<dyn Filesystem>
    ///     templates,  // Box<dyn TemplateStore>
    ///     confirm,    // Box<dyn Confirm>
    ///     clock,      // Box<dyn Clock>
    ///     "/path/to/firmware",
    ///     ProjectLayout::default(),
    /// );
    /// ```
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        templates: Box<dyn TemplateStore>,
        confirm: Box<dyn Confirm>,
        clock: Box<dyn Clock>,
        project_dir: impl Into<PathBuf>,
        layout: ProjectLayout,
    ) -> Self {
        let store = LineListStore::new(filesystem, project_dir);
        let registry = RegistryService::new(store.clone(), layout);
        Self {
            templates,
            confirm,
            clock,
            store,
            registry,
        }
    }

    pub fn registry(&self) -> &RegistryService {
        &self.registry
    }

    /// Work out what scaffolding `request` would do. Writes nothing.
    #[instrument(skip_all, fields(module = ?request.module, mode = %request.mode))]
    pub fn plan(&self, request: &ScaffoldRequest) -> FirmkitResult<ScaffoldPlan> {
        validator::validate_request(request)?;
        let layout = self.registry.layout();

        let module = ModuleLayout::for_request(request, layout)?;
        let tags = request.tag_mapping(layout)?.with_date(self.clock.today())?;

        let files: Vec<PlannedFile> = module
            .generated_files()
            .into_iter()
            .map(|(kind, path)| PlannedFile {
                kind,
                path: path.as_str().to_string(),
                exists: self.store.exists(path),
            })
            .collect();

        let overwrite = module.guarded_files().into_iter().any(|p| self.store.exists(p));
        let list_changes = self.registry.changes(&module)?;

        Ok(ScaffoldPlan {
            module,
            tags,
            files,
            list_changes,
            confirm: if overwrite {
                ConfirmKind::Overwrite
            } else {
                ConfirmKind::Create
            },
        })
    }

    /// Generate the module's files and register it as a build target.
    #[instrument(skip_all, fields(module = ?request.module, mode = %request.mode))]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> FirmkitResult<ScaffoldReport> {
        let plan = self.plan(request)?;
        info!(
            module = %plan.module.module,
            files = plan.files.len(),
            "Scaffolding module"
        );

        if !self.confirm.confirm(&plan.prompt()) {
            info!("Declined, nothing written");
            return Err(ApplicationError::UserCancelled.into());
        }

        let rendered = self.render_all(&plan)?;

        let mut unresolved = Vec::new();
        for (_, _, content) in &rendered {
            for token in TagMapping::unresolved(content) {
                if !unresolved.contains(&token) {
                    unresolved.push(token);
                }
            }
        }
        if !unresolved.is_empty() {
            warn!(tags = ?unresolved, "Templates contain tags with no value");
        }

        let mut files_written = Vec::with_capacity(rendered.len());
        for (_, path, content) in &rendered {
            self.store.write(path, content)?;
            files_written.push(path.as_str().to_string());
        }

        let registration = self.registry.register_target(&plan.module)?;

        info!(files = files_written.len(), "Scaffold completed successfully");
        Ok(ScaffoldReport {
            module: plan.module.module.clone(),
            root: plan.module.root.to_list_entry(),
            files_written,
            overwritten: plan.confirm == ConfirmKind::Overwrite,
            registration,
            unresolved_tags: unresolved,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Load and render every planned file before anything is written.
    fn render_all(
        &self,
        plan: &ScaffoldPlan,
    ) -> FirmkitResult<Vec<(TemplateKind, RelativePath, String)>> {
        plan.module
            .generated_files()
            .into_iter()
            .map(|(kind, path)| {
                let template = self.templates.load(kind)?;
                Ok((kind, path.clone(), plan.tags.render(&template)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::NaiveDate;

    use super::*;
    use crate::application::ports::{MockClock, MockConfirm, MockFilesystem, MockTemplateStore};
    use crate::domain::GenerationMode;
    use crate::error::{ErrorCategory, FirmkitError};

    fn clock() -> Box<MockClock> {
        let mut clock = MockClock::new();
        clock
            .expect_today()
            .return_const(NaiveDate::from_ymd_opt(2018, 8, 5).unwrap());
        Box::new(clock)
    }

    fn templates() -> Box<MockTemplateStore> {
        let mut store = MockTemplateStore::new();
        store
            .expect_load()
            .returning(|kind| Ok(format!("{kind} <__MODULE__> <__DATE__>")));
        Box::new(store)
    }

    #[test]
    fn declined_prompt_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_write_file().never();
        fs.expect_append_file().never();

        let mut confirm = MockConfirm::new();
        confirm
            .expect_confirm()
            .withf(|p| p.kind == ConfirmKind::Create)
            .times(1)
            .return_const(false);

        let service = ScaffoldService::new(
            Arc::new(fs),
            templates(),
            Box::new(confirm),
            clock(),
            "/p",
            ProjectLayout::default(),
        );

        let err = service
            .scaffold(&ScaffoldRequest::new("Sensor").with_path("Drivers/Sensor"))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Cancelled);
    }

    #[test]
    fn existing_header_requires_overwrite_confirmation() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p == Path::new("/p/Hal_Api/include/Hal_Gpio.hpp"));

        let service = ScaffoldService::new(
            Arc::new(fs),
            templates(),
            Box::new(MockConfirm::new()),
            clock(),
            "/p",
            ProjectLayout::default(),
        );

        let plan = service
            .plan(
                &ScaffoldRequest::new("Hal_Gpio")
                    .with_path("Hal_Api")
                    .with_mode(GenerationMode::HeaderOnly),
            )
            .unwrap();
        assert_eq!(plan.confirm, ConfirmKind::Overwrite);
        assert_eq!(plan.overwrites(), vec!["Hal_Api/include/Hal_Gpio.hpp"]);
        assert!(plan.prompt().message.contains("Overwrite"));
    }

    #[test]
    fn missing_template_aborts_before_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_write_file().never();

        let mut store = MockTemplateStore::new();
        store.expect_load().returning(|kind| {
            Err(ApplicationError::TemplateNotFound {
                kind,
                path: PathBuf::from("Templates").join(kind.file_name()),
            }
            .into())
        });

        let mut confirm = MockConfirm::new();
        confirm.expect_confirm().return_const(true);

        let service = ScaffoldService::new(
            Arc::new(fs),
            Box::new(store),
            Box::new(confirm),
            clock(),
            "/p",
            ProjectLayout::default(),
        );

        let err = service.scaffold(&ScaffoldRequest::new("Sensor")).unwrap_err();
        assert!(matches!(
            err,
            FirmkitError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn missing_module_fails_validation() {
        let service = ScaffoldService::new(
            Arc::new(MockFilesystem::new()),
            templates(),
            Box::new(MockConfirm::new()),
            clock(),
            "/p",
            ProjectLayout::default(),
        );
        let err = service.plan(&ScaffoldRequest::default()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.to_string(), "module name required");
    }
}
