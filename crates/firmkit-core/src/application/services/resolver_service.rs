//! Build target resolver.
//!
//! Assembles the [`BuildFileSet`] for one target from the registry and the
//! list files. Every call re-reads the files; nothing is cached.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::line_store::LineListStore},
    domain::{
        BuildFileSet, BuildStep, PostStep, ProjectLayout, RelativePath, TargetKind, TargetRecord,
        entities::build_file_set::append_unique,
    },
    error::FirmkitResult,
};

/// How the build environment is about to use the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Inject debug flags (firmware only).
    pub debug: bool,
    pub step: BuildStep,
}

/// Resolves registered targets into build file sets.
pub struct TargetResolver {
    store: LineListStore,
    layout: ProjectLayout,
}

impl TargetResolver {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        project_dir: impl Into<PathBuf>,
        layout: ProjectLayout,
    ) -> Self {
        Self {
            store: LineListStore::new(filesystem, project_dir),
            layout,
        }
    }

    /// Resolve `target` into everything needed to compile it.
    #[instrument(skip(self), fields(step = %options.step, debug = options.debug))]
    pub fn resolve(&self, target: &str, options: ResolveOptions) -> FirmkitResult<BuildFileSet> {
        let kind = self.layout.target_kind(target);
        let root = match kind {
            TargetKind::Firmware => None,
            TargetKind::UnitTest => Some(self.lookup(target)?.root_path()?),
        };

        let files = self.layout.build_files(target)?;

        let mut sources = self.mandatory("sources", &files.sources)?;
        append_unique(&mut sources, self.optional(&files.shared_sources)?);

        let mut includes = self.mandatory("includes", &files.includes)?;
        append_unique(&mut includes, self.optional(&files.shared_includes)?);

        let mut c_flags = self.optional(&files.c_flags)?;
        let mut cxx_flags = self.optional(&files.cxx_flags)?;
        let ld_flags = self.optional(&files.ld_flags)?;
        let as_flags = self.optional(&files.as_flags)?;

        let output = self.layout.output(target)?;
        let mut platform_objects = Vec::new();
        let mut post_steps = Vec::new();
        let debug = options.debug && kind == TargetKind::Firmware;

        match kind {
            TargetKind::Firmware => {
                platform_objects = self.layout.platform_objects.clone();
                if debug {
                    append_unique(&mut c_flags, self.layout.debug_flags.iter().cloned());
                    append_unique(&mut cxx_flags, self.layout.debug_flags.iter().cloned());
                }
                post_steps.push(PostStep::BinaryImage {
                    elf: output.to_string(),
                    bin: self.layout.firmware_binary()?.to_string(),
                });
            }
            TargetKind::UnitTest => {
                if options.debug {
                    debug!("Debug flags apply to the firmware image only");
                }
                append_unique(
                    &mut includes,
                    self.layout.test_framework_includes.iter().cloned(),
                );
                if matches!(options.step, BuildStep::UnitTest | BuildStep::Coverage) {
                    post_steps.push(PostStep::RunTests {
                        executable: output.to_string(),
                        log: self.layout.unit_test_log(target)?.to_string(),
                    });
                }
                if options.step == BuildStep::Coverage {
                    let root = root.unwrap_or_else(RelativePath::root);
                    post_steps.push(PostStep::Coverage {
                        test_source: self.layout.test_source(&root, target)?.to_build_entry(),
                        report: self.layout.coverage_report(target)?.to_string(),
                    });
                }
            }
        }

        if options.step == BuildStep::Cppcheck {
            post_steps.push(PostStep::StaticAnalysis {
                log: self.layout.static_analysis_log(target)?.to_string(),
            });
        }

        let objects = sources
            .iter()
            .map(|s| self.layout.object_file(target, s).map(|o| o.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            target,
            kind = %kind,
            sources = sources.len(),
            includes = includes.len(),
            "Target resolved"
        );

        Ok(BuildFileSet {
            target: target.to_string(),
            kind,
            step: options.step,
            sources,
            includes,
            c_flags,
            cxx_flags,
            ld_flags,
            as_flags,
            platform_objects,
            objects,
            output: output.to_string(),
            debug,
            post_steps,
        })
    }

    /// Registry record of a non-firmware target, read fresh.
    fn lookup(&self, target: &str) -> FirmkitResult<TargetRecord> {
        let unknown = || ApplicationError::UnknownTarget {
            name: target.to_string(),
        };

        let registry = self.layout.registry()?;
        if !self.store.exists(&registry) {
            debug!(registry = %registry, "No registry yet");
            return Err(unknown().into());
        }

        let mut entries = self.store.read_registry(&registry)?;
        let attributes = entries.remove(target).ok_or_else(unknown)?;
        Ok(TargetRecord {
            name: target.to_string(),
            attributes,
        })
    }

    fn mandatory(&self, category: &'static str, path: &RelativePath) -> FirmkitResult<Vec<String>> {
        if !self.store.exists(path) {
            return Err(ApplicationError::MissingBuildFile {
                category,
                path: path.to_path_buf(),
            }
            .into());
        }
        self.store.read_list(path)
    }

    fn optional(&self, path: &RelativePath) -> FirmkitResult<Vec<String>> {
        if self.store.exists(path) {
            self.store.read_list(path)
        } else {
            Ok(Vec::new())
        }
    }
}
