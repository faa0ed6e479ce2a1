//! `firmkit init`: prepare a firmware project for scaffolding.
//!
//! Writes `.firmkit.toml`, creates the registry and firmware lists when
//! absent, and seeds the template directory with the bundled templates.
//! Existing lists and templates are never touched.

use std::sync::Arc;

use tracing::{debug, instrument};

use firmkit_adapters::{BuiltinTemplateStore, LocalFilesystem};
use firmkit_core::{
    application::LineListStore,
    domain::{ProjectLayout, RelativePath, TemplateKind},
    error::FirmkitResult,
};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(project_dir = %global.project_dir.display()))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    output.info(&format!(
        "Initialising firmware project in {}...",
        global.project_dir.display()
    ))?;

    write_config(&args, &global, &config, &output)?;

    let store = LineListStore::new(Arc::new(LocalFilesystem::new()), global.project_dir.clone());
    let created = bootstrap(&store, &config.layout)?;
    for path in &created {
        output.print(&format!("  created {path}"))?;
    }

    output.success("Project ready for 'firmkit new'")?;
    Ok(())
}

fn write_config(
    args: &InitArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let config_path = AppConfig::project_config_path(&global.project_dir);

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    std::fs::create_dir_all(&global.project_dir).with_cli_context(|| {
        format!(
            "Failed to create project directory '{}'",
            global.project_dir.display()
        )
    })?;
    std::fs::write(&config_path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!("Configuration written to {}", config_path.display()))?;
    Ok(())
}

/// Create whatever list files and templates are missing.
fn bootstrap(store: &LineListStore, layout: &ProjectLayout) -> FirmkitResult<Vec<RelativePath>> {
    let mut created = Vec::new();

    for list in [
        layout.registry()?,
        layout.release_sources()?,
        layout.release_includes()?,
    ] {
        if !store.exists(&list) {
            store.write(&list, "")?;
            created.push(list);
        }
    }

    for kind in TemplateKind::ALL {
        let template = layout.template(kind)?;
        if store.exists(&template) {
            debug!(path = %template, "Keeping existing template");
            continue;
        }
        store.write(&template, BuiltinTemplateStore::text(kind))?;
        created.push(template);
    }

    Ok(created)
}
