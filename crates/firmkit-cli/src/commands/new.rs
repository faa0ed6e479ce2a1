//! Implementation of the `firmkit new` command.
//!
//! Responsibility: merge CLI arguments with configured defaults into a
//! `ScaffoldRequest`, wire the adapters, call the core scaffold service and
//! display results. No business logic lives here.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use firmkit_adapters::{
    AutoConfirm, BuiltinTemplateStore, DirectoryTemplateStore, LocalFilesystem, SystemClock,
};
use firmkit_core::{
    application::{
        ScaffoldPlan, ScaffoldReport, ScaffoldService,
        ports::{Confirm, ConfirmKind, TemplateStore},
    },
    domain::ScaffoldRequest,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::TerminalConfirm,
};

/// Execute the `firmkit new` command.
///
/// 1. Build the request from flags, falling back to config defaults
/// 2. Pick the template store and the confirmation source
/// 3. `--dry-run`: print the plan and stop
/// 4. Otherwise scaffold and report what changed
#[instrument(skip_all, fields(module = ?args.module))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = build_request(&args, &config);
    debug!(?request, "Request assembled");

    let service = build_service(&args, &global, &config);

    if args.dry_run {
        let plan = service.plan(&request)?;
        return show_plan(&plan, &output);
    }

    output.header(&format!(
        "Scaffolding '{}'...",
        request.module.as_deref().unwrap_or_default()
    ))?;

    let report = service.scaffold(&request).map_err(|e| {
        if e.is_cancelled() {
            CliError::Cancelled
        } else {
            CliError::Core(e)
        }
    })?;

    info!(module = %report.module, "Scaffold completed");
    show_report(&report, &config, &output)
}

/// Flags win over `[defaults]` from the configuration.
pub fn build_request(args: &NewArgs, config: &AppConfig) -> ScaffoldRequest {
    let defaults = &config.defaults;
    ScaffoldRequest {
        module: args.module.clone(),
        path: args.path.clone(),
        namespace: args.namespace.clone().or_else(|| defaults.namespace.clone()),
        author: args.author.clone().or_else(|| defaults.author.clone()),
        email: args.email.clone().or_else(|| defaults.email.clone()),
        mode: args.mode.unwrap_or(defaults.mode),
    }
}

fn build_service(args: &NewArgs, global: &GlobalArgs, config: &AppConfig) -> ScaffoldService {
    let layout = config.layout.clone();

    let templates: Box<dyn TemplateStore> =
        if args.builtin_templates || config.defaults.builtin_templates {
            debug!("Using bundled templates");
            Box::new(BuiltinTemplateStore::new())
        } else {
            Box::new(DirectoryTemplateStore::discover(
                &global.project_dir,
                &layout.template_dir,
            ))
        };

    let confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AutoConfirm::yes())
    } else {
        Box::new(TerminalConfirm::new())
    };

    ScaffoldService::new(
        Arc::new(LocalFilesystem::new()),
        templates,
        confirm,
        Box::new(SystemClock),
        global.project_dir.clone(),
        layout,
    )
}

// ── Display ───────────────────────────────────────────────────────────────────

fn show_plan(plan: &ScaffoldPlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&serde_json::json!({
            "module": plan.module.module,
            "root": plan.module.root.to_list_entry(),
            "mode": plan.module.policy.mode,
            "overwrite": plan.confirm == ConfirmKind::Overwrite,
            "files": plan.files,
            "list_changes": plan.list_changes,
        }))?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would scaffold '{}' ({}) in {}",
        plan.module.module,
        plan.module.policy.mode,
        plan.module.root.to_list_entry(),
    ))?;
    for file in &plan.files {
        let verb = if file.exists { "overwrite" } else { "create" };
        output.print(&format!("  {verb:<9} {}", file.path))?;
    }
    for change in &plan.list_changes {
        output.print(&format!("  {:<9} {}", "update", change.file()))?;
    }
    Ok(())
}

fn show_report(report: &ScaffoldReport, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    for file in &report.files_written {
        output.print(&format!("  wrote  {file}"))?;
    }
    for appended in &report.registration.appended {
        output.print(&format!("  added  {} -> {}", appended.line, appended.file))?;
    }

    let verb = if report.overwritten { "regenerated" } else { "created" };
    output.success(&format!("Module '{}' {verb} in {}", report.module, report.root))?;

    let newly = config
        .layout
        .registry()
        .map(|registry| report.registration.newly_registered(&registry))
        .unwrap_or(false);
    if !newly {
        output.info(&format!("Target '{}' was already registered", report.module))?;
    }

    if !report.unresolved_tags.is_empty() {
        output.warning(&format!(
            "No value for {}; set it with a flag or in [defaults]",
            report.unresolved_tags.join(", ")
        ))?;
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use firmkit_core::domain::GenerationMode;

    fn args() -> NewArgs {
        NewArgs {
            module: Some("Sensor".into()),
            path: Some("Drivers/Sensor".into()),
            namespace: None,
            author: None,
            email: None,
            mode: None,
            yes: true,
            dry_run: false,
            builtin_templates: false,
        }
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.defaults.author = Some("Config Author".into());
        config.defaults.namespace = Some("Drivers".into());
        config.defaults.mode = GenerationMode::SourceOnly;
        config
    }

    #[test]
    fn config_fills_missing_flags() {
        let request = build_request(&args(), &config());
        assert_eq!(request.author.as_deref(), Some("Config Author"));
        assert_eq!(request.namespace.as_deref(), Some("Drivers"));
        assert_eq!(request.email, None);
        assert_eq!(request.mode, GenerationMode::SourceOnly);
    }

    #[test]
    fn flags_win_over_config() {
        let mut args = args();
        args.author = Some("Flag Author".into());
        args.mode = Some(GenerationMode::HeaderOnly);

        let request = build_request(&args, &config());
        assert_eq!(request.author.as_deref(), Some("Flag Author"));
        assert_eq!(request.mode, GenerationMode::HeaderOnly);
        assert_eq!(request.path.as_deref(), Some("Drivers/Sensor"));
    }
}
