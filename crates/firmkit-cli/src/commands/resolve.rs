//! Implementation of the `firmkit resolve` command.

use std::sync::Arc;

use tracing::instrument;

use firmkit_adapters::LocalFilesystem;
use firmkit_core::{
    application::{ResolveOptions, TargetResolver},
    domain::{BuildFileSet, PostStep},
};

use crate::{
    cli::{GlobalArgs, ResolveArgs, ResolveFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Resolve one target and print its build file set.
#[instrument(skip_all, fields(target = %args.target))]
pub fn execute(
    args: ResolveArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    if args.target.is_empty() || args.target.contains(char::is_whitespace) {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is not a target name", args.target),
        });
    }

    let resolver = TargetResolver::new(
        Arc::new(LocalFilesystem::new()),
        global.project_dir,
        config.layout,
    );
    let set = resolver.resolve(
        &args.target,
        ResolveOptions {
            debug: args.debug,
            step: args.step,
        },
    )?;

    if args.format == ResolveFormat::Json || output.is_json() {
        output.json(&set)?;
    } else {
        for line in render_text(&set) {
            output.data(&line)?;
        }
    }
    Ok(())
}

/// Sectioned text; empty sections are skipped.
fn render_text(set: &BuildFileSet) -> Vec<String> {
    let mut lines = vec![
        format!("target:  {} ({}, step {})", set.target, set.kind, set.step),
        format!("output:  {}", set.output),
    ];
    if set.debug {
        lines.push("debug:   yes".into());
    }

    let sections: [(&str, &[String]); 8] = [
        ("sources", set.sources.as_slice()),
        ("includes", set.includes.as_slice()),
        ("c_flags", set.c_flags.as_slice()),
        ("cxx_flags", set.cxx_flags.as_slice()),
        ("ld_flags", set.ld_flags.as_slice()),
        ("as_flags", set.as_flags.as_slice()),
        ("platform_objects", set.platform_objects.as_slice()),
        ("objects", set.objects.as_slice()),
    ];
    for (title, entries) in sections {
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("{title}:"));
        lines.extend(entries.iter().map(|e| format!("  {e}")));
    }

    if !set.post_steps.is_empty() {
        lines.push("post_steps:".into());
        lines.extend(set.post_steps.iter().map(|s| format!("  {}", describe(s))));
    }
    lines
}

fn describe(step: &PostStep) -> String {
    match step {
        PostStep::BinaryImage { elf, bin } => format!("binary-image {elf} -> {bin}"),
        PostStep::RunTests { executable, log } => format!("run-tests {executable} > {log}"),
        PostStep::Coverage {
            test_source,
            report,
        } => format!("coverage {test_source} -> {report}"),
        PostStep::StaticAnalysis { log } => format!("static-analysis > {log}"),
    }
}
