//! Implementation of the `firmkit list` command.

use std::sync::Arc;

use serde::Serialize;

use firmkit_adapters::LocalFilesystem;
use firmkit_core::{
    application::{LineListStore, RegistryService},
    domain::TargetRecord,
};

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct TargetRow<'a> {
    name: &'a str,
    root: &'a str,
    metadata: &'a [String],
}

impl<'a> From<&'a TargetRecord> for TargetRow<'a> {
    fn from(record: &'a TargetRecord) -> Self {
        Self {
            name: &record.name,
            root: record.root(),
            metadata: record.metadata(),
        }
    }
}

/// Print the registered targets in registry order.
pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let store = LineListStore::new(Arc::new(LocalFilesystem::new()), global.project_dir);
    let registry = RegistryService::new(store, config.layout);
    let targets = registry.list_targets()?;
    let rows: Vec<TargetRow<'_>> = targets.iter().map(TargetRow::from).collect();

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            if rows.is_empty() {
                output.info("No targets registered yet")?;
                return Ok(());
            }
            output.header("Registered targets:")?;
            let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for row in &rows {
                output.data(&format!("  {:<width$}  {}", row.name, row.root))?;
            }
        }
        ListFormat::List => {
            for row in &rows {
                output.data(row.name)?;
            }
        }
        ListFormat::Json => output.json(&rows)?,
        ListFormat::Csv => {
            output.data("name,root")?;
            for row in &rows {
                output.data(&format!("{},{}", row.name, row.root))?;
            }
        }
    }

    Ok(())
}
