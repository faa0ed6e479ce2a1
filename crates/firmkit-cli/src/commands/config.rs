//! `firmkit config`: inspect the effective configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    project_dir: &Path,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.data(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.header("Current Configuration:")?;
                output.data(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            let project = AppConfig::project_config_path(project_dir);
            if project.exists() {
                output.data(&project.display().to_string())?;
            } else if let Some(user) = AppConfig::config_path() {
                output.data(&user.display().to_string())?;
            } else {
                output.data(&project.display().to_string())?;
            }
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Render the value at a dotted key. Strings print bare, everything else
/// as JSON.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match config.get_value(key) {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Null) => Ok(String::new()),
        Some(other) => Ok(other.to_string()),
        None => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "layout.firmware_target").unwrap(), "ASch");
        assert_eq!(get_config_value(&cfg, "defaults.mode").unwrap(), "full");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn non_string_values_print_as_json() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
        assert_eq!(
            get_config_value(&cfg, "layout.debug_flags").unwrap(),
            r#"["-g3","-O0","-DDEBUG"]"#
        );
        assert_eq!(get_config_value(&cfg, "defaults.author").unwrap(), "");
    }
}
