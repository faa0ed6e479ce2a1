//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`ProjectLayout`]
//! handed to its services.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FIRMKIT__<SECTION>__<KEY>`
//! 3. `--config <FILE>` when given
//! 4. `<project-dir>/.firmkit.toml`
//! 5. The user config file (`firmkit config path`)
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use firmkit_core::domain::{DomainValidator, GenerationMode, ProjectLayout};

/// File name of the per-project configuration.
pub const PROJECT_CONFIG_FILE: &str = ".firmkit.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `firmkit new`.
    pub defaults: Defaults,
    /// Where list files, templates and outputs live.
    pub layout: ProjectLayout,
    /// Output settings.
    pub output: OutputConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: Option<String>,
    pub email: Option<String>,
    pub namespace: Option<String>,
    pub mode: GenerationMode,
    /// Use the bundled templates even when the project has its own.
    pub builtin_templates: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write log events to this file.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration for the project at `project_dir`.
    ///
    /// `config_file` is the path passed via `--config`; unlike the other
    /// files it must exist. The merged `[layout]` is validated before it
    /// reaches any service.
    pub fn load(config_file: Option<&PathBuf>, project_dir: &Path) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(global) = Self::config_path() {
            builder = builder.add_source(File::from(global).required(false));
        }
        builder = builder
            .add_source(File::from(Self::project_config_path(project_dir)).required(false));
        if let Some(explicit) = config_file {
            builder = builder.add_source(File::from(explicit.clone()).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("FIRMKIT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        DomainValidator::validate_layout(&config.layout)?;
        Ok(config)
    }

    /// Path to the user configuration file, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "firmkit", "firmkit")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Path to the project configuration file.
    pub fn project_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(PROJECT_CONFIG_FILE)
    }

    /// Value at a dotted key such as `layout.test_prefix`.
    pub fn get_value(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for segment in key.split('.') {
            value = value.get_mut(segment)?.take();
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_describe_the_stock_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.layout.firmware_target, "ASch");
        assert_eq!(cfg.defaults.mode, GenerationMode::Full);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn project_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[defaults]\nauthor = \"Jane Doe\"\nmode = \"header-only\"\n\n\
             [layout]\nfirmware_target = \"Boot\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(cfg.defaults.author.as_deref(), Some("Jane Doe"));
        assert_eq!(cfg.defaults.mode, GenerationMode::HeaderOnly);
        assert_eq!(cfg.layout.firmware_target, "Boot");
        assert_eq!(cfg.layout.test_prefix, "UTest");
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn invalid_layout_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[layout]\ntest_prefix = \"UTest/x\"\n",
        )
        .unwrap();

        let err = AppConfig::load(None, dir.path()).unwrap_err();
        assert!(err.to_string().contains("test_prefix"));
    }

    #[test]
    fn get_value_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get_value("layout.test_prefix"),
            Some(serde_json::json!("UTest"))
        );
        assert_eq!(cfg.get_value("layout.nope"), None);
    }
}
