//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use firmkit_core::domain::{BuildStep, GenerationMode};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "firmkit",
    bin_name = "firmkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Firmware module scaffolding and build-target registry",
    long_about = "Firmkit generates source, header and unit-test files for new firmware \
                  modules and keeps the SCons list files that describe every build \
                  target in step.",
    after_help = "EXAMPLES:\n\
        \x20 firmkit new --module Sensor --path Drivers/Sensor --namespace Drivers\n\
        \x20 firmkit new --module Hal_Gpio --path Hal_Api --mode header-only\n\
        \x20 firmkit resolve Sensor --step unit-test --format json\n\
        \x20 firmkit list\n\
        \x20 firmkit completions bash > /usr/share/bash-completion/completions/firmkit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new module and register it as a build target.
    #[command(
        visible_alias = "n",
        about = "Create a new module",
        after_help = "EXAMPLES:\n\
            \x20 firmkit new --module Sensor --path Drivers/Sensor\n\
            \x20 firmkit new --module Hal_Gpio --path Hal_Api --hal header\n\
            \x20 firmkit new --module Queue --path Utils --dry-run"
    )]
    New(NewArgs),

    /// Print the build file set of one target.
    #[command(
        about = "Resolve a build target",
        after_help = "EXAMPLES:\n\
            \x20 firmkit resolve ASch --debug\n\
            \x20 firmkit resolve Sensor --step coverage --format json"
    )]
    Resolve(ResolveArgs),

    /// List registered build targets.
    #[command(
        visible_alias = "ls",
        about = "List registered targets",
        after_help = "EXAMPLES:\n\
            \x20 firmkit list\n\
            \x20 firmkit list --format csv"
    )]
    List(ListArgs),

    /// Initialise a project: configuration, list files and templates.
    #[command(
        about = "Initialise a firmware project",
        after_help = "EXAMPLES:\n\
            \x20 firmkit init\n\
            \x20 firmkit -C ../firmware init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 firmkit completions bash > ~/.local/share/bash-completion/completions/firmkit\n\
            \x20 firmkit completions zsh  > ~/.zfunc/_firmkit\n\
            \x20 firmkit completions fish > ~/.config/fish/completions/firmkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Firmkit configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 firmkit config get layout.firmware_target\n\
            \x20 firmkit config list\n\
            \x20 firmkit config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `firmkit new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Module name; also the file stem of every generated file.
    #[arg(short = 'm', long = "module", value_name = "NAME", help = "Module name")]
    pub module: Option<String>,

    /// Module directory relative to the project root.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "PATH",
        help = "Module directory (default: project root)"
    )]
    pub path: Option<String>,

    /// Namespace written into the templates.
    #[arg(short = 'n', long = "namespace", value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Author written into the file headers.
    #[arg(short = 'a', long = "author", value_name = "AUTHOR")]
    pub author: Option<String>,

    /// Author e-mail written into the file headers.
    #[arg(short = 'e', long = "email", value_name = "EMAIL")]
    pub email: Option<String>,

    /// Which files to generate.
    #[arg(
        long = "mode",
        visible_alias = "hal",
        value_name = "MODE",
        value_parser = parse_mode,
        help = "Generation mode: full, source-only, header-only, header-with-tests"
    )]
    pub mode: Option<GenerationMode>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation, including overwrite confirmation"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Use the bundled templates instead of the project's.
    #[arg(long = "builtin-templates", help = "Use the bundled templates")]
    pub builtin_templates: bool,
}

fn parse_mode(s: &str) -> Result<GenerationMode, String> {
    s.parse().map_err(|e: firmkit_core::domain::DomainError| e.to_string())
}

// ── resolve ───────────────────────────────────────────────────────────────────

/// Arguments for `firmkit resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Registered target, or the firmware image name.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Inject debug flags into the firmware build.
    #[arg(long = "debug")]
    pub debug: bool,

    /// Build stage the set is resolved for.
    #[arg(
        long = "step",
        value_name = "STEP",
        default_value = "build",
        value_parser = parse_step,
        help = "Build step: build, unit-test, coverage, cppcheck"
    )]
    pub step: BuildStep,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ResolveFormat,
}

fn parse_step(s: &str) -> Result<BuildStep, String> {
    s.parse().map_err(|e: firmkit_core::domain::DomainError| e.to_string())
}

/// Output format for the `resolve` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolveFormat {
    /// Sectioned text.
    Text,
    /// JSON object for the build environment.
    Json,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `firmkit list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `firmkit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `firmkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `firmkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `layout.test_prefix`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
