//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kiln",
    bin_name = "kiln",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Apply Spring Boot feature modules to a project folder",
    long_about = "Kiln builds Spring Boot projects one module at a time. \
                  Each module places files, edits existing ones above \
                  their needles and declares build dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 kiln apply init build-tool springboot --folder ./shop --package-name com.acme.shop\n\
        \x20 kiln apply springboot-mvc liquibase --folder ./shop --set serverPort=9000\n\
        \x20 kiln list --format json\n\
        \x20 kiln completions bash > /usr/share/bash-completion/completions/kiln",
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
    /// Apply one or more modules to a project folder.
    #[command(
        visible_alias = "a",
        about = "Apply modules to a project",
        after_help = "EXAMPLES:\n\
            \x20 kiln apply init build-tool --folder ./shop\n\
            \x20 kiln apply springboot springboot-mvc --folder ./shop --package-name com.acme.shop\n\
            \x20 kiln apply sonar --folder ./shop --dry-run"
    )]
    Apply(ApplyArgs),

    /// List available modules.
    #[command(
        visible_alias = "ls",
        about = "List available modules",
        after_help = "EXAMPLES:\n\
            \x20 kiln list\n\
            \x20 kiln list --format csv"
    )]
    List(ListArgs),

    /// Initialise a kiln configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kiln init           # default location\n\
            \x20 kiln init --local   # .kiln.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kiln completions bash > ~/.local/share/bash-completion/completions/kiln\n\
            \x20 kiln completions zsh  > ~/.zfunc/_kiln\n\
            \x20 kiln completions fish > ~/.config/fish/completions/kiln.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the kiln configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kiln config get project.package_name\n\
            \x20 kiln config list"
    )]
    Config(ConfigCommands),
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `kiln apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Module slugs, applied in the order given.
    #[arg(value_name = "MODULE", required = true, num_args = 1..)]
    pub modules: Vec<String>,

    /// Project folder (created if missing).
    #[arg(
        short = 'f',
        long = "folder",
        value_name = "DIR",
        default_value = ".",
        help = "Project folder"
    )]
    pub folder: PathBuf,

    /// Dotted Java package, e.g. `com.acme.shop`.
    #[arg(short = 'p', long = "package-name", value_name = "PACKAGE")]
    pub package_name: Option<String>,

    /// Base name used for class and artifact names.
    #[arg(short = 'b', long = "base-name", value_name = "NAME")]
    pub base_name: Option<String>,

    /// Human-readable project name.
    #[arg(long = "project-name", value_name = "NAME")]
    pub project_name: Option<String>,

    /// Extra project configuration, repeatable.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_setting,
        help = "Set a project config value (true/false and integers are typed)"
    )]
    pub set: Vec<Setting>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Apply without asking for confirmation")]
    pub yes: bool,

    /// Resolve the modules and print the plan without writing any files.
    #[arg(long = "dry-run", help = "Show what would be applied without applying")]
    pub dry_run: bool,
}

/// One `--set key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

fn parse_setting(raw: &str) -> Result<Setting, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok(Setting {
        key: key.to_string(),
        value: value.to_string(),
    })
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `kiln list`.
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
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One slug per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kiln init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.kiln.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kiln completions`.
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

/// Subcommands for `kiln config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `project.package_name`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
