//! Library interface for the `seo-lint` CLI.
//!
//! Exposes the argument parser and command implementations so that `xtask`
//! can generate man pages and completions, and so commands can be tested
//! in-process. The entry point is in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Set the global color mode. Call once at startup.
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                          Log filter (e.g., debug, seo_lint_core=trace)
    SEO_LINT_LOG_PATH                 Explicit log file path
    SEO_LINT_LOG_DIR                  Log directory
    SEO_LINT_COVERAGE__DENSITY_MODE   Density counting (token, occurrence)
    SEO_LINT_<KEY>__<SUBKEY>          Any config key; `__` separates nesting
";

/// Command-line interface definition for seo-lint.
#[derive(Parser)]
#[command(name = "seo-lint")]
#[command(about = "Keyword coverage and SEO checklist linting for published content", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Score keyword coverage and density
    Analyze(commands::analyze::AnalyzeArgs),

    /// Measure density of arbitrary keywords
    Density(commands::density::DensityArgs),

    /// Run the on-page SEO checklist on a markdown page
    Checklist(commands::checklist::ChecklistArgs),

    /// Show the active keyword taxonomy
    Keywords(commands::keywords::KeywordsArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
