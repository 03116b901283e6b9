//! Density command: density and presence of keywords given on the command line.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use seo_lint_core::{CoverageSettings, DensityMode, keyword_densities};

use super::{is_markdown, read_input_file};

/// Arguments for the `density` subcommand.
#[derive(Args, Debug)]
pub struct DensityArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Keywords to measure.
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// How keyword density is counted (overrides config).
    #[arg(long, value_enum)]
    pub density_mode: Option<DensityMode>,

    /// Treat the input as markdown even without a `.md` extension.
    #[arg(long)]
    pub markdown: bool,
}

/// Print density and presence for each keyword.
#[instrument(name = "cmd_density", skip_all, fields(file = %args.file, keywords = args.keywords.len()))]
pub fn cmd_density(
    args: DensityArgs,
    global_json: bool,
    config_coverage: &CoverageSettings,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(keywords = ?args.keywords, "executing density command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let strip_md = args.markdown || is_markdown(&args.file);

    let mut coverage = config_coverage.clone();
    if let Some(mode) = args.density_mode {
        coverage.density_mode = mode;
    }

    let metrics = keyword_densities(&content, strip_md, &args.keywords, &coverage)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    for metric in &metrics {
        let present = if metric.present {
            "present".green().to_string()
        } else {
            "absent".red().to_string()
        };
        println!("{:.2}%\t{present}\t{}", metric.density, metric.keyword);
    }

    Ok(())
}
