//! Analyze command: keyword coverage, density, and content suggestions.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use seo_lint_core::keywords::{DensityBand, KeywordMetric};
use seo_lint_core::{Config, DensityMode, KeywordTaxonomy, analyze_keywords};

use super::{is_markdown, read_input_file};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,

    /// How keyword density is counted (overrides config).
    #[arg(long, value_enum)]
    pub density_mode: Option<DensityMode>,

    /// Treat the input as markdown even without a `.md` extension.
    #[arg(long)]
    pub markdown: bool,

    /// Exit with an error when any suggestion is emitted.
    #[arg(long)]
    pub strict: bool,

    /// Skip length and topic suggestions.
    #[arg(long)]
    pub no_content: bool,
}

/// Score a file's keyword coverage.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    taxonomy: &KeywordTaxonomy,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, mode = ?args.density_mode, strict = args.strict, "executing analyze command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let strip_md = args.markdown || is_markdown(&args.file);

    let mut coverage = config.coverage.clone();
    if let Some(mode) = args.density_mode {
        coverage.density_mode = mode;
    }

    let mut report = analyze_keywords(&content, strip_md, taxonomy, &coverage, &config.content);
    if args.no_content {
        report.content_suggestions.clear();
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", args.file.bold());
        println!(
            "  {} {} characters, {} words, {} density",
            "Text:".cyan(),
            report.stats.characters,
            report.stats.words,
            report.density_mode,
        );

        if let Some(ref brand) = report.brand {
            println!(
                "  {} \"{}\" {}",
                "Brand:".cyan(),
                brand.keyword,
                density_label(brand),
            );
        }

        print_group("Primary", &report.coverage.primary);
        print_group("Long-tail", &report.coverage.long_tail);

        let count = report.suggestion_count();
        if count == 0 {
            println!("\n  {} no suggestions", "PASS:".green());
        } else {
            println!("\n  {} ({count})", "Suggestions".yellow());
            for suggestion in report.suggestions() {
                println!("    - {suggestion}");
            }
        }
    }

    if args.strict && report.suggestion_count() > 0 {
        bail!(
            "{} has {} keyword suggestion(s). Address them or drop --strict.",
            args.file,
            report.suggestion_count(),
        );
    }

    Ok(())
}

fn print_group(title: &str, metrics: &[KeywordMetric]) {
    if metrics.is_empty() {
        return;
    }
    let present = metrics.iter().filter(|m| m.present).count();
    println!(
        "\n  {} {present}/{} present",
        format!("{title}:").cyan(),
        metrics.len()
    );
    for metric in metrics {
        let mark = if metric.present {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        };
        println!("    {mark} {:<24} {}", metric.keyword, density_label(metric));
    }
}

fn density_label(metric: &KeywordMetric) -> String {
    let value = format!("{:.2}%", metric.density);
    match metric.band {
        DensityBand::Optimal => value.green().to_string(),
        DensityBand::High => value.yellow().to_string(),
        DensityBand::Low => value.dimmed().to_string(),
    }
}
