//! Checklist command: on-page SEO checks for a markdown page.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use seo_lint_core::checklist::Priority;
use seo_lint_core::{ChecklistContext, Config, KeywordTaxonomy, run_checklist};

use super::read_input_file;

/// Arguments for the `checklist` subcommand.
#[derive(Args, Debug)]
pub struct ChecklistArgs {
    /// Markdown page to check (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Minimum acceptable score (0-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: Option<u8>,
}

/// Run the checklist and print the score and failing items.
#[instrument(name = "cmd_checklist", skip_all, fields(file = %args.file))]
pub fn cmd_checklist(
    args: ChecklistArgs,
    global_json: bool,
    config: &Config,
    taxonomy: &KeywordTaxonomy,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, min_score = ?args.min_score, "executing checklist command");

    let content = read_input_file(&args.file, max_input_bytes)?;

    let mut settings = config.checklist.clone();
    if args.min_score.is_some() {
        settings.min_score = args.min_score;
    }
    let ctx = ChecklistContext {
        taxonomy,
        coverage: &config.coverage,
        settings: &settings,
    };

    let report = run_checklist(&content, &ctx)
        .with_context(|| format!("failed to check {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let score = format!("{}/100", report.score);
        let score = if report.score >= 80 {
            score.green().to_string()
        } else if report.score >= 50 {
            score.yellow().to_string()
        } else {
            score.red().to_string()
        };
        println!(
            "{} score {score} ({}/{} passed)",
            args.file.bold(),
            report.passed,
            report.total
        );

        for result in report.results.iter().filter(|r| !r.passed) {
            let tag = match result.priority {
                Priority::High => "HIGH".red().to_string(),
                Priority::Medium => "MED".yellow().to_string(),
                Priority::Low => "LOW".dimmed().to_string(),
            };
            println!("  {tag:>4} {} ({})", result.title, result.id.dimmed());
        }

        if !report.recommendations.is_empty() {
            println!("\n  {}", "Recommendations".cyan());
            for rec in &report.recommendations {
                println!("    - {rec}");
            }
        }
    }

    if report.below_min {
        bail!(
            "{} scores {} on the SEO checklist (min: {}). Fix the failing items above.",
            args.file,
            report.score,
            report.min_score.unwrap_or_default(),
        );
    }

    Ok(())
}
