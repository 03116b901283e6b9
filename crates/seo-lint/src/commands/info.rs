//! Info command implementation

use clap::Args;
use owo_colors::OwoColorize;
use seo_lint_core::config::{Config, ConfigSources};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    taxonomy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
    density_mode: String,
    density_range: (f64, f64),
    long_tail_min: usize,
    min_words: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    checklist_min_score: Option<u8>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let taxonomy = config.taxonomy();
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            max_input_bytes: config.input_limit(),
            taxonomy: if config.keywords.is_some() {
                "configured"
            } else {
                "built-in"
            },
            brand: taxonomy.brand_keyword().map(str::to_string),
            density_mode: config.coverage.density_mode.to_string(),
            density_range: (config.coverage.density_min, config.coverage.density_max),
            long_tail_min: config.coverage.long_tail_min,
            min_words: config.content.min_words,
            checklist_min_score: config.checklist.min_score,
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match cfg.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }
    match cfg.max_input_bytes {
        Some(max) => println!("{}: {max} bytes", "Input limit".dimmed()),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    println!();
    println!("{}", "Keywords".bold().underline());
    println!("{}: {}", "Taxonomy".dimmed(), cfg.taxonomy);
    print_opt("Brand", &cfg.brand);
    println!("{}: {}", "Density mode".dimmed(), cfg.density_mode);
    println!(
        "{}: {}-{}%",
        "Density range".dimmed(),
        cfg.density_range.0,
        cfg.density_range.1
    );
    println!("{}: {}", "Long-tail minimum".dimmed(), cfg.long_tail_min);
    println!("{}: {}", "Minimum words".dimmed(), cfg.min_words);
    print_opt("Checklist min score", &cfg.checklist_min_score);

    Ok(())
}

/// Print an optional value or "(not set)".
fn print_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "(not set)".dimmed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_lint_core::KeywordTaxonomy;

    #[test]
    fn test_cmd_info_text_succeeds() {
        assert!(
            cmd_info(
                InfoArgs::default(),
                false,
                &Config::default(),
                &ConfigSources::default()
            )
            .is_ok()
        );
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        assert!(
            cmd_info(
                InfoArgs::default(),
                true,
                &Config::default(),
                &ConfigSources::default()
            )
            .is_ok()
        );
    }

    #[test]
    fn test_config_info_defaults() {
        let info = ConfigInfo::from_config(&Config::default(), &ConfigSources::default());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.taxonomy, "built-in");
        assert_eq!(info.brand.as_deref(), Some("郭春林"));
        assert_eq!(info.density_mode, "token");
    }

    #[test]
    fn test_config_info_custom_taxonomy() {
        let config = Config {
            keywords: Some(KeywordTaxonomy {
                primary: vec!["acme".into()],
                ..KeywordTaxonomy::empty()
            }),
            ..Config::default()
        };
        let info = ConfigInfo::from_config(&config, &ConfigSources::default());
        assert_eq!(info.taxonomy, "configured");
        assert_eq!(info.brand.as_deref(), Some("acme"));
    }
}
