//! Core library for seo-lint.
//!
//! Scores text against a keyword taxonomy (brand density, primary and
//! long-tail coverage) and runs an on-page SEO checklist over markdown.
//!
//! # Modules
//!
//! - [`taxonomy`] - Keyword lists and the built-in brand taxonomy
//! - [`keywords`] - Density and coverage analysis
//! - [`report`] - End-to-end keyword reports
//! - [`document`] - Markdown page parsing
//! - [`checklist`] - On-page SEO checklist
//! - [`text`] - Tokenization and keyword scanning
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use seo_lint_core::{ConfigLoader, analyze_keywords};
//!
//! let (config, _sources) = ConfigLoader::new()
//!     .with_user_config(true)
//!     .load()
//!     .expect("Failed to load configuration");
//!
//! let taxonomy = config.taxonomy();
//! let report = analyze_keywords(
//!     "郭春林是一位思想者。",
//!     false,
//!     &taxonomy,
//!     &config.coverage,
//!     &config.content,
//! );
//! for suggestion in report.suggestions() {
//!     println!("{suggestion}");
//! }
//! ```
#![deny(unsafe_code)]

pub mod checklist;
pub mod config;
pub mod document;
pub mod error;
pub mod keywords;
pub mod report;
pub mod taxonomy;
pub mod text;

pub use checklist::{ChecklistContext, ChecklistReport, ChecklistSettings, run_checklist};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};
pub use keywords::{
    ContentSettings, CoverageReport, CoverageSettings, DensityMode, KeywordAnalyzer,
    KeywordMetric, Suggestion, SuggestionKind,
};
pub use report::{KeywordReport, analyze_keywords, keyword_densities};
pub use taxonomy::KeywordTaxonomy;
