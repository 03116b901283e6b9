//! Error types for seo-lint-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration parsed but holds values that cannot be used.
    #[error("invalid settings: {0}")]
    Invalid(#[from] AnalysisError),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised around keyword analysis.
///
/// The analyzer itself never fails; these come from validating what is fed
/// into it.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A taxonomy list contains an empty (or whitespace-only) keyword.
    #[error("empty keyword in taxonomy group `{group}` at index {index}")]
    InvalidTaxonomy {
        /// Group the keyword belongs to (e.g. "primary").
        group: &'static str,
        /// Position of the offending keyword within its group.
        index: usize,
    },

    /// A lower bound is configured above its upper bound.
    #[error("`{setting}` range is empty: minimum {min} exceeds maximum {max}")]
    InvalidRange {
        /// Settings key the range belongs to (e.g. "coverage.density").
        setting: &'static str,
        /// Configured minimum.
        min: String,
        /// Configured maximum.
        max: String,
    },

    /// An ad-hoc keyword list contains an empty (or whitespace-only) entry.
    #[error("keyword {position} is empty")]
    BlankKeyword {
        /// One-based position of the keyword in the list.
        position: usize,
    },

    /// The document's YAML frontmatter could not be parsed.
    #[error("malformed frontmatter: {0}")]
    Frontmatter(String),

    /// An unknown taxonomy group name was requested.
    #[error("unknown keyword group: {name}. Use: {available}")]
    UnknownGroup {
        /// The group name that was requested.
        name: String,
        /// Comma-separated list of valid group names.
        available: String,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
