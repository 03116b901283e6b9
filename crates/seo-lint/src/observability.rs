//! Logging setup: human-readable logs on stderr, optional JSONL file logs.
//!
//! File logging is enabled by `SEO_LINT_LOG_PATH` (exact file),
//! `SEO_LINT_LOG_DIR`, or `log_dir` in config. Stdout is never written to,
//! so JSON output and the MCP stdio transport stay clean.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_ENV: &str = "SEO_LINT_LOG_PATH";
const LOG_DIR_ENV: &str = "SEO_LINT_LOG_DIR";
const DEFAULT_LOG_FILE: &str = "seo-lint.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// JSONL log file. `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to the
    /// configured `log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let log_file = env_path.or_else(|| {
            env_dir
                .or(config_dir)
                .map(|dir| dir.join(DEFAULT_LOG_FILE))
        });
        Self { log_file }
    }
}

/// Holds the file writer's worker; drop it last to flush pending logs.
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Build the log filter.
///
/// `-q` and `-v` win over `RUST_LOG`, which wins over the config level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    let flag_level = if quiet {
        Some("error")
    } else {
        match verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    };

    if let Some(level) = flag_level {
        return EnvFilter::new(level);
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .boxed();

    let (file_layer, file_guard) = match config.log_file {
        Some(ref path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(ObservabilityGuard { _file: file_guard })
}

fn file_writer(
    path: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sources_disables_file_logging() {
        assert_eq!(ObservabilityConfig::resolve(None, None, None).log_file, None);
    }

    #[test]
    fn explicit_path_wins() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/x.jsonl")),
            Some(PathBuf::from("/var/log")),
            Some(PathBuf::from("/etc")),
        );
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/x.jsonl")));
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let cfg = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/var/log")),
            Some(PathBuf::from("/etc")),
        );
        assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log").join(DEFAULT_LOG_FILE)));
    }

    #[test]
    fn config_dir_used_last() {
        let cfg = ObservabilityConfig::resolve(None, None, Some(PathBuf::from("/srv/logs")));
        assert_eq!(cfg.log_file, Some(PathBuf::from("/srv/logs").join(DEFAULT_LOG_FILE)));
    }

    #[test]
    fn flags_override_level() {
        assert_eq!(env_filter(true, 3, "info").to_string(), "error");
        assert_eq!(env_filter(false, 1, "info").to_string(), "debug");
        assert_eq!(env_filter(false, 2, "info").to_string(), "trace");
    }
}
