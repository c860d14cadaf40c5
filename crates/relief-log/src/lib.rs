//! Structured logging for the relief tools.
//!
//! Installs a `tracing` subscriber with a console layer and, in debug builds, a
//! JSON file layer. Library crates log through the `log` facade; those records are
//! forwarded into the same subscriber.

use std::path::{Path, PathBuf};

use relief_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE: &str = "relief.log";

/// The filter directive taken from the config, or [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Create an `EnvFilter` with [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. When `debug_build` is
/// set and `log_dir` can be created, records are also written as JSON to
/// `log_dir/relief.log`; the path of that file is returned.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Option<PathBuf> {
    let directive = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        let _ = subscriber.with(file_layer).try_init();
        return Some(log_dir.join(LOG_FILE));
    }

    let _ = subscriber.try_init();
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_defaults_to_info() {
        assert_eq!(filter_directive(None), "info");

        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directive(Some(&config)), "info");
    }

    #[test]
    fn test_filter_directive_uses_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,relief_mesh=trace".to_string();
        assert_eq!(filter_directive(Some(&config)), "debug,relief_mesh=trace");
    }

    #[test]
    fn test_default_env_filter() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_subsystem_filters_parse() {
        for directive in ["info", "warn,relief_grid=debug", "error", "trace"] {
            assert!(
                EnvFilter::try_new(directive).is_ok(),
                "Failed to parse filter: {directive}"
            );
        }
    }

    #[test]
    fn test_debug_build_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let path = init_logging(Some(&log_dir), true, None);
        assert_eq!(path, Some(log_dir.join(LOG_FILE)));
        assert!(log_dir.join(LOG_FILE).exists());
    }

    #[test]
    fn test_release_build_skips_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_logging(Some(dir.path()), false, None);
        assert!(path.is_none());
        assert!(!dir.path().join(LOG_FILE).exists());
    }
}
