//! Tracing set-up for the starfield tools.
//!
//! The core crate only emits `tracing` events (chunk generation, evictions,
//! edge crossings). This crate decides where they go: an uptime-stamped
//! console layer always, plus a JSON file in debug builds when a log directory
//! is given. Level directives come from `RUST_LOG` first, then from
//! `debug.log_level` in `config.ron`.

use std::fs::File;
use std::path::{Path, PathBuf};

use parallax_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE: &str = "starfield.log";

/// Install the global subscriber. Call once, before building a starfield.
///
/// `log_dir` only matters when `debug_build` is set; if the directory or file
/// cannot be created the console layer is installed alone.
///
/// ```no_run
/// use parallax_config::Config;
///
/// let config = Config::default();
/// let logs = std::path::Path::new("./logs");
/// parallax_log::init_logging(Some(logs), cfg!(debug_assertions), Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_string(config)));

    let console = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let registry = tracing_subscriber::registry().with(env_filter).with(console);

    let file = log_dir.filter(|_| debug_build).and_then(open_log_file);
    match file {
        Some(file) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(fmt::time::uptime()),
            )
            .init(),
        None => registry.init(),
    }
}

/// Where the JSON log goes inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE)
}

/// Filter directives taken from `config`, or [`DEFAULT_FILTER`] when unset.
pub fn filter_string(config: Option<&Config>) -> String {
    config
        .map(|config| config.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_file_path(log_dir)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_info() {
        assert!(default_env_filter().to_string().contains("info"));
    }

    #[test]
    fn test_filter_string_without_config() {
        assert_eq!(filter_string(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_filter_string_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,parallax_starfield=trace".to_string();
        assert_eq!(filter_string(Some(&config)), "debug,parallax_starfield=trace");
    }

    #[test]
    fn test_blank_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_string(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_module_directives_parse() {
        for directive in [
            "warn,parallax_starfield::layer=debug",
            "info,parallax_starfield::starfield=trace",
            "parallax_demo=debug",
        ] {
            assert!(
                EnvFilter::try_new(directive).is_ok(),
                "directive should parse: {directive}"
            );
        }
    }

    #[test]
    fn test_log_file_inside_dir() {
        let path = log_file_path(Path::new("/tmp/starfield-logs"));
        assert_eq!(path, Path::new("/tmp/starfield-logs").join("starfield.log"));
    }
}
