//! Structured logging for orbitcam.
//!
//! Console output with uptime timestamps and module paths, plus a JSON log
//! file in debug builds. `RUST_LOG` takes precedence over the configured
//! `debug.log_level`.

use orbitcam_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_FILTER: &str = "info,winit=warn";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "orbitcam.log";

/// Resolve the filter string from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_string(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => {
            format!("{},winit=warn", config.debug.log_level)
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - whether to also log to a file
/// * `config` - optional configuration providing the log level
///
/// Calling this twice is harmless: the second installation attempt is ignored.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_string(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build {
        if let Some(log_file) = log_dir.and_then(open_log_file) {
            let file_layer = fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::uptime())
                .json();

            if subscriber.with(file_layer).try_init().is_ok() {
                tracing::debug!(filter = %filter_str, file = true, "logging initialised");
            }
            return;
        }
    }

    if subscriber.try_init().is_ok() {
        tracing::debug!(filter = %filter_str, file = false, "logging initialised");
    }
}

fn open_log_file(log_dir: &Path) -> Option<std::fs::File> {
    std::fs::create_dir_all(log_dir).ok()?;
    std::fs::File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// Parses `filter_str`, falling back to [`default_env_filter`] when it has
/// a malformed directive.
fn configured_filter(filter_str: &str) -> EnvFilter {
    EnvFilter::try_new(filter_str).unwrap_or_else(|_| default_env_filter())
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
