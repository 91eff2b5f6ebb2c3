//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber, setting up the pipeline
//! from `tracing` macros to the rotating log file.

use super::file_writer::FileWriter;
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "notehub.log";

/// Builds the level filter.
///
/// Level is determined by:
/// 1. `RUST_LOG` environment variable (highest priority)
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
fn build_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Initializes the tracing subscriber with a rotating file writer.
///
/// Log lines go to `notehub.log` in the data directory, never to the
/// terminal, so they cannot corrupt the rendered screen.
///
/// # Initialization Behavior
///
/// - Creates data directory if it doesn't exist
/// - Silently does nothing if directory creation fails (logging is optional)
/// - Idempotent: Safe to call multiple times (only first call takes effect)
///
/// Returns the log file path when logging was installed.
///
/// # Example
///
/// ```rust,no_run
/// use notehub::observability::init_tracing;
/// use notehub::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let data_dir = config
        .log_dir
        .clone()
        .unwrap_or_else(crate::infrastructure::paths::get_data_dir);
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let log_file = data_dir.join(LOG_FILE_NAME);
    let writer = FileWriter::new(log_file.clone());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(fmt_layer);

    subscriber.try_init().ok().map(|()| log_file)
}
