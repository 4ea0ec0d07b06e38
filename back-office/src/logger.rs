//! Logging Infrastructure
//!
//! Structured logging for tooling and services embedding the back office.
//! `RUST_LOG` wins over the configured level when set.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialize the logger from configuration
pub fn init_logger(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}

/// Initialize the logger with optional file output
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "back-office");
            let _ = subscriber.with_writer(file_appender).try_init();
            return;
        }
        let _ = subscriber.try_init();
        tracing::warn!("Log directory {} missing, logging to stdout", dir);
        return;
    }

    let _ = subscriber.try_init();
}
