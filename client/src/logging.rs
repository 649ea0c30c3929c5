//! Logging initialization.

use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{ClientConfig, DEFAULT_LOG_FILTER};

/// Log file name inside `log_dir`; the appender adds a date suffix.
pub const LOG_FILE_NAME: &str = "client.log";

/// Initialize the global subscriber.
///
/// Always logs to stderr. When `config.log_dir` is set, also writes a daily rotated,
/// non-ANSI file through a non-blocking writer; the returned guard must be held until exit
/// or buffered lines are lost.
pub fn init(config: &ClientConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .boxed();

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .boxed();
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log directory {}: {}", dir.display(), e);
                (None, None)
            }
        },
        None => (None, None),
    };

    let initialized = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    if let Err(e) = initialized {
        eprintln!("Warning: Logging already initialized: {}", e);
    }

    tracing::info!(
        log_filter = %config.log_filter,
        log_dir = ?config.log_dir,
        "Logging initialized"
    );
    guard
}
