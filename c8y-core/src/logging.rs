//! Structured logging setup using the `tracing` ecosystem.
//!
//! Provides daily file rotation, configurable log levels, and both
//! human-readable and JSON output formats.

use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{C8yError, C8yResult};

/// Initialize the global tracing subscriber.
///
/// Installs a compact stderr layer and a file layer writing to
/// `<log_dir>/c8y.log` with daily rotation. `level` accepts any
/// `EnvFilter` directive, e.g. `"debug"` or `"c8y_api=trace,info"`; an
/// invalid directive falls back to `info`.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> C8yResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, "c8y.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    let init_result = if json_output {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    } else {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    };
    init_result.map_err(|e| C8yError::Config(format!("failed to install logger: {e}")))?;

    tracing::info!("logging initialized at level={level}, dir={}", log_dir.display());

    Ok(LogGuard { _guard: guard })
}

/// Initialize logging from a [`LoggingConfig`], resolving its directory.
pub fn init_from_config(config: &LoggingConfig) -> C8yResult<LogGuard> {
    let dir = config.effective_directory()?;
    init_logging(&config.level, &dir, config.json_output)
}

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

impl std::fmt::Debug for LogGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogGuard").finish_non_exhaustive()
    }
}

/// Initialize a minimal console-only logger for tests or simple tools.
///
/// Subsequent calls are no-ops.
pub fn init_console_logging(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init();
}
