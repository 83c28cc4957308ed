//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! helpers shared by both consoles.

use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{AssetDeskError, Result};

/// Initialize logging based on configuration
///
/// Console output goes to stderr so rendered tables on stdout stay clean.
/// When a log file is configured, the returned guard must be held until
/// the process exits or buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let json = config.format == "json";

    let stderr_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(dir) if !dir.is_empty() => {
            let file_appender = tracing_appender::rolling::daily(dir, "asset-desk.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AssetDeskError::Config(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an outgoing backend request and its outcome
pub fn log_api_request(api: &str, method: &str, path: &str, status: Option<u16>, duration_ms: u64) {
    debug!(
        api = api,
        method = method,
        path = path,
        status = status,
        duration_ms = duration_ms,
        "Backend request completed"
    );
}

/// Log a user-triggered console action
pub fn log_console_action(console: &str, action: &str, target: Option<&str>) {
    info!(
        console = console,
        action = action,
        target = target,
        "Console action performed"
    );
}

/// Log API errors with context
///
/// This is the only feedback most list and CRUD failures get.
pub fn log_api_error(api: &str, error: &AssetDeskError, context: &str) {
    error!(
        api = api,
        error = %error,
        failure = ?error.failure_kind(),
        severity = %error.severity(),
        recoverable = error.is_recoverable(),
        context = context,
        "API error occurred"
    );
}
