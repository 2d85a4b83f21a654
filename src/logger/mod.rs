//! Logger module
//!
//! Keeps the server's logging vocabulary in one place:
//! - Subscriber setup (text or JSON output, `RUST_LOG` aware)
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use crate::config::{Config, LogFormat, LoggingConfig};
use std::net::SocketAddr;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("Server listening on: http://{addr}");
    tracing::info!("Environment: {}", config.app.environment);
    if !config.app.is_development() {
        tracing::info!("Running as a managed deployment behind the platform adapter");
    }
    tracing::info!("Log level: {}", config.logging.level);
    if let Some(ref dir) = config.http.static_dir {
        tracing::info!("Static files: {dir}");
    }
    tracing::info!("API docs: http://{addr}/api/docs");
    tracing::info!("Single-threaded Tokio runtime");
    tracing::info!("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!(%peer_addr, "connection accepted");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Log a handler failure caught by the dispatch stage
pub fn log_handler_fault(method: &str, path: &str, cause: &str) {
    tracing::error!(%method, %path, %cause, "handler failed");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: "access", "{}", entry.format(format));
}

pub fn log_shutdown_requested(signal: &str) {
    tracing::info!("{signal} received, no longer accepting connections");
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        tracing::info!("Shutdown complete");
    } else {
        tracing::warn!("Shutdown grace period elapsed with {remaining} connection(s) still open");
    }
}
