//! Logger module
//!
//! Logging utilities for the server:
//! - Startup summary
//! - Access logging with multiple formats
//! - Leveled error/warning/info logging
//! - File-based logging support

mod format;
mod level;
pub mod writer;

pub use format::AccessLogEntry;
pub use level::LogLevel;

use crate::config::{Config, CredentialSource, LoggingConfig};
use std::io;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Until then messages go
/// straight to stdout/stderr.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let level = config
        .level
        .parse::<LogLevel>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
        level,
    )
}

fn write(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write(level, message),
        None if level <= LogLevel::Warn => eprintln!("{message}"),
        None => println!("{message}"),
    }
}

pub fn log_server_start(
    addr: &SocketAddr,
    config: &Config,
    public_dir: &Path,
    credential_source: CredentialSource,
) {
    log_info("======================================");
    log_info("pagegate started");
    log_info(&format!("Listening on: http://{addr}"));
    log_info(&format!("Public directory: {}", public_dir.display()));
    log_info(&format!("Protected page: {}", config.site.protected_path));
    log_info(&format!("Diagnostic path: {}", config.site.diagnostic_path));
    log_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        log_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_info(&format!("Error log: {path}"));
    }
    match credential_source {
        CredentialSource::Environment => log_info(&format!(
            "Page password loaded from ${}",
            config.auth.password_env
        )),
        CredentialSource::DocumentedDefault => log_warning(&format!(
            "${} is not set, protected page uses the default password. Set it before exposing this server.",
            config.auth.password_env
        )),
    }
    log_info("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_shutdown(active_connections: usize) {
    log_info(&format!(
        "[Shutdown] No longer accepting connections ({active_connections} still open)"
    ));
}

pub fn log_error(message: &str) {
    write(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write(LogLevel::Warn, &format!("[WARN] {message}"));
}

pub fn log_info(message: &str) {
    write(LogLevel::Info, &format!("[INFO] {message}"));
}

pub fn log_debug(message: &str) {
    write(LogLevel::Debug, &format!("[DEBUG] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}
