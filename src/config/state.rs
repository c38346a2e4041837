// Application state module
// Shared, read-only server state handed to every connection task

use std::sync::atomic::AtomicUsize;
use tokio::sync::Notify;

use super::types::Config;
use crate::handler::Router;

/// Application state
pub struct AppState {
    pub config: Config,
    pub router: Router,
    /// Number of connections currently being served
    pub active_connections: AtomicUsize,
    /// Notified once when the process should stop accepting connections
    pub shutdown: Notify,
}

impl AppState {
    pub fn new(config: Config, router: Router) -> Self {
        Self {
            config,
            router,
            active_connections: AtomicUsize::new(0),
            shutdown: Notify::new(),
        }
    }
}
