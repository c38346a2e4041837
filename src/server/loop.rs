// Server loop module
// Accepts connections until shutdown is requested, then waits for open connections to finish

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections until `state.shutdown` is notified
pub async fn run_server(listener: TcpListener, state: Arc<AppState>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = state.shutdown.notified() => {
                logger::log_shutdown(state.active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&state).await;
}

/// Wait for in-flight connections, bounded by the longest per-connection timeout
async fn drain_connections(state: &AppState) {
    let performance = &state.config.performance;
    let deadline = Duration::from_secs(std::cmp::max(
        performance.read_timeout,
        performance.write_timeout,
    ));

    let drained = tokio::time::timeout(deadline, async {
        while state.active_connections.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }
    })
    .await;

    match drained {
        Ok(()) => logger::log_info("[Shutdown] All connections closed"),
        Err(_) => logger::log_warning(&format!(
            "[Shutdown] {} connection(s) still open after {}s, exiting anyway",
            state.active_connections.load(Ordering::SeqCst),
            deadline.as_secs()
        )),
    }
}
