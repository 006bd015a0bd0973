//! Listener binding with retry

use std::time::Duration;

use anyhow::Context;
use tokio::{net::TcpListener, time::sleep};
use tracing::{info, warn};

/// Bind the control-surface listener, retrying while the address is busy.
///
/// A restarted instance is spawned while its predecessor still holds the
/// port; the predecessor releases it moments later when it observes the quit
/// signal, so the replacement waits it out instead of dying on the first
/// failed bind.
pub async fn bind_with_retry(
    addr: &str,
    attempts: u32,
    delay: Duration,
) -> anyhow::Result<TcpListener> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if attempt > 1 {
                    info!("Bound {} on attempt {}", addr, attempt);
                }
                return Ok(listener);
            }
            Err(e) if attempt < attempts => {
                warn!(
                    "Bind attempt {}/{} on {} failed: {}, retrying",
                    attempt, attempts, addr, e
                );
                sleep(delay).await;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to bind {} after {} attempts", addr, attempts)
                });
            }
        }
    }
}
