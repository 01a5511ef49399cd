//! Fixed-rate status polling.
//!
//! The loop ticks at a constant rate regardless of in-flight requests:
//! each tick spawns its own fetch, so a slow response never delays the
//! next tick and responses can complete out of order. Every fetch carries
//! the sequence number of the tick that issued it; the session drops
//! responses that arrive behind a newer one. A failed fetch only logs -
//! the dashboard keeps its last good state until the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::client::FleetClient;
use crate::session::SessionEvent;

/// Run the poll loop until shutdown. The first poll fires immediately.
pub async fn run_poll_loop(
    client: Arc<FleetClient>,
    interval: Duration,
    events: mpsc::Sender<SessionEvent>,
    mut repoll: mpsc::Receiver<()>,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(interval_ms = interval.as_millis() as u64, "Starting poll loop");

    let mut ticker = tokio::time::interval(interval);
    let mut seq = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                seq += 1;
                spawn_poll(&client, &events, seq);
            }
            requested = repoll.recv() => {
                if requested.is_none() {
                    // Command side is gone; only happens at shutdown.
                    debug!("Repoll channel closed");
                    break;
                }
                seq += 1;
                debug!(seq, "Out-of-band poll requested");
                spawn_poll(&client, &events, seq);
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("Poll loop shutting down");
                    break;
                }
            }
        }
    }
}

fn spawn_poll(client: &Arc<FleetClient>, events: &mpsc::Sender<SessionEvent>, seq: u64) {
    let client = Arc::clone(client);
    let events = events.clone();

    tokio::spawn(async move {
        match client.fetch_snapshots().await {
            Ok(snapshots) => {
                let _ = events.send(SessionEvent::Batch { seq, snapshots }).await;
            }
            Err(e) => warn!(seq, error = %e, "Poll failed; keeping last good view"),
        }
    });
}
