//! Override command handlers.
//!
//! Each handler takes the target host as a typed parameter and posts the
//! corresponding override command. Commands are fire-and-forget: success
//! or failure, the controller requests one out-of-band poll and lets the
//! next batch reveal the authoritative state. Failed commands are never
//! retried.

use std::sync::Arc;

use fleet_model::OverrideCommand;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::FleetClient;

/// Posts override commands and schedules the follow-up poll.
#[derive(Clone)]
pub struct OverrideController {
    client: Arc<FleetClient>,
    repoll: mpsc::Sender<()>,
}

impl OverrideController {
    pub fn new(client: Arc<FleetClient>, repoll: mpsc::Sender<()>) -> Self {
        Self { client, repoll }
    }

    /// Pin `host` at `load` until reset.
    pub async fn force_set(&self, host: String, load: u32) {
        let command = OverrideCommand::force_set(host.clone(), load);
        match self.client.send_override(&command).await {
            Ok(()) => info!(host = %host, load, "Load pinned"),
            Err(e) => {
                warn!(host = %host, load, error = %e, "Force-set failed; next poll shows true state");
            }
        }
        self.request_poll().await;
    }

    /// Clear the pin on `host` so its own reports resume.
    pub async fn reset(&self, host: String) {
        let command = OverrideCommand::reset(host.clone());
        match self.client.send_override(&command).await {
            Ok(()) => info!(host = %host, "Load pin cleared"),
            Err(e) => {
                warn!(host = %host, error = %e, "Reset failed; next poll shows true state");
            }
        }
        self.request_poll().await;
    }

    async fn request_poll(&self) {
        if self.repoll.send(()).await.is_err() {
            debug!("Poll loop gone; skipping refresh request");
        }
    }
}
