//! Dashboard session.
//!
//! One task owns every piece of presentation state - the view registry,
//! the notice board, and the surface - so reconciliation and rendering
//! never interleave. Fetches and command posts run in spawned tasks and
//! report back through the event channel; whichever batch arrives last
//! with the highest sequence number wins.

use std::sync::Arc;
use std::time::{Duration, Instant};

use fleet_model::InstanceSnapshot;
use fleet_view::{NoticeBoard, Surface, Variant, ViewRegistry};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::client::FleetClient;
use crate::controller::OverrideController;
use crate::input::Command;

/// Completion events delivered back to the session task.
#[derive(Debug)]
pub enum SessionEvent {
    /// A completed status poll. `seq` is the issuing tick's sequence
    /// number; stale responses are dropped.
    Batch {
        seq: u64,
        snapshots: Vec<InstanceSnapshot>,
    },
    /// A completed join-address lookup (player variant).
    JoinResolved(Option<String>),
}

/// Owns the presentation state and reacts to events and commands.
pub struct Session<S: Surface> {
    registry: ViewRegistry,
    notices: NoticeBoard,
    surface: S,
    controller: OverrideController,
    client: Arc<FleetClient>,
    events_tx: mpsc::Sender<SessionEvent>,
    last_applied_seq: u64,
    join_port: u16,
}

impl<S: Surface> Session<S> {
    pub fn new(
        variant: Variant,
        join_port: u16,
        surface: S,
        controller: OverrideController,
        client: Arc<FleetClient>,
        events_tx: mpsc::Sender<SessionEvent>,
    ) -> Self {
        Self {
            registry: ViewRegistry::new(variant),
            notices: NoticeBoard::new(),
            surface,
            controller,
            client,
            events_tx,
            last_applied_seq: 0,
            join_port,
        }
    }

    /// Run until `Quit`, shutdown, or both input channels close.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<SessionEvent>,
        mut commands: mpsc::Receiver<Command>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            let deadline = self.notices.deadline();
            let expiry = deadline
                .map(tokio::time::Instant::from_std)
                .unwrap_or_else(|| tokio::time::Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                Some(event) = events.recv() => self.handle_event(event),
                Some(command) = commands.recv() => {
                    if !self.handle_command(command) {
                        info!("Quit requested");
                        break;
                    }
                }
                _ = tokio::time::sleep_until(expiry), if deadline.is_some() => {
                    self.notices.expire(&mut self.surface, Instant::now());
                    self.surface.flush();
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("Session shutting down");
                        break;
                    }
                }
            }
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Batch { seq, snapshots } => self.apply_batch(seq, snapshots),
            SessionEvent::JoinResolved(Some(address)) => {
                let url = format!("http://{}:{}/", address, self.join_port);
                info!(url = %url, "Join target resolved");
                self.notices
                    .show(&mut self.surface, format!("Join at {url}"), true, Instant::now());
                self.surface.flush();
            }
            SessionEvent::JoinResolved(None) => {
                self.notices.show(
                    &mut self.surface,
                    "No instance available.",
                    true,
                    Instant::now(),
                );
                self.surface.flush();
            }
        }
    }

    /// Apply one completed poll to the presentation state.
    pub fn apply_batch(&mut self, seq: u64, snapshots: Vec<InstanceSnapshot>) {
        if seq < self.last_applied_seq {
            debug!(
                seq,
                last_applied = self.last_applied_seq,
                "Dropping stale poll response"
            );
            return;
        }
        self.last_applied_seq = seq;

        let summary = self.registry.reconcile(&mut self.surface, &snapshots);
        self.notices
            .on_poll_result(&mut self.surface, snapshots.len());
        self.surface.set_fleet_size(snapshots.len());

        debug!(
            seq,
            created = summary.created,
            updated = summary.updated,
            removed = summary.removed,
            total = self.registry.len(),
            "Applied status batch"
        );

        self.surface.flush();
    }

    /// Handle one user command. Returns false on `Quit`.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::ForceSet { host, load } => {
                // The host can vanish between being displayed and the
                // command arriving; drop the command rather than post an
                // override for a dead instance.
                if !self.registry.contains(&host) {
                    warn!(host = %host, "Ignoring override for unknown host");
                    return true;
                }
                let controller = self.controller.clone();
                tokio::spawn(async move { controller.force_set(host, load).await });
            }
            Command::Reset { host } => {
                if !self.registry.contains(&host) {
                    warn!(host = %host, "Ignoring reset for unknown host");
                    return true;
                }
                let controller = self.controller.clone();
                tokio::spawn(async move { controller.reset(host).await });
            }
            Command::StartFleet => {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    if let Err(e) = client.start_fleet().await {
                        warn!(error = %e, "Fleet start request failed");
                    }
                });
                // Persistent until a poll shows at least one instance.
                self.notices
                    .show(&mut self.surface, "Fleet starting...", false, Instant::now());
                self.surface.flush();
            }
            Command::StopFleet => {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    if let Err(e) = client.stop_fleet().await {
                        warn!(error = %e, "Fleet stop request failed");
                    }
                });
                self.notices.show(
                    &mut self.surface,
                    "Shutting down fleet...",
                    true,
                    Instant::now(),
                );
                self.surface.flush();
            }
            Command::Join => {
                let client = Arc::clone(&self.client);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    match client.fetch_join_target().await {
                        Ok(target) => {
                            let _ = events
                                .send(SessionEvent::JoinResolved(target.ipaddress))
                                .await;
                        }
                        Err(e) => warn!(error = %e, "Join lookup failed"),
                    }
                });
            }
            Command::Quit => return false,
        }
        true
    }

    /// Number of views currently rendered.
    pub fn view_count(&self) -> usize {
        self.registry.len()
    }

    /// Registry accessor for integration tests.
    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Notice accessor for integration tests.
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }
}
