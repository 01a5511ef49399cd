//! fleetboard - live fleet status dashboard.
//!
//! Polls the fleet manager's status endpoint at a fixed rate, reconciles
//! each batch into a persistent per-instance view, and renders the result
//! to the terminal. Line commands on stdin drive load overrides and fleet
//! lifecycle actions.
//!
//! ## Architecture
//!
//! - **Poll Loop**: Fetches snapshot batches at a fixed rate, tagging each
//!   with a sequence number
//! - **Session**: Owns the view registry, notice board, and surface;
//!   applies batches and user commands
//! - **Override Controller**: Posts load override commands and schedules
//!   the follow-up poll
//! - **Input Loop**: Parses stdin commands

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fleet_dashboard::client::FleetClient;
use fleet_dashboard::config::Config;
use fleet_dashboard::controller::OverrideController;
use fleet_dashboard::input::run_input_loop;
use fleet_dashboard::poller::run_poll_loop;
use fleet_dashboard::session::Session;
use fleet_dashboard::term::TerminalSurface;
use fleet_view::{Surface, ViewRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout belongs to the dashboard.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        base_url = %config.base_url,
        variant = ?config.variant,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        "Starting fleetboard"
    );

    let client = Arc::new(FleetClient::new(&config)?);

    if config.once {
        return poll_once(&config, &client).await;
    }

    let (events_tx, events_rx) = mpsc::channel(16);
    let (commands_tx, commands_rx) = mpsc::channel(16);
    let (repoll_tx, repoll_rx) = mpsc::channel(4);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let poller_handle = tokio::spawn(run_poll_loop(
        Arc::clone(&client),
        config.poll_interval,
        events_tx.clone(),
        repoll_rx,
        shutdown_rx.clone(),
    ));
    let input_handle = tokio::spawn(run_input_loop(commands_tx, shutdown_rx.clone()));

    let controller = OverrideController::new(Arc::clone(&client), repoll_tx);
    let session = Session::new(
        config.variant,
        config.join_port,
        TerminalSurface::new(config.variant),
        controller,
        Arc::clone(&client),
        events_tx,
    );

    tokio::select! {
        _ = session.run(events_rx, commands_rx, shutdown_rx.clone()) => {
            info!("Session ended");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    // Signal shutdown to the workers; they exit at their next wakeup.
    let _ = shutdown_tx.send(true);
    poller_handle.abort();
    input_handle.abort();

    info!("Dashboard shutdown complete");
    Ok(())
}

/// Single poll for smoke tests and CI: fetch, render, exit.
async fn poll_once(config: &Config, client: &FleetClient) -> Result<()> {
    let snapshots = client.fetch_snapshots().await?;

    let mut surface = TerminalSurface::new(config.variant);
    let mut registry = ViewRegistry::new(config.variant);
    let summary = registry.reconcile(&mut surface, &snapshots);
    surface.set_fleet_size(snapshots.len());
    surface.flush();

    info!(
        created = summary.created,
        instance_count = snapshots.len(),
        "Single poll complete"
    );
    Ok(())
}
