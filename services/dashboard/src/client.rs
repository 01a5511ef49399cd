//! Fleet API client.
//!
//! Thin reqwest wrapper around the fleet manager's endpoints: the status
//! batch, the load override command, the lifecycle triggers, and the
//! join-address lookup.

use anyhow::Result;
use fleet_model::{decode_batch, InstanceSnapshot, JoinTarget, OverrideCommand};
use fleet_view::Variant;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Fleet manager API client.
pub struct FleetClient {
    client: reqwest::Client,
    base_url: String,
    variant: Variant,
}

impl FleetClient {
    /// Create a new fleet client.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("fleetboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            variant: config.variant,
        })
    }

    /// Status endpoint path for this dashboard variant.
    fn stats_path(&self) -> &'static str {
        match self.variant {
            Variant::Operator => "/stats.json",
            Variant::Player => "/stats-user.json",
        }
    }

    /// Fetch and decode the current snapshot batch.
    ///
    /// Entries that cannot be keyed are dropped here with a warning. A
    /// non-2xx response or an undecodable body fails the whole poll; the
    /// caller skips the tick and the dashboard keeps its last good state.
    pub async fn fetch_snapshots(&self) -> Result<Vec<InstanceSnapshot>> {
        let url = format!("{}{}", self.base_url, self.stats_path());
        debug!(url = %url, "Fetching fleet status");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Status fetch failed (status={}): {}", status, body);
        }

        let items: Vec<serde_json::Value> = response.json().await?;
        let (snapshots, dropped) = decode_batch(items);
        for error in &dropped {
            warn!(error = %error, "Dropping malformed snapshot entry");
        }

        debug!(
            instance_count = snapshots.len(),
            dropped = dropped.len(),
            "Fetched fleet status"
        );

        Ok(snapshots)
    }

    /// Post a load override command. The response body is ignored; callers
    /// follow up with a poll for the authoritative state.
    pub async fn send_override(&self, command: &OverrideCommand) -> Result<()> {
        let url = format!("{}/load", self.base_url);
        debug!(host = %command.name, force = command.force, "Posting load override");

        let response = self.client.post(&url).form(&command.to_form()).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Override command failed with status: {}", response.status());
        }

        Ok(())
    }

    /// Ask the backend to start the whole fleet.
    pub async fn start_fleet(&self) -> Result<()> {
        self.trigger("/startup").await
    }

    /// Ask the backend to stop every fleet instance.
    pub async fn stop_fleet(&self) -> Result<()> {
        self.trigger("/teardown").await
    }

    async fn trigger(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        info!(url = %url, "Requesting fleet lifecycle change");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Lifecycle request failed with status: {}", response.status());
        }

        Ok(())
    }

    /// Look up an instance with spare capacity for a new player. `None`
    /// means no capacity right now, not an error.
    pub async fn fetch_join_target(&self) -> Result<JoinTarget> {
        let url = format!("{}/getip.json", self.base_url);
        debug!(url = %url, "Looking up join target");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Join lookup failed with status: {}", response.status());
        }

        Ok(response.json().await?)
    }
}
