//! Dashboard configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use fleet_view::Variant;

/// Dashboard configuration (env-driven).
#[derive(Debug, Clone)]
pub struct Config {
    /// Fleet manager base URL (example: http://localhost:8080).
    pub base_url: String,

    /// Which dashboard to render: operator or player.
    pub variant: Variant,

    /// Fixed poll rate.
    pub poll_interval: Duration,

    /// Per-request HTTP timeout.
    pub http_timeout: Duration,

    /// Port players connect to on a joined instance.
    pub join_port: u16,

    /// Poll once, render, and exit.
    pub once: bool,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("FLEET_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let variant = match std::env::var("FLEET_VARIANT") {
            Ok(value) => match value.as_str() {
                "operator" => Variant::Operator,
                "player" => Variant::Player,
                other => anyhow::bail!(
                    "FLEET_VARIANT must be `operator` or `player`, got `{other}`."
                ),
            },
            Err(_) => Variant::Operator,
        };

        let poll_interval_ms: u64 = std::env::var("FLEET_POLL_INTERVAL_MS")
            .ok()
            .map(|v| v.parse())
            .transpose()
            .context("FLEET_POLL_INTERVAL_MS must be an integer (milliseconds).")?
            .unwrap_or(5000);
        let poll_interval = Duration::from_millis(poll_interval_ms.max(50));

        let http_timeout_secs: u64 = std::env::var("FLEET_HTTP_TIMEOUT_SECS")
            .ok()
            .map(|v| v.parse())
            .transpose()
            .context("FLEET_HTTP_TIMEOUT_SECS must be an integer (seconds).")?
            .unwrap_or(10);

        let join_port: u16 = std::env::var("FLEET_JOIN_PORT")
            .ok()
            .map(|v| v.parse())
            .transpose()
            .context("FLEET_JOIN_PORT must be a port number.")?
            .unwrap_or(8080);

        let once = std::env::var("FLEET_ONCE")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let log_level = std::env::var("FLEET_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            base_url,
            variant,
            poll_interval,
            http_timeout: Duration::from_secs(http_timeout_secs),
            join_port,
            once,
            log_level,
        })
    }
}
