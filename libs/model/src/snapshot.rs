//! Instance status snapshots reported by the fleet status endpoint.

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// One instance's reported status at one poll.
///
/// `host` is the unique instance key. `load` is optional on the wire:
/// deployments that do not report load omit the field entirely, which is
/// distinct from reporting zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    pub host: String,

    pub ipaddress: String,

    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<u8>,

    /// Whether the reported load was pinned by an operator override.
    #[serde(default)]
    pub force_set: bool,
}

impl InstanceSnapshot {
    /// Whether this snapshot carries load telemetry.
    pub fn has_load(&self) -> bool {
        self.load.is_some()
    }
}

/// Decode a snapshot batch from raw JSON values.
///
/// Entries that do not decode cannot be keyed and are returned separately
/// so the caller can surface them; the rest of the batch is kept intact.
pub fn decode_batch(
    items: Vec<serde_json::Value>,
) -> (Vec<InstanceSnapshot>, Vec<SnapshotError>) {
    let mut batch = Vec::with_capacity(items.len());
    let mut dropped = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<InstanceSnapshot>(item) {
            Ok(snapshot) => batch.push(snapshot),
            Err(source) => dropped.push(SnapshotError { index, source }),
        }
    }

    (batch, dropped)
}

/// Join-address lookup result from the identity endpoint.
///
/// A missing address means the fleet currently has no capacity for another
/// player. That is a regular outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinTarget {
    #[serde(default)]
    pub ipaddress: Option<String>,
}

impl JoinTarget {
    /// Whether an instance is available to join.
    pub fn has_capacity(&self) -> bool {
        self.ipaddress.is_some()
    }
}
