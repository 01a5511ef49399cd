//! Wire decoding errors.

use thiserror::Error;

/// A batch entry that could not be decoded into a keyed snapshot.
///
/// Carries the entry's position in the batch so the drop can be traced back
/// to the payload that produced it.
#[derive(Debug, Error)]
#[error("snapshot entry {index} could not be keyed: {source}")]
pub struct SnapshotError {
    /// Position of the entry within the received batch.
    pub index: usize,

    #[source]
    pub source: serde_json::Error,
}
