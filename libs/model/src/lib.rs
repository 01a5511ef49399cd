//! Wire-level data model for fleetboard.
//!
//! Defines the snapshot shape reported by the fleet status endpoint, the
//! form-encoded override command posted back to the fleet manager, and the
//! join-address lookup used to place a player on an instance.
//!
//! Snapshot batches arrive as JSON arrays. Decoding is tolerant: an entry
//! that cannot be keyed (missing `host`, wrong types) is dropped and
//! reported alongside the good entries, so one bad instance never takes
//! down the whole batch.

mod command;
mod error;
mod snapshot;

pub use command::OverrideCommand;
pub use error::SnapshotError;
pub use snapshot::{decode_batch, InstanceSnapshot, JoinTarget};
