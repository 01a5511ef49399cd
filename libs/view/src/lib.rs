//! Reconciliation and presentation-state engine for the fleet dashboard.
//!
//! This library takes a freshly fetched batch of instance snapshots and an
//! existing keyed set of view objects, and produces a minimal set of
//! create/update/remove operations against a rendering [`Surface`] while
//! preserving per-instance UI state (load override, visual identity)
//! across polls. Key concepts:
//!
//! - **Snapshot batch**: The full current fleet state, never a delta.
//! - **View registry**: The persistent keyed set of rendered views.
//! - **Reconcile**: Bringing the registry into exact correspondence with a
//!   batch.
//!
//! # Invariants
//!
//! - Reconcile is idempotent: applying the same batch twice yields an
//!   identical registry and no extra surface operations.
//! - A view's handle is allocated once and survives every update.
//! - After a completed reconcile, the registry's key set equals the batch's
//!   host set exactly.

mod notice;
mod presentation;
mod registry;
mod surface;

pub use notice::{NoticeBoard, AUTO_HIDE_AFTER};
pub use presentation::{
    present, ColorBand, LoadVisual, Variant, POINTS_PER_SLOT, SLOT_WIDTH, TRACK_WIDTH,
    UNITS_PER_POINT,
};
pub use registry::{InstanceView, LoadOrigin, LoadState, ReconcileSummary, ViewRegistry};
pub use surface::{Surface, ViewHandle};
