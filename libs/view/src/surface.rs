//! Rendering abstraction.
//!
//! The registry never touches a concrete rendering technology. It drives a
//! [`Surface`] through opaque [`ViewHandle`]s; the handle for a host is
//! allocated once at view creation and stays stable for the lifetime of
//! the view, so implementations can keep transition state attached to it.

use fleet_model::InstanceSnapshot;

use crate::presentation::LoadVisual;

/// Opaque identity of one rendered instance view.
///
/// Handles are unique within a registry and are never reused, so a late
/// operation against a removed view can be recognized and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewHandle(u64);

impl ViewHandle {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value, for logging and diagnostics.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

/// Rendering operations issued by the registry and the notice board.
///
/// Implementations must tolerate operations against handles they no longer
/// know: a late update for a vanished view is a no-op, never a fault.
pub trait Surface {
    /// Mount a new view: static fields (host, address) plus the initial
    /// load indicator when the snapshot reports load. New views append to
    /// the end of the display order.
    fn insert_view(
        &mut self,
        handle: ViewHandle,
        snapshot: &InstanceSnapshot,
        load: Option<&LoadVisual>,
    );

    /// Update the mutable status text of an existing view in place.
    fn update_status(&mut self, handle: ViewHandle, status: &str);

    /// Attach a load indicator to a view that was created without one.
    fn attach_load(&mut self, handle: ViewHandle, visual: &LoadVisual);

    /// Re-render the load indicator of an existing view.
    fn update_load(&mut self, handle: ViewHandle, visual: &LoadVisual);

    /// Detach a view entirely.
    fn remove_view(&mut self, handle: ViewHandle);

    /// Update the fleet-wide instance count.
    fn set_fleet_size(&mut self, count: usize);

    /// Show the single advisory notice, replacing any prior one.
    /// Emphasized notices are the persistent kind.
    fn show_notice(&mut self, text: &str, emphasized: bool);

    /// Clear the advisory notice.
    fn clear_notice(&mut self);

    /// Commit buffered changes to the output. Incremental surfaces may
    /// ignore this.
    fn flush(&mut self) {}
}
