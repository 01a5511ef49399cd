//! Keyed view registry and the reconcile pass.
//!
//! The registry holds one persistent [`InstanceView`] per host and brings
//! that set into exact correspondence with each polled snapshot batch:
//! update views whose host is still present, destroy views whose host is
//! gone, create views for hosts seen for the first time. Views are mutated
//! in place; their handles are never reallocated on update.

use std::collections::{HashMap, HashSet};

use fleet_model::InstanceSnapshot;

use crate::presentation::{present, Variant};
use crate::surface::{Surface, ViewHandle};

/// Whether an instance's displayed load comes from its own telemetry or
/// from an operator override.
///
/// The flag is reconciled from the snapshot every poll: a successful
/// force-set command shows up as `Forced` in the next batch, a successful
/// reset as `Reported`. The registry never flips it locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Reported,
    Forced,
}

impl LoadOrigin {
    fn from_wire(force_set: bool) -> Self {
        if force_set {
            Self::Forced
        } else {
            Self::Reported
        }
    }

    #[must_use]
    pub fn is_forced(&self) -> bool {
        matches!(self, Self::Forced)
    }
}

/// Last-known load state of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadState {
    pub level: u8,
    pub origin: LoadOrigin,
}

/// One persistent instance view.
///
/// Keeps the last-known snapshot fields needed to decide whether a
/// re-render is required. `load` is `None` for hosts that have never
/// reported load; such views carry no indicator at all.
#[derive(Debug, Clone)]
pub struct InstanceView {
    handle: ViewHandle,
    ipaddress: String,
    status: String,
    load: Option<LoadState>,
}

impl InstanceView {
    #[must_use]
    pub fn handle(&self) -> ViewHandle {
        self.handle
    }

    #[must_use]
    pub fn ipaddress(&self) -> &str {
        &self.ipaddress
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn load(&self) -> Option<LoadState> {
        self.load
    }
}

/// Outcome counts of one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

/// The persistent, keyed set of rendered instance views.
///
/// Display order is first-appearance order: new hosts append to the end,
/// and reordering of the source batch never reorders the display. Fleets
/// are small, so linear scans over the order list are fine.
#[derive(Debug)]
pub struct ViewRegistry {
    variant: Variant,
    views: HashMap<String, InstanceView>,
    order: Vec<String>,
    next_handle: u64,
}

impl ViewRegistry {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            views: HashMap::new(),
            order: Vec::new(),
            next_handle: 0,
        }
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        self.views.contains_key(host)
    }

    #[must_use]
    pub fn get(&self, host: &str) -> Option<&InstanceView> {
        self.views.get(host)
    }

    /// Hosts in display order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Bring the registry into exact correspondence with `batch`.
    ///
    /// Identity is solely the `host` key; batch order is not assumed to be
    /// stable between polls. Duplicate hosts within one batch are a caller
    /// contract violation and resolve last-one-wins without error.
    pub fn reconcile(
        &mut self,
        surface: &mut dyn Surface,
        batch: &[InstanceSnapshot],
    ) -> ReconcileSummary {
        let mut latest: HashMap<&str, &InstanceSnapshot> = HashMap::with_capacity(batch.len());
        for snapshot in batch {
            latest.insert(snapshot.host.as_str(), snapshot);
        }

        let mut summary = ReconcileSummary::default();
        let mut matched: HashSet<&str> = HashSet::with_capacity(latest.len());

        // Existing views: update in place or destroy.
        let order = std::mem::take(&mut self.order);
        let mut kept = Vec::with_capacity(order.len());
        for host in order {
            if let Some(&snapshot) = latest.get(host.as_str()) {
                if let Some(view) = self.views.get_mut(&host) {
                    Self::update_view(self.variant, surface, view, snapshot);
                    summary.updated += 1;
                }
                matched.insert(snapshot.host.as_str());
                kept.push(host);
            } else if let Some(view) = self.views.remove(&host) {
                surface.remove_view(view.handle);
                summary.removed += 1;
            }
        }
        self.order = kept;

        // Unmatched snapshots: create and append, in batch order. A host
        // already created this pass (duplicate entry) is skipped.
        for snapshot in batch {
            if matched.contains(snapshot.host.as_str()) || self.views.contains_key(&snapshot.host)
            {
                continue;
            }
            let Some(&winning) = latest.get(snapshot.host.as_str()) else {
                continue;
            };
            let view = self.create_view(surface, winning);
            self.order.push(winning.host.clone());
            self.views.insert(winning.host.clone(), view);
            summary.created += 1;
        }

        summary
    }

    fn create_view(&mut self, surface: &mut dyn Surface, snapshot: &InstanceSnapshot) -> InstanceView {
        let handle = ViewHandle::new(self.next_handle);
        self.next_handle += 1;

        let load = snapshot.load.map(|level| LoadState {
            level,
            origin: LoadOrigin::from_wire(snapshot.force_set),
        });
        let visual = snapshot
            .load
            .map(|level| present(level, snapshot.force_set, self.variant));

        surface.insert_view(handle, snapshot, visual.as_ref());

        InstanceView {
            handle,
            ipaddress: snapshot.ipaddress.clone(),
            status: snapshot.status.clone(),
            load,
        }
    }

    fn update_view(
        variant: Variant,
        surface: &mut dyn Surface,
        view: &mut InstanceView,
        snapshot: &InstanceSnapshot,
    ) {
        if snapshot.status != view.status {
            view.status = snapshot.status.clone();
            if variant == Variant::Operator {
                surface.update_status(view.handle, &view.status);
            }
        }

        if let Some(level) = snapshot.load {
            let next = LoadState {
                level,
                origin: LoadOrigin::from_wire(snapshot.force_set),
            };
            match view.load {
                Some(prev) if prev == next => {}
                Some(_) => {
                    view.load = Some(next);
                    let visual = present(level, snapshot.force_set, variant);
                    surface.update_load(view.handle, &visual);
                }
                None => {
                    // Instance started reporting load mid-session.
                    view.load = Some(next);
                    let visual = present(level, snapshot.force_set, variant);
                    surface.attach_load(view.handle, &visual);
                }
            }
        }
        // A snapshot without load leaves a previously rendered indicator
        // as-is.
    }
}
