//! Single-slot advisory notice.
//!
//! The dashboard shows at most one fleet-wide notice at a time ("fleet
//! starting", "shutting down"). Auto-hiding notices expire five seconds
//! after they are shown; persistent notices stay until a poll reports at
//! least one live instance or they are hidden explicitly. The board owns
//! no timer: it exposes the active deadline and the session's event loop
//! drives expiry, which keeps the state machine testable with a simulated
//! clock.

use std::time::{Duration, Instant};

use crate::surface::Surface;

/// How long an auto-hiding notice stays on screen.
pub const AUTO_HIDE_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct ActiveNotice {
    text: String,
    auto_hides: bool,
    deadline: Option<Instant>,
}

/// Owner of the single advisory notice slot.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    active: Option<ActiveNotice>,
}

impl NoticeBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice, replacing any prior one. Auto-hiding notices are
    /// armed with a deadline of `now + AUTO_HIDE_AFTER`; persistent ones
    /// get emphasized styling and no deadline.
    pub fn show(
        &mut self,
        surface: &mut dyn Surface,
        text: impl Into<String>,
        auto_hides: bool,
        now: Instant,
    ) {
        let text = text.into();
        surface.show_notice(&text, !auto_hides);
        self.active = Some(ActiveNotice {
            text,
            auto_hides,
            deadline: auto_hides.then(|| now + AUTO_HIDE_AFTER),
        });
    }

    /// Hide the active notice. A no-op when nothing is shown.
    pub fn hide(&mut self, surface: &mut dyn Surface) {
        if self.active.take().is_some() {
            surface.clear_notice();
        }
    }

    /// Deadline at which the active notice expires, if it auto-hides.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.active.as_ref().and_then(|notice| notice.deadline)
    }

    /// Hide the active notice once its deadline has passed. Returns
    /// whether a notice was hidden.
    pub fn expire(&mut self, surface: &mut dyn Surface, now: Instant) -> bool {
        let due = matches!(
            &self.active,
            Some(notice) if notice.deadline.is_some_and(|deadline| deadline <= now)
        );
        if due {
            self.hide(surface);
        }
        due
    }

    /// React to a completed poll: a persistent notice hides once at least
    /// one instance is reporting. Auto-hiding notices only ever expire on
    /// their own deadline.
    pub fn on_poll_result(&mut self, surface: &mut dyn Surface, instance_count: usize) {
        let hides = instance_count > 0
            && matches!(&self.active, Some(notice) if !notice.auto_hides);
        if hides {
            self.hide(surface);
        }
    }

    #[must_use]
    pub fn active_text(&self) -> Option<&str> {
        self.active.as_ref().map(|notice| notice.text.as_str())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
