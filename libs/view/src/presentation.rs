//! Load presentation policy.
//!
//! Maps a reported load level (plus override flag) to the visual
//! parameters of the load indicator. Pure and deterministic; the two
//! dashboard variants produce different shapes from the same inputs.

/// Which dashboard is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Operator dashboard: full telemetry plus override controls.
    Operator,
    /// Player-facing dashboard: capacity slots and a join affordance.
    Player,
}

/// Color band of the operator load bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBand {
    Green,
    Yellow,
    Red,
}

impl ColorBand {
    /// Band for a load level. 60 and 80 are hard boundaries: 59 is green,
    /// 60 is yellow, 79 is yellow, 80 is red.
    #[must_use]
    pub fn for_load(load: u8) -> Self {
        if load < 60 {
            Self::Green
        } else if load < 80 {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Total track width of the operator bar, in display units.
pub const TRACK_WIDTH: u32 = 215;

/// Operator bar display units per load point.
pub const UNITS_PER_POINT: u32 = 2;

/// Load points per player slot.
pub const POINTS_PER_SLOT: u8 = 12;

/// Player bar display units per occupied slot.
pub const SLOT_WIDTH: u32 = 48;

/// Visual parameters of one load indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadVisual {
    /// Continuous bar with color bands and a forced-override marker.
    Operator {
        level: u8,
        band: ColorBand,
        /// Filled bar extent, `level * 2` units.
        width: u32,
        /// Unfilled remainder of the track.
        margin: u32,
        /// Distinct styling applied while the load is operator-pinned.
        forced: bool,
    },
    /// Discrete slot bar; the join affordance hides at full load.
    Player {
        /// One slot of width per full 12 points of load.
        width: u32,
        join_visible: bool,
    },
}

/// Compute the indicator visuals for a reported load level.
///
/// Callers only invoke this when the snapshot actually carries a load
/// value; a host with no load field gets no indicator at all.
#[must_use]
pub fn present(load: u8, forced: bool, variant: Variant) -> LoadVisual {
    match variant {
        Variant::Operator => {
            let width = u32::from(load) * UNITS_PER_POINT;
            LoadVisual::Operator {
                level: load,
                band: ColorBand::for_load(load),
                width,
                margin: TRACK_WIDTH.saturating_sub(width),
                forced,
            }
        }
        Variant::Player => LoadVisual::Player {
            width: u32::from(load / POINTS_PER_SLOT) * SLOT_WIDTH,
            join_visible: load < 100,
        },
    }
}
