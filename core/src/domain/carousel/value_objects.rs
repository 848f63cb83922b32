/// Lap the view starts and re-anchors on after every landing.
pub const HOME_LAP: usize = 1;

/// Laps kept materialized behind the current position after a landing.
pub const RETAIN_LAPS_BEHIND: usize = 1;

/// Minimum full laps a spin travels so the animation reads as a spin.
pub const MIN_TRAVEL_LAPS: usize = 2;

/// Extra full laps a spin may add on top of the minimum.
pub const MAX_EXTRA_LAPS: usize = 2;

pub const BASE_SPIN_DURATION_MS: u64 = 2_100;
pub const PER_LAP_DURATION_MS: u64 = 350;
pub const DURATION_JITTER_MS: u64 = 500;

/// Pause between the animation landing and the result reveal.
pub const SETTLE_DELAY_MS: u64 = 120;

/// Card and viewport dimensions, injected by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselGeometry {
    pub card_width: f64,
    pub window_width: f64,
}

/// One item instance inside the materialized strip: which lap, and which
/// slot within the lap. The slot doubles as the pool index of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapPosition {
    pub lap: usize,
    pub index: usize,
}

/// Everything the presentation layer needs to run one spin animation. The
/// controller stays `Spinning` until `finish()` commits the landing.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlan {
    pub from_offset: f64,
    pub to_offset: f64,
    pub duration_ms: u64,
    pub settle_delay_ms: u64,
    pub target: LapPosition,
}
