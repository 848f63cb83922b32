use rand::Rng;

use crate::domain::{
    carousel::value_objects::{
        AnimationPlan, CarouselGeometry, LapPosition, BASE_SPIN_DURATION_MS, DURATION_JITTER_MS,
        HOME_LAP, MAX_EXTRA_LAPS, MIN_TRAVEL_LAPS, PER_LAP_DURATION_MS, RETAIN_LAPS_BEHIND,
        SETTLE_DELAY_MS,
    },
    common::entities::app_errors::CoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpinPhase {
    Idle,
    Spinning { target: LapPosition },
}

/// Lap-window state machine behind the infinite-looking carousel.
///
/// The strip is conceptually an endless repetition of the pool; only the
/// laps in `[first_lap, last_lap]` exist in the view at any moment. A spin
/// animates forward through pre-materialized laps, and every landing
/// re-anchors the numbering on [`HOME_LAP`] so lap numbers stay small no
/// matter how many spins run.
#[derive(Debug, Clone)]
pub struct CarouselController {
    pool_size: usize,
    geometry: CarouselGeometry,
    first_lap: usize,
    last_lap: usize,
    current: LapPosition,
    phase: SpinPhase,
}

impl CarouselController {
    /// The spin trigger is gated on a non-empty pool, so an empty one here
    /// is a call-site bug.
    pub fn new(pool_size: usize, geometry: CarouselGeometry) -> Result<Self, CoreError> {
        if pool_size == 0 {
            return Err(CoreError::EmptyPool);
        }
        Ok(Self {
            pool_size,
            geometry,
            first_lap: HOME_LAP - RETAIN_LAPS_BEHIND,
            last_lap: HOME_LAP + MIN_TRAVEL_LAPS + MAX_EXTRA_LAPS,
            current: LapPosition {
                lap: HOME_LAP,
                index: 0,
            },
            phase: SpinPhase::Idle,
        })
    }

    pub fn current(&self) -> LapPosition {
        self.current
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning { .. })
    }

    /// Number of laps currently materialized in the strip.
    pub fn materialized_laps(&self) -> usize {
        self.last_lap - self.first_lap + 1
    }

    /// Materialize laps up through `lap`. Grow-only; pruning only happens
    /// when a landing commits.
    pub fn ensure_lap(&mut self, lap: usize) {
        if lap > self.last_lap {
            self.last_lap = lap;
        }
    }

    /// Offset the strip must be translated by to put the given card's
    /// centre under the window's centre, measured from the strip start.
    pub fn center_on(&self, position: LapPosition) -> Result<f64, CoreError> {
        if position.index >= self.pool_size
            || position.lap < self.first_lap
            || position.lap > self.last_lap
        {
            return Err(CoreError::Invalid);
        }
        let slot = (position.lap - self.first_lap) * self.pool_size + position.index;
        Ok((slot as f64 + 0.5) * self.geometry.card_width - self.geometry.window_width / 2.0)
    }

    /// Commit to a random landing and hand back the animation plan. A spin
    /// already in flight refuses the request; the trigger stays disabled
    /// until `finish()`.
    pub fn spin<R: Rng>(&mut self, rng: &mut R) -> Result<AnimationPlan, CoreError> {
        if self.is_spinning() {
            return Err(CoreError::SpinInFlight);
        }

        let travel = MIN_TRAVEL_LAPS + rng.gen_range(0..=MAX_EXTRA_LAPS);
        let target = LapPosition {
            lap: self.current.lap + travel,
            index: rng.gen_range(0..self.pool_size),
        };
        self.ensure_lap(target.lap);

        let duration_ms = BASE_SPIN_DURATION_MS
            + PER_LAP_DURATION_MS * travel as u64
            + rng.gen_range(0..DURATION_JITTER_MS);

        let plan = AnimationPlan {
            from_offset: self.center_on(self.current)?,
            to_offset: self.center_on(target)?,
            duration_ms,
            settle_delay_ms: SETTLE_DELAY_MS,
            target,
        };
        self.phase = SpinPhase::Spinning { target };
        Ok(plan)
    }

    /// Commit the landing once the animation completes: the target becomes
    /// current, lap numbering re-anchors on [`HOME_LAP`], laps outside the
    /// retention window are pruned, and the window is topped back up for
    /// the next spin. Returns the offset the view applies without animation
    /// to keep the landed card centered across the renumbering.
    pub fn finish(&mut self) -> Result<f64, CoreError> {
        let target = match self.phase {
            SpinPhase::Spinning { target } => target,
            SpinPhase::Idle => return Err(CoreError::Invalid),
        };

        self.current = LapPosition {
            lap: HOME_LAP,
            index: target.index,
        };
        self.first_lap = HOME_LAP - RETAIN_LAPS_BEHIND;
        self.last_lap = HOME_LAP + MIN_TRAVEL_LAPS + MAX_EXTRA_LAPS;
        self.phase = SpinPhase::Idle;

        self.center_on(self.current)
    }
}
