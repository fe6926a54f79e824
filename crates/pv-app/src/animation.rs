//! Day-cycle animation clock.
//!
//! A two-state machine: `Idle`, or `Running` with the instant of the next
//! scheduled tick. Stopping drops the schedule, so no tick can fire after it.
//! The clock never reads wall time on its own; callers pass `now`.

use std::time::{Duration, Instant};

use pv_core::Real;

/// Delay between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);
/// Time of day added per tick (hours).
pub const TICK_STEP_H: Real = 0.25;
pub const CYCLE_START_H: Real = 5.0;
pub const CYCLE_END_H: Real = 19.0;

/// Ticks applied by one `poll` after a stall; older ones are dropped.
const MAX_CATCH_UP_TICKS: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running { next_tick: Instant },
}

/// Advance the animated time of day by one step, wrapping past the end of the
/// cycle back to exactly [`CYCLE_START_H`].
pub fn advance_time(time_of_day_h: Real, step_h: Real) -> Real {
    let next = time_of_day_h + step_h;
    if next > CYCLE_END_H {
        CYCLE_START_H
    } else {
        next
    }
}

#[derive(Clone, Debug)]
pub struct AnimationDriver {
    state: AnimationState,
    interval: Duration,
    step_h: Real,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::with_cadence(TICK_INTERVAL, TICK_STEP_H)
    }
}

impl AnimationDriver {
    pub fn with_cadence(interval: Duration, step_h: Real) -> Self {
        Self {
            state: AnimationState::Idle,
            interval: interval.max(Duration::from_millis(1)),
            step_h,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running { .. })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn step_h(&self) -> Real {
        self.step_h
    }

    /// Idle → Running. Returns the time of day to restart from, or `None` if
    /// the clock was already running.
    pub fn start(&mut self, now: Instant) -> Option<Real> {
        match self.state {
            AnimationState::Running { .. } => None,
            AnimationState::Idle => {
                self.state = AnimationState::Running {
                    next_tick: now + self.interval,
                };
                Some(CYCLE_START_H)
            }
        }
    }

    /// Running → Idle. Returns `false` if the clock was already idle.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = AnimationState::Idle;
        was_running
    }

    /// Flip between the two states; same return as [`start`](Self::start).
    pub fn toggle(&mut self, now: Instant) -> Option<Real> {
        if self.is_running() {
            self.stop();
            None
        } else {
            self.start(now)
        }
    }

    /// Number of ticks due at `now`; the schedule moves past them.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let AnimationState::Running { next_tick } = self.state else {
            return 0;
        };
        if now < next_tick {
            return 0;
        }

        let behind = now.duration_since(next_tick);
        let due = 1 + behind.as_nanos() / self.interval.as_nanos();
        let ticks = u32::try_from(due).unwrap_or(u32::MAX);

        let next_tick = if ticks > MAX_CATCH_UP_TICKS {
            now + self.interval
        } else {
            next_tick + self.interval * ticks
        };
        self.state = AnimationState::Running { next_tick };
        ticks.min(MAX_CATCH_UP_TICKS)
    }

    /// How long until the next tick is due; `None` while idle.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        match self.state {
            AnimationState::Idle => None,
            AnimationState::Running { next_tick } => {
                Some(next_tick.saturating_duration_since(now))
            }
        }
    }
}
