//! Gravity clock - decides when the falling piece steps down
//!
//! The clock accumulates frame time and total play time. The gravity
//! interval shrinks with play time, widens while the stack is in the danger
//! zone and doubles while slow motion is active.

use crate::types::{
    BASE_FALL_MS, DANGER_FALL_MS, MIN_FALL_MS, SLOW_MOTION_FACTOR, SPEEDUP_PERIOD_MS,
    SPEEDUP_STEP_MS,
};

/// Gravity interval for the given play time and modifiers.
///
/// ```
/// use neonlink_session::clock::fall_interval_ms;
///
/// assert_eq!(fall_interval_ms(0, false, false), 500);
/// assert_eq!(fall_interval_ms(65_000, false, false), 400);
/// assert_eq!(fall_interval_ms(65_000, true, true), 1600);
/// ```
pub fn fall_interval_ms(play_ms: u64, danger: bool, slow_motion: bool) -> u32 {
    let interval = if danger {
        DANGER_FALL_MS
    } else {
        let steps = play_ms / SPEEDUP_PERIOD_MS;
        let reduction = steps.saturating_mul(SPEEDUP_STEP_MS as u64);
        (BASE_FALL_MS as u64)
            .saturating_sub(reduction)
            .max(MIN_FALL_MS as u64) as u32
    };

    if slow_motion {
        interval * SLOW_MOTION_FACTOR
    } else {
        interval
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravityClock {
    /// Time since the last gravity step
    fall_ms: u32,
    /// Time spent playing since the game (re)started
    play_ms: u64,
}

impl GravityClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's worth of elapsed time
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.fall_ms = self.fall_ms.saturating_add(elapsed_ms);
        self.play_ms = self.play_ms.saturating_add(elapsed_ms as u64);
    }

    pub fn interval_ms(&self, danger: bool, slow_motion: bool) -> u32 {
        fall_interval_ms(self.play_ms, danger, slow_motion)
    }

    /// Consume a gravity step if the accumulator strictly exceeds the interval
    pub fn take_step(&mut self, danger: bool, slow_motion: bool) -> bool {
        if self.fall_ms > self.interval_ms(danger, slow_motion) {
            self.fall_ms = 0;
            return true;
        }
        false
    }

    /// Restart the gravity interval (after a hard drop)
    pub fn reset_accumulator(&mut self) {
        self.fall_ms = 0;
    }

    /// Forget all play time (after a restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn fall_ms(&self) -> u32 {
        self.fall_ms
    }

    pub fn play_ms(&self) -> u64 {
        self.play_ms
    }
}
