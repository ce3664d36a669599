//! Gesture control policy
//!
//! Turns the stream of recognizer labels into game intents: slow motion while
//! the palm is open, a single slam per closed fist and restart on thumb up.

use crate::types::{Gesture, SLAM_COOLDOWN_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureControl {
    current: Gesture,
    /// Re-armed by any non-fist label
    fist_released: bool,
    cooldown_ms: u32,
}

impl GestureControl {
    pub fn new() -> Self {
        Self {
            current: Gesture::None,
            fist_released: true,
            cooldown_ms: 0,
        }
    }

    pub fn current(&self) -> Gesture {
        self.current
    }

    /// Record the latest label. Returns true when it differs from the previous one.
    pub fn observe(&mut self, gesture: Gesture) -> bool {
        if gesture != Gesture::ClosedFist {
            self.fist_released = true;
        }
        let changed = gesture != self.current;
        self.current = gesture;
        changed
    }

    /// Let the slam cooldown run down
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.cooldown_ms = self.cooldown_ms.saturating_sub(elapsed_ms);
    }

    /// Fire a slam if the fist is held, re-armed and off cooldown
    pub fn try_slam(&mut self) -> bool {
        if self.current == Gesture::ClosedFist && self.fist_released && self.cooldown_ms == 0 {
            self.fist_released = false;
            self.cooldown_ms = SLAM_COOLDOWN_MS;
            return true;
        }
        false
    }

    pub fn slow_motion(&self) -> bool {
        self.current == Gesture::OpenPalm
    }

    pub fn wants_restart(&self) -> bool {
        self.current == Gesture::ThumbUp
    }

    pub fn cooldown_ms(&self) -> u32 {
        self.cooldown_ms
    }

    /// Re-arm the fist for a fresh game; the current label is kept
    pub fn reset(&mut self) {
        self.fist_released = true;
        self.cooldown_ms = 0;
    }
}

impl Default for GestureControl {
    fn default() -> Self {
        Self::new()
    }
}
