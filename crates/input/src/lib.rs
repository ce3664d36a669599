//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Timing and
//! repeat behavior are left to the terminal's own key repeat.

pub mod map;

pub use neonlink_types as types;

pub use map::{handle_key_event, is_press, should_quit};
