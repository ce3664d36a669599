//! Link module - everything that runs outside the frame loop
//!
//! The frame loop is synchronous. This crate owns a tokio runtime for the
//! two background jobs and talks to the loop only through channels:
//!
//! 1. **Gesture feed**: runs the recognizer command and forwards one label
//!    per stdout line (see [`protocol`])
//! 2. **Event log**: appends every session event as a JSON line
//!
//! # Environment Variables
//!
//! - `NEONLINK_GESTURE_CMD`: recognizer command, run through `sh -c`
//! - `NEONLINK_GESTURE_MIN_SCORE`: confidence threshold (default 0.6)
//! - `NEONLINK_GESTURE_DISABLED`: `1` or `true` skips the recognizer
//! - `NEONLINK_EVENT_LOG`: path of the JSON Lines event log

pub mod config;
pub mod event_log;
pub mod feed;
pub mod protocol;
pub mod runtime;

pub use neonlink_session as session;
pub use neonlink_types as types;

pub use config::LinkConfig;
pub use event_log::{LogRecord, LoggedEvent};
pub use feed::{run_feed, run_recognizer};
pub use protocol::{parse_line, GestureSample, DEFAULT_MIN_SCORE};
pub use runtime::Link;
