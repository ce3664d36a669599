use std::path::PathBuf;

use crate::protocol::DEFAULT_MIN_SCORE;

/// Link configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LinkConfig {
    /// Recognizer command, run through `sh -c`
    pub gesture_cmd: Option<String>,
    pub min_score: f32,
    pub gesture_disabled: bool,
    /// JSON Lines event log
    pub event_log: Option<PathBuf>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            gesture_cmd: None,
            min_score: DEFAULT_MIN_SCORE,
            gesture_disabled: false,
            event_log: None,
        }
    }
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

impl LinkConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let min_score = non_empty("NEONLINK_GESTURE_MIN_SCORE")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_MIN_SCORE);

        Self {
            gesture_cmd: non_empty("NEONLINK_GESTURE_CMD"),
            min_score,
            gesture_disabled: Self::is_gesture_disabled(),
            event_log: non_empty("NEONLINK_EVENT_LOG").map(PathBuf::from),
        }
    }

    /// Check if the recognizer is disabled via environment
    pub fn is_gesture_disabled() -> bool {
        std::env::var("NEONLINK_GESTURE_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }

    /// Command to launch, if the recognizer is wanted at all
    pub fn recognizer_command(&self) -> Option<&str> {
        if self.gesture_disabled {
            return None;
        }
        self.gesture_cmd.as_deref()
    }
}
