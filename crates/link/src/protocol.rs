//! Gesture line protocol
//!
//! The recognizer writes one sample per line, either a bare label
//! (`OPEN_PALM`, `Open_Palm`) or a JSON object:
//!
//! ```text
//! {"gesture":"Closed_Fist","score":0.82}
//! ```
//!
//! Samples below the confidence threshold and unknown labels both read as
//! [`Gesture::None`].

use serde::Deserialize;

use crate::types::Gesture;

/// Default recognizer confidence threshold
pub const DEFAULT_MIN_SCORE: f32 = 0.6;

/// JSON form of a recognizer sample
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GestureSample {
    #[serde(alias = "category", alias = "label")]
    pub gesture: String,
    #[serde(default)]
    pub score: Option<f32>,
}

impl GestureSample {
    pub fn resolve(&self, min_score: f32) -> Gesture {
        match self.score {
            Some(score) if score < min_score => Gesture::None,
            _ => Gesture::from_label(&self.gesture),
        }
    }
}

/// Parse one line from the recognizer.
///
/// Returns `Ok(None)` for blank lines. Only JSON lines can fail.
pub fn parse_line(line: &str, min_score: f32) -> Result<Option<Gesture>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.starts_with('{') {
        let sample: GestureSample = serde_json::from_str(trimmed)?;
        return Ok(Some(sample.resolve(min_score)));
    }

    Ok(Some(Gesture::from_label(trimmed)))
}
