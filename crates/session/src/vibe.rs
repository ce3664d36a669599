use crate::types::{VIBE_DECAY, VIBE_GAIN, VIBE_MAX};

/// Interaction gauge shown on the HUD (0 to 100)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VibeMeter {
    level: f32,
}

impl VibeMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&mut self) {
        self.level = (self.level + VIBE_GAIN).min(VIBE_MAX);
    }

    pub fn decay(&mut self) {
        self.level = (self.level - VIBE_DECAY).max(0.0);
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Level rounded to a whole percentage
    pub fn percent(&self) -> u8 {
        (self.level / VIBE_MAX * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
