//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the session layer, the renderer and the gesture link alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (x = 0..=9, left to right)
//! - **Height**: 20 rows (y = 0..=19, top to bottom)
//! - **Spawn anchor**: (`GRID_WIDTH / 2 - 2`, 0) = (3, 0)
//!
//! Shape templates are 6 rows by 5 columns. A template cell at
//! `(column, row)` lands on the grid at
//! `(x + column - TEMPLATE_ORIGIN_X, y + row - TEMPLATE_ORIGIN_Y)`, so a freshly
//! spawned piece usually starts partly above row 0 (the spawn buffer).
//!
//! # Pacing Constants
//!
//! Gravity pacing is a session concern; the engine only counts in cells.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame loop step (~60 FPS) |
//! | `BASE_FALL_MS` | 500 | Nominal gravity interval |
//! | `SPEEDUP_STEP_MS` | 50 | Interval reduction per speed-up period |
//! | `SPEEDUP_PERIOD_MS` | 30000 | Play time per speed-up step |
//! | `MIN_FALL_MS` | 100 | Fastest gravity interval |
//! | `DANGER_FALL_MS` | 800 | Interval while the stack is in the danger zone |
//! | `SLAM_COOLDOWN_MS` | 1000 | Minimum time between two gesture slams |
//!
//! # Examples
//!
//! ```
//! use neonlink_types::{Gesture, GameAction, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::from_index(0), PieceKind::I);
//! assert_eq!(Gesture::from_label("Open_Palm"), Gesture::OpenPalm);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Spawn column for every new piece
pub const SPAWN_X: i8 = (GRID_WIDTH / 2) as i8 - 2;

/// Spawn row for every new piece
pub const SPAWN_Y: i8 = 0;

/// Rows in a shape template
pub const TEMPLATE_ROWS: usize = 6;

/// Columns in a shape template
pub const TEMPLATE_COLS: usize = 5;

/// Column subtracted from template offsets when mapping onto the grid
pub const TEMPLATE_ORIGIN_X: i8 = 2;

/// Row subtracted from template offsets when mapping onto the grid
pub const TEMPLATE_ORIGIN_Y: i8 = 4;

/// Flat bonus per cleared row
pub const SCORE_PER_LINE: u32 = 100;

/// Frame loop step in milliseconds
pub const TICK_MS: u32 = 16;

/// Nominal gravity interval
pub const BASE_FALL_MS: u32 = 500;

/// Gravity interval reduction applied once per `SPEEDUP_PERIOD_MS` of play
pub const SPEEDUP_STEP_MS: u32 = 50;

/// Play time between two gravity speed-ups
pub const SPEEDUP_PERIOD_MS: u64 = 30_000;

/// Fastest gravity interval
pub const MIN_FALL_MS: u32 = 100;

/// Gravity interval while the stack is in the danger zone
pub const DANGER_FALL_MS: u32 = 800;

/// The stack is in danger when its highest occupied row is at or above this row
pub const DANGER_ROW: u8 = 2;

/// Gravity interval multiplier while the open-palm gesture is held
pub const SLOW_MOTION_FACTOR: u32 = 2;

/// Minimum time between two gesture slams
pub const SLAM_COOLDOWN_MS: u32 = 1000;

/// Vibe meter gain per player interaction
pub const VIBE_GAIN: f32 = 5.0;

/// Vibe meter decay per frame
pub const VIBE_DECAY: f32 = 0.2;

/// Vibe meter ceiling
pub const VIBE_MAX: f32 = 100.0;

/// Storage key under which the best score is persisted
pub const BEST_SCORE_KEY: &str = "neonlink_hs";

/// The seven tetromino piece kinds
///
/// Each kind carries its neon color:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Catalog index (0..7)
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Kind for a catalog index, wrapping out-of-range values
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Neon display color as `(r, g, b)`
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 255, 255),
            PieceKind::O => (255, 255, 0),
            PieceKind::T => (255, 0, 255),
            PieceKind::S => (0, 255, 0),
            PieceKind::Z => (255, 0, 0),
            PieceKind::J => (0, 0, 255),
            PieceKind::L => (255, 165, 0),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use neonlink_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind (its color tag)
pub type Cell = Option<PieceKind>;

/// Discrete gesture label produced by the external recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gesture {
    /// No hand, or nothing recognized with enough confidence
    #[default]
    None,
    /// Slows gravity down while held
    OpenPalm,
    /// Kinetic slam (hard drop), once per fist
    ClosedFist,
    /// Restarts a finished game
    ThumbUp,
}

impl Gesture {
    /// Parse a recognizer label.
    ///
    /// Accepts the game's own labels (`OPEN_PALM`) as well as recognizer
    /// category names (`Open_Palm`), case-insensitively. Anything else is
    /// treated as [`Gesture::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use neonlink_types::Gesture;
    ///
    /// assert_eq!(Gesture::from_label("CLOSED_FIST"), Gesture::ClosedFist);
    /// assert_eq!(Gesture::from_label("Thumb_Up"), Gesture::ThumbUp);
    /// assert_eq!(Gesture::from_label("Victory"), Gesture::None);
    /// ```
    pub fn from_label(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPEN_PALM" => Gesture::OpenPalm,
            "CLOSED_FIST" => Gesture::ClosedFist,
            "THUMB_UP" => Gesture::ThumbUp,
            _ => Gesture::None,
        }
    }

    /// Canonical upper-case label
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::None => "NONE",
            Gesture::OpenPalm => "OPEN_PALM",
            Gesture::ClosedFist => "CLOSED_FIST",
            Gesture::ThumbUp => "THUMB_UP",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Gesture::None)
    }
}

/// Player actions delivered by the keyboard adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Leave the ready screen
    Start,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (locks when blocked)
    SoftDrop,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Advance to the next rotation state
    Rotate,
    /// Toggle pause
    Pause,
    /// Start over after game over
    Restart,
}

impl GameAction {
    /// Parse action from a camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use neonlink_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// Whether the action drives the active piece
    pub fn is_gameplay(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::SoftDrop
                | GameAction::HardDrop
                | GameAction::Rotate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_anchor_is_centered() {
        assert_eq!(SPAWN_X, 3);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn pacing_defaults() {
        assert_eq!(BASE_FALL_MS, 500);
        assert_eq!(MIN_FALL_MS, 100);
        assert_eq!(DANGER_FALL_MS, 800);
        assert_eq!(SPEEDUP_PERIOD_MS, 30_000);
        assert_eq!(SLAM_COOLDOWN_MS, 1000);
    }
}
