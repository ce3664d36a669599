//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules and nothing else. It has
//! **zero dependencies** on UI, timing, gestures or I/O, making it:
//!
//! - **Deterministic**: Same seed (or script) produces identical games
//! - **Testable**: Scenarios are built by preparing a [`Grid`] and scripting the kinds
//! - **Portable**: Terminal, headless and test harnesses all drive the same engine
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 playfield with collision checks and row clearing
//! - [`shapes`]: Text-template rotation states for the seven kinds
//! - [`piece`]: The falling piece value and its candidates
//! - [`rng`]: Kind sources (seeded LCG, scripted sequence)
//! - [`engine`]: Movement, locking, scoring and game over
//! - [`snapshot`]: Plain copies of engine state for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at (3, 0) in rotation state 0, partly above the grid
//! - Rotation is a plain cyclic step with no wall kicks; it fails silently
//! - A piece locks when a downward move is rejected, or on hard drop
//! - Each cleared row is worth a flat 100 points
//! - The game is lost when a lock leaves anything in row 0
//!
//! # Example
//!
//! ```
//! use neonlink_core::Engine;
//!
//! let mut engine = Engine::new(12345);
//! engine.move_by(1, 0);
//! engine.rotate();
//! let lines = engine.hard_drop();
//!
//! assert_eq!(lines, 0);
//! assert_eq!(engine.score(), 0);
//! assert_eq!(engine.grid().occupied_count(), 4);
//! ```
//!
//! Gravity pacing lives outside the engine: the caller decides when to step
//! the piece down with `move_by(0, 1)`.

pub mod engine;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use neonlink_types as types;

// Re-export commonly used types for convenience
pub use engine::{Engine, LockEvent};
pub use grid::Grid;
pub use piece::Piece;
pub use rng::{KindSource, ScriptedKinds, SimpleRng};
pub use shapes::{get_shape, rotation_count, rotation_states};
pub use snapshot::{GameSnapshot, PieceSnapshot};
