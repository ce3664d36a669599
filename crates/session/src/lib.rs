//! Session layer - the collaborators around the engine
//!
//! The engine only knows cells and rows. Everything that involves time,
//! player intent or persistence lives here:
//!
//! - [`clock`]: gravity pacing (speed-up over play time, danger slow-down, slow motion)
//! - [`gesture`]: recognizer labels turned into slam, slow motion and restart
//! - [`vibe`]: the interaction gauge
//! - [`best_score`]: best score persistence
//! - [`session`]: the state machine tying them to an [`Engine`](neonlink_core::Engine)
//! - [`config`]: environment configuration
//!
//! # Example
//!
//! ```
//! use neonlink_session::{MemoryStore, Session};
//! use neonlink_types::{GameAction, Gesture, TICK_MS};
//!
//! let mut session = Session::from_seed(7, MemoryStore::default());
//! session.apply_action(GameAction::Start);
//! session.apply_action(GameAction::HardDrop);
//! session.tick(TICK_MS, Gesture::OpenPalm);
//!
//! let snap = session.snapshot();
//! assert!(snap.started);
//! assert_eq!(snap.fall_interval_ms, 1000);
//! ```

pub mod best_score;
pub mod clock;
pub mod config;
pub mod gesture;
pub mod session;
pub mod vibe;

pub use neonlink_types as types;

pub use best_score::{BestScoreStore, JsonFileStore, MemoryStore};
pub use clock::{fall_interval_ms, GravityClock};
pub use config::SessionConfig;
pub use gesture::GestureControl;
pub use session::{Session, SessionEvent, SessionSnapshot};
pub use vibe::VibeMeter;
