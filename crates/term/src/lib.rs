//! Terminal renderer for the NeonLink board.
//!
//! Renders a session snapshot into a plain framebuffer and flushes it to the
//! terminal with crossterm. Board cells are drawn two columns wide to make up
//! for the usual glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use neonlink_core as core;
pub use neonlink_session as session;
pub use neonlink_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer};
