//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::session::SessionSnapshot;
use crate::types::{Gesture, PieceKind, GRID_HEIGHT, GRID_WIDTH};

const PLAY_BG: Rgb = Rgb::new(8, 8, 16);
const FRAME: Rgb = Rgb::new(0, 190, 220);
const GRID_DOT: Rgb = FRAME.scaled(1, 5);
const DANGER_FRAME: Rgb = Rgb::new(255, 40, 40);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const MUTED: Rgb = Rgb::new(120, 120, 130);
const VIBE: Rgb = Rgb::new(200, 0, 255);

/// Width of the VIBE gauge in columns
const VIBE_BAR_W: u16 = 10;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the board frame landed in the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the session into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (GRID_WIDTH as u16) * self.cell_w;
        let board_px_h = (GRID_HEIGHT as u16) * self.cell_h;
        let frame = {
            let w = board_px_w + 2;
            let h = board_px_h + 2;
            let y = match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            };
            // Leave room for the side panel when the viewport allows it.
            let x = viewport.width.saturating_sub(w + panel_width()) / 2;
            Frame { x, y, w, h }
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', CellStyle::fg(GRID_DOT).on(PLAY_BG));

        let border = if snap.danger {
            CellStyle::fg(DANGER_FRAME).bold()
        } else {
            CellStyle::fg(FRAME)
        };
        self.draw_border(fb, frame, border);

        self.draw_board(fb, frame, &snap.game);

        self.draw_side_panel(fb, snap, viewport, frame);

        if !snap.started {
            self.draw_overlay_text(fb, frame, 0, "PRESS ENTER");
        } else if snap.game.game_over {
            self.draw_overlay_text(fb, frame, 0, "GAME OVER");
            self.draw_overlay_text(fb, frame, 2, "R / THUMB UP");
        } else if snap.paused {
            self.draw_overlay_text(fb, frame, 0, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, frame: Frame, game: &GameSnapshot) {
        for y in 0..GRID_HEIGHT as u16 {
            for x in 0..GRID_WIDTH as u16 {
                match piece_from_cell(game.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_board_cell(fb, frame, x, y, kind),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if game.game_over {
            return;
        }

        // Cells above the grid stay hidden until they fall into view.
        for &(x, y) in game.current.cells.iter() {
            if x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8 {
                self.draw_board_cell(fb, frame, x as u16, y as u16, game.current.kind);
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╔', style);
        fb.put_char(x + w - 1, y, '╗', style);
        fb.put_char(x, y + h - 1, '╚', style);
        fb.put_char(x + w - 1, y + h - 1, '╝', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '═', style);
            fb.put_char(x + dx, y + h - 1, '═', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '║', style);
            fb.put_char(x + w - 1, y + dy, '║', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::fg(GRID_DOT).on(PLAY_BG)
        };
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::fg(piece_color(kind)).on(PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(&self, fb: &mut FrameBuffer, frame: Frame, cell_x: u16, cell_y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::fg(TEXT).bold();
        let value = CellStyle::fg(TEXT);
        let muted = CellStyle::fg(MUTED);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "NEONLINK", CellStyle::fg(FRAME).bold());
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.game.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HIGH", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.best_score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_next_preview(fb, panel_x, y, snap.game.next);
        y = y.saturating_add(5);

        fb.put_str(panel_x, y, "AI", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.gesture.as_str(), CellStyle::fg(gesture_color(snap.gesture)).bold());
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "VIBE", label);
        y = y.saturating_add(1);
        let filled = (snap.vibe.min(100) as u16 * VIBE_BAR_W + 50) / 100;
        fb.put_bar(panel_x, y, VIBE_BAR_W, filled, CellStyle::fg(VIBE), muted);
        let end = fb.put_u32(panel_x + VIBE_BAR_W + 1, y, snap.vibe as u32, value);
        fb.put_char(end, y, '%', value);
        y = y.saturating_add(2);

        for line in [
            "←→  move",
            "↑ W rotate",
            "↓   soft drop",
            "SPC hard drop",
            "P pause R restart",
            "Q quit",
        ] {
            if y >= frame.y.saturating_add(frame.h) || y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, muted);
            y = y.saturating_add(1);
        }
    }

    /// Rotation state 0 of `kind`, packed into the top-left of a 4-row box
    fn draw_next_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let shape = get_shape(kind, 0);
        let min_dx = shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let min_dy = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let style = CellStyle::fg(piece_color(kind)).bold();

        for &(dx, dy) in shape.iter() {
            let px = x + ((dx - min_dx) as u16) * 2;
            let py = y + (dy - min_dy) as u16;
            fb.put_str(px, py, "██", style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, row_offset: u16, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2).saturating_add(row_offset);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Columns the side panel wants next to the board
fn panel_width() -> u16 {
    20
}

fn piece_color(kind: PieceKind) -> Rgb {
    Rgb::from(kind.color())
}

fn gesture_color(gesture: Gesture) -> Rgb {
    match gesture {
        Gesture::None => MUTED,
        Gesture::OpenPalm => Rgb::new(0, 255, 255),
        Gesture::ClosedFist => Rgb::new(255, 60, 60),
        Gesture::ThumbUp => Rgb::new(0, 255, 0),
    }
}

fn piece_from_cell(v: u8) -> Option<PieceKind> {
    match v {
        0 => None,
        n => Some(PieceKind::from_index(n as usize - 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_from_cell() {
        assert_eq!(piece_from_cell(0), None);
        assert_eq!(piece_from_cell(1), Some(PieceKind::I));
        assert_eq!(piece_from_cell(7), Some(PieceKind::L));
    }

    #[test]
    fn test_next_preview_is_packed() {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(10, 5);
        view.draw_next_preview(&mut fb, 0, 0, PieceKind::O);
        assert_eq!(fb.row_text(0), "████      ");
        assert_eq!(fb.row_text(1), "████      ");
        assert_eq!(fb.row_text(2), "          ");
    }
}
