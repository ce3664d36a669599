//! Piece module - the falling piece value
//!
//! A piece is a plain `Copy` value. Movement and rotation never mutate a
//! piece in place; they produce candidates that the engine validates against
//! the grid before committing.

use crate::shapes::{get_shape, rotation_count, PieceShape};
use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Rotation state index, always below `rotation_count(kind)`
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a new piece at the spawn anchor in rotation state 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Offsets for the current rotation state
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute `(x, y)` grid coordinates of the four cells.
    ///
    /// Cells may lie above the grid (negative `y`) or outside it entirely.
    /// Coordinates saturate at the `i8` range, which is off-grid either way.
    pub fn cells(&self) -> [(i8, i8); 4] {
        let mut out = self.shape();
        for cell in out.iter_mut() {
            cell.0 = cell.0.saturating_add(self.x);
            cell.1 = cell.1.saturating_add(self.y);
        }
        out
    }

    /// Candidate shifted by `(dx, dy)`, `None` if the anchor would overflow
    pub fn translated(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            ..*self
        })
    }

    /// Candidate in the next rotation state (cyclic)
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % rotation_count(self.kind),
            ..*self
        }
    }

    /// Neon color tag of this piece
    pub fn color(&self) -> (u8, u8, u8) {
        self.kind.color()
    }
}
