use crate::piece::Piece;
use crate::types::{PieceKind, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    /// Absolute cells, including any still above the grid
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub current: PieceSnapshot,
    pub next: PieceKind,
    pub score: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.current = PieceSnapshot::from(Piece::spawn(PieceKind::I));
        self.next = PieceKind::I;
        self.score = 0;
        self.game_over = false;
    }

    /// Row index of the topmost non-empty board row
    pub fn highest_occupied_row(&self) -> Option<u8> {
        self.board
            .iter()
            .position(|row| row.iter().any(|&v| v != 0))
            .map(|y| y as u8)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            current: PieceSnapshot::from(Piece::spawn(PieceKind::I)),
            next: PieceKind::I,
            score: 0,
            game_over: false,
        }
    }
}
