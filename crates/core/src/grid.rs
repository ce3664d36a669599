//! Grid module - the playfield of locked cells
//!
//! The grid is a 10x20 matrix where each cell is either empty or tagged with
//! the kind of the piece that locked there.
//! Uses a flat row-major array for cache locality and zero allocation.
//! Coordinates: (x, y) where x is the column (0..=9, left to right) and y is
//! the row (0..=19, top to bottom). Negative rows form the spawn buffer above
//! the visible grid.

use crate::piece::Piece;
use crate::types::{Cell, PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the grid and empty
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is inside the grid and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a single cell may be covered by a falling piece.
    ///
    /// Cells in the spawn buffer (`y <= -1`) only need to be within the
    /// horizontal bounds; cells on the grid must be empty.
    pub fn accepts_cell(&self, x: i8, y: i8) -> bool {
        if y <= -1 {
            return x >= 0 && x < GRID_WIDTH as i8;
        }
        self.is_empty_at(x, y)
    }

    /// Check whether every cell of `piece` may be occupied
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| self.accepts_cell(x, y))
    }

    /// Write `kind` into every on-grid cell of `piece`.
    ///
    /// Cells still in the spawn buffer are dropped; the number of dropped
    /// cells is returned.
    pub fn lock_piece(&mut self, piece: &Piece) -> u8 {
        let mut dropped = 0;
        for (x, y) in piece.cells() {
            if y > -1 {
                self.set(x, y, Some(piece.kind));
            } else {
                dropped += 1;
            }
        }
        dropped
    }

    #[inline]
    fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Empty row `y` and shift every row above it down by one.
    ///
    /// The top row is left empty afterwards.
    fn collapse_row(&mut self, y: usize) {
        self.cells[y * WIDTH..(y + 1) * WIDTH].fill(None);

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src = (row - 1) * WIDTH;
            self.cells.copy_within(src..src + WIDTH, row * WIDTH);
        }
        self.cells[..WIDTH].fill(None);
    }

    /// Clear all full rows and return how many were cleared.
    ///
    /// Scans from the bottom row upwards. After a row collapses, the same row
    /// index is examined again, since the row that fell into it may be full
    /// as well.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                cleared += 1;
                self.collapse_row(row);
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Loss condition: any locked cell in row 0
    pub fn is_top_row_occupied(&self) -> bool {
        self.row(0).iter().any(|cell| cell.is_some())
    }

    /// Topmost row that holds at least one locked cell
    pub fn highest_occupied_row(&self) -> Option<u8> {
        (0..HEIGHT)
            .find(|&y| self.row(y).iter().any(|cell| cell.is_some()))
            .map(|y| y as u8)
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Encode into a `u8` grid: 0 = empty, 1..=7 = kind index + 1
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = match self.cells[y * WIDTH + x] {
                    Some(kind) => kind.index() as u8 + 1,
                    None => 0,
                };
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill every cell of row `y` except the given columns
    pub fn fill_row_except(&mut self, y: i8, holes: &[i8], kind: PieceKind) {
        for x in 0..GRID_WIDTH as i8 {
            if !holes.contains(&x) {
                self.set(x, y, Some(kind));
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn test_accepts_cell_spawn_buffer() {
        let grid = Grid::new();
        assert!(grid.accepts_cell(0, -1));
        assert!(grid.accepts_cell(9, -4));
        assert!(!grid.accepts_cell(-1, -1));
        assert!(!grid.accepts_cell(10, -3));
        assert!(!grid.accepts_cell(0, 20));
    }

    #[test]
    fn test_collapse_row_shifts_everything_above() {
        let mut grid = Grid::new();
        grid.fill_row_except(19, &[], PieceKind::I);
        grid.set(2, 0, Some(PieceKind::T));
        grid.set(5, 18, Some(PieceKind::L));

        grid.collapse_row(19);

        assert_eq!(grid.get(5, 19), Some(Some(PieceKind::L)));
        assert_eq!(grid.get(2, 1), Some(Some(PieceKind::T)));
        assert!(!grid.is_top_row_occupied());
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_clear_adjacent_rows_rechecks_same_index() {
        let mut grid = Grid::new();
        grid.fill_row_except(18, &[], PieceKind::S);
        grid.fill_row_except(19, &[], PieceKind::Z);
        grid.set(7, 17, Some(PieceKind::O));

        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(grid.get(7, 19), Some(Some(PieceKind::O)));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut grid = Grid::new();
        grid.set(0, 0, Some(PieceKind::I));
        grid.set(9, 19, Some(PieceKind::L));

        let mut out = [[0u8; WIDTH]; HEIGHT];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[0][0], 1);
        assert_eq!(out[19][9], 7);
        assert_eq!(out[10][4], 0);
    }

    #[test]
    fn test_highest_occupied_row() {
        let mut grid = Grid::new();
        assert_eq!(grid.highest_occupied_row(), None);
        grid.set(4, 12, Some(PieceKind::J));
        grid.set(1, 15, Some(PieceKind::J));
        assert_eq!(grid.highest_occupied_row(), Some(12));
    }
}
