//! Engine module - the grid/piece state machine
//!
//! Ties together the grid, the current and next pieces, the kind source and
//! the score. The engine has two states: running and game over. Game over is
//! terminal until [`Engine::reset`]; while in it every mutator is a no-op.
//!
//! Mutators that can lock a piece return the number of rows cleared by that
//! lock. Rejected moves and rotations are silent.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::{KindSource, SimpleRng};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{PieceKind, SCORE_PER_LINE};

/// Outcome of the most recent lock (consumed by observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Cells that were still above the grid and got dropped
    pub cells_discarded: u8,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Engine<S: KindSource = SimpleRng> {
    grid: Grid,
    current: Piece,
    next: Piece,
    score: u32,
    game_over: bool,
    death_acknowledged: bool,
    source: S,
    last_event: Option<LockEvent>,
}

impl Engine<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed))
    }
}

impl<S: KindSource> Engine<S> {
    /// Create a new game drawing kinds from `source`
    pub fn with_source(source: S) -> Self {
        Self::from_parts(Grid::new(), source)
    }

    /// Create a game on a prepared grid.
    ///
    /// Current and next pieces are drawn from `source`, in that order.
    pub fn from_parts(grid: Grid, mut source: S) -> Self {
        let current = Piece::spawn(source.next_kind());
        let next = Piece::spawn(source.next_kind());
        Self {
            grid,
            current,
            next,
            score: 0,
            game_over: false,
            death_acknowledged: false,
            source,
            last_event: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Move the current piece by `(dx, dy)`.
    ///
    /// A rejected downward move locks the piece and returns the rows it
    /// cleared. Any other rejection leaves the state untouched. Offsets that
    /// overflow the anchor count as rejected.
    pub fn move_by(&mut self, dx: i8, dy: i8) -> u32 {
        if self.game_over {
            return 0;
        }

        let candidate = self
            .current
            .translated(dx, dy)
            .filter(|piece| self.grid.is_valid_position(piece));
        if let Some(candidate) = candidate {
            self.current = candidate;
            return 0;
        }

        if dy > 0 {
            return self.lock_current();
        }
        0
    }

    /// Advance the current piece to its next rotation state if that fits.
    ///
    /// The result only reports whether the rotation was committed; a
    /// rejected rotation is a silent no-op and callers may ignore it.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let candidate = self.current.rotated();
        if self.grid.is_valid_position(&candidate) {
            self.current = candidate;
            return true;
        }
        false
    }

    /// Row the current piece would come to rest on
    pub fn drop_target(&self) -> Piece {
        let mut landed = self.current;
        loop {
            match landed.translated(0, 1) {
                Some(below) if self.grid.is_valid_position(&below) => landed = below,
                _ => return landed,
            }
        }
    }

    /// Drop the current piece to the lowest valid row and lock it
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }

        self.current = self.drop_target();
        self.lock_current()
    }

    /// Lock the current piece into the grid.
    ///
    /// Order matters: write on-grid cells, promote next to current, draw a
    /// fresh next, clear rows, then test row 0 for the loss condition.
    pub fn lock_current(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }

        let locked = self.current;
        let cells_discarded = self.grid.lock_piece(&locked);

        self.current = self.next;
        self.next = Piece::spawn(self.source.next_kind());

        let lines_cleared = self.grid.clear_full_rows();
        self.score += lines_cleared * SCORE_PER_LINE;

        if self.grid.is_top_row_occupied() {
            self.game_over = true;
        }

        self.last_event = Some(LockEvent {
            kind: locked.kind,
            lines_cleared,
            cells_discarded,
            game_over: self.game_over,
        });

        lines_cleared
    }

    /// Start over on an empty grid, keeping the kind source
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.current = Piece::spawn(self.source.next_kind());
        self.next = Piece::spawn(self.source.next_kind());
        self.score = 0;
        self.game_over = false;
        self.death_acknowledged = false;
        self.last_event = None;
    }

    /// Returns `true` exactly once per game over
    pub fn acknowledge_death(&mut self) -> bool {
        if self.game_over && !self.death_acknowledged {
            self.death_acknowledged = true;
            return true;
        }
        false
    }

    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);
        out.current = PieceSnapshot::from(self.current);
        out.next = self.next.kind;
        out.score = self.score;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
