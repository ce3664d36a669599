//! Shape catalog - rotation states for the seven piece kinds
//!
//! Every rotation state is written as a 6-row by 5-column text template where
//! `#` marks an occupied cell. Templates are parsed at compile time into four
//! grid offsets relative to the piece anchor, already shifted by the
//! centering origin (`TEMPLATE_ORIGIN_X`, `TEMPLATE_ORIGIN_Y`).

use crate::types::{PieceKind, TEMPLATE_COLS, TEMPLATE_ORIGIN_X, TEMPLATE_ORIGIN_Y, TEMPLATE_ROWS};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// One rotation state - 4 cell offsets from the piece anchor
pub type PieceShape = [CellOffset; 4];

/// A text template: six rows of five characters
pub type Template = [&'static str; TEMPLATE_ROWS];

/// Parse a template into anchor-relative offsets.
///
/// Panics (at compile time when used in a const) unless the template is
/// 6x5 and holds exactly four `#` cells.
pub const fn parse_template(rows: Template) -> PieceShape {
    let mut out = [(0i8, 0i8); 4];
    let mut count = 0;
    let mut row = 0;
    while row < TEMPLATE_ROWS {
        let bytes = rows[row].as_bytes();
        assert!(bytes.len() == TEMPLATE_COLS, "template rows must be 5 wide");
        let mut col = 0;
        while col < TEMPLATE_COLS {
            if bytes[col] == b'#' {
                assert!(count < 4, "template has more than four cells");
                out[count] = (
                    col as i8 - TEMPLATE_ORIGIN_X,
                    row as i8 - TEMPLATE_ORIGIN_Y,
                );
                count += 1;
            }
            col += 1;
        }
        row += 1;
    }
    assert!(count == 4, "template must have exactly four cells");
    out
}

const I_STATES: [PieceShape; 2] = [
    parse_template([".....", "..#..", "..#..", "..#..", "..#..", "....."]),
    parse_template([".....", ".....", "####.", ".....", ".....", "....."]),
];

const O_STATES: [PieceShape; 1] = [parse_template([
    ".....", ".....", "..##.", "..##.", ".....", ".....",
])];

const T_STATES: [PieceShape; 4] = [
    parse_template([".....", ".....", "..#..", ".###.", ".....", "....."]),
    parse_template([".....", "..#..", "..##.", "..#..", ".....", "....."]),
    parse_template([".....", ".....", ".###.", "..#..", ".....", "....."]),
    parse_template([".....", "..#..", ".##..", "..#..", ".....", "....."]),
];

const S_STATES: [PieceShape; 2] = [
    parse_template([".....", ".....", ".##..", "..##.", ".....", "....."]),
    parse_template([".....", "..#..", ".##..", ".#...", ".....", "....."]),
];

const Z_STATES: [PieceShape; 2] = [
    parse_template([".....", ".....", "..##.", ".##..", ".....", "....."]),
    parse_template([".....", ".#...", ".##..", "..#..", ".....", "....."]),
];

const J_STATES: [PieceShape; 4] = [
    parse_template([".....", ".....", ".###.", ".#...", ".....", "....."]),
    parse_template([".....", ".##..", "..#..", "..#..", ".....", "....."]),
    parse_template([".....", "...#.", ".###.", ".....", ".....", "....."]),
    parse_template([".....", "..#..", "..#..", "...##", ".....", "....."]),
];

const L_STATES: [PieceShape; 4] = [
    parse_template([".....", ".....", ".###.", "...#.", ".....", "....."]),
    parse_template([".....", "..#..", "..#..", ".##..", ".....", "....."]),
    parse_template([".....", ".#...", ".###.", ".....", ".....", "....."]),
    parse_template([".....", "...##", "..#..", "..#..", ".....", "....."]),
];

/// Ordered rotation states for a piece kind
pub fn rotation_states(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

/// Number of rotation states (1, 2 or 4)
pub fn rotation_count(kind: PieceKind) -> u8 {
    rotation_states(kind).len() as u8
}

/// Shape of `kind` in rotation state `rotation` (taken modulo the state count)
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let states = rotation_states(kind);
    states[rotation as usize % states.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_counts() {
        assert_eq!(rotation_count(PieceKind::O), 1);
        for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
            assert_eq!(rotation_count(kind), 2);
        }
        for kind in [PieceKind::T, PieceKind::J, PieceKind::L] {
            assert_eq!(rotation_count(kind), 4);
        }
    }

    #[test]
    fn test_offsets_apply_centering_origin() {
        // Vertical I occupies template column 2, rows 1..=4
        assert_eq!(get_shape(PieceKind::I, 0), [(0, -3), (0, -2), (0, -1), (0, 0)]);
        assert_eq!(get_shape(PieceKind::O, 0), [(0, -2), (1, -2), (0, -1), (1, -1)]);
        assert_eq!(get_shape(PieceKind::T, 0), [(0, -2), (-1, -1), (0, -1), (1, -1)]);
    }

    #[test]
    fn test_rotation_index_wraps() {
        assert_eq!(get_shape(PieceKind::I, 2), get_shape(PieceKind::I, 0));
        assert_eq!(get_shape(PieceKind::O, 3), get_shape(PieceKind::O, 0));
        assert_eq!(get_shape(PieceKind::L, 5), get_shape(PieceKind::L, 1));
    }

    #[test]
    fn test_every_state_has_distinct_cells() {
        for kind in PieceKind::ALL {
            for shape in rotation_states(kind) {
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(shape[i], shape[j], "{:?} repeats a cell", kind);
                    }
                }
            }
        }
    }
}
