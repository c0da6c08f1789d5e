//! Board constants and the 64-bit layout codec.
//!
//! A board state is packed into a single `u64` (`LayoutCode`): cell `i` owns the
//! three bits `[3*i, 3*i+2]`, which hold the shape code of the piece anchored at
//! that cell, or zero when no piece is anchored there. Blank cells are not part of
//! the code; they are tracked alongside it as a [`crate::geometry::BlankPair`].

use std::fmt;

/// Number of rows on the board.
pub const ROWS: u8 = 5;
/// Number of columns on the board.
pub const COLS: u8 = 4;
/// Total number of cells (`ROWS * COLS`).
pub const CELL_COUNT: u8 = ROWS * COLS;
/// Anchor cell the 2x2 block must reach for the puzzle to count as solved
/// (row 3, column 1).
pub const EXIT_ANCHOR: u8 = 13;
/// Default ceiling on the number of distinct states a search may visit.
pub const STEP_CAP: usize = 60_000;

/// Width of one cell's field inside a `LayoutCode`.
const FIELD_BITS: u32 = 3;
const FIELD_MASK: u64 = 0b111;

/// Packed board encoding. See the module documentation for the bit layout.
pub type LayoutCode = u64;

/// The kind of a piece.
///
/// The numeric codes of the non-blank shapes are part of the encoding and must
/// not change, otherwise previously recorded `LayoutCode`s decode differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    /// A free cell. Never produced by [`decode`].
    Blank,
    /// 1x1 piece.
    Square,
    /// 2 rows by 1 column; the anchor is the top cell.
    VerticalDomino,
    /// 1 row by 2 columns; the anchor is the left cell.
    HorizontalDomino,
    /// 2x2 piece; the anchor is the top-left cell.
    Block,
}

impl Shape {
    /// The three-bit code stored in a `LayoutCode` field.
    pub fn code(self) -> u64 {
        match self {
            Shape::Blank => 0,
            Shape::Square => 1,
            Shape::VerticalDomino => 3,
            Shape::HorizontalDomino => 6,
            Shape::Block => 7,
        }
    }

    /// Maps a field value back to a shape. Unknown codes yield `None`.
    pub fn from_code(code: u64) -> Option<Shape> {
        match code {
            0 => Some(Shape::Blank),
            1 => Some(Shape::Square),
            3 => Some(Shape::VerticalDomino),
            6 => Some(Shape::HorizontalDomino),
            7 => Some(Shape::Block),
            _ => None,
        }
    }

    /// `(rows, columns)` spanned by the shape.
    pub fn dimensions(self) -> (u8, u8) {
        match self {
            Shape::Blank | Shape::Square => (1, 1),
            Shape::VerticalDomino => (2, 1),
            Shape::HorizontalDomino => (1, 2),
            Shape::Block => (2, 2),
        }
    }

    /// Character used by the text board format.
    ///
    /// ```
    /// use klotski_solver::layout::Shape;
    /// assert_eq!(Shape::Block.to_char(), 'B');
    /// assert_eq!(Shape::Blank.to_char(), '.');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Shape::Blank => '.',
            Shape::Square => 'S',
            Shape::VerticalDomino => 'V',
            Shape::HorizontalDomino => 'H',
            Shape::Block => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Shape> {
        match c {
            '.' => Some(Shape::Blank),
            'S' => Some(Shape::Square),
            'V' => Some(Shape::VerticalDomino),
            'H' => Some(Shape::HorizontalDomino),
            'B' => Some(Shape::Block),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Blank => "blank",
            Shape::Square => "square",
            Shape::VerticalDomino => "vertical domino",
            Shape::HorizontalDomino => "horizontal domino",
            Shape::Block => "block",
        })
    }
}

/// A piece on the board: its shape and the index of its top-left cell.
///
/// Pieces are plain values. Moving a piece produces a new `Piece`; nothing is
/// mutated in place, so a piece never outlives the state it was decoded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    pub shape: Shape,
    pub anchor: u8,
}

impl Piece {
    pub fn new(shape: Shape, anchor: u8) -> Self {
        Piece { shape, anchor }
    }

    pub fn row(&self) -> u8 {
        self.anchor / COLS
    }

    pub fn col(&self) -> u8 {
        self.anchor % COLS
    }

    /// Whether the whole footprint of the piece lies on the board.
    pub fn in_bounds(&self) -> bool {
        let (h, w) = self.shape.dimensions();
        self.anchor < CELL_COUNT && self.row() + h <= ROWS && self.col() + w <= COLS
    }

    /// The cells covered by this piece, in row-major order.
    ///
    /// Blank pieces cover nothing. The caller is responsible for checking
    /// [`Piece::in_bounds`] first; out-of-bounds footprints wrap across rows.
    pub fn footprint(&self) -> Vec<u8> {
        if self.shape == Shape::Blank {
            return Vec::new();
        }
        let (h, w) = self.shape.dimensions();
        let mut cells = Vec::with_capacity((h * w) as usize);
        for dr in 0..h {
            for dc in 0..w {
                cells.push(self.anchor + dr * COLS + dc);
            }
        }
        cells
    }

    /// Returns `true` if this is the 2x2 block sitting on the exit anchor.
    pub fn is_goal(&self) -> bool {
        self.shape == Shape::Block && self.anchor == EXIT_ANCHOR
    }
}

/// Packs a set of pieces into a `LayoutCode`.
///
/// Each piece contributes `shape_code << (3 * anchor)`. Pieces must not share an
/// anchor; blank pieces and anchors past the last cell contribute nothing.
///
/// # Examples
/// ```
/// use klotski_solver::layout::{decode, encode, Piece, Shape};
///
/// let pieces = vec![Piece::new(Shape::Square, 0), Piece::new(Shape::Block, 1)];
/// let code = encode(&pieces);
/// assert_eq!(code, 1 | (7 << 3));
/// assert_eq!(decode(code), pieces);
/// ```
pub fn encode(pieces: &[Piece]) -> LayoutCode {
    pieces
        .iter()
        .filter(|piece| piece.anchor < CELL_COUNT)
        .fold(0, |code, piece| {
            code | (piece.shape.code() << (FIELD_BITS * piece.anchor as u32))
        })
}

/// Unpacks a `LayoutCode` into its pieces, ordered by anchor.
///
/// Only anchors are recovered. The non-anchor cells of multi-cell pieces and the
/// blank cells both read as zero, so occupancy has to be rebuilt from
/// [`Piece::footprint`] and the separately tracked blank pair. Fields holding a
/// value that is not a shape code are skipped.
pub fn decode(code: LayoutCode) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(10);
    for cell in 0..CELL_COUNT {
        let field = (code >> (FIELD_BITS * cell as u32)) & FIELD_MASK;
        match Shape::from_code(field) {
            Some(Shape::Blank) | None => {}
            Some(shape) => pieces.push(Piece::new(shape, cell)),
        }
    }
    pieces
}

/// Returns `code` with `piece` moved to `new_anchor`, without a full re-encode.
pub fn relocate(code: LayoutCode, piece: Piece, new_anchor: u8) -> LayoutCode {
    let shape_code = piece.shape.code();
    let cleared = code & !(FIELD_MASK << (FIELD_BITS * piece.anchor as u32));
    cleared | (shape_code << (FIELD_BITS * new_anchor as u32))
}

/// Goal predicate on a packed state: the block is anchored at [`EXIT_ANCHOR`].
pub fn is_goal(code: LayoutCode) -> bool {
    (code >> (FIELD_BITS * EXIT_ANCHOR as u32)) & FIELD_MASK == Shape::Block.code()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_pieces() -> Vec<Piece> {
        vec![
            Piece::new(Shape::VerticalDomino, 0),
            Piece::new(Shape::Block, 1),
            Piece::new(Shape::VerticalDomino, 3),
            Piece::new(Shape::VerticalDomino, 8),
            Piece::new(Shape::HorizontalDomino, 9),
            Piece::new(Shape::VerticalDomino, 11),
            Piece::new(Shape::Square, 13),
            Piece::new(Shape::Square, 14),
            Piece::new(Shape::Square, 16),
            Piece::new(Shape::Square, 19),
        ]
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let pieces = classic_pieces();
        let decoded = decode(encode(&pieces));
        assert_eq!(decoded, pieces);
    }

    #[test]
    fn test_decode_never_emits_non_anchor_cells() {
        let code = encode(&[Piece::new(Shape::Block, 9)]);
        let decoded = decode(code);
        assert_eq!(decoded, vec![Piece::new(Shape::Block, 9)]);
    }

    #[test]
    fn test_encode_ignores_blank_pieces() {
        let code = encode(&[Piece::new(Shape::Blank, 4), Piece::new(Shape::Square, 5)]);
        assert_eq!(code, 1 << 15);
    }

    #[test]
    fn test_encode_uses_fixed_shape_codes() {
        assert_eq!(encode(&[Piece::new(Shape::Square, 0)]), 1);
        assert_eq!(encode(&[Piece::new(Shape::VerticalDomino, 0)]), 3);
        assert_eq!(encode(&[Piece::new(Shape::HorizontalDomino, 0)]), 6);
        assert_eq!(encode(&[Piece::new(Shape::Block, 0)]), 7);
        assert_eq!(encode(&[Piece::new(Shape::Block, 19)]), 7 << 57);
    }

    #[test]
    fn test_relocate_matches_re_encode() {
        let mut pieces = classic_pieces();
        let code = encode(&pieces);
        let square = pieces[8];
        let moved = relocate(code, square, 17);
        pieces[8] = Piece::new(Shape::Square, 17);
        assert_eq!(moved, encode(&pieces));
    }

    #[test]
    fn test_goal_only_at_exit_anchor() {
        assert!(is_goal(encode(&[Piece::new(Shape::Block, 13)])));
        assert!(!is_goal(encode(&[Piece::new(Shape::Block, 12)])));
        assert!(!is_goal(encode(&[Piece::new(Shape::Block, 14)])));
        assert!(!is_goal(encode(&[Piece::new(Shape::VerticalDomino, 13)])));
        assert!(!is_goal(encode(&classic_pieces())));
    }

    #[test]
    fn test_footprint_and_bounds() {
        assert_eq!(Piece::new(Shape::Block, 9).footprint(), vec![9, 10, 13, 14]);
        assert_eq!(Piece::new(Shape::VerticalDomino, 3).footprint(), vec![3, 7]);
        assert_eq!(Piece::new(Shape::HorizontalDomino, 18).footprint(), vec![18, 19]);
        assert!(Piece::new(Shape::Block, 14).in_bounds());
        assert!(!Piece::new(Shape::Block, 15).in_bounds());
        assert!(!Piece::new(Shape::Block, 17).in_bounds());
        assert!(!Piece::new(Shape::HorizontalDomino, 3).in_bounds());
        assert!(!Piece::new(Shape::VerticalDomino, 16).in_bounds());
        assert!(!Piece::new(Shape::Square, 20).in_bounds());
    }

    #[test]
    fn test_shape_char_round_trip() {
        for shape in [
            Shape::Blank,
            Shape::Square,
            Shape::VerticalDomino,
            Shape::HorizontalDomino,
            Shape::Block,
        ] {
            assert_eq!(Shape::from_char(shape.to_char()), Some(shape));
            assert_eq!(Shape::from_code(shape.code()), Some(shape));
        }
        assert_eq!(Shape::from_char('x'), None);
        assert_eq!(Shape::from_code(2), None);
    }
}
