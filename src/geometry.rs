//! Per-shape move legality and position update.
//!
//! Every shape has four boundary-checked predicates (one per direction) and one
//! update rule. Both are derived from the same per-shape table in [`slide`]: for a
//! shape, anchor and direction it lists the cells the piece must enter and the
//! cells it vacates. A move is legal when every entered cell is blank; the new
//! blank pair is the old one with the entered cells swapped for the vacated ones.

use crate::layout::{Piece, Shape, CELL_COUNT, COLS, ROWS};
use std::fmt;

/// Direction of a one-cell slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Order in which the move generator tries primary directions.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parses `u`, `d`, `l`, `r` (either case).
    pub fn from_char(c: char) -> Option<Direction> {
        match c.to_ascii_lowercase() {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Anchor after a one-cell slide. Only meaningful for legal moves.
    fn shift(self, anchor: u8) -> u8 {
        match self {
            Direction::Up => anchor - COLS,
            Direction::Down => anchor + COLS,
            Direction::Left => anchor - 1,
            Direction::Right => anchor + 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

/// The two free cells of a board.
///
/// Logically an unordered pair: the cells are stored sorted, so equality,
/// hashing and every legality check depend on membership only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlankPair {
    low: u8,
    high: u8,
}

impl BlankPair {
    /// Builds a pair from two cells given in any order.
    ///
    /// ```
    /// use klotski_solver::geometry::BlankPair;
    /// assert_eq!(BlankPair::new(18, 17), BlankPair::new(17, 18));
    /// ```
    pub fn new(a: u8, b: u8) -> Self {
        BlankPair {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn cells(&self) -> [u8; 2] {
        [self.low, self.high]
    }

    pub fn contains(&self, cell: u8) -> bool {
        self.low == cell || self.high == cell
    }

    /// Set equality with `{a, b}`.
    pub fn is(&self, a: u8, b: u8) -> bool {
        *self == BlankPair::new(a, b)
    }

    /// Returns the pair with `old` swapped for `new`. `old` must be a member.
    fn replace(&self, old: u8, new: u8) -> BlankPair {
        if self.low == old {
            BlankPair::new(new, self.high)
        } else {
            BlankPair::new(self.low, new)
        }
    }
}

impl fmt::Display for BlankPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.low, self.high)
    }
}

/// Cells touched by a one-cell slide.
///
/// A narrow slide enters one cell: the piece's other cell on that side moves
/// into its own old place. A wide slide enters two cells, which then must be
/// exactly the blank pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slide {
    Narrow { enter: u8, vacate: u8 },
    Wide { enter: [u8; 2], vacate: [u8; 2] },
}

fn narrow(enter: u8, vacate: u8) -> Option<Slide> {
    Some(Slide::Narrow { enter, vacate })
}

fn wide(enter: [u8; 2], vacate: [u8; 2]) -> Option<Slide> {
    Some(Slide::Wide { enter, vacate })
}

/// The per-shape move table. Returns `None` when the slide would leave the board.
fn slide(piece: Piece, dir: Direction) -> Option<Slide> {
    let a = piece.anchor;
    if a >= CELL_COUNT {
        return None;
    }
    let (c, r) = (COLS, ROWS);
    match piece.shape {
        Shape::Blank => None,
        Shape::Square => match dir {
            Direction::Up if a >= c => narrow(a - c, a),
            Direction::Down if a < (r - 1) * c => narrow(a + c, a),
            Direction::Left if a % c != 0 => narrow(a - 1, a),
            Direction::Right if a % c != c - 1 => narrow(a + 1, a),
            _ => None,
        },
        Shape::HorizontalDomino => match dir {
            Direction::Up if a >= c => wide([a - c, a - c + 1], [a, a + 1]),
            Direction::Down if a < (r - 1) * c => wide([a + c, a + c + 1], [a, a + 1]),
            Direction::Left if a % c != 0 => narrow(a - 1, a + 1),
            Direction::Right if a % c <= c - 3 => narrow(a + 2, a),
            _ => None,
        },
        Shape::VerticalDomino => match dir {
            Direction::Up if a >= c => narrow(a - c, a + c),
            Direction::Down if a < (r - 2) * c => narrow(a + 2 * c, a),
            Direction::Left if a % c != 0 => wide([a - 1, a - 1 + c], [a, a + c]),
            Direction::Right if a % c != c - 1 => wide([a + 1, a + 1 + c], [a, a + c]),
            _ => None,
        },
        Shape::Block => match dir {
            Direction::Up if a >= c => wide([a - c, a - c + 1], [a + c, a + c + 1]),
            Direction::Down if a < (r - 2) * c => {
                wide([a + 2 * c, a + 2 * c + 1], [a, a + 1])
            }
            Direction::Left if a % c != 0 => wide([a - 1, a - 1 + c], [a + 1, a + 1 + c]),
            Direction::Right if a % c <= c - 3 => wide([a + 2, a + 2 + c], [a, a + c]),
            _ => None,
        },
    }
}

impl Piece {
    /// Whether the piece can slide one cell in `dir` given the free cells.
    ///
    /// # Examples
    /// ```
    /// use klotski_solver::geometry::{BlankPair, Direction};
    /// use klotski_solver::layout::{Piece, Shape};
    ///
    /// let block = Piece::new(Shape::Block, 9);
    /// assert!(block.can_move(Direction::Down, &BlankPair::new(17, 18)));
    /// assert!(!block.can_move(Direction::Down, &BlankPair::new(17, 19)));
    /// ```
    pub fn can_move(&self, dir: Direction, blanks: &BlankPair) -> bool {
        match slide(*self, dir) {
            Some(Slide::Narrow { enter, .. }) => blanks.contains(enter),
            Some(Slide::Wide { enter, .. }) => blanks.is(enter[0], enter[1]),
            None => false,
        }
    }

    /// Whether any of the four slides is legal.
    pub fn can_move_any(&self, blanks: &BlankPair) -> bool {
        Direction::ALL.iter().any(|&dir| self.can_move(dir, blanks))
    }

    /// Slides the piece one cell in `dir`.
    ///
    /// # Returns
    /// * `Some((moved_piece, new_blanks))` if the move is legal. `new_blanks` is
    ///   exactly the set of cells the piece left behind plus any blank it did not
    ///   enter.
    /// * `None` if the move would leave the board or enter an occupied cell.
    pub fn apply_move(&self, dir: Direction, blanks: &BlankPair) -> Option<(Piece, BlankPair)> {
        let new_blanks = match slide(*self, dir)? {
            Slide::Narrow { enter, vacate } if blanks.contains(enter) => {
                blanks.replace(enter, vacate)
            }
            Slide::Wide { enter, vacate } if blanks.is(enter[0], enter[1]) => {
                BlankPair::new(vacate[0], vacate[1])
            }
            _ => return None,
        };
        let moved = Piece::new(self.shape, dir.shift(self.anchor));
        Some((moved, new_blanks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn all_pairs() -> Vec<BlankPair> {
        let mut pairs = Vec::new();
        for a in 0..CELL_COUNT {
            for b in (a + 1)..CELL_COUNT {
                pairs.push(BlankPair::new(a, b));
            }
        }
        pairs
    }

    #[test]
    fn test_blank_pair_is_unordered() {
        let pair = BlankPair::new(9, 4);
        assert_eq!(pair.cells(), [4, 9]);
        assert!(pair.is(4, 9));
        assert!(pair.is(9, 4));
        assert!(pair.contains(4) && pair.contains(9));
        assert!(!pair.contains(5));
        assert_eq!(pair.replace(9, 2), BlankPair::new(2, 4));
    }

    #[test]
    fn test_square_in_corner_never_moves_up_or_left() {
        let square = Piece::new(Shape::Square, 0);
        for blanks in all_pairs() {
            assert!(!square.can_move(Direction::Up, &blanks));
            assert!(!square.can_move(Direction::Left, &blanks));
        }
    }

    #[test]
    fn test_square_on_right_edge_never_moves_right() {
        let square = Piece::new(Shape::Square, 3);
        for blanks in all_pairs() {
            assert!(!square.can_move(Direction::Right, &blanks));
        }
        // Cell 4 is the start of the next row, not a neighbour.
        assert!(!square.can_move(Direction::Right, &BlankPair::new(4, 5)));
    }

    #[test]
    fn test_square_moves_need_one_blank() {
        let square = Piece::new(Shape::Square, 5);
        let blanks = BlankPair::new(6, 19);
        assert!(square.can_move(Direction::Right, &blanks));
        assert!(!square.can_move(Direction::Left, &blanks));
        let (moved, new_blanks) = square.apply_move(Direction::Right, &blanks).unwrap();
        assert_eq!(moved, Piece::new(Shape::Square, 6));
        assert_eq!(new_blanks, BlankPair::new(5, 19));
    }

    #[test]
    fn test_block_down_worked_example() {
        let block = Piece::new(Shape::Block, 9);
        let blanks = BlankPair::new(18, 17);
        assert!(block.can_move(Direction::Down, &blanks));
        let (moved, new_blanks) = block.apply_move(Direction::Down, &blanks).unwrap();
        assert_eq!(moved.anchor, 13);
        assert!(moved.is_goal());
        assert!(new_blanks.is(9, 10));
    }

    #[test]
    fn test_block_needs_both_blanks_on_its_edge() {
        let block = Piece::new(Shape::Block, 5);
        assert!(block.can_move(Direction::Up, &BlankPair::new(1, 2)));
        assert!(!block.can_move(Direction::Up, &BlankPair::new(1, 3)));
        assert!(block.can_move(Direction::Left, &BlankPair::new(8, 4)));
        assert!(!block.can_move(Direction::Left, &BlankPair::new(4, 0)));
        assert!(block.can_move(Direction::Right, &BlankPair::new(7, 11)));
        let (moved, new_blanks) = block
            .apply_move(Direction::Right, &BlankPair::new(11, 7))
            .unwrap();
        assert_eq!(moved.anchor, 6);
        assert!(new_blanks.is(5, 9));
    }

    #[test]
    fn test_block_cannot_leave_board() {
        let bottom = Piece::new(Shape::Block, 13);
        let right = Piece::new(Shape::Block, 2);
        for blanks in all_pairs() {
            assert!(!bottom.can_move(Direction::Down, &blanks));
            assert!(!right.can_move(Direction::Right, &blanks));
        }
    }

    #[test]
    fn test_horizontal_domino_edges() {
        let domino = Piece::new(Shape::HorizontalDomino, 9);
        // Sideways needs one blank, vertical needs both.
        assert!(domino.can_move(Direction::Left, &BlankPair::new(8, 0)));
        assert!(domino.can_move(Direction::Right, &BlankPair::new(11, 0)));
        assert!(!domino.can_move(Direction::Up, &BlankPair::new(5, 0)));
        assert!(domino.can_move(Direction::Up, &BlankPair::new(6, 5)));
        let (moved, new_blanks) = domino
            .apply_move(Direction::Left, &BlankPair::new(8, 0))
            .unwrap();
        assert_eq!(moved.anchor, 8);
        assert_eq!(new_blanks, BlankPair::new(0, 10));
        let (moved, new_blanks) = domino
            .apply_move(Direction::Down, &BlankPair::new(13, 14))
            .unwrap();
        assert_eq!(moved.anchor, 13);
        assert_eq!(new_blanks, BlankPair::new(9, 10));
        // Anchored in column 2 the right cell is already on the edge.
        let edge = Piece::new(Shape::HorizontalDomino, 10);
        for blanks in all_pairs() {
            assert!(!edge.can_move(Direction::Right, &blanks));
        }
        // The bottom row can host a horizontal domino but it cannot go lower.
        let bottom = Piece::new(Shape::HorizontalDomino, 17);
        for blanks in all_pairs() {
            assert!(!bottom.can_move(Direction::Down, &blanks));
        }
    }

    #[test]
    fn test_vertical_domino_edges() {
        let domino = Piece::new(Shape::VerticalDomino, 5);
        assert!(domino.can_move(Direction::Up, &BlankPair::new(1, 19)));
        assert!(domino.can_move(Direction::Down, &BlankPair::new(13, 19)));
        assert!(!domino.can_move(Direction::Left, &BlankPair::new(4, 19)));
        assert!(domino.can_move(Direction::Left, &BlankPair::new(8, 4)));
        let (moved, new_blanks) = domino
            .apply_move(Direction::Up, &BlankPair::new(1, 19))
            .unwrap();
        assert_eq!(moved.anchor, 1);
        assert_eq!(new_blanks, BlankPair::new(9, 19));
        let (moved, new_blanks) = domino
            .apply_move(Direction::Right, &BlankPair::new(6, 10))
            .unwrap();
        assert_eq!(moved.anchor, 6);
        assert_eq!(new_blanks, BlankPair::new(5, 9));
        let bottom = Piece::new(Shape::VerticalDomino, 15);
        for blanks in all_pairs() {
            assert!(!bottom.can_move(Direction::Down, &blanks));
        }
    }

    #[test]
    fn test_new_blanks_are_the_vacated_footprint() {
        // For every in-bounds piece and legal move, the new blank pair plus the new
        // footprint must cover exactly the old blank pair plus the old footprint.
        for shape in [
            Shape::Square,
            Shape::VerticalDomino,
            Shape::HorizontalDomino,
            Shape::Block,
        ] {
            for anchor in 0..CELL_COUNT {
                let piece = Piece::new(shape, anchor);
                if !piece.in_bounds() {
                    continue;
                }
                let footprint: BTreeSet<u8> = piece.footprint().into_iter().collect();
                for blanks in all_pairs() {
                    if blanks.cells().iter().any(|c| footprint.contains(c)) {
                        continue;
                    }
                    for dir in Direction::ALL {
                        if let Some((moved, new_blanks)) = piece.apply_move(dir, &blanks) {
                            assert!(moved.in_bounds(), "{shape} at {anchor} moved {dir} off board");
                            let before: BTreeSet<u8> =
                                footprint.iter().copied().chain(blanks.cells()).collect();
                            let after: BTreeSet<u8> = moved
                                .footprint()
                                .into_iter()
                                .chain(new_blanks.cells())
                                .collect();
                            assert_eq!(before, after, "{shape} at {anchor} moved {dir}");
                            assert_eq!(before.len(), footprint.len() + 2);
                            // Moving back is always legal and restores the blanks.
                            let (back, restored) =
                                moved.apply_move(dir.opposite(), &new_blanks).unwrap();
                            assert_eq!(back, piece);
                            assert_eq!(restored, blanks);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_blank_and_off_board_pieces_never_move() {
        let blank = Piece::new(Shape::Blank, 5);
        let stray = Piece::new(Shape::Square, 200);
        for blanks in all_pairs() {
            assert!(!blank.can_move_any(&blanks));
            assert!(!stray.can_move_any(&blanks));
        }
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::from_char('U'), Some(Direction::Up));
        assert_eq!(Direction::from_char('r'), Some(Direction::Right));
        assert_eq!(Direction::from_char('x'), None);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Down.to_string(), "down");
    }
}
