//! Error types and board validation.
//!
//! The search itself never fails: it only ever reports a solution or the absence
//! of one. Malformed boards are rejected up front by [`validate`], which the code
//! building a board (a parser, an editor) runs once before handing the layout to
//! the solver.

use crate::layout::{Piece, Shape, CELL_COUNT};
use thiserror::Error;

/// Reasons a piece placement is not a playable board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The board must have exactly two free cells.
    #[error("Expected exactly 2 blank cells, found {found}")]
    WrongBlankCount {
        /// Number of blank cells actually present.
        found: usize,
    },

    /// A cell is claimed by more than one piece, or by a piece and a blank.
    #[error("Cell {cell} is covered more than once")]
    OverlappingPieces {
        /// The first cell found to be doubly covered.
        cell: u8,
    },

    /// The board must have exactly one 2x2 block.
    #[error("Expected exactly one 2x2 block, found {found}")]
    MissingOrDuplicateBlockPiece {
        /// Number of blocks present.
        found: usize,
    },

    /// A piece anchor, piece footprint or blank cell falls outside the 4x5 board.
    #[error("Index {index} is outside the 4x5 board")]
    OutOfBoundsIndex {
        /// The offending anchor or blank index.
        index: u8,
    },
}

/// Errors produced while reading a board from its text form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected {expected} rows, found {found}")]
    WrongRowCount { expected: usize, found: usize },

    #[error("Row {row} is too long. Expected {expected} characters, found {found}")]
    RowTooLong {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row} is too short. Expected {expected} characters, found {found}")]
    RowTooShort {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unrecognized character '{ch}' in row {row} col {col}")]
    UnrecognizedCharacter { ch: char, row: usize, col: usize },

    /// A letter anchors a piece whose footprint is not entirely marked with
    /// the same letter.
    #[error("Incomplete {shape} anchored at row {row} col {col}")]
    IncompleteFootprint { shape: Shape, row: usize, col: usize },

    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}

/// Checks that `pieces` and `blanks` form a playable board.
///
/// The checks run in this order, and the first failure is returned:
/// 1. every anchor, every footprint cell and every blank lies on the board;
/// 2. exactly two distinct blanks are given;
/// 3. no cell is covered twice (piece/piece or piece/blank);
/// 4. exactly one piece is a 2x2 block;
/// 5. the cells covered by no piece are exactly two (the blanks).
///
/// Pieces with [`Shape::Blank`] occupy nothing and are ignored.
///
/// # Examples
/// ```
/// use klotski_solver::error::{validate, ConfigurationError};
/// use klotski_solver::layout::{Piece, Shape};
///
/// let pieces = [Piece::new(Shape::Block, 0), Piece::new(Shape::Block, 2)];
/// assert_eq!(
///     validate(&pieces, &[16, 17]),
///     Err(ConfigurationError::MissingOrDuplicateBlockPiece { found: 2 })
/// );
/// ```
pub fn validate(pieces: &[Piece], blanks: &[u8]) -> Result<(), ConfigurationError> {
    let pieces: Vec<&Piece> = pieces.iter().filter(|p| p.shape != Shape::Blank).collect();

    for piece in &pieces {
        if !piece.in_bounds() {
            return Err(ConfigurationError::OutOfBoundsIndex {
                index: piece.anchor,
            });
        }
    }
    if let Some(&index) = blanks.iter().find(|&&b| b >= CELL_COUNT) {
        return Err(ConfigurationError::OutOfBoundsIndex { index });
    }

    if blanks.len() != 2 || blanks[0] == blanks[1] {
        let mut distinct = blanks.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        return Err(ConfigurationError::WrongBlankCount {
            found: distinct.len(),
        });
    }

    let mut covered = [false; CELL_COUNT as usize];
    for &cell in blanks {
        covered[cell as usize] = true;
    }
    for piece in &pieces {
        for cell in piece.footprint() {
            if covered[cell as usize] {
                return Err(ConfigurationError::OverlappingPieces { cell });
            }
            covered[cell as usize] = true;
        }
    }

    let blocks = pieces.iter().filter(|p| p.shape == Shape::Block).count();
    if blocks != 1 {
        return Err(ConfigurationError::MissingOrDuplicateBlockPiece { found: blocks });
    }

    let uncovered = covered.iter().filter(|&&c| !c).count();
    if uncovered != 0 {
        return Err(ConfigurationError::WrongBlankCount {
            found: uncovered + 2,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_pieces() -> Vec<Piece> {
        vec![
            Piece::new(Shape::VerticalDomino, 0),
            Piece::new(Shape::HorizontalDomino, 1),
            Piece::new(Shape::VerticalDomino, 3),
            Piece::new(Shape::HorizontalDomino, 5),
            Piece::new(Shape::Square, 8),
            Piece::new(Shape::Block, 9),
            Piece::new(Shape::Square, 11),
            Piece::new(Shape::VerticalDomino, 12),
            Piece::new(Shape::VerticalDomino, 15),
        ]
    }

    #[test]
    fn test_valid_board_passes() {
        assert_eq!(validate(&worked_pieces(), &[18, 17]), Ok(()));
    }

    #[test]
    fn test_wrong_blank_count() {
        assert_eq!(
            validate(&worked_pieces(), &[17]),
            Err(ConfigurationError::WrongBlankCount { found: 1 })
        );
        assert_eq!(
            validate(&worked_pieces(), &[17, 17]),
            Err(ConfigurationError::WrongBlankCount { found: 1 })
        );
        assert_eq!(
            validate(&worked_pieces(), &[16, 17, 18]),
            Err(ConfigurationError::WrongBlankCount { found: 3 })
        );
    }

    #[test]
    fn test_uncovered_cells_count_as_extra_blanks() {
        let mut pieces = worked_pieces();
        pieces.retain(|p| p.anchor != 8);
        assert_eq!(
            validate(&pieces, &[17, 18]),
            Err(ConfigurationError::WrongBlankCount { found: 3 })
        );
    }

    #[test]
    fn test_overlapping_pieces() {
        let mut pieces = worked_pieces();
        pieces.push(Piece::new(Shape::Square, 10));
        assert_eq!(
            validate(&pieces, &[17, 18]),
            Err(ConfigurationError::OverlappingPieces { cell: 10 })
        );
        // A blank under a piece is an overlap too.
        assert_eq!(
            validate(&worked_pieces(), &[17, 14]),
            Err(ConfigurationError::OverlappingPieces { cell: 14 })
        );
    }

    #[test]
    fn test_block_count() {
        let mut pieces = worked_pieces();
        pieces.retain(|p| p.shape != Shape::Block);
        pieces.push(Piece::new(Shape::Square, 9));
        pieces.push(Piece::new(Shape::Square, 10));
        pieces.push(Piece::new(Shape::Square, 13));
        pieces.push(Piece::new(Shape::Square, 14));
        assert_eq!(
            validate(&pieces, &[17, 18]),
            Err(ConfigurationError::MissingOrDuplicateBlockPiece { found: 0 })
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let mut pieces = worked_pieces();
        pieces.push(Piece::new(Shape::Square, 20));
        assert_eq!(
            validate(&pieces, &[17, 18]),
            Err(ConfigurationError::OutOfBoundsIndex { index: 20 })
        );
        // Footprint wrapping past the right edge.
        let pieces = [Piece::new(Shape::Block, 3)];
        assert_eq!(
            validate(&pieces, &[17, 18]),
            Err(ConfigurationError::OutOfBoundsIndex { index: 3 })
        );
        assert_eq!(
            validate(&worked_pieces(), &[17, 25]),
            Err(ConfigurationError::OutOfBoundsIndex { index: 25 })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigurationError::WrongBlankCount { found: 3 }.to_string(),
            "Expected exactly 2 blank cells, found 3"
        );
        let parse: ParseError = ConfigurationError::OverlappingPieces { cell: 4 }.into();
        assert_eq!(parse.to_string(), "Cell 4 is covered more than once");
    }
}
