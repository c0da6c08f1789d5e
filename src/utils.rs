use crate::engine::Board;
use crate::error::{ConfigurationError, ParseError};
use crate::layout::{Piece, Shape, COLS, ROWS};

/// Parses an array of string slices into a `Board` object.
///
/// Each string slice is one row of the board, starting from row 0. Exactly `ROWS`
/// rows of exactly `COLS` characters are required.
///
/// Valid characters are:
/// - 'B': `Shape::Block` (2x2)
/// - 'V': `Shape::VerticalDomino` (2 rows, 1 column)
/// - 'H': `Shape::HorizontalDomino` (1 row, 2 columns)
/// - 'S': `Shape::Square`
/// - '.': a blank cell
///
/// Cells are read row-major. The first unclaimed cell carrying a letter anchors a
/// piece of that shape, and every cell of the piece's footprint must carry the same
/// letter. Two vertical dominoes stacked in one column therefore read as `V` / `V`
/// / `V` / `V`, split top pair first.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`) representing the rows of the board.
///
/// # Returns
/// * `Ok(Board)` if parsing and validation succeed.
/// * `Err(ParseError)` if:
///     - The number of rows is not `ROWS`.
///     - A row is not `COLS` characters long.
///     - An unrecognized character is encountered.
///     - A letter's footprint runs off the board or into other letters.
///     - The pieces do not form a valid board (wrapped `ConfigurationError`).
///
/// # Examples
/// ```
/// use klotski_solver::utils::board_from_str_array;
/// use klotski_solver::layout::Shape;
///
/// let board = board_from_str_array(&["VBBV", "VBBV", "VHHV", "VSSV", "S..S"]).unwrap();
/// assert_eq!(board.pieces().len(), 10);
/// assert!(board.blanks().is(17, 18));
/// let block = board.piece_at(1).unwrap();
/// assert_eq!(board.pieces()[block].shape, Shape::Block);
///
/// assert!(board_from_str_array(&["VBBX", "VBBV", "VHHV", "VSSV", "S..S"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, ParseError> {
    let rows = ROWS as usize;
    let cols = COLS as usize;
    if s.len() != rows {
        return Err(ParseError::WrongRowCount {
            expected: rows,
            found: s.len(),
        });
    }

    let mut grid = Vec::with_capacity(rows);
    for (r, row_str) in s.iter().enumerate() {
        let chars: Vec<char> = row_str.chars().collect();
        if chars.len() > cols {
            return Err(ParseError::RowTooLong {
                row: r,
                expected: cols,
                found: chars.len(),
            });
        }
        if chars.len() < cols {
            return Err(ParseError::RowTooShort {
                row: r,
                expected: cols,
                found: chars.len(),
            });
        }
        for (c, &ch) in chars.iter().enumerate() {
            if ch != '.' && Shape::from_char(ch).is_none() {
                return Err(ParseError::UnrecognizedCharacter { ch, row: r, col: c });
            }
        }
        grid.push(chars);
    }

    let mut claimed = vec![vec![false; cols]; rows];
    let mut pieces = Vec::new();
    let mut blanks = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if claimed[r][c] {
                continue;
            }
            let ch = grid[r][c];
            let anchor = (r * cols + c) as u8;
            let shape = match Shape::from_char(ch) {
                Some(Shape::Blank) | None => {
                    claimed[r][c] = true;
                    blanks.push(anchor);
                    continue;
                }
                Some(shape) => shape,
            };

            let piece = Piece::new(shape, anchor);
            let incomplete = ParseError::IncompleteFootprint { shape, row: r, col: c };
            if !piece.in_bounds() {
                return Err(incomplete);
            }
            for cell in piece.footprint() {
                let (fr, fc) = (cell as usize / cols, cell as usize % cols);
                if claimed[fr][fc] || grid[fr][fc] != ch {
                    return Err(incomplete);
                }
                claimed[fr][fc] = true;
            }
            pieces.push(piece);
        }
    }

    let blanks: [u8; 2] = blanks
        .as_slice()
        .try_into()
        .map_err(|_| ConfigurationError::WrongBlankCount {
            found: blanks.len(),
        })?;
    Ok(Board::new(pieces, blanks)?)
}

/// Parses a board from a block of text, one row per line.
///
/// Surrounding whitespace on each line is ignored, as are empty lines, so board
/// files may carry a trailing newline or blank separator lines.
pub fn parse_board(text: &str) -> Result<Board, ParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    board_from_str_array(&lines)
}
