//! Board state and interactive play for the Klotski puzzle.
//!
//! This module defines:
//! - `Board`: a validated arrangement of pieces plus its two blank cells, with
//!   single-step legality queries, move application and a text rendering.
//! - `Game`: a play session over a `Board`, tracking steps and a history for undo.
use crate::error::{validate, ConfigurationError};
use crate::geometry::{BlankPair, Direction};
use crate::layout::{decode, encode, LayoutCode, Piece, Shape, CELL_COUNT, COLS, ROWS};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// A board position: the pieces (sorted by anchor) and the two free cells.
///
/// Boards built with [`Board::new`] are validated. [`Board::from_code`] trusts its
/// input, which is what the solver's outputs need: every code it returns was
/// produced by legal moves from a validated start.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: Vec<Piece>,
    blanks: BlankPair,
}

impl Board {
    /// Creates a board after checking it with [`validate`].
    ///
    /// # Arguments
    /// * `pieces`: The pieces, in any order. Blank pieces are dropped.
    /// * `blanks`: The two free cells, in any order.
    ///
    /// # Returns
    /// * `Ok(Board)` with pieces sorted by anchor.
    /// * `Err(ConfigurationError)` describing the first broken invariant.
    pub fn new(pieces: Vec<Piece>, blanks: [u8; 2]) -> Result<Self, ConfigurationError> {
        validate(&pieces, &blanks)?;
        let mut pieces: Vec<Piece> = pieces
            .into_iter()
            .filter(|p| p.shape != Shape::Blank)
            .collect();
        pieces.sort_unstable_by_key(|p| p.anchor);
        Ok(Board {
            pieces,
            blanks: BlankPair::new(blanks[0], blanks[1]),
        })
    }

    /// Rebuilds a board from a packed code and its blank pair, without validation.
    pub fn from_code(code: LayoutCode, blanks: BlankPair) -> Self {
        Board {
            pieces: decode(code),
            blanks,
        }
    }

    /// Rebuilds and validates a board from a packed code alone, taking the cells
    /// no piece covers as the blanks.
    ///
    /// The solver only reports codes, so this is how a caller turns its steps back
    /// into boards.
    pub fn from_full_code(code: LayoutCode) -> Result<Self, ConfigurationError> {
        let pieces = decode(code);
        let mut covered = [false; CELL_COUNT as usize];
        for piece in pieces.iter().filter(|p| p.in_bounds()) {
            for cell in piece.footprint() {
                covered[cell as usize] = true;
            }
        }
        let free: Vec<u8> = (0..CELL_COUNT).filter(|&c| !covered[c as usize]).collect();
        let blanks: [u8; 2] = free
            .as_slice()
            .try_into()
            .map_err(|_| ConfigurationError::WrongBlankCount { found: free.len() })?;
        Board::new(pieces, blanks)
    }

    /// The standard "Heng Dao Li Ma" opening.
    ///
    /// ```text
    /// VBBV
    /// VBBV
    /// VHHV
    /// VSSV
    /// S..S
    /// ```
    pub fn classic() -> Self {
        Board {
            pieces: vec![
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
            ],
            blanks: BlankPair::new(17, 18),
        }
    }

    /// Creates a solvable board by scrambling the classic opening.
    ///
    /// Starting from [`Board::classic`], `walk_len` random one-cell slides are
    /// applied. Every slide is reversible, so the result can always be brought back
    /// to the opening and from there to the exit. The same seed always produces the
    /// same board.
    ///
    /// # Arguments
    /// * `seed`: Seed for the `SmallRng` driving the walk.
    /// * `walk_len`: Number of random slides to apply.
    pub fn new_random_with_seed(seed: u64, walk_len: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::classic();
        for _ in 0..walk_len {
            let moves = board.legal_moves();
            let Some(&(idx, dir)) = moves.choose(&mut rng) else {
                break;
            };
            if let Some(next) = board.apply_move(idx, dir) {
                board = next;
            }
        }
        board
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn blanks(&self) -> &BlankPair {
        &self.blanks
    }

    /// The packed encoding of this board's pieces.
    pub fn code(&self) -> LayoutCode {
        encode(&self.pieces)
    }

    /// Returns `true` when the block sits on the exit anchor.
    pub fn is_solved(&self) -> bool {
        self.pieces.iter().any(Piece::is_goal)
    }

    /// Expands every footprint into a per-cell grid.
    ///
    /// Each entry holds the index into [`Board::pieces`] of the piece covering the
    /// cell, or `None` for a free cell.
    pub fn cells(&self) -> [Option<usize>; CELL_COUNT as usize] {
        let mut cells = [None; CELL_COUNT as usize];
        for (idx, piece) in self.pieces.iter().enumerate() {
            if !piece.in_bounds() {
                continue;
            }
            for cell in piece.footprint() {
                cells[cell as usize] = Some(idx);
            }
        }
        cells
    }

    /// Index of the piece covering `cell`, if any.
    pub fn piece_at(&self, cell: u8) -> Option<usize> {
        if cell >= CELL_COUNT {
            return None;
        }
        self.cells()[cell as usize]
    }

    pub fn can_move(&self, idx: usize, dir: Direction) -> bool {
        self.pieces
            .get(idx)
            .is_some_and(|piece| piece.can_move(dir, &self.blanks))
    }

    /// Slides piece `idx` one cell in `dir`.
    ///
    /// # Returns
    /// The resulting board, or `None` if `idx` is out of range or the slide is
    /// illegal. The receiver is left unchanged either way.
    pub fn apply_move(&self, idx: usize, dir: Direction) -> Option<Board> {
        let piece = self.pieces.get(idx)?;
        let (moved, blanks) = piece.apply_move(dir, &self.blanks)?;
        let mut pieces = self.pieces.clone();
        pieces[idx] = moved;
        pieces.sort_unstable_by_key(|p| p.anchor);
        Some(Board { pieces, blanks })
    }

    /// Every legal one-cell slide as `(piece index, direction)`.
    pub fn legal_moves(&self) -> Vec<(usize, Direction)> {
        let mut moves = Vec::new();
        for (idx, piece) in self.pieces.iter().enumerate() {
            for dir in Direction::ALL {
                if piece.can_move(dir, &self.blanks) {
                    moves.push((idx, dir));
                }
            }
        }
        moves
    }
}

impl fmt::Display for Board {
    /// Renders the board in the text format read by
    /// [`crate::utils::board_from_str_array`]: one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells();
        for r in 0..ROWS {
            for c in 0..COLS {
                let shape = match cells[(r * COLS + c) as usize] {
                    Some(idx) => self.pieces[idx].shape,
                    None => Shape::Blank,
                };
                write!(f, "{}", shape.to_char())?;
            }
            if r < ROWS - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// A play session: the current board, the number of slides made and the
/// history needed to undo them.
///
/// # Examples
/// ```
/// use klotski_solver::engine::{Board, Game};
/// use klotski_solver::geometry::Direction;
///
/// let mut game = Game::new_with_board(Board::classic());
/// // Cell 13 holds a square that can slide down into the free cell 17.
/// assert!(game.process_move(13, Direction::Down));
/// assert_eq!(game.steps(), 1);
/// assert!(game.undo_last_move());
/// assert_eq!(game.board(), &Board::classic());
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    steps: u32,
    history: Vec<(Board, u32)>,
}

impl Game {
    /// Starts a session on the classic opening.
    pub fn new() -> Self {
        Game::new_with_board(Board::classic())
    }

    pub fn new_with_board(initial_board: Board) -> Self {
        Game {
            board: initial_board.clone(),
            steps: 0,
            history: vec![(initial_board, 0)],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Slides the piece covering `cell` one cell in `dir`.
    ///
    /// `cell` may be any cell of the piece's footprint, not just its anchor.
    ///
    /// # Returns
    /// * `true` if the slide was legal and applied; the new state is pushed to the
    ///   history.
    /// * `false` if `cell` is free or off the board, or the slide is blocked.
    pub fn process_move(&mut self, cell: u8, dir: Direction) -> bool {
        let Some(idx) = self.board.piece_at(cell) else {
            return false;
        };
        let Some(next) = self.board.apply_move(idx, dir) else {
            return false;
        };
        self.board = next;
        self.steps += 1;
        self.history.push((self.board.clone(), self.steps));
        true
    }

    /// Reverts the last applied slide. Returns `false` at the initial state.
    pub fn undo_last_move(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        match self.history.last() {
            Some((prev_board, prev_steps)) => {
                self.board = prev_board.clone();
                self.steps = *prev_steps;
                true
            }
            None => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
