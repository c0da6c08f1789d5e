//! # Klotski Solver Library
//!
//! This library provides the board model for the 4x5 Klotski ("Huarong Dao")
//! sliding-block puzzle and a Breadth First Search (BFS) solver that finds a
//! shortest sequence of moves bringing the 2x2 block to the exit.
//!
//! It is used by three binaries:
//! - `klotski_solver`: Reads a board file and prints a shortest solution.
//! - `klotski_player`: Allows interactive play via the command line, with undo.
//! - `scramble_evaluator`: Solves a batch of seeded scrambles and reports
//!   solution lengths and search effort.
//!
//! ## Modules
//! - `layout`: Board constants, piece shapes and the packed `LayoutCode` state key.
//! - `geometry`: Directions, the two-blank pair and per-shape slide rules.
//! - `movegen`: Successor generation, including chained two-cell moves.
//! - `solver`: The BFS `Solver`, its limits and the `solve` entry point.
//! - `engine`: The validated `Board` and the interactive `Game` session.
//! - `error`: Error types and board validation.
//! - `utils`: Parsing boards from their text form.

pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod movegen;
pub mod solver;
pub mod utils;
