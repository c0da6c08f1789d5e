use clap::Parser;
use klotski_solver::engine::Board;
use klotski_solver::solver::{SearchOutcome, Solver, SolverConfig};
use klotski_solver::utils::parse_board;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Maximum number of distinct states to record before giving up
    #[clap(short, long, default_value_t = klotski_solver::layout::STEP_CAP)]
    step_cap: usize,

    /// Time limit in milliseconds (0 = unlimited)
    #[clap(short, long, default_value_t = 0)]
    time_limit_ms: u64,

    /// Path to the board file (5 rows of 4 characters: B, V, H, S or '.')
    board_file: PathBuf,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    parse_board(&content).map_err(|e| format!("Invalid board: {}", e))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = match read_board_file(&args.board_file) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}: {}", args.board_file.display(), e);
            std::process::exit(1);
        }
    };
    println!("Loaded board from {}\n", args.board_file.display());
    println!("Initial board state:\n{}\n", board);

    let solver = Solver::new(SolverConfig {
        step_cap: args.step_cap,
        time_limit_ms: args.time_limit_ms,
    });
    println!(
        "Searching with step cap {}...\n",
        solver.config().step_cap
    );
    let start = Instant::now();
    let solution = solver.solve(board.code(), *board.blanks());
    let elapsed = start.elapsed();

    match solution.outcome {
        SearchOutcome::Solved => {
            println!(
                "Solution found: {} moves ({} states, {:.2?})\n",
                solution.steps.len(),
                solution.visited,
                elapsed
            );
            for (i, code) in solution.in_play_order().into_iter().enumerate() {
                match Board::from_full_code(code) {
                    Ok(step) => println!("Move {}:\n{}\n", i + 1, step),
                    Err(e) => println!("Move {}: {:#x} ({})\n", i + 1, code, e),
                }
            }
        }
        SearchOutcome::AlreadySolved => println!("Board is already solved."),
        other => println!(
            "No solution found ({:?}, {} states, {:.2?}).",
            other, solution.visited, elapsed
        ),
    }
}
