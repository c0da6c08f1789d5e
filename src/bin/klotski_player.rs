use clap::Parser;
use klotski_solver::engine::{Board, Game};
use klotski_solver::geometry::Direction;
use klotski_solver::layout::CELL_COUNT;
use klotski_solver::solver::Solver;
use klotski_solver::utils::parse_board;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board file to play; the classic opening is used when omitted
    board_file: Option<PathBuf>,

    /// Start from a scrambled classic opening with this seed instead
    #[clap(long, conflicts_with = "board_file")]
    seed: Option<u64>,
}

fn initial_board(args: &Args) -> Result<Board, String> {
    if let Some(path) = &args.board_file {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        return parse_board(&content).map_err(|e| format!("Invalid board: {}", e));
    }
    Ok(match args.seed {
        Some(seed) => Board::new_random_with_seed(seed, 200),
        None => Board::classic(),
    })
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let board = match initial_board(&args) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let mut game = Game::new_with_board(board);
    println!("Welcome to Klotski! Bring the 2x2 block down to the exit.");

    loop {
        println!("---------------------");
        println!("Steps: {}", game.steps());
        println!("{}", game.board());

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total Steps: {}", game.steps());
            println!("---------------------");
            break;
        }

        print!("Enter your move (cell dir, e.g. '13 d'), 'h' for a hint, 'u' to undo, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "u" {
            if game.undo_last_move() {
                println!("Move undone.");
            } else {
                println!("Cannot undo further (already at initial state).");
            }
            continue;
        }

        if trimmed_input == "h" {
            let board = game.board();
            let solution = Solver::default().solve(board.code(), *board.blanks());
            match solution.in_play_order().first() {
                Some(&next) => match Board::from_full_code(next) {
                    Ok(hint) => println!(
                        "{} moves to go. Next position:\n{}",
                        solution.steps.len(),
                        hint
                    ),
                    Err(e) => println!("Hint unavailable: {}", e),
                },
                None => println!("No solution found from here ({:?}).", solution.outcome),
            }
            continue;
        }

        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() != 2 {
            println!("Invalid input format. Use 'cell dir', 'h', 'u', or 'q'.");
            continue;
        }
        let cell = match parts[0].parse::<u8>() {
            Ok(cell) if cell < CELL_COUNT => cell,
            _ => {
                println!("Invalid cell: must be between 0 and {}.", CELL_COUNT - 1);
                continue;
            }
        };
        let dir = match parts[1].chars().next().and_then(Direction::from_char) {
            Some(dir) if parts[1].len() == 1 => dir,
            _ => {
                println!("Invalid direction: use u, d, l or r.");
                continue;
            }
        };
        if game.process_move(cell, dir) {
            println!("Moved {}.", dir);
        } else {
            println!("Invalid move: nothing at cell {} can slide {}.", cell, dir);
        }
    }
}
