use clap::Parser;
use klotski_solver::engine::Board;
use klotski_solver::solver::{SearchOutcome, Solver, SolverConfig};
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of scrambled boards to solve
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; board i uses `start_seed + i`
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Number of random slides applied to the classic opening
    #[clap(short, long, default_value_t = 200)]
    walk_len: usize,

    /// Maximum number of distinct states per search
    #[clap(long, default_value_t = klotski_solver::layout::STEP_CAP)]
    step_cap: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let solver = Solver::new(SolverConfig {
        step_cap: args.step_cap,
        ..SolverConfig::default()
    });

    println!(
        "Starting scramble evaluation for {} boards ({} slides each)...",
        args.boards, args.walk_len
    );

    let mut lengths: Vec<usize> = Vec::new();
    let mut outcomes: HashMap<String, usize> = HashMap::new();
    let mut total_time = Duration::ZERO;

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx as u64;
        let board = Board::new_random_with_seed(seed, args.walk_len);

        let start = Instant::now();
        let solution = solver.solve(board.code(), *board.blanks());
        let elapsed = start.elapsed();
        total_time += elapsed;

        println!(
            "  Board {:<4} (Seed: {:<6}): {:<14} Moves: {:<4} States: {:<7} Time: {:.2?}",
            board_idx,
            seed,
            format!("{:?}", solution.outcome),
            solution.steps.len(),
            solution.visited,
            elapsed
        );
        *outcomes.entry(format!("{:?}", solution.outcome)).or_insert(0) += 1;
        match solution.outcome {
            SearchOutcome::Solved | SearchOutcome::AlreadySolved => {
                lengths.push(solution.steps.len())
            }
            _ => log::warn!("Board with seed {} not solved:\n{}", seed, board),
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    let mut sorted_outcomes: Vec<(String, usize)> = outcomes.into_iter().collect();
    sorted_outcomes.sort();
    for (outcome, count) in sorted_outcomes {
        println!("Outcome {:<14}: {}", outcome, count);
    }
    if !lengths.is_empty() {
        let total: usize = lengths.iter().sum();
        let longest = lengths.iter().copied().max().unwrap_or(0);
        println!(
            "Average solution length = {:.2}, longest = {}",
            total as f64 / lengths.len() as f64,
            longest
        );
    }
    if args.boards > 0 {
        println!(
            "Total time = {:.2?}, average = {:.2?}",
            total_time,
            total_time / args.boards as u32
        );
    }
}
