//! Breadth-first search over board states.
//!
//! The search graph's nodes are `LayoutCode`s and its edges are generator moves
//! (see [`crate::movegen`]). Because every edge costs one, the first goal state
//! discovered is at minimal depth, so the returned solution is a shortest one
//! under the generator's move count.

use crate::geometry::BlankPair;
use crate::layout::{is_goal, LayoutCode, STEP_CAP};
use crate::movegen::{generate, successors, SearchNode};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Limits applied to one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of distinct states recorded before giving up.
    pub step_cap: usize,
    /// Maximum computation time in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            step_cap: STEP_CAP,
            time_limit_ms: 0,
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A goal state was reached.
    Solved,
    /// The initial state already satisfies the goal; no moves are needed.
    AlreadySolved,
    /// Every reachable state was visited without reaching the goal.
    Exhausted,
    /// The visited map hit `step_cap`.
    StepCapReached,
    /// `time_limit_ms` elapsed.
    TimedOut,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// States after each move, goal first. The initial state is not included.
    /// Empty unless `outcome` is [`SearchOutcome::Solved`].
    pub steps: Vec<LayoutCode>,
    pub outcome: SearchOutcome,
    /// Number of distinct states recorded, including the initial one.
    pub visited: usize,
    /// Number of frontier generations expanded.
    pub depth: u32,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        self.outcome == SearchOutcome::Solved
    }

    /// The steps from the first move to the goal.
    pub fn in_play_order(&self) -> Vec<LayoutCode> {
        self.steps.iter().rev().copied().collect()
    }
}

/// Breadth-first solver. Each call to [`Solver::solve`] owns its own visited map
/// and frontier, so one solver may be reused and separate solvers may run on
/// separate threads.
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
    cancelled: Arc<AtomicBool>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Solver {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a solver sharing an existing cancellation flag.
    pub fn with_cancellation(config: SolverConfig, cancelled: Arc<AtomicBool>) -> Self {
        Solver { config, cancelled }
    }

    /// Returns a handle to cancel running searches. Setting it to `true` makes the
    /// current and any later search stop with [`SearchOutcome::Cancelled`].
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds a shortest sequence of generator moves bringing the block to the exit.
    ///
    /// # Arguments
    /// * `initial_code`: Packed starting layout.
    /// * `initial_blanks`: The starting layout's free cells.
    ///
    /// # Returns
    /// A [`Solution`] whose `steps` list the states after each move, goal first and
    /// without the initial state. A search that runs out of states, hits the step
    /// cap, times out or is cancelled returns empty `steps`; that is a normal
    /// outcome, not an error.
    pub fn solve(&self, initial_code: LayoutCode, initial_blanks: BlankPair) -> Solution {
        if is_goal(initial_code) {
            log::info!("Initial layout {initial_code:#x} already solved");
            return Solution {
                steps: Vec::new(),
                outcome: SearchOutcome::AlreadySolved,
                visited: 1,
                depth: 0,
            };
        }

        let deadline = (self.config.time_limit_ms > 0)
            .then(|| Instant::now() + Duration::from_millis(self.config.time_limit_ms));

        let mut visited: HashMap<LayoutCode, Option<LayoutCode>> = HashMap::new();
        visited.insert(initial_code, None);
        let mut frontier = vec![SearchNode::root(initial_code, initial_blanks)];
        let mut depth = 0;

        let stop = loop {
            if frontier.is_empty() {
                break Stop::Exhausted;
            }
            if visited.len() >= self.config.step_cap {
                break Stop::StepCapReached;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break Stop::TimedOut;
            }

            depth += 1;
            match self.expand(&frontier, &mut visited) {
                Expansion::Next(next) => {
                    log::debug!(
                        "BFS generation {}: frontier={}, visited={}",
                        depth,
                        next.len(),
                        visited.len()
                    );
                    frontier = next;
                }
                Expansion::Stopped(stop) => break stop,
            }
        };

        let outcome = match stop {
            Stop::Goal(goal) => {
                let steps = reconstruct_path(&visited, goal);
                log::info!(
                    "Solved in {} moves, {} states visited",
                    steps.len(),
                    visited.len()
                );
                return Solution {
                    steps,
                    outcome: SearchOutcome::Solved,
                    visited: visited.len(),
                    depth,
                };
            }
            Stop::Exhausted => SearchOutcome::Exhausted,
            Stop::StepCapReached => SearchOutcome::StepCapReached,
            Stop::TimedOut => SearchOutcome::TimedOut,
            Stop::Cancelled => SearchOutcome::Cancelled,
        };
        match outcome {
            SearchOutcome::Exhausted => {
                log::info!("No solution: all {} reachable states visited", visited.len())
            }
            _ => log::warn!(
                "Search stopped ({:?}) after {} states at depth {}",
                outcome,
                visited.len(),
                depth
            ),
        }
        Solution {
            steps: Vec::new(),
            outcome,
            visited: visited.len(),
            depth,
        }
    }

    /// Expands one frontier generation into the next.
    fn expand(
        &self,
        frontier: &[SearchNode],
        visited: &mut HashMap<LayoutCode, Option<LayoutCode>>,
    ) -> Expansion {
        let mut next = Vec::new();
        for node in frontier {
            if self.cancelled.load(Ordering::Relaxed) {
                return Expansion::Stopped(Stop::Cancelled);
            }
            for child in successors(node) {
                if visited.contains_key(&child.code) {
                    continue;
                }
                if visited.len() >= self.config.step_cap {
                    return Expansion::Stopped(Stop::StepCapReached);
                }
                visited.insert(child.code, child.parent);
                if child.is_goal {
                    return Expansion::Stopped(Stop::Goal(child.code));
                }
                next.push(child);
            }
        }
        Expansion::Next(next)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new(SolverConfig::default())
    }
}

enum Stop {
    Goal(LayoutCode),
    Exhausted,
    StepCapReached,
    TimedOut,
    Cancelled,
}

enum Expansion {
    Next(Vec<SearchNode>),
    Stopped(Stop),
}

/// Follows parent links from `goal` back to the root. The root itself is left
/// out; the result is ordered goal first.
fn reconstruct_path(
    visited: &HashMap<LayoutCode, Option<LayoutCode>>,
    goal: LayoutCode,
) -> Vec<LayoutCode> {
    let mut steps = Vec::new();
    let mut code = goal;
    while let Some(&Some(parent)) = visited.get(&code) {
        steps.push(code);
        code = parent;
    }
    steps
}

/// Solves a layout with the default limits.
///
/// # Arguments
/// * `layout_code`: Packed starting layout.
/// * `blank1`, `blank2`: The two free cells (distinct, both below 20).
///
/// # Returns
/// The states after each move, goal first and without the initial state. The
/// `Vec` is empty both when no solution was found within the step cap and when
/// the layout is already solved; check [`crate::layout::is_goal`] first, or use
/// [`Solver::solve`] whose [`SearchOutcome`] tells the two apart.
///
/// # Examples
/// ```
/// use klotski_solver::solver::solve;
/// use klotski_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["VHHV", "VHHV", "SBBS", "VBBV", "V..V"]).unwrap();
/// let [b1, b2] = board.blanks().cells();
/// let steps = solve(board.code(), b1, b2);
/// assert_eq!(steps.len(), 1);
/// ```
pub fn solve(layout_code: LayoutCode, blank1: u8, blank2: u8) -> Vec<LayoutCode> {
    Solver::default()
        .solve(layout_code, BlankPair::new(blank1, blank2))
        .steps
}

/// Breadth-first depth of every state reachable from `(code, blanks)`.
///
/// Uses the same generator as [`Solver::solve`] but does not stop at goal states.
/// Exploration stops once `limit` states have been recorded.
pub fn reachable_depths(
    code: LayoutCode,
    blanks: BlankPair,
    limit: usize,
) -> HashMap<LayoutCode, u32> {
    let mut depths = HashMap::new();
    depths.insert(code, 0);
    let mut frontier = vec![(code, blanks)];
    let mut depth = 0;
    while !frontier.is_empty() && depths.len() < limit {
        depth += 1;
        let mut next = Vec::new();
        'generation: for (code, blanks) in frontier {
            for s in generate(code, &blanks) {
                if depths.len() >= limit {
                    break 'generation;
                }
                if !depths.contains_key(&s.code) {
                    depths.insert(s.code, depth);
                    next.push((s.code, s.blanks));
                }
            }
        }
        frontier = next;
    }
    depths
}
