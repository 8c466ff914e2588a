//! Search strategies and the limits they run under.

use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use log::info;
use strum::{Display as StrumDisplay, EnumString, VariantArray};

use crate::encoder::encode;
use crate::grid::Grid;
use crate::model::PuzzleModel;
use crate::solution::Solution;

pub use backtracking::BacktrackingSearch;
pub use best_first::BestFirstSearch;
pub use complete::CompleteSearch;
pub use exhaustive::ExhaustiveSearch;

mod backtracking;
mod best_first;
mod complete;
mod exhaustive;

/// Reasons a search may stop without an answer.
///
/// "No solution" is not a failure; searches report it as `Ok(None)`.
#[derive(Debug)]
pub enum SolverFailure {
    /// The [`Budget`] ran out before the search finished. Whether a solution exists is unknown.
    Interrupted,
    /// The SAT backend reported an error.
    Backend(String),
}

impl Display for SolverFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverFailure::Interrupted => write!(f, "search budget exhausted before an answer was found"),
            SolverFailure::Backend(reason) => write!(f, "SAT backend failed: {}", reason),
        }
    }
}

impl std::error::Error for SolverFailure {}

/// A cooperative limit on search effort, consulted once per node expansion.
pub trait Budget {
    /// Account for one more expansion. Returns [`SolverFailure::Interrupted`] once the budget is spent.
    fn tick(&mut self) -> Result<(), SolverFailure>;
}

/// No limit at all.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unbounded;

impl Budget for Unbounded {
    #[inline]
    fn tick(&mut self) -> Result<(), SolverFailure> {
        Ok(())
    }
}

/// Allows a fixed number of expansions.
#[derive(Copy, Clone, Debug)]
pub struct NodeBudget {
    remaining: u64,
}

impl NodeBudget {
    /// A budget of `expansions` ticks.
    pub fn new(expansions: u64) -> Self {
        Self { remaining: expansions }
    }
}

impl Budget for NodeBudget {
    fn tick(&mut self) -> Result<(), SolverFailure> {
        match self.remaining.checked_sub(1) {
            Some(remaining) => {
                self.remaining = remaining;
                Ok(())
            }
            None => Err(SolverFailure::Interrupted),
        }
    }
}

/// Allows expansions until a wall-clock instant.
#[derive(Copy, Clone, Debug)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline `limit` from now.
    pub fn after(limit: Duration) -> Self {
        Self { at: Instant::now() + limit }
    }
}

impl Budget for Deadline {
    fn tick(&mut self) -> Result<(), SolverFailure> {
        if Instant::now() >= self.at {
            Err(SolverFailure::Interrupted)
        } else {
            Ok(())
        }
    }
}

impl<B: Budget, C: Budget> Budget for (B, C) {
    fn tick(&mut self) -> Result<(), SolverFailure> {
        self.0.tick()?;
        self.1.tick()
    }
}

/// A procedure finding a satisfying, connected assignment for a [`PuzzleModel`].
///
/// Every implementation returns `Ok(Some(_))` only for a solution passing [`PuzzleModel::check`],
/// and `Ok(None)` only when no such solution exists.
pub trait Search {
    /// Search `model`, ticking `budget` once per expansion.
    fn search(&self, model: &PuzzleModel, budget: &mut dyn Budget) -> Result<Option<Solution>, SolverFailure>;
}

/// The available search strategies, interchangeable over the same model.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, VariantArray, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Strategy {
    /// SAT solving with blocking clauses for disconnected models; see [`CompleteSearch`].
    #[strum(to_string = "complete", serialize = "sat")]
    Complete,
    /// Priority-guided search over partial assignments; see [`BestFirstSearch`].
    #[strum(to_string = "best-first", serialize = "astar")]
    BestFirst,
    /// DPLL with unit propagation; see [`BacktrackingSearch`].
    #[strum(to_string = "backtracking", serialize = "dpll")]
    Backtracking,
    /// Enumeration of every bridge combination; see [`ExhaustiveSearch`]. Only for small grids.
    #[strum(to_string = "exhaustive", serialize = "bruteforce")]
    Exhaustive,
}

impl Strategy {
    /// Encode `grid` and search it without any budget.
    pub fn solve(&self, grid: &Grid) -> Result<Option<Solution>, SolverFailure> {
        self.solve_with(grid, &mut Unbounded)
    }

    /// Encode `grid` and search it under `budget`.
    pub fn solve_with(&self, grid: &Grid, budget: &mut dyn Budget) -> Result<Option<Solution>, SolverFailure> {
        let model = encode(grid);
        self.search(&model, budget)
    }
}

impl Search for Strategy {
    fn search(&self, model: &PuzzleModel, budget: &mut dyn Budget) -> Result<Option<Solution>, SolverFailure> {
        let result = match self {
            Strategy::Complete => CompleteSearch.search(model, budget),
            Strategy::BestFirst => BestFirstSearch.search(model, budget),
            Strategy::Backtracking => BacktrackingSearch.search(model, budget),
            Strategy::Exhaustive => ExhaustiveSearch.search(model, budget),
        };

        match &result {
            Ok(Some(solution)) => {
                debug_assert_eq!(model.check(solution), Ok(()));
                info!("{} found a solution with {} bridged pairs", self, solution.len());
            }
            Ok(None) => info!("{} proved the puzzle unsolvable", self),
            Err(failure) => info!("{} stopped: {}", self, failure),
        }

        result
    }
}
