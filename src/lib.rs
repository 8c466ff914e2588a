#![warn(missing_docs)]

//! # `hashi`
//!
//! A solver for [Hashiwokakero](https://en.wikipedia.org/wiki/Hashiwokakero), also known as Bridges.
//! Begin with a [`Grid`], either loaded from a file with [`Grid::load`] or parsed from text, then call [`solve()`] with a [`Strategy`].
//! A solved puzzle comes back as a [`Solution`], which [`render()`](render::render) lays out over the grid again.
//!
//! # Internals
//! The puzzle is expressed as a Boolean satisfiability problem (a "SAT").
//! Islands are the numbered cells; a "candidate edge" joins two islands which see each other along a row or column.
//! Every candidate edge E gets two variables: E carries at least one bridge, and E carries a second bridge.
//!
//! We make the following assertions in SAT form:
//! 1. A second bridge implies a first one.
//! 2. The variables of the edges around an island add up to exactly the island's number. A double bridge sets both of its variables and so counts twice.
//! 3. Two edges whose bridges would cross never both carry a bridge.
//!
//! The remaining rule, that all islands end up connected, has no small CNF form.
//! Every strategy instead checks connectivity on each assignment satisfying the clauses and keeps searching past disconnected ones.
//!
//! Four interchangeable strategies search the same model:
//! - [`CompleteSearch`](search::CompleteSearch) hands the clauses to a complete SAT solver and blocks disconnected models until a connected one appears.
//! - [`BestFirstSearch`](search::BestFirstSearch) expands partial assignments by fewest open clauses, deepest first.
//! - [`BacktrackingSearch`](search::BacktrackingSearch) is DPLL with unit propagation.
//! - [`ExhaustiveSearch`](search::ExhaustiveSearch) enumerates every bridge combination, for checking the others on small grids.
//!
//! Searches are single-threaded and share nothing, so separate puzzles may be solved in parallel freely.
//! Each search consults a [`Budget`](search::Budget) at every node expansion, which lets callers bound time or effort.

pub use connectivity::is_connected;
pub use encoder::encode;
pub use grid::{Grid, GridError, MAX_DEGREE};
pub use location::{Location, Orientation};
pub use model::{CandidateEdge, EdgeId, EdgeVars, Island, IslandId, PuzzleModel, Span};
pub use search::{Search, SolverFailure, Strategy};
pub use solution::{Bridges, Solution, Violation};

pub(crate) mod connectivity;
pub(crate) mod encoder;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod model;
pub mod render;
pub mod search;
pub(crate) mod solution;
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;

/// Solve `grid` with `strategy`, without any limit on effort.
///
/// Returns `Ok(None)` when the puzzle has no solution.
pub fn solve(grid: &Grid, strategy: Strategy) -> Result<Option<Solution>, SolverFailure> {
    strategy.solve(grid)
}
