use log::debug;

use crate::connectivity::is_connected;
use crate::logic::{Assignment, ClauseStatus};
use crate::model::PuzzleModel;
use crate::search::{Budget, Search, SolverFailure};
use crate::solution::Solution;

/// Tries every combination of 0, 1 or 2 bridges on every candidate edge, `3^E` in all, and returns the first one
/// satisfying every clause with connected bridges.
///
/// Cost is exponential in the number of edges; this is a reference for checking the other strategies on small grids.
#[derive(Copy, Clone, Debug, Default)]
pub struct ExhaustiveSearch;

impl Search for ExhaustiveSearch {
    fn search(&self, model: &PuzzleModel, budget: &mut dyn Budget) -> Result<Option<Solution>, SolverFailure> {
        if model.has_empty_clause() {
            return Ok(None);
        }

        // bridge count per edge, edge 0 varying fastest
        let mut counts = vec![0u8; model.edges().len()];
        let mut tried = 0u64;

        loop {
            budget.tick()?;
            tried += 1;

            let assignment = assign(model, &counts);
            debug_assert!(assignment.is_total());

            let satisfied = model.clauses()
                .iter()
                .all(|clause| assignment.status(clause) == ClauseStatus::Satisfied);
            if satisfied {
                let solution = Solution::decode(model, &assignment);
                if is_connected(model.islands(), &solution) {
                    debug!("solution found at combination {}", tried);
                    return Ok(Some(solution));
                }
            }

            if !advance(&mut counts) {
                debug!("all {} combinations tried", tried);
                return Ok(None);
            }
        }
    }
}

fn assign(model: &PuzzleModel, counts: &[u8]) -> Assignment {
    let mut assignment = Assignment::unassigned(model.var_count());
    for (edge, count) in model.edges().iter().zip(counts) {
        let vars = model.edge_vars(edge.id());
        assignment.set(vars.single.lit(*count >= 1));
        assignment.set(vars.double.lit(*count >= 2));
    }
    assignment
}

/// Step `counts` to the next combination, as a base-3 odometer. Returns `false` after the last one.
fn advance(counts: &mut [u8]) -> bool {
    for count in counts.iter_mut() {
        if *count < 2 {
            *count += 1;
            return true;
        }
        *count = 0;
    }
    false
}
