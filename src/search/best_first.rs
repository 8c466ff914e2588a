use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::debug;

use crate::connectivity::is_connected;
use crate::logic::Assignment;
use crate::model::PuzzleModel;
use crate::search::{Budget, Search, SolverFailure};
use crate::solution::Solution;

/// Best-first search over partial assignments.
///
/// A state is keyed by `(h, g)`: `h` is the number of clauses not yet satisfied and `g` the number of assigned variables.
/// The state with the smallest `h` is expanded first, and among those the deepest, which makes the search behave like a
/// depth-first search steered by constraint progress. `h` is not a lower bound on anything, so there is no optimality here,
/// only the first connected solution found.
///
/// Expansion branches on the next unassigned variable of the fixed [`decision_order`](PuzzleModel::decision_order),
/// `true` first. Children which falsify a clause are pruned.
/// Every queued state owns its assignment, so memory grows with the frontier.
#[derive(Copy, Clone, Debug, Default)]
pub struct BestFirstSearch;

struct State {
    unsatisfied: usize,
    assignment: Assignment,
    // insertion order breaks remaining ties, earlier first
    seq: u64,
}

impl State {
    fn key(&self) -> (Reverse<usize>, usize, Reverse<u64>) {
        (Reverse(self.unsatisfied), self.assignment.depth(), Reverse(self.seq))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    // BinaryHeap pops the greatest
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Search for BestFirstSearch {
    fn search(&self, model: &PuzzleModel, budget: &mut dyn Budget) -> Result<Option<Solution>, SolverFailure> {
        let order = model.decision_order();
        let root = Assignment::unassigned(model.var_count());

        let Some(unsatisfied) = root.unsatisfied_count(model.clauses()) else {
            return Ok(None);
        };

        let mut seq = 0u64;
        let mut frontier = BinaryHeap::new();
        frontier.push(State { unsatisfied, assignment: root, seq });

        let mut expanded = 0usize;
        while let Some(State { unsatisfied, assignment, .. }) = frontier.pop() {
            budget.tick()?;
            expanded += 1;

            let Some(var) = order.iter().copied().find(|var| assignment.value(*var).is_none()) else {
                // every decision variable assigned
                if unsatisfied == 0 {
                    let solution = Solution::decode(model, &assignment);
                    if is_connected(model.islands(), &solution) {
                        debug!("goal reached after {} expansions", expanded);
                        return Ok(Some(solution));
                    }
                }
                continue;
            };

            for value in [true, false] {
                let mut child = assignment.clone();
                child.set(var.lit(value));

                if let Some(unsatisfied) = child.unsatisfied_count(model.clauses()) {
                    seq += 1;
                    frontier.push(State { unsatisfied, assignment: child, seq });
                }
            }
        }

        debug!("frontier exhausted after {} expansions", expanded);
        Ok(None)
    }
}
