use std::rc::Rc;

use log::{debug, trace};
use varisat::Var;

use crate::connectivity::is_connected;
use crate::logic::{Assignment, ClauseStatus};
use crate::model::PuzzleModel;
use crate::search::{Budget, Search, SolverFailure};
use crate::solution::Solution;

/// DPLL: unit propagation followed by branching, `true` before `false`, with chronological backtracking.
/// No clause learning and no restarts.
///
/// A branch whose clauses all become satisfied is a leaf. The leaf's bridges must be connected, otherwise the branch fails;
/// nothing below a leaf is explored.
///
/// Frames live on an explicit stack instead of the call stack, so deep puzzles cannot overflow it.
#[derive(Copy, Clone, Debug, Default)]
pub struct BacktrackingSearch;

/// A pending branch: the clauses still open at its parent, plus the parent's assignment extended by one decision.
struct Frame {
    active: Rc<[usize]>,
    assignment: Assignment,
}

/// Why propagation stopped.
enum Propagation {
    Conflict,
    /// Clauses (by index) neither satisfied nor falsified at the fixpoint.
    Open(Vec<usize>),
}

impl Search for BacktrackingSearch {
    fn search(&self, model: &PuzzleModel, budget: &mut dyn Budget) -> Result<Option<Solution>, SolverFailure> {
        let order = model.decision_order();

        let mut stack = vec![Frame {
            active: (0..model.clauses().len()).collect(),
            assignment: Assignment::unassigned(model.var_count()),
        }];

        let mut expanded = 0usize;
        while let Some(Frame { active, mut assignment }) = stack.pop() {
            budget.tick()?;
            expanded += 1;

            let open = match propagate(model, &active, &mut assignment) {
                Propagation::Conflict => {
                    trace!("conflict at depth {}", assignment.depth());
                    continue;
                }
                Propagation::Open(open) => open,
            };

            if open.is_empty() {
                let solution = Solution::decode(model, &assignment);
                if is_connected(model.islands(), &solution) {
                    debug!("connected leaf found after {} expansions", expanded);
                    return Ok(Some(solution));
                }
                trace!("disconnected leaf at depth {}", assignment.depth());
                continue;
            }

            let Some(var) = choose(model, &order, &open, &assignment) else {
                continue;
            };

            let open: Rc<[usize]> = open.into();
            // pushed false first so true is explored first
            for value in [false, true] {
                let mut child = assignment.clone();
                child.set(var.lit(value));
                stack.push(Frame { active: Rc::clone(&open), assignment: child });
            }
        }

        debug!("search space exhausted after {} expansions", expanded);
        Ok(None)
    }
}

/// Assign the literal of every unit clause until none remain.
fn propagate(model: &PuzzleModel, active: &[usize], assignment: &mut Assignment) -> Propagation {
    let mut open = active.iter()
        .copied()
        .filter(|index| assignment.status(&model.clauses()[*index]) != ClauseStatus::Satisfied)
        .collect::<Vec<_>>();

    loop {
        let mut changed = false;
        let mut next = Vec::with_capacity(open.len());

        for index in open {
            match assignment.status(&model.clauses()[index]) {
                ClauseStatus::Satisfied => {}
                ClauseStatus::Falsified => return Propagation::Conflict,
                ClauseStatus::Unit(lit) => {
                    if !assignment.set(lit) {
                        return Propagation::Conflict;
                    }
                    changed = true;
                }
                ClauseStatus::Open => next.push(index),
            }
        }

        open = next;
        if !changed {
            return Propagation::Open(open);
        }
    }
}

/// The first unassigned variable of `order`, falling back to any unassigned variable of an open clause.
fn choose(model: &PuzzleModel, order: &[Var], open: &[usize], assignment: &Assignment) -> Option<Var> {
    order.iter()
        .copied()
        .find(|var| assignment.value(*var).is_none())
        .or_else(|| open.iter()
            .flat_map(|index| model.clauses()[*index].iter())
            .map(|lit| lit.var())
            .find(|var| assignment.value(*var).is_none()))
}
