use itertools::Itertools;
use log::{debug, trace};
use varisat::{ExtendFormula, Solver};

use crate::connectivity::is_connected;
use crate::logic::Assignment;
use crate::model::PuzzleModel;
use crate::search::{Budget, Search, SolverFailure};
use crate::solution::Solution;

/// Repeatedly asks a complete SAT solver ([`varisat`]) for a model of the clause set.
///
/// A model whose bridges are connected is the answer.
/// A disconnected one is ruled out with a blocking clause, the disjunction of the complements of its decision literals,
/// and the solver is asked again. The search ends with [`None`] when the formula becomes unsatisfiable.
#[derive(Copy, Clone, Debug, Default)]
pub struct CompleteSearch;

impl Search for CompleteSearch {
    fn search(&self, model: &PuzzleModel, budget: &mut dyn Budget) -> Result<Option<Solution>, SolverFailure> {
        if model.has_empty_clause() {
            return Ok(None);
        }

        let mut solver = Solver::new();
        for clause in model.clauses() {
            solver.add_clause(clause);
        }

        let mut rounds = 0usize;
        loop {
            budget.tick()?;
            rounds += 1;

            let satisfiable = solver.solve()
                .map_err(|err| SolverFailure::Backend(format!("{:?}", err)))?;
            if !satisfiable {
                debug!("formula unsatisfiable after {} rounds", rounds);
                return Ok(None);
            }

            let found = solver.model()
                .ok_or_else(|| SolverFailure::Backend("satisfiable formula without a model".to_string()))?;
            let assignment = Assignment::from_model(model.var_count(), &found);
            let solution = Solution::decode(model, &assignment);

            if is_connected(model.islands(), &solution) {
                debug!("connected model found in round {}", rounds);
                return Ok(Some(solution));
            }

            // every variable is a decision variable
            let blocking = found.iter()
                .filter(|lit| lit.var().index() < model.var_count())
                .map(|lit| !*lit)
                .collect_vec();
            trace!("round {}: disconnected model, blocking {} literals", rounds, blocking.len());
            solver.add_clause(&blocking);
        }
    }
}
