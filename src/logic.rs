use itertools::Itertools;
use varisat::{Lit, Var};

/// A disjunction of literals.
pub type Clause = Vec<Lit>;

/// Direct "exactly `k` of `lits`" encoding: one blocking clause for every truth combination of `lits` whose true-count is not `k`.
///
/// Exponential in `lits.len()`; islands have at most four edges, so at most eight literals reach here.
pub(crate) fn exactly(k: usize, lits: &[Lit]) -> Vec<Clause> {
    lits.iter()
        .map(|_| [false, true])
        .multi_cartesian_product()
        .filter(|bits| bits.iter().filter(|bit| **bit).count() != k)
        // a true literal in this combination appears negated, a false one as is
        .map(|bits| bits.iter()
            .zip(lits)
            .map(|(bit, lit)| if *bit { !*lit } else { *lit })
            .collect_vec())
        .collect_vec()
}

/// How a clause stands under a partial [`Assignment`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ClauseStatus {
    /// Some literal is true.
    Satisfied,
    /// No literal is true and this is the only unassigned one.
    Unit(Lit),
    /// No literal is true and at least two are unassigned.
    Open,
    /// Every literal is false.
    Falsified,
}

/// A partial truth assignment over a dense range of variables.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Assignment {
    values: Vec<Option<bool>>,
    assigned: usize,
}

impl Assignment {
    pub(crate) fn unassigned(var_count: usize) -> Self {
        Self {
            values: vec![None; var_count],
            assigned: 0,
        }
    }

    /// Take a full model from a SAT backend; variables it does not mention stay unassigned.
    pub(crate) fn from_model(var_count: usize, model: &[Lit]) -> Self {
        let mut assignment = Self::unassigned(var_count);
        for lit in model.iter().filter(|lit| lit.var().index() < var_count) {
            assignment.set(*lit);
        }
        assignment
    }

    #[inline]
    pub(crate) fn value(&self, var: Var) -> Option<bool> {
        self.values[var.index()]
    }

    #[inline]
    pub(crate) fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.value(lit.var()).map(|value| value == lit.is_positive())
    }

    /// Make `lit` true. Returns `false` if its variable already held the opposite value.
    pub(crate) fn set(&mut self, lit: Lit) -> bool {
        let slot = &mut self.values[lit.var().index()];
        match *slot {
            Some(value) => value == lit.is_positive(),
            None => {
                *slot = Some(lit.is_positive());
                self.assigned += 1;
                true
            }
        }
    }

    /// Number of assigned variables.
    pub(crate) fn depth(&self) -> usize {
        self.assigned
    }

    pub(crate) fn is_total(&self) -> bool {
        self.assigned == self.values.len()
    }

    pub(crate) fn status(&self, clause: &[Lit]) -> ClauseStatus {
        let mut last_open = None;
        let mut open = 0usize;

        for lit in clause {
            match self.lit_value(*lit) {
                Some(true) => return ClauseStatus::Satisfied,
                Some(false) => {}
                None => {
                    open += 1;
                    last_open = Some(*lit);
                }
            }
        }

        match (open, last_open) {
            (0, _) => ClauseStatus::Falsified,
            (1, Some(lit)) => ClauseStatus::Unit(lit),
            _ => ClauseStatus::Open,
        }
    }

    /// Number of clauses not yet satisfied, or [`None`] as soon as one is falsified.
    pub(crate) fn unsatisfied_count<'c>(&self, clauses: impl IntoIterator<Item = &'c Clause>) -> Option<usize> {
        let mut count = 0;
        for clause in clauses {
            match self.status(clause) {
                ClauseStatus::Satisfied => {}
                ClauseStatus::Falsified => return None,
                ClauseStatus::Unit(_) | ClauseStatus::Open => count += 1,
            }
        }
        Some(count)
    }
}
