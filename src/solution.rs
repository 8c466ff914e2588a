use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::connectivity::is_connected;
use crate::logic::Assignment;
use crate::model::{EdgeId, IslandId, PuzzleModel};

/// How many bridges an edge carries, when it carries any.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Bridges {
    /// One bridge.
    Single = 1,
    /// Two parallel bridges.
    Double = 2,
}

impl Bridges {
    /// The number of bridges.
    pub fn count(&self) -> u8 {
        *self as u8
    }
}

/// A solved puzzle: the number of bridges between each pair of islands.
/// A pair absent from the solution has no bridge.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Solution {
    bridges: HashMap<UnorderedPair<IslandId>, Bridges>,
}

impl Solution {
    /// Read the bridges off a satisfying assignment. Unassigned variables count as false.
    pub(crate) fn decode(model: &PuzzleModel, assignment: &Assignment) -> Self {
        let mut bridges = HashMap::new();

        for edge in model.edges() {
            let vars = model.edge_vars(edge.id());
            let single = assignment.value(vars.single).unwrap_or(false);
            let double = assignment.value(vars.double).unwrap_or(false);
            debug_assert!(single || !double, "double bridge without a single bridge on {:?}", edge.ends());

            if single {
                bridges.insert(edge.pair(), if double { Bridges::Double } else { Bridges::Single });
            }
        }

        Self { bridges }
    }

    /// Bridges between `a` and `b`, in either order.
    pub fn bridges(&self, a: IslandId, b: IslandId) -> Option<Bridges> {
        self.bridges.get(&UnorderedPair(a, b)).copied()
    }

    /// Every bridged pair, lower id first, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ((IslandId, IslandId), Bridges)> + '_ {
        self.bridges.iter()
            .map(|(UnorderedPair(a, b), bridges)| (((*a).min(*b), (*a).max(*b)), *bridges))
            .sorted()
    }

    /// Number of bridged pairs.
    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    /// Whether no pair is bridged.
    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }

    /// Total bridge count incident to `island`.
    pub fn degree_of(&self, island: IslandId) -> usize {
        self.bridges.iter()
            .filter(|(UnorderedPair(a, b), _)| *a == island || *b == island)
            .map(|(_, bridges)| usize::from(bridges.count()))
            .sum()
    }
}

impl FromIterator<((IslandId, IslandId), Bridges)> for Solution {
    fn from_iter<T: IntoIterator<Item = ((IslandId, IslandId), Bridges)>>(iter: T) -> Self {
        Self {
            bridges: iter.into_iter()
                .map(|(pair, bridges)| (UnorderedPair::from(pair), bridges))
                .collect(),
        }
    }
}

/// Ways a [`Solution`] can break the rules of its puzzle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    /// A bridged pair is not a candidate edge of the puzzle.
    UnknownEdge(IslandId, IslandId),
    /// An island's bridges do not add up to its number.
    Degree {
        /// The island at fault.
        island: IslandId,
        /// Its number.
        expected: u8,
        /// Bridges actually incident to it.
        found: usize,
    },
    /// Two bridged edges cross.
    Crossing(EdgeId, EdgeId),
    /// The bridges do not join all islands into one group.
    Disconnected,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::UnknownEdge(a, b) => write!(f, "islands {} and {} cannot be bridged", a, b),
            Violation::Degree { island, expected, found } =>
                write!(f, "island {} needs {} bridges but has {}", island, expected, found),
            Violation::Crossing(e1, e2) => write!(f, "edges {:?} and {:?} cross", e1, e2),
            Violation::Disconnected => write!(f, "islands are not all connected"),
        }
    }
}

impl std::error::Error for Violation {}

impl PuzzleModel {
    /// Check `solution` against every rule of this puzzle: bridges only on candidate edges, exact degrees, no crossings, connectivity.
    pub fn check(&self, solution: &Solution) -> Result<(), Violation> {
        let mut bridged = Vec::with_capacity(solution.len());
        for ((a, b), _) in solution.iter() {
            match self.edge_between(a, b) {
                Some(edge) => bridged.push(edge),
                None => return Err(Violation::UnknownEdge(a, b)),
            }
        }

        for island in self.islands() {
            let found = solution.degree_of(island.id());
            if found != usize::from(island.degree()) {
                return Err(Violation::Degree { island: island.id(), expected: island.degree(), found });
            }
        }

        if let Some((e1, e2)) = bridged.iter()
            .tuple_combinations()
            .find(|(e1, e2)| e1.span().crosses(&e2.span())) {
            return Err(Violation::Crossing(e1.id(), e2.id()));
        }

        if !is_connected(self.islands(), solution) {
            return Err(Violation::Disconnected);
        }

        Ok(())
    }
}
