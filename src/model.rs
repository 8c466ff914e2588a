use std::fmt::{Display, Formatter};

use itertools::Itertools;
use unordered_pair::UnorderedPair;
use varisat::{Lit, Var};

use crate::location::{Coord, Location, Orientation};
use crate::logic::Clause;

/// Identity of an island: a 1-based sequence number assigned in row-major scan order.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IslandId(pub(crate) usize);

impl IslandId {
    /// The 1-based number of this island.
    pub fn get(&self) -> usize {
        self.0
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 - 1
    }
}

impl Display for IslandId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a candidate edge in [`PuzzleModel::edges`].
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeId(pub(crate) usize);

/// A numbered cell requiring an exact count of incident bridges.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Island {
    pub(crate) id: IslandId,
    pub(crate) location: Location,
    pub(crate) degree: u8,
}

impl Island {
    /// This island's number.
    pub fn id(&self) -> IslandId {
        self.id
    }

    /// Where this island sits on the grid.
    pub fn location(&self) -> Location {
        self.location
    }

    /// The number of bridges this island requires.
    pub fn degree(&self) -> u8 {
        self.degree
    }
}

/// The stretch of grid a bridge would occupy: along row (or column) `line`, from `start` to `end`, exclusive of both islands.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Span {
    /// Direction the bridge runs in.
    pub orientation: Orientation,
    /// The row of a horizontal span, the column of a vertical one.
    pub line: Coord,
    /// Position of the first endpoint along `line`.
    pub start: Coord,
    /// Position of the second endpoint along `line`; always above `start`.
    pub end: Coord,
}

impl Span {
    pub(crate) fn between(orientation: Orientation, from: Location, to: Location) -> Self {
        let (start, end) = (orientation.position_of(from), orientation.position_of(to));
        Self {
            orientation,
            line: orientation.line_of(from),
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Whether bridges along `self` and `other` would cross.
    ///
    /// Only a horizontal and a vertical span can cross, and only when each one's line lies strictly inside the other's endpoints;
    /// spans meeting at a shared island do not cross.
    pub fn crosses(&self, other: &Span) -> bool {
        let (horizontal, vertical) = match (self.orientation, other.orientation) {
            (Orientation::Horizontal, Orientation::Vertical) => (self, other),
            (Orientation::Vertical, Orientation::Horizontal) => (other, self),
            _ => return false,
        };

        (vertical.start < horizontal.line && horizontal.line < vertical.end)
            && (horizontal.start < vertical.line && vertical.line < horizontal.end)
    }

    /// The cells strictly between the two endpoints.
    pub fn interior(&self) -> impl Iterator<Item = Location> + '_ {
        (self.start + 1..self.end).map(|pos| match self.orientation {
            Orientation::Horizontal => Location(self.line, pos),
            Orientation::Vertical => Location(pos, self.line),
        })
    }
}

/// A potential bridge between two islands which see each other along a row or column.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CandidateEdge {
    pub(crate) id: EdgeId,
    // low < high
    pub(crate) low: IslandId,
    pub(crate) high: IslandId,
    pub(crate) span: Span,
}

impl CandidateEdge {
    /// Position of this edge in [`PuzzleModel::edges`].
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Both endpoints, lower id first.
    pub fn ends(&self) -> (IslandId, IslandId) {
        (self.low, self.high)
    }

    /// Both endpoints, unordered.
    pub fn pair(&self) -> UnorderedPair<IslandId> {
        UnorderedPair(self.low, self.high)
    }

    /// The cells this edge runs over.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Whether `island` is one of the endpoints.
    pub fn touches(&self, island: IslandId) -> bool {
        self.low == island || self.high == island
    }
}

/// The two decision variables owned by an edge.
/// `single` holds when at least one bridge is present, `double` when a second, parallel bridge is also present.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EdgeVars {
    /// At least one bridge.
    pub single: Var,
    /// Two bridges.
    pub double: Var,
}

impl EdgeVars {
    /// Edge `k` owns variables `2k` and `2k + 1`.
    pub(crate) fn of(edge: EdgeId) -> Self {
        Self {
            single: Var::from_index(2 * edge.0),
            double: Var::from_index(2 * edge.0 + 1),
        }
    }

    pub(crate) fn lits(&self) -> [Lit; 2] {
        [self.single.positive(), self.double.positive()]
    }
}

/// The logical model of one grid: islands, candidate edges and the clauses over their variables.
///
/// Everything is stored in dense arenas indexed by [`IslandId`], [`EdgeId`] and [`Var`] index.
/// Built once by [`encode`](crate::encoder::encode) and only read afterward.
#[derive(Clone, Debug)]
pub struct PuzzleModel {
    pub(crate) islands: Vec<Island>,
    pub(crate) edges: Vec<CandidateEdge>,
    // island index -> incident edges, in edge order
    pub(crate) incident: Vec<Vec<EdgeId>>,
    pub(crate) clauses: Vec<Clause>,
}

impl PuzzleModel {
    /// Every island, in [`IslandId`] order.
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// The island numbered `id`. Panics if there is none.
    pub fn island(&self, id: IslandId) -> &Island {
        &self.islands[id.index()]
    }

    /// Every candidate edge, in [`EdgeId`] order.
    pub fn edges(&self) -> &[CandidateEdge] {
        &self.edges
    }

    /// The edge at `id`. Panics if there is none.
    pub fn edge(&self, id: EdgeId) -> &CandidateEdge {
        &self.edges[id.0]
    }

    /// The edge joining `a` and `b`, if one is a candidate.
    pub fn edge_between(&self, a: IslandId, b: IslandId) -> Option<&CandidateEdge> {
        let pair = UnorderedPair(a, b);
        self.incident.get(a.index())?
            .iter()
            .map(|edge| self.edge(*edge))
            .find(|edge| edge.pair() == pair)
    }

    /// Edges with `island` as an endpoint, in edge order.
    pub fn incident(&self, island: IslandId) -> &[EdgeId] {
        &self.incident[island.index()]
    }

    /// The variables owned by `edge`.
    pub fn edge_vars(&self, edge: EdgeId) -> EdgeVars {
        EdgeVars::of(edge)
    }

    /// The CNF formula: implication, degree and crossing clauses, in that order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Number of variables; every one of them is a decision variable owned by some edge.
    pub fn var_count(&self) -> usize {
        2 * self.edges.len()
    }

    /// Whether some clause can never be satisfied, i.e. an island has nowhere to put its bridges.
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|clause| clause.is_empty())
    }

    /// Decision variables ordered most-constrained-first: by descending number of clause occurrences, ties by ascending index.
    pub fn decision_order(&self) -> Vec<Var> {
        let mut frequency = vec![0usize; self.var_count()];
        for lit in self.clauses.iter().flatten() {
            frequency[lit.var().index()] += 1;
        }

        (0..self.var_count())
            .sorted_by_key(|index| std::cmp::Reverse(frequency[*index]))
            .map(Var::from_index)
            .collect_vec()
    }
}
