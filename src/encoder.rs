use std::collections::HashSet;

use itertools::Itertools;
use log::debug;
use ndarray::Array2;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::grid::Grid;
use crate::location::{Location, Orientation};
use crate::logic::{exactly, Clause};
use crate::model::{CandidateEdge, EdgeId, EdgeVars, Island, IslandId, PuzzleModel, Span};

/// Translate `grid` into its [`PuzzleModel`]: islands, candidate edges and every degree, implication and crossing clause.
///
/// # Logical setup
/// Every candidate edge E owns two variables, `single(E)` and `double(E)`.
/// A double bridge is also a single bridge, so `double(E) => single(E)`, i.e. `!double(E) + single(E)`.
///
/// Every island I with degree d has exactly d of the variables of its incident edges true;
/// counting both variables of each edge makes a double bridge count twice.
/// An island with no incident edges at all gets the empty clause, which nothing satisfies.
///
/// Two edges whose spans cross may not both carry a bridge: `!single(E1) + !single(E2)`.
///
/// Connectivity is not part of the clause set; strategies check it on each candidate solution.
pub fn encode(grid: &Grid) -> PuzzleModel {
    let islands = find_islands(grid);
    let edges = find_edges(grid, &islands);

    let mut incident = vec![Vec::new(); islands.len()];
    for edge in &edges {
        incident[edge.low.index()].push(edge.id);
        incident[edge.high.index()].push(edge.id);
    }

    let mut clauses: Vec<Clause> = Vec::new();

    // double => single
    clauses.extend(edges.iter().map(|edge| {
        let vars = EdgeVars::of(edge.id);
        vec![vars.double.negative(), vars.single.positive()]
    }));

    for island in &islands {
        let lits = incident[island.id.index()].iter()
            .flat_map(|edge| EdgeVars::of(*edge).lits())
            .collect_vec();

        if lits.is_empty() {
            debug!("island {} at {:?} has no candidate edges", island.id, island.location);
            clauses.push(Vec::new());
            continue;
        }

        clauses.extend(exactly(usize::from(island.degree), &lits));
    }

    let crossings = edges.iter()
        .tuple_combinations()
        .filter(|(e1, e2)| e1.span.crosses(&e2.span))
        .map(|(e1, e2)| vec![EdgeVars::of(e1.id).single.negative(), EdgeVars::of(e2.id).single.negative()])
        .collect_vec();
    debug!("{} crossing edge pairs", crossings.len());
    clauses.extend(crossings);

    debug!("encoded {} islands, {} candidate edges, {} clauses", islands.len(), edges.len(), clauses.len());

    PuzzleModel {
        islands,
        edges,
        incident,
        clauses,
    }
}

fn find_islands(grid: &Grid) -> Vec<Island> {
    // indexed_iter walks in logical (row-major) order
    grid.cells()
        .indexed_iter()
        .filter(|(_, value)| **value != 0)
        .enumerate()
        .map(|(index, (location, value))| Island {
            id: IslandId(index + 1),
            location: Location::from(location),
            degree: *value,
        })
        .collect_vec()
}

fn find_edges(grid: &Grid, islands: &[Island]) -> Vec<CandidateEdge> {
    let mut id_at = Array2::<Option<IslandId>>::from_elem(grid.cells().raw_dim(), None);
    for island in islands {
        id_at[island.location.as_index()] = Some(island.id);
    }

    let mut seen: HashSet<UnorderedPair<IslandId>> = HashSet::new();
    let mut edges = Vec::new();

    for island in islands {
        for orientation in Orientation::VARIANTS {
            let Some(neighbor) = nearest_island(grid, island.location, *orientation) else {
                continue;
            };

            let Some(other) = id_at[neighbor.as_index()] else {
                continue;
            };

            let pair = UnorderedPair(island.id, other);
            if !seen.insert(pair) {
                continue;
            }

            edges.push(CandidateEdge {
                id: EdgeId(edges.len()),
                low: island.id.min(other),
                high: island.id.max(other),
                span: Span::between(*orientation, island.location, neighbor),
            });
        }
    }

    edges
}

/// The first island past `from` along `orientation`, provided it is not directly adjacent.
/// The first island found ends the scan either way.
fn nearest_island(grid: &Grid, from: Location, orientation: Orientation) -> Option<Location> {
    let mut distance = 0;
    let mut location = from;

    loop {
        location = location.step(orientation);
        distance += 1;

        match grid.get(location)? {
            0 => continue,
            _ if distance <= 1 => return None,
            _ => return Some(location),
        }
    }
}
