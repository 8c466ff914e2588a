use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;

use crate::model::{Island, IslandId};
use crate::solution::{Bridges, Solution};

/// Whether the bridges of `solution` join every island in `islands` into a single group.
/// No islands at all counts as connected.
pub fn is_connected(islands: &[Island], solution: &Solution) -> bool {
    let Some(start) = islands.first() else {
        return true;
    };

    let mut graph: UnGraphMap<IslandId, Bridges> = UnGraphMap::with_capacity(islands.len(), solution.len());
    for island in islands {
        graph.add_node(island.id());
    }
    for ((a, b), bridges) in solution.iter() {
        graph.add_edge(a, b, bridges);
    }

    let mut visited = 0;
    let mut dfs = Dfs::new(&graph, start.id());
    while dfs.next(&graph).is_some() {
        visited += 1;
    }

    visited == islands.len()
}
