use crate::{adjacency::Adjacency, geom::Point, grid::Grid};

use fnv::FnvHashSet;
use petgraph::{graph::NodeIndex, visit::Bfs};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which rooms can be reached from the seed room by following recorded connections.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct ConnectivityReport {
    pub num_rooms: usize,
    /// Room indices in breadth-first order from the seed room.
    pub reached: Vec<usize>,
}

impl ConnectivityReport {
    pub fn is_complete(&self) -> bool {
        self.reached.len() == self.num_rooms
    }

    pub fn unreached(&self) -> Vec<usize> {
        let reached: FnvHashSet<_> = self.reached.iter().copied().collect();

        (0..self.num_rooms).filter(|i| !reached.contains(i)).collect()
    }
}

/// Breadth-first search over the room graph.
pub fn room_connectivity(
    adjacency: &Adjacency,
    num_rooms: usize,
    start: usize,
) -> ConnectivityReport {
    let mut reached = Vec::new();
    if start < num_rooms {
        let graph = adjacency.to_graph(num_rooms);
        let mut bfs = Bfs::new(&graph, NodeIndex::new(start));
        while let Some(n) = bfs.next(&graph) {
            reached.push(graph[n]);
        }
    }

    ConnectivityReport { num_rooms, reached }
}

/// Every cell reachable from `from` by orthogonal steps over passable tiles. Doors count as
/// passable.
pub fn walkable_region(grid: &Grid, from: Point) -> FnvHashSet<Point> {
    let mut seen = FnvHashSet::default();
    if !grid.get(from).map_or(false, |t| t.is_passable()) {
        return seen;
    }

    let mut queue = VecDeque::new();
    seen.insert(from);
    queue.push_back(from);
    while let Some(p) = queue.pop_front() {
        for (dv, dh) in [(-1, 0), (1, 0), (0, -1), (0, 1)].iter() {
            let next = p.offset(*dv, *dh);
            if grid.get(next).map_or(false, |t| t.is_passable()) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    seen
}

/// Indices of the rooms with at least one interior cell reachable on foot from `from`.
pub fn rooms_reachable_on_foot(grid: &Grid, from: Point) -> Vec<usize> {
    let region = walkable_region(grid, from);

    grid.rooms()
        .iter()
        .enumerate()
        .filter(|(_, room)| room.shrink(1).points().any(|p| region.contains(&p)))
        .map(|(i, _)| i)
        .collect()
}
