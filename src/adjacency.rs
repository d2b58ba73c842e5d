use fnv::{FnvHashMap, FnvHashSet};
use petgraph::graph::{NodeIndex, UnGraph};

/// Which rooms have a corridor between them, by room index. Always symmetric.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    map: FnvHashMap<usize, FnvHashSet<usize>>,
}

impl Adjacency {
    pub fn new() -> Self {
        Adjacency {
            map: FnvHashMap::default(),
        }
    }

    /// Every index in `0..num_rooms` starts with no neighbors.
    pub fn with_rooms(num_rooms: usize) -> Self {
        Adjacency {
            map: (0..num_rooms).map(|i| (i, FnvHashSet::default())).collect(),
        }
    }

    pub fn insert(&mut self, i1: usize, i2: usize) {
        self.map.entry(i1).or_default().insert(i2);
        self.map.entry(i2).or_default().insert(i1);
    }

    pub fn contains(&self, i1: usize, i2: usize) -> bool {
        self.map.get(&i1).map_or(false, |n| n.contains(&i2))
    }

    /// Sorted, so callers iterate deterministically.
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        let mut neighbors: Vec<_> = self
            .map
            .get(&i)
            .map(|n| n.iter().copied().collect())
            .unwrap_or_default();
        neighbors.sort_unstable();

        neighbors
    }

    pub fn num_edges(&self) -> usize {
        self.map.values().map(|n| n.len()).sum::<usize>() / 2
    }

    /// Node `i` of the returned graph is room `i`.
    pub fn to_graph(&self, num_rooms: usize) -> UnGraph<usize, ()> {
        let mut graph = UnGraph::with_capacity(num_rooms, self.num_edges());
        for i in 0..num_rooms {
            graph.add_node(i);
        }
        for i in 0..num_rooms {
            for j in self.neighbors(i) {
                if i < j && j < num_rooms {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
                }
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_symmetric() {
        let mut adj = Adjacency::with_rooms(3);
        adj.insert(0, 2);
        assert!(adj.contains(0, 2));
        assert!(adj.contains(2, 0));
        assert!(!adj.contains(0, 1));
        assert_eq!(adj.neighbors(2), vec![0]);
        assert_eq!(adj.neighbors(1), Vec::<usize>::new());
        assert_eq!(adj.num_edges(), 1);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut adj = Adjacency::new();
        adj.insert(1, 0);
        adj.insert(0, 1);
        assert_eq!(adj.num_edges(), 1);
    }

    #[test]
    fn test_to_graph() {
        let mut adj = Adjacency::with_rooms(4);
        adj.insert(0, 1);
        adj.insert(1, 3);
        let graph = adj.to_graph(4);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph[NodeIndex::new(3)], 3);
    }
}
