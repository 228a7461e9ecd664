use arrayvec::ArrayVec;
use rand::Rng;

use crate::queue::{BucketQueue, Error};

/// Maximum out-degree of a graph node.
pub const MAX_DEGREE: usize = 8;

#[derive(Debug, Clone, Copy)]
struct Edge {
    to: u32,
    weight: u32,
}

/// A directed graph with small integer edge weights and bounded out-degree,
/// the workload bucket queues are built for: shortest paths run Dial's
/// variant of Dijkstra, with one queue bucket per candidate distance.
pub struct Graph {
    adjacency: Vec<ArrayVec<Edge, MAX_DEGREE>>,
    max_weight: u32,
}

impl Graph {
    /// Generate a random graph where every node gets up to [`MAX_DEGREE`]
    /// outgoing edges with weights in `1..=max_weight`.
    pub fn random(num_nodes: usize, max_weight: u32, rng: &mut impl Rng) -> Self {
        assert!(max_weight >= 1, "edge weights must be positive");

        let mut adjacency = Vec::with_capacity(num_nodes);
        for _ in 0..num_nodes {
            let mut edges = ArrayVec::new();
            for _ in 0..rng.gen_range(0..=MAX_DEGREE) {
                edges.push(Edge {
                    to: rng.gen_range(0..num_nodes as u32),
                    weight: rng.gen_range(1..=max_weight),
                });
            }
            adjacency.push(edges);
        }

        Graph {
            adjacency,
            max_weight,
        }
    }

    /// Build a graph from explicit `(from, to, weight)` edges. Weights must
    /// be positive and no node may exceed [`MAX_DEGREE`] outgoing edges.
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32, u32)]) -> Self {
        let mut adjacency: Vec<ArrayVec<Edge, MAX_DEGREE>> =
            (0..num_nodes).map(|_| ArrayVec::new()).collect();
        let mut max_weight = 1;
        for &(from, to, weight) in edges {
            assert!(weight >= 1, "edge weights must be positive");
            adjacency[from as usize].push(Edge { to, weight });
            max_weight = max_weight.max(weight);
        }
        Graph {
            adjacency,
            max_weight,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Single-source shortest path distances via Dial's algorithm.
    ///
    /// Every reachable distance fits in `0..=(n-1) * max_weight`, so the
    /// queue gets one bucket per candidate distance. A node enters a given
    /// distance bucket at most once (relaxations are strict improvements),
    /// so a per-bucket capacity of `n` can never overflow. Stale queue
    /// entries left behind by later improvements are skipped on pop.
    ///
    /// Unreachable nodes come back as `None`.
    pub fn shortest_paths(&self, source: u32) -> Result<Vec<Option<u32>>, Error> {
        let n = self.adjacency.len();
        assert!((source as usize) < n, "source node out of range");

        let horizon = (n - 1) * self.max_weight as usize + 1;
        let mut queue = BucketQueue::uniform(horizon, n)?;
        let mut dist: Vec<Option<u32>> = vec![None; n];

        dist[source as usize] = Some(0);
        queue.insert(source, 0)?;

        while let Some(d) = queue.min_priority() {
            let Some(node) = queue.pop_min() else { break };
            if dist[node as usize] != Some(d as u32) {
                // Stale entry; this node was re-queued at a lower distance.
                continue;
            }
            for edge in &self.adjacency[node as usize] {
                let next = d as u32 + edge.weight;
                if dist[edge.to as usize].map_or(true, |cur| next < cur) {
                    dist[edge.to as usize] = Some(next);
                    queue.insert(edge.to, next as usize)?;
                }
            }
        }

        Ok(dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    /// Reference Dijkstra over a binary heap.
    fn dijkstra_reference(graph: &Graph, source: u32) -> Vec<Option<u32>> {
        let n = graph.num_nodes();
        let mut dist: Vec<Option<u32>> = vec![None; n];
        let mut heap = BinaryHeap::new();
        dist[source as usize] = Some(0);
        heap.push(Reverse((0u32, source)));

        while let Some(Reverse((d, node))) = heap.pop() {
            if dist[node as usize] != Some(d) {
                continue;
            }
            for edge in &graph.adjacency[node as usize] {
                let next = d + edge.weight;
                if dist[edge.to as usize].map_or(true, |cur| next < cur) {
                    dist[edge.to as usize] = Some(next);
                    heap.push(Reverse((next, edge.to)));
                }
            }
        }

        dist
    }

    #[test]
    fn test_fixed_graph() {
        // 0 -> 1 (cost 4), 0 -> 2 (cost 1), 2 -> 1 (cost 2), 1 -> 3 (cost 1).
        // Node 4 is unreachable.
        let graph = Graph::from_edges(5, &[(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 1)]);
        let dist = graph.shortest_paths(0).unwrap();
        assert_eq!(dist, vec![Some(0), Some(3), Some(1), Some(4), None]);
    }

    #[test]
    fn test_single_node() {
        let graph = Graph::from_edges(1, &[]);
        assert_eq!(graph.shortest_paths(0).unwrap(), vec![Some(0)]);
    }

    #[test]
    fn test_self_loop_and_parallel_edges() {
        let graph = Graph::from_edges(2, &[(0, 0, 1), (0, 1, 5), (0, 1, 3)]);
        let dist = graph.shortest_paths(0).unwrap();
        assert_eq!(dist, vec![Some(0), Some(3)]);
    }

    #[test]
    fn test_random_graphs_match_reference() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xd1a7);
        for _ in 0..20 {
            let num_nodes = rng.gen_range(1..200);
            let max_weight = rng.gen_range(1..10);
            let graph = Graph::random(num_nodes, max_weight, &mut rng);
            let source = rng.gen_range(0..num_nodes as u32);

            let dial = graph.shortest_paths(source).unwrap();
            let reference = dijkstra_reference(&graph, source);
            assert_eq!(dial, reference);
        }
    }
}
