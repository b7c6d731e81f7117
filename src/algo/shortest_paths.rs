//! Single-source shortest paths with Dijkstra's algorithm.
//!
//! Arc weights are message counts, so distances are sums of counts along a
//! path. The same core loop serves bounded queries, which never enqueue a
//! node farther than a maximum distance, and unbounded queries with
//! predecessor tracking for path reconstruction.

use crate::graph::{Weight, WeightedGraph};
use nonmax::NonMaxUsize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use sux::bits::BitVec;

/// A reusable Dijkstra visit.
///
/// The frontier is a min-priority queue ordered by distance and then by
/// insertion sequence, so ties are resolved in the same way on every run. A
/// node may be pushed several times before being settled: stale entries are
/// discarded when popped.
///
/// State is reset lazily, touching only the nodes reached by the previous
/// run, so running from many sources on a large graph costs time
/// proportional to the reached part only.
///
/// # Examples
///
/// ```
/// use mailgraph_algo::algo::shortest_paths::Dijkstra;
/// use mailgraph_algo::graph::CsrGraph;
///
/// let graph = CsrGraph::from_arcs(4, [(0, 1, 2), (1, 2, 3), (0, 2, 7), (2, 3, 1)]);
/// let mut dijkstra = Dijkstra::new(&graph);
/// dijkstra.run(0, None);
/// assert_eq!(dijkstra.distance(2), Some(5));
/// assert_eq!(dijkstra.path_to(3), Some(vec![0, 1, 2, 3]));
/// ```
pub struct Dijkstra<G: WeightedGraph> {
    graph: G,
    /// Best distance found so far; final for settled nodes.
    distances: Box<[Option<Weight>]>,
    /// The node from which the best distance was obtained.
    preds: Box<[Option<NonMaxUsize>]>,
    settled: BitVec,
    /// Entries are (distance, insertion sequence, node).
    queue: BinaryHeap<Reverse<(Weight, u64, usize)>>,
    seq: u64,
    /// Nodes with a distance, in order of first discovery.
    touched: Vec<usize>,
    /// Settled nodes, in order of settlement.
    order: Vec<usize>,
}

impl<G: WeightedGraph> Dijkstra<G> {
    pub fn new(graph: G) -> Self {
        let num_nodes = graph.num_nodes();
        Self {
            graph,
            distances: vec![None; num_nodes].into_boxed_slice(),
            preds: vec![None; num_nodes].into_boxed_slice(),
            settled: BitVec::new(num_nodes),
            queue: BinaryHeap::new(),
            seq: 0,
            touched: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Clears the state left by the previous run.
    pub fn reset(&mut self) {
        for &node in &self.touched {
            self.distances[node] = None;
            self.preds[node] = None;
            self.settled.set(node, false);
        }
        self.touched.clear();
        self.order.clear();
        self.queue.clear();
        self.seq = 0;
    }

    /// Computes shortest paths from `root`.
    ///
    /// If `max_distance` is not [`None`], candidates farther than
    /// `max_distance` are discarded during relaxation, so the frontier
    /// empties once every node within `max_distance` is settled, and only
    /// those nodes are.
    ///
    /// # Panics
    ///
    /// If `root` is not a node, or if a distance overflows in an unbounded
    /// run.
    pub fn run(&mut self, root: usize, max_distance: Option<Weight>) {
        assert!(
            root < self.graph.num_nodes(),
            "node {root} out of bounds for {} nodes",
            self.graph.num_nodes()
        );
        self.reset();

        self.distances[root] = Some(0);
        self.touched.push(root);
        self.queue.push(Reverse((0, 0, root)));
        self.seq = 1;

        while let Some(Reverse((distance, _, node))) = self.queue.pop() {
            if self.settled.get(node) {
                continue;
            }

            self.settled.set(node, true);
            self.order.push(node);

            for (succ, weight) in self.graph.successors(node) {
                debug_assert!(weight > 0, "arc ({node}, {succ}) has zero weight");
                let candidate = match (distance.checked_add(weight), max_distance) {
                    (Some(candidate), Some(max)) if candidate > max => continue,
                    (Some(candidate), _) => candidate,
                    // Beyond any bound
                    (None, Some(_)) => continue,
                    (None, None) => panic!("distance overflow relaxing ({node}, {succ})"),
                };
                match self.distances[succ] {
                    Some(current) if current <= candidate => {}
                    previous => {
                        if previous.is_none() {
                            self.touched.push(succ);
                        }
                        self.distances[succ] = Some(candidate);
                        self.preds[succ] = NonMaxUsize::new(node);
                        self.queue.push(Reverse((candidate, self.seq, succ)));
                        self.seq += 1;
                    }
                }
            }
        }
    }

    /// Returns the distance of `node` from the root of the last run, or
    /// [`None`] if `node` was not settled.
    pub fn distance(&self, node: usize) -> Option<Weight> {
        if self.settled.get(node) {
            self.distances[node]
        } else {
            None
        }
    }

    /// Returns the predecessor of `node` on its shortest path, or [`None`]
    /// for the root and for nodes that were not settled.
    pub fn pred(&self, node: usize) -> Option<usize> {
        if self.settled.get(node) {
            self.preds[node].map(usize::from)
        } else {
            None
        }
    }

    /// Returns the settled nodes, in order of settlement, that is, by
    /// non-decreasing distance.
    pub fn settled(&self) -> &[usize] {
        &self.order
    }

    /// Returns a shortest path from the root of the last run to `node`,
    /// both included, or [`None`] if `node` was not settled.
    pub fn path_to(&self, node: usize) -> Option<Vec<usize>> {
        self.distance(node)?;
        let mut path = vec![node];
        let mut curr = node;
        while let Some(pred) = self.pred(curr) {
            path.push(pred);
            curr = pred;
        }
        path.reverse();
        Some(path)
    }
}

/// The outcome of an unbounded single-source shortest-path computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    root: usize,
    distances: Box<[Option<Weight>]>,
    preds: Box<[Option<NonMaxUsize>]>,
}

impl ShortestPaths {
    /// Returns the source of the paths.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Returns the distance of `node` from the root, or [`None`] if `node`
    /// is unreachable.
    pub fn distance(&self, node: usize) -> Option<Weight> {
        self.distances[node]
    }

    /// Returns the distance of every node from the root.
    pub fn distances(&self) -> &[Option<Weight>] {
        &self.distances
    }

    /// Returns a shortest path from the root to `node`, both included, or
    /// [`None`] if `node` is unreachable.
    pub fn path_to(&self, node: usize) -> Option<Vec<usize>> {
        self.distances[node]?;
        let mut path = vec![node];
        let mut curr = node;
        while let Some(pred) = self.preds[curr] {
            curr = pred.into();
            path.push(curr);
        }
        path.reverse();
        Some(path)
    }

    /// Returns the number of nodes reachable from the root, root included.
    pub fn num_reachable(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }
}

/// Returns the nodes at distance at most `max_distance` from `root`, with
/// their distance, in order of settlement.
///
/// # Panics
///
/// If `root` is not a node of `graph`.
pub fn shortest_paths_within(
    graph: impl WeightedGraph,
    root: usize,
    max_distance: Weight,
) -> Vec<(usize, Weight)> {
    let mut dijkstra = Dijkstra::new(graph);
    dijkstra.run(root, Some(max_distance));
    dijkstra
        .settled()
        .iter()
        .map(|&node| (node, dijkstra.distances[node].unwrap_or_default()))
        .collect()
}

/// Computes the shortest paths from `root` to all nodes of `graph`.
///
/// # Panics
///
/// If `root` is not a node of `graph`.
pub fn shortest_paths_from(graph: impl WeightedGraph, root: usize) -> ShortestPaths {
    let mut dijkstra = Dijkstra::new(graph);
    dijkstra.run(root, None);
    // Without a bound every node with a distance is settled
    ShortestPaths {
        root,
        distances: dijkstra.distances,
        preds: dijkstra.preds,
    }
}
