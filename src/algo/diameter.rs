/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Weighted diameter.
//!
//! The diameter is the maximum finite shortest-path distance over all
//! ordered pairs of distinct nodes: unreachable pairs are ignored, so a
//! graph with several components reports the diameter of its widest
//! reachability relation rather than infinity.
//!
//! The computation runs [Dijkstra's algorithm](Dijkstra) from every node
//! with at least one outgoing arc, and thus requires time
//! *O*(*n*(*n* + *m*) log *n*). Among pairs at maximum distance, the witness
//! is the pair with the smallest source and then the smallest target. Since
//! the graph is immutable, runs from different sources are independent and
//! [`par_diameter`] distributes them over a thread pool, obtaining the same
//! result as [`diameter`].

use super::shortest_paths::Dijkstra;
use crate::graph::{Weight, WeightedGraph};
use dsi_progress_logger::ProgressLog;
use log::info;
use rayon::prelude::*;
use std::borrow::Borrow;

/// Number of sources assigned to each thread between progress updates.
const SOURCE_GRANULARITY: usize = 64;

/// The diameter of a graph with a witness path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diameter {
    /// The diameter, or zero if no node reaches another node.
    pub diameter: Weight,
    /// A shortest path from [`source`](Self::source) to
    /// [`target`](Self::target) of length [`diameter`](Self::diameter), or
    /// an empty path if no node reaches another node.
    pub path: Vec<usize>,
    /// The start of the witness path.
    pub source: Option<usize>,
    /// The end of the witness path.
    pub target: Option<usize>,
}

/// The farthest node from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Eccentricity {
    distance: Weight,
    source: usize,
    target: usize,
}

impl Eccentricity {
    /// Returns whether `self` is a better witness than `other`.
    fn beats(&self, other: &Self) -> bool {
        self.distance > other.distance
            || (self.distance == other.distance
                && (self.source, self.target) < (other.source, other.target))
    }
}

/// Returns the farthest node from `source` (the smallest one on ties), and
/// the path reaching it, if `source` reaches some other node.
fn farthest<G: WeightedGraph>(
    dijkstra: &mut Dijkstra<G>,
    source: usize,
) -> Option<(Eccentricity, Vec<usize>)> {
    dijkstra.run(source, None);
    let mut best: Option<Eccentricity> = None;
    for &target in dijkstra.settled() {
        if target == source {
            continue;
        }
        // Settled nodes always have a distance
        let distance = dijkstra.distance(target).unwrap_or_default();
        let candidate = Eccentricity {
            distance,
            source,
            target,
        };
        match best {
            Some(best) if !candidate.beats(&best) => {}
            _ => best = Some(candidate),
        }
    }
    let best = best?;
    Some((best, dijkstra.path_to(best.target)?))
}

/// Keeps the better of two witnesses.
fn better(
    x: Option<(Eccentricity, Vec<usize>)>,
    y: Option<(Eccentricity, Vec<usize>)>,
) -> Option<(Eccentricity, Vec<usize>)> {
    match (x, y) {
        (Some(x), Some(y)) => Some(if y.0.beats(&x.0) { y } else { x }),
        (x, None) => x,
        (None, y) => y,
    }
}

fn into_diameter(best: Option<(Eccentricity, Vec<usize>)>) -> Diameter {
    match best {
        Some((ecc, path)) => Diameter {
            diameter: ecc.distance,
            path,
            source: Some(ecc.source),
            target: Some(ecc.target),
        },
        None => Diameter::default(),
    }
}

fn sources(graph: &impl WeightedGraph) -> Vec<usize> {
    (0..graph.num_nodes())
        .filter(|&node| graph.successors(node).next().is_some())
        .collect()
}

/// Computes the diameter of `graph` sequentially.
///
/// The progress logger is updated once per source.
pub fn diameter(graph: impl WeightedGraph, pl: &mut impl ProgressLog) -> Diameter {
    let sources = sources(&graph);
    pl.item_name("source");
    pl.expected_updates(Some(sources.len()));
    pl.start("Computing diameter...");

    let mut dijkstra = Dijkstra::new(&graph);
    let mut best = None;
    for &source in &sources {
        best = better(best, farthest(&mut dijkstra, source));
        pl.update();
    }

    pl.done();
    let result = into_diameter(best);
    info!("Diameter: {}", result.diameter);
    result
}

/// Computes the diameter of `graph` using the given thread pool.
///
/// Each thread reuses its own [`Dijkstra`] visit over the shared graph and
/// keeps a local best witness; witnesses are combined by a reduction with
/// the same tie-breaking rule as [`diameter`].
///
/// The progress logger is updated after each batch of sources.
pub fn par_diameter(
    graph: impl WeightedGraph + Sync,
    threads: impl Borrow<rayon::ThreadPool>,
    pl: &mut impl ProgressLog,
) -> Diameter {
    let threads = threads.borrow();
    let sources = sources(&graph);
    pl.item_name("source");
    pl.expected_updates(Some(sources.len()));
    pl.start("Computing diameter in parallel...");

    let batch_size = SOURCE_GRANULARITY * threads.current_num_threads();
    let mut best = None;
    for batch in sources.chunks(batch_size) {
        let batch_best = threads.install(|| {
            batch
                .par_iter()
                .with_min_len(SOURCE_GRANULARITY)
                .map_init(
                    || Dijkstra::new(&graph),
                    |dijkstra, &source| farthest(dijkstra, source),
                )
                .reduce(|| None, better)
        });
        best = better(best, batch_best);
        pl.update_with_count(batch.len());
    }

    pl.done();
    let result = into_diameter(best);
    info!("Diameter: {}", result.diameter);
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::CsrGraph;
    use dsi_progress_logger::no_logging;

    #[test]
    fn test_path() {
        let graph = CsrGraph::from_arcs(4, [(0, 1, 2), (1, 2, 3), (2, 3, 1)]);
        let result = diameter(&graph, no_logging![]);
        assert_eq!(result.diameter, 6);
        assert_eq!(result.path, vec![0, 1, 2, 3]);
        assert_eq!(result.source, Some(0));
        assert_eq!(result.target, Some(3));
    }

    #[test]
    fn test_no_arcs() {
        let graph = CsrGraph::from_arcs(3, std::iter::empty());
        assert_eq!(diameter(&graph, no_logging![]), Diameter::default());
    }

    #[test]
    fn test_self_loops_only() {
        let graph = CsrGraph::from_arcs(2, [(0, 0, 4), (1, 1, 1)]);
        assert_eq!(diameter(&graph, no_logging![]), Diameter::default());
    }

    #[test]
    fn test_tie_break() {
        // 2 -> 3 and 0 -> 1 both have length 5: the smaller source wins
        let graph = CsrGraph::from_arcs(4, [(2, 3, 5), (0, 1, 5)]);
        let result = diameter(&graph, no_logging![]);
        assert_eq!(result.diameter, 5);
        assert_eq!(result.source, Some(0));
        assert_eq!(result.target, Some(1));
    }
}
