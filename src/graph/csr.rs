use super::{Weight, WeightedGraph};
use std::iter::Copied;
use std::slice::Iter;

/// An immutable weighted graph in compressed sparse row form.
///
/// The successors of node `x` are stored in `arcs[offsets[x]..offsets[x + 1]]`
/// sorted by target, with at most one entry per target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    offsets: Box<[usize]>,
    arcs: Box<[(usize, Weight)]>,
}

impl CsrGraph {
    /// Builds a graph with `num_nodes` nodes from a list of weighted arcs.
    ///
    /// Repeated `(source, target)` pairs are merged by summing their weights.
    ///
    /// # Panics
    ///
    /// If an endpoint is not smaller than `num_nodes`, if a weight is zero, or
    /// if merging repeated arcs overflows.
    pub fn from_arcs(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize, Weight)>,
    ) -> Self {
        let mut arcs = arcs.into_iter().collect::<Vec<_>>();
        for &(src, dst, weight) in &arcs {
            assert!(
                src < num_nodes && dst < num_nodes,
                "arc ({src}, {dst}) out of bounds for {num_nodes} nodes"
            );
            assert!(weight > 0, "arc ({src}, {dst}) has zero weight");
        }
        arcs.sort_unstable_by_key(|&(src, dst, _)| (src, dst));

        let mut offsets = vec![0; num_nodes + 1];
        let mut merged: Vec<(usize, Weight)> = Vec::with_capacity(arcs.len());
        let mut last = None;
        for (src, dst, weight) in arcs {
            match merged.last_mut() {
                Some((_, merged_weight)) if last == Some((src, dst)) => {
                    *merged_weight = merged_weight
                        .checked_add(weight)
                        .unwrap_or_else(|| panic!("weight overflow on arc ({src}, {dst})"));
                }
                _ => {
                    merged.push((dst, weight));
                    offsets[src + 1] += 1;
                    last = Some((src, dst));
                }
            }
        }
        for x in 0..num_nodes {
            offsets[x + 1] += offsets[x];
        }

        Self {
            offsets: offsets.into_boxed_slice(),
            arcs: merged.into_boxed_slice(),
        }
    }

    /// Returns the transpose of this graph: every arc reversed, same weight.
    pub fn transpose(&self) -> Self {
        Self::transpose_of(self)
    }

    /// Builds the transpose of an arbitrary weighted graph.
    pub fn transpose_of(graph: impl WeightedGraph) -> Self {
        let num_nodes = graph.num_nodes();
        let mut arcs = Vec::with_capacity(graph.num_arcs());
        for src in 0..num_nodes {
            arcs.extend(graph.successors(src).map(|(dst, weight)| (dst, src, weight)));
        }
        Self::from_arcs(num_nodes, arcs)
    }

    /// Returns the weight of the arc from `src` to `dst`, if present.
    pub fn weight(&self, src: usize, dst: usize) -> Option<Weight> {
        let succ = &self.arcs[self.offsets[src]..self.offsets[src + 1]];
        succ.binary_search_by_key(&dst, |&(target, _)| target)
            .ok()
            .map(|pos| succ[pos].1)
    }

    /// Returns the number of distinct successors of `node`.
    pub fn outdegree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }
}

impl WeightedGraph for CsrGraph {
    type Successors<'a> = Copied<Iter<'a, (usize, Weight)>>;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline(always)]
    fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Self::Successors<'_> {
        self.arcs[self.offsets[node]..self.offsets[node + 1]]
            .iter()
            .copied()
    }
}
