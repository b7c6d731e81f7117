/// The weight of an arc: the number of messages observed from its source to
/// its target.
pub type Weight = u64;

/// A directed graph with positive integer weights on its arcs.
///
/// Nodes are the indices `0..num_nodes()`. Every algorithm in
/// [`algo`](crate::algo) is written against this trait, so it can run on a
/// [`WeightedDirectedGraph`](crate::graph::WeightedDirectedGraph), on its
/// transpose, or on any [`CsrGraph`](crate::graph::CsrGraph) built directly
/// from an arc list.
pub trait WeightedGraph {
    /// The iterator on the successors of a node, paired with arc weights.
    type Successors<'a>: Iterator<Item = (usize, Weight)>
    where
        Self: 'a;

    /// Returns the number of nodes.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs, that is, of distinct ordered pairs with
    /// positive weight.
    fn num_arcs(&self) -> usize;

    /// Returns the successors of `node` with the weights of the arcs
    /// reaching them, in increasing order of target.
    fn successors(&self, node: usize) -> Self::Successors<'_>;

    /// Returns the sum of the weights of the arcs leaving `node`.
    fn weighted_outdegree(&self, node: usize) -> Weight {
        self.successors(node).map(|(_, weight)| weight).sum()
    }
}

impl<G: WeightedGraph + ?Sized> WeightedGraph for &G {
    type Successors<'a>
        = G::Successors<'a>
    where
        Self: 'a;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    #[inline(always)]
    fn num_arcs(&self) -> usize {
        (**self).num_arcs()
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Self::Successors<'_> {
        (**self).successors(node)
    }

    #[inline(always)]
    fn weighted_outdegree(&self, node: usize) -> Weight {
        (**self).weighted_outdegree(node)
    }
}
