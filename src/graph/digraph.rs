use super::{CsrGraph, GraphError, Identifier, Weight, WeightedGraph};
use crate::algo::{
    diameter::{self, Diameter},
    eulerian::{self, Eulerian},
    shortest_paths::{self, ShortestPaths},
};
use dsi_progress_logger::ProgressLog;
use std::collections::HashMap;

/// A frozen communication graph.
///
/// Vertices are numbered in increasing order of identifier, so the index of
/// a vertex can be used wherever a deterministic identifier order is needed.
/// The vertex universe contains every identifier ever observed, including
/// those with no arcs.
///
/// Weighted in- and outdegrees are stored in tables computed at
/// construction, so all degree queries are constant time.
#[derive(Debug, Clone)]
pub struct WeightedDirectedGraph {
    names: Box<[Identifier]>,
    index: HashMap<Identifier, usize>,
    arcs: CsrGraph,
    in_degrees: Box<[Weight]>,
    out_degrees: Box<[Weight]>,
}

impl WeightedDirectedGraph {
    /// Assembles a graph from sorted, distinct names, the arcs between their
    /// indices, and the weighted degree tables.
    pub(crate) fn from_parts(
        names: Box<[Identifier]>,
        arcs: CsrGraph,
        in_degrees: Box<[Weight]>,
        out_degrees: Box<[Weight]>,
    ) -> Self {
        debug_assert!(names.windows(2).all(|w| w[0] < w[1]));
        debug_assert_eq!(names.len(), arcs.num_nodes());
        debug_assert_eq!(names.len(), in_degrees.len());
        debug_assert_eq!(names.len(), out_degrees.len());
        let index = names
            .iter()
            .enumerate()
            .map(|(node, name)| (name.clone(), node))
            .collect();
        Self {
            names,
            index,
            arcs,
            in_degrees,
            out_degrees,
        }
    }

    /// Returns the size of the vertex universe.
    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    /// Returns the number of distinct ordered pairs with positive weight.
    pub fn edge_count(&self) -> usize {
        self.arcs.num_arcs()
    }

    /// Returns the identifiers of all vertices, in increasing order.
    pub fn names(&self) -> &[Identifier] {
        &self.names
    }

    /// Returns the identifier of `node`.
    pub fn name(&self, node: usize) -> &Identifier {
        &self.names[node]
    }

    /// Returns the index of the vertex named `id`, after normalization.
    pub fn node(&self, id: &str) -> Option<usize> {
        let id = Identifier::new(id)?;
        self.index.get(&id).copied()
    }

    /// Like [`node`](Self::node), but fails with
    /// [`GraphError::UnknownVertex`] if `id` is not a vertex.
    pub fn resolve(&self, id: &str) -> Result<usize, GraphError> {
        self.node(id)
            .ok_or_else(|| GraphError::UnknownVertex(id.to_owned()))
    }

    /// Returns whether `id` belongs to the vertex universe.
    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Returns the underlying arcs.
    pub fn arcs(&self) -> &CsrGraph {
        &self.arcs
    }

    /// Returns the transpose of the graph as a bare [`CsrGraph`].
    pub fn transpose(&self) -> CsrGraph {
        self.arcs.transpose()
    }

    /// Returns the weight of the arc from `src` to `dst`, if present.
    pub fn weight(&self, src: usize, dst: usize) -> Option<Weight> {
        self.arcs.weight(src, dst)
    }

    /// Returns the number of messages sent by `node`.
    pub fn out_degree_of(&self, node: usize) -> Weight {
        self.out_degrees[node]
    }

    /// Returns the number of messages received by `node`.
    pub fn in_degree_of(&self, node: usize) -> Weight {
        self.in_degrees[node]
    }

    /// Returns the number of messages sent by `id`.
    pub fn out_degree(&self, id: &str) -> Result<Weight, GraphError> {
        Ok(self.out_degrees[self.resolve(id)?])
    }

    /// Returns the number of messages received by `id`.
    pub fn in_degree(&self, id: &str) -> Result<Weight, GraphError> {
        Ok(self.in_degrees[self.resolve(id)?])
    }

    /// Returns the recipients of `id` paired with arc weights, in increasing
    /// order of identifier.
    pub fn neighbors(
        &self,
        id: &str,
    ) -> Result<impl Iterator<Item = (&Identifier, Weight)> + '_, GraphError> {
        let node = self.resolve(id)?;
        Ok(self
            .arcs
            .successors(node)
            .map(|(succ, weight)| (&self.names[succ], weight)))
    }

    /// Returns whether `node` neither sends nor receives messages.
    pub fn is_isolated(&self, node: usize) -> bool {
        self.in_degrees[node] == 0 && self.out_degrees[node] == 0
    }

    /// Returns the isolated vertices, in increasing order of identifier.
    pub fn isolated_vertices(&self) -> impl Iterator<Item = &Identifier> + '_ {
        (0..self.vertex_count())
            .filter(|&node| self.is_isolated(node))
            .map(|node| &self.names[node])
    }

    /// Returns the `n` vertices sending the most messages.
    ///
    /// See [`top_by`](Self::top_by) for the ordering.
    pub fn top_by_out_degree(&self, n: usize) -> Vec<(&Identifier, Weight)> {
        self.top_by(&self.out_degrees, n)
    }

    /// Returns the `n` vertices receiving the most messages.
    ///
    /// See [`top_by`](Self::top_by) for the ordering.
    pub fn top_by_in_degree(&self, n: usize) -> Vec<(&Identifier, Weight)> {
        self.top_by(&self.in_degrees, n)
    }

    /// Returns at most `n` vertices with positive `degrees`, by decreasing
    /// degree and then increasing identifier.
    fn top_by<'a>(&'a self, degrees: &[Weight], n: usize) -> Vec<(&'a Identifier, Weight)> {
        let mut nodes = (0..self.vertex_count())
            .filter(|&node| degrees[node] > 0)
            .collect::<Vec<_>>();
        // Indices follow identifier order, so they break ties
        let by_degree = |&x: &usize, &y: &usize| degrees[y].cmp(&degrees[x]).then(x.cmp(&y));
        if n < nodes.len() {
            nodes.select_nth_unstable_by(n, by_degree);
            nodes.truncate(n);
        }
        nodes.sort_unstable_by(by_degree);
        nodes
            .into_iter()
            .map(|node| (&self.names[node], degrees[node]))
            .collect()
    }

    /// Returns the vertices at distance at most `max_distance` from `start`,
    /// by increasing distance and then increasing identifier.
    ///
    /// `start` is always included, at distance zero.
    pub fn shortest_paths_within(
        &self,
        start: &str,
        max_distance: Weight,
    ) -> Result<Vec<(&Identifier, Weight)>, GraphError> {
        let root = self.resolve(start)?;
        let mut within = shortest_paths::shortest_paths_within(self, root, max_distance);
        within.sort_unstable_by_key(|&(node, distance)| (distance, node));
        Ok(within
            .into_iter()
            .map(|(node, distance)| (&self.names[node], distance))
            .collect())
    }

    /// Returns the shortest paths from `start` to all vertices.
    pub fn shortest_paths_from(&self, start: &str) -> Result<ShortestPaths, GraphError> {
        let root = self.resolve(start)?;
        Ok(shortest_paths::shortest_paths_from(self, root))
    }

    /// Checks whether the graph has an Eulerian cycle.
    pub fn eulerian(&self, pl: &mut impl ProgressLog) -> Eulerian {
        eulerian::eulerian(self, pl)
    }

    /// Computes the diameter of the graph sequentially.
    pub fn diameter(&self, pl: &mut impl ProgressLog) -> Diameter {
        diameter::diameter(self, pl)
    }

    /// Returns the identifiers along `path`.
    pub fn path_names(&self, path: &[usize]) -> Vec<&Identifier> {
        path.iter().map(|&node| &self.names[node]).collect()
    }
}

impl WeightedGraph for WeightedDirectedGraph {
    type Successors<'a> = <CsrGraph as WeightedGraph>::Successors<'a>;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.names.len()
    }

    #[inline(always)]
    fn num_arcs(&self) -> usize {
        self.arcs.num_arcs()
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Self::Successors<'_> {
        self.arcs.successors(node)
    }

    #[inline(always)]
    fn weighted_outdegree(&self, node: usize) -> Weight {
        self.out_degrees[node]
    }
}
