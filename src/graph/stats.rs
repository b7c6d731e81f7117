use super::{Identifier, Weight, WeightedDirectedGraph};
use std::fmt;

/// Summary statistics of a [`WeightedDirectedGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStats<'a> {
    /// The size of the vertex universe.
    pub num_vertices: usize,
    /// The number of distinct ordered pairs with positive weight.
    pub num_edges: usize,
    /// The number of vertices with no incoming and no outgoing arcs.
    pub num_isolated: usize,
    /// The vertices sending the most messages, with their weighted outdegree.
    pub top_out: Vec<(&'a Identifier, Weight)>,
    /// The vertices receiving the most messages, with their weighted indegree.
    pub top_in: Vec<(&'a Identifier, Weight)>,
}

impl WeightedDirectedGraph {
    /// Computes summary statistics, with top lists of length at most `top_n`.
    pub fn stats(&self, top_n: usize) -> GraphStats<'_> {
        GraphStats {
            num_vertices: self.vertex_count(),
            num_edges: self.edge_count(),
            num_isolated: self.isolated_vertices().count(),
            top_out: self.top_by_out_degree(top_n),
            top_in: self.top_by_in_degree(top_n),
        }
    }
}

impl fmt::Display for GraphStats<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vertices: {}", self.num_vertices)?;
        writeln!(f, "Edges: {}", self.num_edges)?;
        writeln!(f, "Isolated vertices: {}", self.num_isolated)?;
        writeln!(f, "Top {} by messages sent:", self.top_out.len())?;
        for (rank, (id, degree)) in self.top_out.iter().enumerate() {
            writeln!(f, "{:4}. {id}: {degree}", rank + 1)?;
        }
        writeln!(f, "Top {} by messages received:", self.top_in.len())?;
        for (rank, (id, degree)) in self.top_in.iter().enumerate() {
            writeln!(f, "{:4}. {id}: {degree}", rank + 1)?;
        }
        Ok(())
    }
}
