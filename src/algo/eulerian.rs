//! Eulerian-cycle feasibility.
//!
//! A directed multigraph has an Eulerian cycle if and only if every node has
//! the same weighted in- and outdegree, and all nodes with nonzero degree
//! belong to the same strongly connected component. Nodes with no arcs are
//! ignored; a graph with no arcs at all has the empty Eulerian cycle.

use crate::{
    algo::sccs::{kosaraju, Sccs},
    graph::{CsrGraph, Identifier, Weight, WeightedGraph},
};
use dsi_progress_logger::ProgressLog;
use log::info;
use std::fmt;

/// The maximum number of unbalanced nodes reported as examples.
pub const MAX_EXAMPLES: usize = 5;

/// A node whose weighted indegree differs from its weighted outdegree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnbalancedNode {
    pub node: usize,
    pub in_degree: Weight,
    pub out_degree: Weight,
}

/// A violated condition for the existence of an Eulerian cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Nodes with nonzero degree are spread over several strongly
    /// connected components.
    MultipleComponents {
        /// The number of components containing a node with nonzero degree.
        num_components: usize,
    },
    /// Some nodes have different in- and outdegree.
    UnbalancedDegrees {
        /// The number of unbalanced nodes.
        num_unbalanced: usize,
        /// The first [`MAX_EXAMPLES`] unbalanced nodes, by increasing index.
        examples: Vec<UnbalancedNode>,
    },
}

impl Violation {
    /// Returns the number of unbalanced nodes not listed as examples.
    pub fn num_omitted(&self) -> usize {
        match self {
            Violation::MultipleComponents { .. } => 0,
            Violation::UnbalancedDegrees {
                num_unbalanced,
                examples,
            } => num_unbalanced - examples.len(),
        }
    }

    /// Returns a displayable description using `names` to label nodes.
    pub fn display<'a>(&'a self, names: &'a [Identifier]) -> impl fmt::Display + 'a {
        ViolationDisplay {
            violation: self,
            names,
        }
    }
}

struct ViolationDisplay<'a> {
    violation: &'a Violation,
    names: &'a [Identifier],
}

impl fmt::Display for ViolationDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violation {
            Violation::MultipleComponents { num_components } => write!(
                f,
                "multiple strongly connected components: {num_components} components contain arcs instead of 1"
            ),
            Violation::UnbalancedDegrees {
                num_unbalanced,
                examples,
            } => {
                write!(f, "{num_unbalanced} vertices have indegree != outdegree")?;
                for (i, example) in examples.iter().enumerate() {
                    write!(
                        f,
                        "\n  Example {}: {} (indegree: {}, outdegree: {})",
                        i + 1,
                        self.names[example.node],
                        example.in_degree,
                        example.out_degree
                    )?;
                }
                let omitted = self.violation.num_omitted();
                if omitted > 0 {
                    write!(f, "\n  ... and {omitted} more unbalanced vertices")?;
                }
                Ok(())
            }
        }
    }
}

/// The outcome of an Eulerian-cycle check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eulerian {
    /// The violated conditions; empty if and only if the graph is Eulerian.
    pub violations: Vec<Violation>,
    /// The number of nodes with nonzero degree.
    pub num_active: usize,
    /// The number of strongly connected components containing active nodes.
    pub num_active_components: usize,
}

impl Eulerian {
    /// Returns whether the graph has an Eulerian cycle.
    pub fn is_eulerian(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks whether `graph` has an Eulerian cycle.
///
/// Degrees are weighted, that is, they count messages. Strongly connected
/// components are computed with [Kosaraju's algorithm](kosaraju) on the
/// graph and its transpose.
pub fn eulerian(graph: impl WeightedGraph, pl: &mut impl ProgressLog) -> Eulerian {
    let num_nodes = graph.num_nodes();
    let mut in_degrees = vec![0; num_nodes];
    let mut out_degrees = vec![0; num_nodes];
    for node in 0..num_nodes {
        for (succ, weight) in graph.successors(node) {
            out_degrees[node] += weight;
            in_degrees[succ] += weight;
        }
    }

    let active = |node: usize| in_degrees[node] > 0 || out_degrees[node] > 0;
    let num_active = (0..num_nodes).filter(|&node| active(node)).count();

    let unbalanced = (0..num_nodes)
        .filter(|&node| in_degrees[node] != out_degrees[node])
        .map(|node| UnbalancedNode {
            node,
            in_degree: in_degrees[node],
            out_degree: out_degrees[node],
        })
        .collect::<Vec<_>>();

    let transpose = CsrGraph::transpose_of(&graph);
    let sccs = kosaraju(&graph, &transpose, pl);
    let mut has_active = vec![false; sccs.num_components()];
    for (node, &component) in sccs.components().iter().enumerate() {
        if active(node) {
            has_active[component] = true;
        }
    }
    let num_active_components = has_active.iter().filter(|&&b| b).count();

    let mut violations = Vec::new();
    if num_active_components > 1 {
        violations.push(Violation::MultipleComponents {
            num_components: num_active_components,
        });
    }
    if !unbalanced.is_empty() {
        violations.push(Violation::UnbalancedDegrees {
            num_unbalanced: unbalanced.len(),
            examples: unbalanced
                .into_iter()
                .take(MAX_EXAMPLES)
                .collect(),
        });
    }

    info!(
        "{num_active} active vertices in {num_active_components} strongly connected components, {} violated conditions",
        violations.len()
    );

    Eulerian {
        violations,
        num_active,
        num_active_components,
    }
}
