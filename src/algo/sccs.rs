/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Strongly connected components.

use crate::{
    algo::visits::{depth_first::*, Sequential},
    graph::WeightedGraph,
};
use dsi_progress_logger::ProgressLog;
use no_break::NoBreak;
use std::ops::ControlFlow::Continue;

/// The strongly connected components of a graph.
pub trait Sccs {
    /// The number of strongly connected components.
    fn num_components(&self) -> usize;

    /// The component index of each node.
    fn components(&self) -> &[usize];

    /// The mutable reference to the component index of each node.
    #[doc(hidden)]
    fn components_mut(&mut self) -> &mut [usize];

    /// Returns the size array for this set of strongly connected components.
    fn compute_sizes(&self) -> Box<[usize]> {
        let mut sizes = vec![0; self.num_components()];
        for &node_component in self.components() {
            sizes[node_component] += 1;
        }
        sizes.into_boxed_slice()
    }

    /// Renumbers the components by decreasing size.
    ///
    /// After a call to this method, component sizes are non-increasing in
    /// the component index. Components of equal size keep their relative
    /// order.
    fn sort_by_size(&mut self) {
        let sizes = self.compute_sizes();
        let mut sort_perm = Vec::from_iter(0..sizes.len());
        sort_perm.sort_by(|&x, &y| sizes[y].cmp(&sizes[x]));
        let mut inv_perm = vec![0; sizes.len()];
        for (new, &old) in sort_perm.iter().enumerate() {
            inv_perm[old] = new;
        }
        self.components_mut()
            .iter_mut()
            .for_each(|node_component| *node_component = inv_perm[*node_component]);
    }

    /// Returns the members of each component, in increasing order.
    fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.num_components()];
        for (node, &component) in self.components().iter().enumerate() {
            members[component].push(node);
        }
        members
    }
}

/// A basic representation of strongly connected components: a component
/// index for each node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicSccs {
    num_components: usize,
    components: Box<[usize]>,
}

impl BasicSccs {
    pub fn new(num_components: usize, components: Box<[usize]>) -> Self {
        Self {
            num_components,
            components,
        }
    }
}

impl Sccs for BasicSccs {
    fn num_components(&self) -> usize {
        self.num_components
    }

    fn components(&self) -> &[usize] {
        &self.components
    }

    fn components_mut(&mut self) -> &mut [usize] {
        &mut self.components
    }
}

/// Returns the nodes of `graph` in reverse finishing order of a depth-first
/// visit using the nodes in increasing order as roots.
///
/// On acyclic graphs this is a topological sort.
pub fn reverse_finishing_order(
    graph: impl WeightedGraph,
    pl: &mut impl ProgressLog,
) -> Box<[usize]> {
    let num_nodes = graph.num_nodes();
    let mut visit = SeqPred::new(&graph);
    let mut order = vec![0; num_nodes].into_boxed_slice();
    let mut pos = num_nodes;

    visit
        .visit_all(
            |event| {
                if let EventPred::Postvisit { curr, .. } = event {
                    pos -= 1;
                    order[pos] = curr;
                }
                Continue(())
            },
            pl,
        )
        .continue_value_no_break();

    order
}

/// Computes the strongly connected components of a graph using Kosaraju's
/// algorithm.
///
/// A first visit of `graph` computes the finishing order; a second visit
/// of `transpose`, using the nodes in reverse finishing order as roots,
/// yields one component per visit tree. Components are numbered in order
/// of discovery.
///
/// # Arguments
/// * `graph`: the graph.
/// * `transpose`: the transpose of `graph`.
/// * `pl`: a progress logger.
pub fn kosaraju(
    graph: impl WeightedGraph,
    transpose: impl WeightedGraph,
    pl: &mut impl ProgressLog,
) -> BasicSccs {
    let num_nodes = graph.num_nodes();
    assert_eq!(num_nodes, transpose.num_nodes());
    pl.item_name("node");
    pl.expected_updates(Some(2 * num_nodes));
    pl.start("Computing strongly connected components...");

    let order = reverse_finishing_order(&graph, pl);
    let mut number_of_components = 0;
    let mut visit = SeqPred::new(&transpose);
    let mut components = vec![0; num_nodes].into_boxed_slice();

    visit
        .visit(
            order.iter().copied(),
            |event| {
                match event {
                    EventPred::Previsit { curr, .. } => {
                        components[curr] = number_of_components;
                    }
                    EventPred::Done { .. } => {
                        number_of_components += 1;
                    }
                    _ => (),
                }
                Continue(())
            },
            pl,
        )
        .continue_value_no_break();

    pl.done();

    BasicSccs::new(number_of_components, components)
}
