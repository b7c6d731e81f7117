//! Depth-first visits.
//!
//! The visit is iterative: the visit path is kept on an explicit stack of
//! successor iterators, so its depth is not limited by the size of the
//! call stack. Communication graphs routinely have visit paths tens of
//! thousands of nodes long.

use super::Sequential;
use crate::graph::WeightedGraph;
use dsi_progress_logger::ProgressLog;
use std::ops::ControlFlow::{self, Continue};
use sux::bits::BitVec;

/// Events generated during a depth-first visit.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum EventPred {
    /// Start of a new visit tree rooted at `root`.
    Init {
        /// The root of the visit tree.
        root: usize,
    },
    /// The node `curr` has been discovered through a tree arc from `pred`.
    /// For the root, `curr`, `pred` and `root` coincide.
    Previsit {
        curr: usize,
        pred: usize,
        root: usize,
        depth: usize,
    },
    /// The node `curr`, already known, is reached again from `pred` through
    /// a back, forward or cross arc.
    Revisit {
        curr: usize,
        pred: usize,
        root: usize,
        depth: usize,
    },
    /// The enumeration of the successors of `curr` has been completed: we
    /// are retreating from the tree arc coming from `pred`.
    Postvisit {
        curr: usize,
        pred: usize,
        root: usize,
        depth: usize,
    },
    /// The visit tree rooted at `root` is complete.
    Done {
        /// The root of the visit tree.
        root: usize,
    },
}

/// Arguments passed to the filter of a depth-first visit.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct FilterArgsPred {
    pub curr: usize,
    pub pred: usize,
    pub root: usize,
    pub depth: usize,
}

/// A sequential depth-first visit keeping track of predecessors.
///
/// The visit uses one bit per node to remember known nodes and a stack of
/// pairs made of a successor iterator and a predecessor, one for each node
/// on the visit path.
///
/// The progress logger is [updated](ProgressLog::light_update) after each
/// postvisit.
///
/// # Examples
///
/// Computing the reverse finishing order of a visit:
///
/// ```
/// use mailgraph_algo::algo::visits::{depth_first::*, Sequential};
/// use mailgraph_algo::graph::CsrGraph;
/// use dsi_progress_logger::no_logging;
/// use std::ops::ControlFlow::Continue;
///
/// let graph = CsrGraph::from_arcs(4, [(0, 1, 1), (1, 2, 1), (1, 3, 1)]);
/// let mut visit = SeqPred::new(&graph);
/// let mut finished = vec![];
/// let _ = visit.visit_all(
///     |event| {
///         if let EventPred::Postvisit { curr, .. } = event {
///             finished.push(curr);
///         }
///         Continue::<()>(())
///     },
///     no_logging![],
/// );
/// assert_eq!(finished, vec![2, 3, 1, 0]);
/// ```
pub struct SeqPred<'a, G: WeightedGraph> {
    graph: &'a G,
    /// Entries on this stack represent the iterator on the successors of a
    /// node and the parent of the node.
    stack: Vec<(G::Successors<'a>, usize)>,
    known: BitVec,
}

impl<'a, G: WeightedGraph> SeqPred<'a, G> {
    /// Creates a new sequential visit.
    ///
    /// # Arguments
    /// * `graph`: an immutable reference to the graph to visit.
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            stack: Vec::with_capacity(16),
            known: BitVec::new(graph.num_nodes()),
        }
    }

    /// Returns whether `node` has been discovered by the visit.
    pub fn known(&self, node: usize) -> bool {
        self.known.get(node)
    }

    /// Visits the whole graph, using the nodes in increasing order as roots.
    pub fn visit_all<B, C: FnMut(EventPred) -> ControlFlow<B>>(
        &mut self,
        callback: C,
        pl: &mut impl ProgressLog,
    ) -> ControlFlow<B> {
        let num_nodes = self.graph.num_nodes();
        self.visit(0..num_nodes, callback, pl)
    }

    fn visit_tree<B, C: FnMut(EventPred) -> ControlFlow<B>, F: FnMut(&FilterArgsPred) -> bool>(
        &mut self,
        root: usize,
        callback: &mut C,
        filter: &mut F,
        pl: &mut impl ProgressLog,
    ) -> ControlFlow<B> {
        if self.known.get(root)
            || !filter(&FilterArgsPred {
                curr: root,
                pred: root,
                root,
                depth: 0,
            })
        {
            // We ignore the node: it might be visited later
            return Continue(());
        }

        callback(EventPred::Init { root })?;

        self.known.set(root, true);

        callback(EventPred::Previsit {
            curr: root,
            pred: root,
            root,
            depth: 0,
        })?;

        self.stack.push((self.graph.successors(root), root));

        // The node whose successors are enumerated by the iterator on top of
        // the stack; its parent is stored alongside the iterator.
        let mut current_node = root;

        'recurse: loop {
            let depth = self.stack.len();
            let Some((iter, parent)) = self.stack.last_mut() else {
                callback(EventPred::Done { root })?;
                return Continue(());
            };

            for (succ, _) in iter {
                if self.known.get(succ) {
                    callback(EventPred::Revisit {
                        curr: succ,
                        pred: current_node,
                        root,
                        depth,
                    })?;
                } else if filter(&FilterArgsPred {
                    curr: succ,
                    pred: current_node,
                    root,
                    depth,
                }) {
                    self.known.set(succ, true);

                    callback(EventPred::Previsit {
                        curr: succ,
                        pred: current_node,
                        root,
                        depth,
                    })?;

                    self.stack.push((self.graph.successors(succ), current_node));
                    current_node = succ;
                    continue 'recurse;
                }
            }

            let parent = *parent;
            callback(EventPred::Postvisit {
                curr: current_node,
                pred: parent,
                root,
                depth: depth - 1,
            })?;

            pl.light_update();

            // Going up one level: the parent becomes the current node
            current_node = parent;
            self.stack.pop();
        }
    }
}

impl<G: WeightedGraph> Sequential<EventPred> for SeqPred<'_, G> {
    type FilterArgs = FilterArgsPred;

    fn visit_filtered<
        B,
        C: FnMut(EventPred) -> ControlFlow<B>,
        F: FnMut(&FilterArgsPred) -> bool,
    >(
        &mut self,
        roots: impl IntoIterator<Item = usize>,
        mut callback: C,
        mut filter: F,
        pl: &mut impl ProgressLog,
    ) -> ControlFlow<B> {
        for root in roots {
            self.visit_tree(root, &mut callback, &mut filter, pl)?;
        }
        Continue(())
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.known = BitVec::new(self.graph.num_nodes());
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::CsrGraph;
    use dsi_progress_logger::no_logging;
    use std::ops::ControlFlow::Break;

    #[test]
    fn test_events() {
        let graph = CsrGraph::from_arcs(3, [(0, 1, 1), (1, 0, 1), (1, 2, 1)]);
        let mut visit = SeqPred::new(&graph);
        let mut events = vec![];
        let _ = visit.visit(
            [0],
            |event| {
                events.push(event);
                Continue::<()>(())
            },
            no_logging![],
        );

        assert_eq!(
            events,
            vec![
                EventPred::Init { root: 0 },
                EventPred::Previsit {
                    curr: 0,
                    pred: 0,
                    root: 0,
                    depth: 0,
                },
                EventPred::Previsit {
                    curr: 1,
                    pred: 0,
                    root: 0,
                    depth: 1,
                },
                EventPred::Revisit {
                    curr: 0,
                    pred: 1,
                    root: 0,
                    depth: 2,
                },
                EventPred::Previsit {
                    curr: 2,
                    pred: 1,
                    root: 0,
                    depth: 2,
                },
                EventPred::Postvisit {
                    curr: 2,
                    pred: 1,
                    root: 0,
                    depth: 2,
                },
                EventPred::Postvisit {
                    curr: 1,
                    pred: 0,
                    root: 0,
                    depth: 1,
                },
                EventPred::Postvisit {
                    curr: 0,
                    pred: 0,
                    root: 0,
                    depth: 0,
                },
                EventPred::Done { root: 0 },
            ]
        );
    }

    #[test]
    fn test_break() {
        let graph = CsrGraph::from_arcs(4, [(0, 1, 1), (1, 2, 1), (2, 3, 1)]);
        let mut visit = SeqPred::new(&graph);
        let result = visit.visit_all(
            |event| match event {
                EventPred::Previsit { curr: 2, depth, .. } => Break(depth),
                _ => Continue(()),
            },
            no_logging![],
        );
        assert_eq!(result, Break(2));
        assert!(!visit.known(3));
    }

    #[test]
    fn test_long_path() {
        // A path this long would overflow a recursive visit
        let n = 1_000_000;
        let graph = CsrGraph::from_arcs(n, (0..n - 1).map(|x| (x, x + 1, 1)));
        let mut visit = SeqPred::new(&graph);
        let mut max_depth = 0;
        let _ = visit.visit(
            [0],
            |event| {
                if let EventPred::Previsit { depth, .. } = event {
                    max_depth = max_depth.max(depth);
                }
                Continue::<()>(())
            },
            no_logging![],
        );
        assert_eq!(max_depth, n - 1);
    }
}
