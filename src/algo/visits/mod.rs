//! Visits on weighted graphs.
//!
//! Visits ignore arc weights: they are used to compute reachability and
//! orderings, such as the finishing order needed by
//! [Kosaraju's algorithm](crate::algo::sccs::kosaraju).

pub mod depth_first;

use dsi_progress_logger::ProgressLog;
use std::ops::ControlFlow;

/// A sequential visit.
///
/// Implementations must provide the
/// [`visit_filtered`](Sequential::visit_filtered) method, which should visit
/// the graph starting from each of the given roots in turn, skipping roots
/// that have already been reached by a previous visit tree.
///
/// For each node, the visit invokes a callback with an event of type `A`. The
/// callback returns a [`ControlFlow`]: returning [`ControlFlow::Break`] stops
/// the visit immediately, and the break value is returned to the caller.
pub trait Sequential<A> {
    /// The arguments passed to the filter.
    type FilterArgs;

    /// Visits the graph from the specified roots, ignoring nodes for which
    /// `filter` returns false.
    ///
    /// # Arguments
    /// * `roots`: the roots of the visit trees, in order.
    /// * `callback`: the callback function.
    /// * `filter`: a closure deciding whether a newly discovered node should
    ///   be visited; rejected nodes may be visited later.
    /// * `pl`: a progress logger; pass `no_logging![]` to disable logging.
    fn visit_filtered<B, C: FnMut(A) -> ControlFlow<B>, F: FnMut(&Self::FilterArgs) -> bool>(
        &mut self,
        roots: impl IntoIterator<Item = usize>,
        callback: C,
        filter: F,
        pl: &mut impl ProgressLog,
    ) -> ControlFlow<B>;

    /// Visits the graph from the specified roots.
    ///
    /// See [`visit_filtered`](Sequential::visit_filtered) for more details.
    fn visit<B, C: FnMut(A) -> ControlFlow<B>>(
        &mut self,
        roots: impl IntoIterator<Item = usize>,
        callback: C,
        pl: &mut impl ProgressLog,
    ) -> ControlFlow<B> {
        self.visit_filtered(roots, callback, |_| true, pl)
    }

    /// Resets the visit status, making it possible to reuse it.
    fn reset(&mut self);
}
