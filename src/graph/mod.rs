//! The weighted communication graph and its construction.
//!
//! A [`GraphBuilder`] accumulates arc weights from (sender, recipients)
//! records; [`finalize`](GraphBuilder::finalize) freezes it into a
//! [`WeightedDirectedGraph`], which is immutable and can be shared freely
//! among the [algorithms](crate::algo).

mod builder;
pub use builder::*;

mod csr;
pub use csr::*;

mod digraph;
pub use digraph::*;

mod identifier;
pub use identifier::*;

mod stats;
pub use stats::*;

pub mod adjacency_list;

/// Traits for weighted graphs.
pub mod traits;
pub use traits::{Weight, WeightedGraph};

use thiserror::Error;

/// Errors raised by graph construction and graph queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A record was added after [`finalize`](GraphBuilder::finalize).
    #[error("the graph has been finalized and can no longer be modified")]
    Frozen,
    /// A query referenced an identifier outside the vertex universe.
    #[error("unknown vertex {0:?}")]
    UnknownVertex(String),
    /// Adding messages would overflow the weight of an arc or a degree.
    #[error("weight overflow on arc {src} -> {dst}")]
    WeightOverflow { src: String, dst: String },
}
