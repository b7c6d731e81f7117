//! Algorithms on weighted communication graphs.

pub mod visits;

pub mod sccs;

pub mod shortest_paths;

pub mod eulerian;

pub mod diameter;

/// Traits used to interact with the implemented algorithms.
pub mod traits {
    use super::*;

    pub use sccs::Sccs;
    pub use visits::Sequential;
}
