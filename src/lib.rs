/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Analysis of communication networks.
//!
//! A [`GraphBuilder`](graph::GraphBuilder) turns (sender, recipients)
//! records into a [`WeightedDirectedGraph`](graph::WeightedDirectedGraph)
//! whose arc weights count messages. The frozen graph supports degree
//! statistics, bounded and unbounded [shortest
//! paths](algo::shortest_paths), an [Eulerian-cycle check](algo::eulerian)
//! based on [strongly connected components](algo::sccs), and the
//! [weighted diameter](algo::diameter).

pub mod algo;
pub mod graph;
pub mod ingest;
pub mod utils;

/// Module exposing all traits in a single level.
pub mod traits {
    use super::*;
    pub use algo::traits::*;
    pub use graph::traits::*;
}

/// Use `use mailgraph_algo::prelude::*;` to import common types, modules and
/// all traits.
pub mod prelude {
    use super::*;
    pub use algo::diameter;
    pub use algo::eulerian;
    pub use algo::sccs;
    pub use algo::shortest_paths;
    pub use algo::visits::depth_first;
    pub use graph::{
        adjacency_list, CsrGraph, GraphBuilder, GraphError, Identifier, WeightedDirectedGraph,
    };
    pub use ingest::{MailDir, MailDirConfig};
    pub use traits::*;
    pub use utils::Threads;
}
