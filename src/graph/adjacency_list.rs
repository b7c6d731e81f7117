//! The textual adjacency-list format.
//!
//! ```text
//! # Adjacency list of the communication graph
//! # Format: sender -> recipient: weight
//!
//! Node: alice@x.com
//!   -> bob@x.com: 2
//!   -> carol@x.com: 1
//!
//! Node: bob@x.com
//!
//! ```
//!
//! Vertices appear in increasing order of identifier, each followed by its
//! arcs by decreasing weight and then increasing recipient, and by a blank
//! line. Isolated and sink-only vertices appear with no arcs.

use super::{GraphBuilder, GraphError, Identifier, Weight, WeightedDirectedGraph, WeightedGraph};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const HEADER: &str = "# Adjacency list of the communication graph\n\
                      # Format: sender -> recipient: weight\n";
const NODE_PREFIX: &str = "Node:";
const ARC_PREFIX: &str = "->";

/// Errors raised while reading an adjacency list.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("line {line}: arc before any node declaration")]
    ArcOutsideNode { line: usize },
    #[error("line {line}: malformed line {content:?}")]
    Malformed { line: usize, content: String },
    #[error("line {line}: invalid weight {weight:?}")]
    InvalidWeight { line: usize, weight: String },
    #[error("line {line}: weight or degree overflow")]
    WeightOverflow { line: usize },
}

/// Writes `graph` in adjacency-list format.
pub fn write(graph: &WeightedDirectedGraph, mut writer: impl Write) -> std::io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    let mut succ = Vec::new();
    for node in 0..graph.vertex_count() {
        writeln!(writer, "{NODE_PREFIX} {}", graph.name(node))?;
        succ.clear();
        succ.extend(graph.successors(node));
        // Indices follow identifier order
        succ.sort_unstable_by(|&(x, w_x), &(y, w_y)| w_y.cmp(&w_x).then(x.cmp(&y)));
        for &(dst, weight) in &succ {
            writeln!(writer, "  {ARC_PREFIX} {}: {weight}", graph.name(dst))?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

/// Stores `graph` in adjacency-list format at `path`.
pub fn store(graph: &WeightedDirectedGraph, path: impl AsRef<Path>) -> std::io::Result<()> {
    write(graph, BufWriter::new(File::create(path)?))
}

/// Reads a graph in adjacency-list format.
///
/// Arcs repeated under the same node are merged by summing their weights.
/// Fails with [`ParseError::WeightOverflow`] if an arc weight or a degree
/// does not fit in a [`Weight`].
pub fn read(reader: impl BufRead) -> Result<WeightedDirectedGraph, ParseError> {
    let mut builder = GraphBuilder::new();
    let mut current = None;

    for (line_num, line) in reader.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let malformed = || ParseError::Malformed {
            line: line_num,
            content: line.clone(),
        };

        if let Some(name) = trimmed.strip_prefix(NODE_PREFIX) {
            let id = Identifier::new(name).ok_or_else(malformed)?;
            builder.add_vertex(id.clone())?;
            current = Some(id);
        } else if let Some(arc) = trimmed.strip_prefix(ARC_PREFIX) {
            let src = current
                .clone()
                .ok_or(ParseError::ArcOutsideNode { line: line_num })?;
            let (name, weight) = arc.rsplit_once(':').ok_or_else(malformed)?;
            let dst = Identifier::new(name).ok_or_else(malformed)?;
            let weight = weight.trim();
            let weight = match weight.parse::<Weight>() {
                Ok(w) if w > 0 => w,
                _ => {
                    return Err(ParseError::InvalidWeight {
                        line: line_num,
                        weight: weight.to_owned(),
                    })
                }
            };
            builder
                .add_weighted_arc(src, dst, weight)
                .map_err(|err| match err {
                    GraphError::WeightOverflow { .. } => {
                        ParseError::WeightOverflow { line: line_num }
                    }
                    err => err.into(),
                })?;
        } else {
            return Err(malformed());
        }
    }

    let graph = builder.finalize();
    // Release the builder's reference so that the graph is not cloned
    drop(builder);
    Ok(Arc::unwrap_or_clone(graph))
}

/// Loads a graph in adjacency-list format from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<WeightedDirectedGraph, ParseError> {
    read(BufReader::new(File::open(path)?))
}
