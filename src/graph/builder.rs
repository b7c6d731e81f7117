use super::{CsrGraph, GraphError, Identifier, Weight, WeightedDirectedGraph};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Accumulates arc weights from (sender, recipients) records.
///
/// Every identifier is registered in the vertex universe as soon as it is
/// seen, even when the record it belongs to contributes no arc. Weighted
/// degrees are maintained incrementally and copied into the graph on
/// [`finalize`](Self::finalize).
///
/// # Examples
///
/// ```
/// use mailgraph_algo::graph::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_record(Some("alice@x.com"), ["bob@x.com", "carol@x.com"])?;
/// builder.add_record(Some("Alice@X.com"), ["bob@x.com"])?;
/// builder.add_record(None, ["dave@x.com"])?;
///
/// let graph = builder.finalize();
/// assert_eq!(graph.vertex_count(), 4);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.out_degree("alice@x.com")?, 3);
/// assert_eq!(graph.isolated_vertices().count(), 1);
/// # Ok::<(), mailgraph_algo::graph::GraphError>(())
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Maps identifiers to provisional indices, assigned in order of appearance.
    ids: HashMap<Identifier, usize>,
    names: Vec<Identifier>,
    /// Outgoing arcs of each provisional index.
    arcs: Vec<HashMap<usize, Weight>>,
    in_degrees: Vec<Weight>,
    out_degrees: Vec<Weight>,
    num_records: usize,
    num_skipped: usize,
    frozen: Option<Arc<WeightedDirectedGraph>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record: one message from `sender` to each of `recipients`.
    ///
    /// Identifiers are normalized; blank ones are dropped. If the sender is
    /// missing or there are no recipients, the record contributes no arc,
    /// but the identifiers it contains are still registered.
    ///
    /// Fails with [`GraphError::Frozen`] after [`finalize`](Self::finalize),
    /// and with [`GraphError::WeightOverflow`] if a weight or a degree would
    /// overflow; recipients before the overflowing one are kept.
    pub fn add_record<S: AsRef<str>>(
        &mut self,
        sender: Option<&str>,
        recipients: impl IntoIterator<Item = S>,
    ) -> Result<(), GraphError> {
        if self.frozen.is_some() {
            return Err(GraphError::Frozen);
        }
        self.num_records += 1;

        let sender = sender.and_then(Identifier::new).map(|id| self.register(id));
        let mut contributed = false;
        for recipient in recipients {
            let Some(recipient) = Identifier::new(recipient.as_ref()) else {
                continue;
            };
            let recipient = self.register(recipient);
            if let Some(sender) = sender {
                self.increment(sender, recipient, 1)?;
                contributed = true;
            }
        }

        if !contributed {
            self.num_skipped += 1;
            debug!("Record #{} contributed no arcs", self.num_records);
        }
        Ok(())
    }

    /// Adds `weight` messages from `src` to `dst`, registering both.
    ///
    /// Fails with [`GraphError::WeightOverflow`], leaving weights and degrees
    /// unchanged, if the weight of the arc or a degree would overflow.
    ///
    /// # Panics
    ///
    /// If `weight` is zero.
    pub fn add_weighted_arc(
        &mut self,
        src: Identifier,
        dst: Identifier,
        weight: Weight,
    ) -> Result<(), GraphError> {
        assert!(weight > 0, "arc {src} -> {dst} has zero weight");
        if self.frozen.is_some() {
            return Err(GraphError::Frozen);
        }
        let src = self.register(src);
        let dst = self.register(dst);
        self.increment(src, dst, weight)
    }

    /// Registers an identifier in the vertex universe without adding arcs.
    pub fn add_vertex(&mut self, id: Identifier) -> Result<(), GraphError> {
        if self.frozen.is_some() {
            return Err(GraphError::Frozen);
        }
        self.register(id);
        Ok(())
    }

    /// Returns the number of records added so far.
    pub fn num_records(&self) -> usize {
        self.num_records
    }

    /// Returns the number of records that contributed no arc.
    pub fn num_skipped(&self) -> usize {
        self.num_skipped
    }

    /// Returns the number of vertices registered so far.
    pub fn num_vertices(&self) -> usize {
        match &self.frozen {
            Some(graph) => graph.vertex_count(),
            None => self.names.len(),
        }
    }

    /// Returns whether [`finalize`](Self::finalize) has been called.
    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Freezes the builder and returns the graph.
    ///
    /// Further calls return the same graph; further additions fail.
    pub fn finalize(&mut self) -> Arc<WeightedDirectedGraph> {
        if let Some(graph) = &self.frozen {
            return graph.clone();
        }

        let num_nodes = self.names.len();
        // Renumber by increasing identifier
        let mut named = std::mem::take(&mut self.names)
            .into_iter()
            .enumerate()
            .map(|(old, name)| (name, old))
            .collect::<Vec<_>>();
        named.sort_unstable_by(|(x, _), (y, _)| x.cmp(y));
        let mut perm = vec![0; num_nodes];
        for (new, &(_, old)) in named.iter().enumerate() {
            perm[old] = new;
        }
        let in_degrees = named.iter().map(|&(_, old)| self.in_degrees[old]).collect();
        let out_degrees = named
            .iter()
            .map(|&(_, old)| self.out_degrees[old])
            .collect();
        let sorted_names = named.into_iter().map(|(name, _)| name).collect();

        let arcs = CsrGraph::from_arcs(
            num_nodes,
            self.arcs.iter().enumerate().flat_map(|(src, succ)| {
                let perm = &perm;
                succ.iter()
                    .map(move |(&dst, &weight)| (perm[src], perm[dst], weight))
            }),
        );

        self.ids.clear();
        self.arcs.clear();
        self.in_degrees.clear();
        self.out_degrees.clear();

        let graph = Arc::new(WeightedDirectedGraph::from_parts(
            sorted_names,
            arcs,
            in_degrees,
            out_degrees,
        ));
        debug!(
            "Finalized graph with {} vertices and {} arcs from {} records",
            graph.vertex_count(),
            graph.edge_count(),
            self.num_records
        );
        self.frozen = Some(graph.clone());
        graph
    }

    fn register(&mut self, id: Identifier) -> usize {
        if let Some(&node) = self.ids.get(&id) {
            return node;
        }
        let node = self.names.len();
        self.names.push(id.clone());
        self.ids.insert(id, node);
        self.arcs.push(HashMap::new());
        self.in_degrees.push(0);
        self.out_degrees.push(0);
        node
    }

    fn increment(&mut self, src: usize, dst: usize, weight: Weight) -> Result<(), GraphError> {
        let arc = self.arcs[src]
            .get(&dst)
            .copied()
            .unwrap_or(0)
            .checked_add(weight);
        let out_degree = self.out_degrees[src].checked_add(weight);
        let in_degree = self.in_degrees[dst].checked_add(weight);
        let (Some(arc), Some(out_degree), Some(in_degree)) = (arc, out_degree, in_degree) else {
            return Err(GraphError::WeightOverflow {
                src: self.names[src].to_string(),
                dst: self.names[dst].to_string(),
            });
        };
        self.arcs[src].insert(dst, arc);
        self.out_degrees[src] = out_degree;
        self.in_degrees[dst] = in_degree;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_accumulate() -> Result<(), GraphError> {
        let mut builder = GraphBuilder::new();
        builder.add_record(Some("a"), ["b", "c"])?;
        builder.add_record(Some("a"), ["b"])?;
        builder.add_record(Some("c"), ["a"])?;
        let graph = builder.finalize();

        assert_eq!(
            graph.names().iter().map(|n| n.as_str()).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
        assert_eq!(graph.weight(0, 1), Some(2));
        assert_eq!(graph.weight(0, 2), Some(1));
        assert_eq!(graph.weight(2, 0), Some(1));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.out_degree("a")?, 3);
        assert_eq!(graph.in_degree("b")?, 2);
        assert_eq!(graph.in_degree("a")?, 1);
        Ok(())
    }

    #[test]
    fn test_malformed_records() -> Result<(), GraphError> {
        let mut builder = GraphBuilder::new();
        builder.add_record(None, ["b"])?;
        builder.add_record(Some("a"), Vec::<String>::new())?;
        builder.add_record(Some("  "), ["c", ""])?;
        assert_eq!(builder.num_records(), 3);
        assert_eq!(builder.num_skipped(), 3);
        assert_eq!(builder.num_vertices(), 3);

        let graph = builder.finalize();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.isolated_vertices().count(), 3);
        Ok(())
    }

    #[test]
    fn test_frozen() -> Result<(), GraphError> {
        let mut builder = GraphBuilder::new();
        builder.add_record(Some("a"), ["b"])?;
        assert!(!builder.is_frozen());
        let first = builder.finalize();
        assert!(builder.is_frozen());
        assert_eq!(builder.num_vertices(), 2);
        assert_eq!(
            builder.add_record(Some("a"), ["c"]),
            Err(GraphError::Frozen)
        );
        assert_eq!(
            builder.add_weighted_arc(
                Identifier::new("a").unwrap(),
                Identifier::new("b").unwrap(),
                1
            ),
            Err(GraphError::Frozen)
        );
        let second = builder.finalize();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.edge_count(), 1);
        Ok(())
    }

    #[test]
    fn test_weight_overflow() -> Result<(), GraphError> {
        let id = |name: &str| Identifier::new(name).unwrap();
        let mut builder = GraphBuilder::new();
        builder.add_weighted_arc(id("a"), id("b"), Weight::MAX)?;
        let overflow = Err(GraphError::WeightOverflow {
            src: "a".into(),
            dst: "b".into(),
        });
        assert_eq!(builder.add_record(Some("a"), ["b"]), overflow);
        // The out-degree of a is already saturated
        assert_eq!(
            builder.add_weighted_arc(id("a"), id("c"), 1),
            Err(GraphError::WeightOverflow {
                src: "a".into(),
                dst: "c".into(),
            })
        );
        builder.add_record(Some("c"), ["a"])?;

        let graph = builder.finalize();
        assert_eq!(graph.weight(0, 1), Some(Weight::MAX));
        assert_eq!(graph.out_degree("a")?, Weight::MAX);
        assert_eq!(graph.in_degree("c")?, 0);
        assert_eq!(graph.edge_count(), 2);
        Ok(())
    }

    #[test]
    fn test_self_loop() -> Result<(), GraphError> {
        let mut builder = GraphBuilder::new();
        builder.add_record(Some("a"), ["a", "a"])?;
        let graph = builder.finalize();
        assert_eq!(graph.weight(0, 0), Some(2));
        assert_eq!(graph.in_degree("a")?, 2);
        assert_eq!(graph.out_degree("a")?, 2);
        assert!(!graph.is_isolated(0));
        Ok(())
    }
}
