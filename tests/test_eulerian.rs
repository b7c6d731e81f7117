use anyhow::Result;
use dsi_progress_logger::prelude::*;
use mailgraph_algo::algo::eulerian::{eulerian, UnbalancedNode, Violation};
use mailgraph_algo::prelude::*;
use std::sync::Arc;

fn build(records: &[(&str, &[&str])]) -> Result<Arc<WeightedDirectedGraph>> {
    let mut builder = GraphBuilder::new();
    for &(sender, recipients) in records {
        builder.add_record(Some(sender), recipients)?;
    }
    Ok(builder.finalize())
}

#[test]
fn test_cycle() -> Result<()> {
    let graph = build(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])])?;
    let result = graph.eulerian(no_logging![]);
    assert!(result.is_eulerian());
    assert_eq!(result.num_active, 3);
    assert_eq!(result.num_active_components, 1);
    Ok(())
}

#[test]
fn test_unbalanced() -> Result<()> {
    // A -> B has weight 2
    let graph = build(&[
        ("a", &["b"]),
        ("a", &["b"]),
        ("b", &["c"]),
        ("c", &["a"]),
    ])?;
    let result = graph.eulerian(no_logging![]);
    assert!(!result.is_eulerian());
    assert_eq!(
        result.violations,
        vec![Violation::UnbalancedDegrees {
            num_unbalanced: 2,
            examples: vec![
                UnbalancedNode {
                    node: graph.resolve("a")?,
                    in_degree: 1,
                    out_degree: 2
                },
                UnbalancedNode {
                    node: graph.resolve("b")?,
                    in_degree: 2,
                    out_degree: 1
                },
            ]
        }]
    );

    let text = result.violations[0].display(graph.names()).to_string();
    assert!(text.contains("a (indegree: 1, outdegree: 2)"));
    assert!(text.contains("b (indegree: 2, outdegree: 1)"));
    Ok(())
}

#[test]
fn test_two_components() -> Result<()> {
    let graph = build(&[
        ("a", &["b"]),
        ("b", &["a"]),
        ("c", &["d"]),
        ("d", &["c"]),
    ])?;
    let result = graph.eulerian(no_logging![]);
    assert!(!result.is_eulerian());
    assert_eq!(
        result.violations,
        vec![Violation::MultipleComponents { num_components: 2 }]
    );
    assert!(result.violations[0]
        .display(graph.names())
        .to_string()
        .contains("multiple strongly connected components"));
    Ok(())
}

#[test]
fn test_isolated_vertices_ignored() -> Result<()> {
    let mut builder = GraphBuilder::new();
    builder.add_record(Some("a"), ["b"])?;
    builder.add_record(Some("b"), ["a"])?;
    builder.add_record(None, ["z"])?;
    builder.add_record(Some("y"), Vec::<&str>::new())?;
    let graph = builder.finalize();
    assert_eq!(graph.vertex_count(), 4);
    assert!(graph.eulerian(no_logging![]).is_eulerian());
    Ok(())
}

#[test]
fn test_sink() -> Result<()> {
    // Balanced nowhere and with singleton components
    let graph = build(&[("a", &["b", "c"])])?;
    let result = eulerian(graph.arcs(), no_logging![]);
    assert_eq!(result.violations.len(), 2);
    assert!(matches!(
        result.violations[0],
        Violation::MultipleComponents { num_components: 3 }
    ));
    assert_eq!(result.violations[1].num_omitted(), 0);
    Ok(())
}

#[test]
fn test_many_unbalanced() -> Result<()> {
    let recipients = (0..20).map(|i| format!("r{i:02}")).collect::<Vec<_>>();
    let mut builder = GraphBuilder::new();
    builder.add_record(Some("s"), &recipients)?;
    let graph = builder.finalize();
    let result = graph.eulerian(no_logging![]);
    let violation = &result.violations[1];
    assert_eq!(violation.num_omitted(), 16);
    let text = violation.display(graph.names()).to_string();
    assert!(text.starts_with("21 vertices have indegree != outdegree"));
    assert!(text.contains("Example 1: r00 (indegree: 1, outdegree: 0)"));
    assert!(text.ends_with("... and 16 more unbalanced vertices"));
    Ok(())
}
