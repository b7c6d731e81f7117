use dsi_progress_logger::prelude::*;
use mailgraph_algo::algo::sccs::{kosaraju, reverse_finishing_order, Sccs};
use mailgraph_algo::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn unit_graph(num_nodes: usize, arcs: &[(usize, usize)]) -> CsrGraph {
    CsrGraph::from_arcs(num_nodes, arcs.iter().map(|&(x, y)| (x, y, 1)))
}

fn sccs_of(graph: &CsrGraph) -> impl Sccs {
    kosaraju(graph, graph.transpose(), no_logging![])
}

#[test]
fn test_buckets() {
    let arcs = [
        (0, 0),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 3),
        (2, 4),
        (2, 5),
        (3, 4),
        (4, 3),
        (5, 5),
        (5, 6),
        (5, 7),
        (5, 8),
        (6, 7),
        (8, 7),
    ];
    let graph = unit_graph(9, &arcs);
    let mut components = sccs_of(&graph);

    assert_eq!(components.num_components(), 7);
    assert_eq!(components.components()[3], components.components()[4]);
    assert_eq!(components.components()[1], components.components()[2]);

    components.sort_by_size();
    assert_eq!(
        components.compute_sizes(),
        vec![2, 2, 1, 1, 1, 1, 1].into_boxed_slice()
    );
}

#[test]
fn test_buckets_2() {
    let graph = unit_graph(4, &[(0, 1), (1, 2), (2, 0), (1, 3)]);
    let mut components = sccs_of(&graph);
    components.sort_by_size();
    assert_eq!(components.compute_sizes(), vec![3, 1].into_boxed_slice());
}

#[test]
fn test_cycle() {
    let graph = unit_graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
    let components = sccs_of(&graph);
    assert_eq!(components.compute_sizes(), vec![4].into_boxed_slice());
}

#[test]
fn test_complete_graph() {
    let mut arcs = vec![];
    for i in 0..5 {
        for j in 0..5 {
            if i != j {
                arcs.push((i, j));
            }
        }
    }
    let graph = unit_graph(5, &arcs);
    assert_eq!(sccs_of(&graph).num_components(), 1);
}

#[test]
fn test_no_arcs() {
    let graph = unit_graph(4, &[]);
    let components = sccs_of(&graph);
    assert_eq!(components.num_components(), 4);
    assert_eq!(
        components.compute_sizes(),
        vec![1, 1, 1, 1].into_boxed_slice()
    );
}

#[test]
fn test_top_sort_of_dag() {
    let graph = unit_graph(4, &[(0, 1), (0, 2), (2, 3), (1, 3)]);
    assert_eq!(
        reverse_finishing_order(&graph, no_logging![]),
        vec![0, 2, 1, 3].into_boxed_slice()
    );
}

#[test]
fn test_long_cycle() {
    // Deep enough to overflow a recursive visit
    let n = 500_000;
    let graph = unit_graph(n, &(0..n).map(|x| (x, (x + 1) % n)).collect::<Vec<_>>());
    assert_eq!(sccs_of(&graph).num_components(), 1);
}

/// Nodes reachable from `root`, by a plain worklist.
fn reachable(graph: &CsrGraph, root: usize) -> Vec<bool> {
    let mut seen = vec![false; graph.num_nodes()];
    let mut stack = vec![root];
    seen[root] = true;
    while let Some(x) = stack.pop() {
        for (y, _) in graph.successors(x) {
            if !seen[y] {
                seen[y] = true;
                stack.push(y);
            }
        }
    }
    seen
}

#[test]
fn test_against_reachability() {
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..100 {
        let n = rng.random_range(1..=20);
        let num_arcs = rng.random_range(0..40);
        let arcs = (0..num_arcs)
            .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
            .collect::<Vec<_>>();
        let graph = unit_graph(n, &arcs);
        let components = sccs_of(&graph);
        let reach = (0..n).map(|x| reachable(&graph, x)).collect::<Vec<_>>();

        for x in 0..n {
            for y in 0..n {
                let same = components.components()[x] == components.components()[y];
                assert_eq!(same, reach[x][y] && reach[y][x], "nodes {x} and {y}");
            }
        }
    }
}
