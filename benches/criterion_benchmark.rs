use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dsi_progress_logger::prelude::*;
use mailgraph_algo::algo::diameter::{diameter, par_diameter};
use mailgraph_algo::algo::shortest_paths::Dijkstra;
use mailgraph_algo::prelude::*;
use mailgraph_algo::threads;
use rand::{rngs::SmallRng, Rng, SeedableRng};

const NUM_SAMPLES: usize = 10;
const GRAPH_SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_graph(num_nodes: usize, avg_degree: usize) -> CsrGraph {
    let mut rng = SmallRng::seed_from_u64(0);
    let arcs = (0..num_nodes * avg_degree)
        .map(|_| {
            (
                rng.random_range(0..num_nodes),
                rng.random_range(0..num_nodes),
                rng.random_range(1..100),
            )
        })
        .collect::<Vec<_>>();
    CsrGraph::from_arcs(num_nodes, arcs)
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dijkstra");
    group.sampling_mode(criterion::SamplingMode::Flat);
    group.sample_size(NUM_SAMPLES);
    for num_nodes in GRAPH_SIZES {
        let graph = random_graph(num_nodes, 8);
        group.throughput(Throughput::Elements(graph.num_arcs() as u64));
        let mut dijkstra = Dijkstra::new(&graph);

        group.bench_function(BenchmarkId::new("Unbounded", num_nodes), |b| {
            b.iter(|| {
                dijkstra.run(0, None);
                dijkstra.settled().len()
            })
        });

        group.bench_function(BenchmarkId::new("Bounded", num_nodes), |b| {
            b.iter(|| {
                dijkstra.run(0, Some(200));
                dijkstra.settled().len()
            })
        });
    }
    group.finish();
}

fn bench_diameter(c: &mut Criterion) {
    let mut group = c.benchmark_group("Diameter");
    group.sampling_mode(criterion::SamplingMode::Flat);
    group.sample_size(NUM_SAMPLES);
    let threads = threads![];
    // Diameter is quadratic: keep graphs small
    for num_nodes in [500, 2_000] {
        let graph = random_graph(num_nodes, 4);
        group.throughput(Throughput::Elements(num_nodes as u64));

        group.bench_with_input(BenchmarkId::new("Sequential", num_nodes), &graph, |b, g| {
            b.iter(|| diameter(g, no_logging![]).diameter)
        });

        group.bench_with_input(BenchmarkId::new("Parallel", num_nodes), &graph, |b, g| {
            b.iter(|| par_diameter(g, &threads, no_logging![]).diameter)
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dijkstra, bench_diameter);
criterion_main!(benches);
