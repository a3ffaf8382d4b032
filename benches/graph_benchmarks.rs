use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use graph_kernel::algo;
use graph_kernel::graph::{GraphMode, GraphStore, VertexId};
use graph_kernel::parallel::PruningTraversal;

/// Layered graph: `width` vertices per layer, each wired to three vertices of the next
fn layered(mode: GraphMode, layers: u64, width: u64) -> GraphStore {
    let mut store = GraphStore::new(mode);
    for layer in 0..layers.saturating_sub(1) {
        for i in 0..width {
            let from = VertexId::new(layer * width + i);
            for step in 0..3 {
                let to = VertexId::new((layer + 1) * width + (i + step) % width);
                let weight = ((i + step) % 7 + 1) as f64;
                store.add_edge(from, to, Some(weight)).unwrap();
            }
        }
    }
    store
}

/// Benchmark edge insertion throughput
fn bench_edge_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_insertion");

    for size in [100u64, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut store = GraphStore::new(GraphMode::undirected().with_weights(true));
                for i in 0..size {
                    store
                        .add_edge(VertexId::new(i), VertexId::new((i * 7 + 1) % size), Some(1.0))
                        .ok();
                }
                criterion::black_box(store.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark contracting a chain down to a single vertex
fn bench_contraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("contraction");

    for size in [100u64, 1000].iter() {
        let mut chain = GraphStore::new(GraphMode::undirected().with_weights(true));
        for i in 0..size - 1 {
            chain.add_edge(VertexId::new(i), VertexId::new(i + 1), Some(1.0)).unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_batched(
                || chain.clone(),
                |mut store| {
                    for i in 1..size {
                        store.contract_edge(VertexId::new(0), VertexId::new(i)).unwrap();
                    }
                    criterion::black_box(store.vertex_count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

/// Benchmark BFS and DFS over a layered graph
fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    let store = layered(GraphMode::directed(), 50, 200);
    let start = VertexId::new(0);

    group.bench_function("bfs", |b| {
        b.iter(|| criterion::black_box(algo::bfs(&store, start).unwrap().len()));
    });

    group.bench_function("dfs", |b| {
        b.iter(|| criterion::black_box(algo::dfs(&store, start).unwrap().len()));
    });

    group.finish();
}

/// Benchmark sequential vs parallel A*
fn bench_astar(c: &mut Criterion) {
    let mut group = c.benchmark_group("astar");
    let layers = 40;
    let width = 250;
    let store = layered(GraphMode::directed().with_weights(true), layers, width);
    let start = VertexId::new(0);
    let goal = VertexId::new((layers - 1) * width + width / 2);

    group.bench_function("sequential", |b| {
        b.iter(|| criterion::black_box(algo::astar(&store, start, goal).unwrap()));
    });

    group.bench_function("parallel", |b| {
        b.iter(|| criterion::black_box(algo::parallel_astar(&store, start, goal).unwrap()));
    });

    group.finish();
}

/// Benchmark the pruning traversal through the store actor
fn bench_pruning_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("pruning_traversal");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let traversal = PruningTraversal::default();

    for width in [20u64, 100].iter() {
        let store = layered(GraphMode::directed(), 20, *width);

        group.bench_with_input(BenchmarkId::from_parameter(width), width, |b, _| {
            b.iter_batched(
                || store.clone(),
                |store| {
                    let outcome = runtime.block_on(traversal.run(store, VertexId::new(0))).unwrap();
                    criterion::black_box(outcome.pruned_edges);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_edge_insertion,
    bench_contraction,
    bench_traversal,
    bench_astar,
    bench_pruning_traversal,
);
criterion_main!(benches);
