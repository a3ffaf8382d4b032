use anyhow::Result;
use graph_kernel::algo;
use graph_kernel::graph::{EdgeTriple, GraphMode, GraphStore, VertexId};
use graph_kernel::parallel::{CoordinatorConfig, PruningTraversal};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Graph Kernel v{}", graph_kernel::version());
    println!("==========================================");
    println!();

    demo_contraction()?;
    demo_traversal()?;
    demo_search()?;
    demo_pruning_traversal().await?;

    Ok(())
}

fn v(id: u64) -> VertexId {
    VertexId::new(id)
}

fn demo_contraction() -> Result<()> {
    println!("=== Demo 1: Edge Contraction ===");
    let mut store = GraphStore::from_triples(
        GraphMode::undirected().with_weights(true),
        [(1u64, 2u64, 1i64), (2, 3, 1)],
    )?;
    println!("✓ Loaded path 1 - 2 - 3 ({} vertices)", store.vertex_count());

    let inherited = store.contract_edge(v(1), v(2))?;
    println!(
        "✓ Contracted (1, 2): {} vertices left, 1 inherited {} edge(s)",
        store.vertex_count(),
        inherited
    );
    println!("  neighbors of 1: {:?}", store.neighbors_of(v(1))?);
    println!();
    Ok(())
}

fn demo_traversal() -> Result<()> {
    println!("=== Demo 2: Traversal ===");
    let store = GraphStore::from_triples(
        GraphMode::directed(),
        [(1u64, 2u64), (2, 3), (1, 4), (4, 5)],
    )?;

    println!("✓ BFS from 1: {:?}", algo::bfs(&store, v(1))?);
    println!("✓ DFS from 1: {:?}", algo::dfs(&store, v(1))?);
    println!();
    Ok(())
}

fn demo_search() -> Result<()> {
    println!("=== Demo 3: A* Search ===");
    let mut store = GraphStore::new(GraphMode::directed().with_weights(true));
    for (id, h) in [(1, 2.0), (2, 1.0), (3, 0.0)] {
        store.add_vertex(v(id), Some(h))?;
    }
    for triple in [EdgeTriple::new(1, 2, Some(1)), EdgeTriple::new(1, 3, Some(4)), EdgeTriple::new(2, 3, Some(1))] {
        store.add_edge(triple.from.into(), triple.to.into(), triple.weight.map(|w| w as f64))?;
    }

    let outcome = algo::astar(&store, v(1), v(3))?;
    println!("✓ A* 1 -> 3: {}", serde_json::to_string(&outcome)?);

    let parallel = algo::parallel_astar(&store, v(1), v(3))?;
    println!("✓ Parallel A* agrees: {}", parallel == outcome);

    let missing = algo::astar(&store, v(3), v(1))?;
    println!("✓ A* 3 -> 1: {}", serde_json::to_string(&missing)?);
    println!();
    Ok(())
}

async fn demo_pruning_traversal() -> Result<()> {
    println!("=== Demo 4: Pruning Traversal ===");
    let store = GraphStore::from_triples(
        GraphMode::directed(),
        [(1u64, 2u64), (1, 3), (2, 3), (3, 1), (4, 3), (3, 5)],
    )?;
    let before = store.edge_count();

    let traversal = PruningTraversal::new(CoordinatorConfig::default());
    let outcome = traversal.run(store, v(1)).await?;

    println!("✓ Visit order: {:?}", outcome.order);
    println!(
        "✓ Pruned {} of {} edges, {} left",
        outcome.pruned_edges,
        before,
        outcome.store.edge_count()
    );
    Ok(())
}
