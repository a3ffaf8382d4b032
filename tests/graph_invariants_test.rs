use graph_kernel::graph::{EdgeTriple, GraphError, GraphMode, GraphStore, VertexId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn v(id: u64) -> VertexId {
    VertexId::new(id)
}

/// Checks every externally observable invariant through the public API
fn assert_consistent(store: &GraphStore) {
    store.check_invariants().unwrap();

    let ids: Vec<VertexId> = store.vertices().collect();
    for &a in &ids {
        let neighbors = store.neighbors_of(a).unwrap();
        assert_eq!(store.degree_of(a).unwrap(), neighbors.len(), "degree of {}", a);
        assert!(!neighbors.contains(&a), "self-loop at {}", a);
        assert!(!store.contains_edge(a, a));

        for &b in &neighbors {
            assert!(store.contains_vertex(b), "{} references missing {}", a, b);
        }

        if !store.is_directed() {
            for &b in &ids {
                assert_eq!(
                    store.are_neighbors(a, b).unwrap(),
                    store.are_neighbors(b, a).unwrap(),
                    "asymmetric pair ({}, {})",
                    a,
                    b
                );
            }
        }
    }

    for edge in store.edges() {
        assert!(store.contains_vertex(edge.from));
        assert!(store.contains_vertex(edge.to));
        assert_ne!(edge.from, edge.to);
    }
}

/// Applies a seeded sequence of random edits, checking invariants after each one
fn run_random_edits(mode: GraphMode, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = GraphStore::new(mode);

    for _ in 0..400 {
        let a = v(rng.gen_range(0..12));
        let b = v(rng.gen_range(0..12));

        match rng.gen_range(0..10) {
            0..=4 => {
                let result = store.add_edge(a, b, Some(rng.gen_range(1..10) as f64));
                if a == b {
                    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
                } else {
                    result.unwrap();
                }
            }
            5 => {
                let existed = store.contains_edge(a, b);
                assert_eq!(store.delete_edge(a, b).is_ok(), existed);
            }
            6 => {
                let existed = store.contains_vertex(a);
                assert_eq!(store.delete_vertex(a).is_ok(), existed);
            }
            7 | 8 => {
                if a != b && store.contains_edge(a, b) {
                    let before = store.vertex_count();
                    store.contract_edge(a, b).unwrap();
                    assert_eq!(store.vertex_count(), before - 1);
                    assert!(!store.contains_edge(a, a));
                    assert!(!store.contains_vertex(b));
                }
            }
            _ => {
                store.add_vertex(a, None).unwrap();
            }
        }

        assert_consistent(&store);
    }
}

#[test]
fn test_random_edits_undirected() {
    for seed in 0..8 {
        run_random_edits(GraphMode::undirected().with_weights(true), seed);
    }
}

#[test]
fn test_random_edits_directed() {
    for seed in 0..8 {
        run_random_edits(GraphMode::directed().with_weights(true), seed);
    }
}

#[test]
fn test_repeated_add_edge_keeps_count() {
    for mode in [GraphMode::directed(), GraphMode::undirected()] {
        let mut store = GraphStore::new(mode.with_weights(true));
        assert!(store.add_edge(v(1), v(2), Some(3.0)).unwrap());
        for _ in 0..5 {
            assert!(!store.add_edge(v(1), v(2), Some(3.0)).unwrap());
        }
        assert_eq!(store.edge_count(), 1);
        assert_consistent(&store);
    }
}

#[test]
fn test_undirected_reverse_insert_is_duplicate() {
    let mut store = GraphStore::new(GraphMode::undirected());
    assert!(store.add_edge(v(2), v(1), None).unwrap());
    assert!(!store.add_edge(v(1), v(2), None).unwrap());
    assert_eq!(store.edge_count(), 1);

    let edge = store.edges().next().unwrap();
    assert_eq!((edge.from, edge.to), (v(1), v(2)));
}

#[test]
fn test_contraction_on_star() {
    // Hub 0 joined to 1..=6, plus a few rim edges
    let mut triples: Vec<EdgeTriple> = (1..=6).map(|i| EdgeTriple::new(0, i, Some(1))).collect();
    triples.push(EdgeTriple::new(1, 2, Some(5)));
    triples.push(EdgeTriple::new(2, 3, Some(5)));
    let mut store = GraphStore::from_triples(GraphMode::undirected().with_weights(true), triples).unwrap();

    store.contract_edge(v(0), v(2)).unwrap();
    assert_eq!(store.vertex_count(), 6);
    // 0 already reached 1 and 3, so nothing new is inherited
    assert_eq!(store.degree_of(v(0)).unwrap(), 5);
    assert_eq!(store.edge_weight(v(0), v(1)).unwrap(), Some(1.0));
    assert_consistent(&store);

    // Contract everything into the hub
    for i in [1, 3, 4, 5, 6] {
        store.contract_edge(v(0), v(i)).unwrap();
        assert_consistent(&store);
    }
    assert_eq!(store.vertex_count(), 1);
    assert_eq!(store.edge_count(), 0);
}

#[test]
fn test_scenario_contract_path() {
    let mut store = GraphStore::from_triples(
        GraphMode::undirected().with_weights(true),
        [(1u64, 2u64, 1i64), (2, 3, 1)],
    )
    .unwrap();

    store.contract_edge(v(1), v(2)).unwrap();

    assert_eq!(store.vertex_count(), 2);
    assert!(store.are_neighbors(v(1), v(3)).unwrap());
    assert!(!store.contains_edge(v(1), v(1)));
    assert_consistent(&store);
}

#[test]
fn test_scenario_delete_missing_edge() {
    let mut store = GraphStore::from_triples(GraphMode::directed(), [(1u64, 3u64)]).unwrap();
    store.add_vertex(v(2), None).unwrap();

    assert_eq!(store.delete_edge(v(1), v(2)), Err(GraphError::EdgeNotFound(v(1), v(2))));
    // Directed lookup only matches the stored orientation
    assert_eq!(store.delete_edge(v(3), v(1)), Err(GraphError::EdgeNotFound(v(3), v(1))));
    assert_eq!(store.edge_count(), 1);
}

#[test]
fn test_scenario_add_vertex_twice() {
    let mut store = GraphStore::default();
    assert!(store.add_vertex(v(5), Some(2.0)).unwrap());
    assert!(!store.add_vertex(v(5), Some(9.0)).unwrap());

    assert_eq!(store.vertex_count(), 1);
    assert_eq!(store.heuristic(v(5)).unwrap(), Some(2.0));
}

#[test]
fn test_queries_on_unknown_vertex() {
    let store = GraphStore::from_triples(GraphMode::undirected(), [(1u64, 2u64)]).unwrap();

    assert_eq!(store.degree_of(v(9)), Err(GraphError::VertexNotFound(v(9))));
    assert_eq!(store.neighbors_of(v(9)), Err(GraphError::VertexNotFound(v(9))));
    assert_eq!(store.are_neighbors(v(1), v(9)), Err(GraphError::VertexNotFound(v(9))));
}
