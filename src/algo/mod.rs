//! Graph algorithms module
//!
//! Algorithms are implemented in the `graph-kernel-algorithms` crate over a
//! read-only CSR snapshot. This module builds that snapshot from a
//! [`GraphStore`] and maps results back to vertex ids and typed outcomes.

use crate::graph::{GraphError, GraphResult, GraphStore, VertexId};
use graph_kernel_algorithms::{GraphView, NodeId as AlgoNodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub use graph_kernel_algorithms::PathResult;

/// Result of a heuristic search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// A minimum-cost path from start to goal
    Found(PathResult),
    /// The open set emptied without reaching the goal
    Exhausted,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// Vertices along the path, start first
    pub fn path(&self) -> Option<Vec<VertexId>> {
        match self {
            SearchOutcome::Found(result) => Some(to_vertex_ids(&result.path)),
            SearchOutcome::Exhausted => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            SearchOutcome::Found(result) => Some(result.cost),
            SearchOutcome::Exhausted => None,
        }
    }
}

/// Build a GraphView snapshot of the store for algorithm execution
///
/// Vertex order follows creation order and each successor row follows the
/// vertex's stored neighbor order. Undirected edges appear in both rows.
/// Weights are attached only for weighted stores; missing heuristics are zero.
pub fn build_view(store: &GraphStore) -> GraphView {
    // 1. Build index mappings
    let index_to_node: Vec<AlgoNodeId> = store.vertices().map(|id| id.as_u64()).collect();
    let node_to_index: HashMap<AlgoNodeId, usize> = index_to_node
        .iter()
        .enumerate()
        .map(|(idx, &node)| (node, idx))
        .collect();

    let node_count = index_to_node.len();

    // 2. Adjacency rows, weights and heuristics
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut weights: Option<Vec<Vec<f64>>> = if store.is_weighted() {
        Some(vec![Vec::new(); node_count])
    } else {
        None
    };
    let mut heuristics = vec![0.0; node_count];

    for (u_idx, u) in store.vertices().enumerate() {
        let Some(vertex) = store.get_vertex(u) else {
            continue;
        };
        heuristics[u_idx] = vertex.heuristic.unwrap_or(0.0);

        for &w in vertex.out_neighbors() {
            let Some(&w_idx) = node_to_index.get(&w.as_u64()) else {
                continue;
            };
            outgoing[u_idx].push(w_idx);

            if let Some(ref mut w_rows) = weights {
                let weight = store
                    .get_edge(u, w)
                    .and_then(|edge| edge.weight)
                    .unwrap_or(1.0);
                w_rows[u_idx].push(weight);
            }
        }
    }

    // 3. Convert to CSR
    GraphView::from_adjacency_list(index_to_node, outgoing, weights, heuristics)
}

/// Breadth-first visitation order from `start`
pub fn bfs(store: &GraphStore, start: VertexId) -> GraphResult<Vec<VertexId>> {
    let view = build_view(store);
    let order = graph_kernel_algorithms::bfs_order(&view, start.as_u64())
        .ok_or(GraphError::VertexNotFound(start))?;
    debug!("BFS from {} visited {} vertices", start, order.len());
    Ok(to_vertex_ids(&order))
}

/// Depth-first visitation order from `start`
pub fn dfs(store: &GraphStore, start: VertexId) -> GraphResult<Vec<VertexId>> {
    let view = build_view(store);
    let order = graph_kernel_algorithms::dfs_order(&view, start.as_u64())
        .ok_or(GraphError::VertexNotFound(start))?;
    debug!("DFS from {} visited {} vertices", start, order.len());
    Ok(to_vertex_ids(&order))
}

/// A* search from `start` to `goal`.
///
/// Heuristics are assumed admissible; that is a caller precondition and is
/// not checked here.
pub fn astar(store: &GraphStore, start: VertexId, goal: VertexId) -> GraphResult<SearchOutcome> {
    let view = prepare_search(store, start, goal)?;
    let outcome = graph_kernel_algorithms::astar(&view, start.as_u64(), goal.as_u64());
    Ok(finish_search(start, goal, outcome))
}

/// A* search with each node's neighbor relaxations fanned out across the rayon pool
pub fn parallel_astar(
    store: &GraphStore,
    start: VertexId,
    goal: VertexId,
) -> GraphResult<SearchOutcome> {
    let view = prepare_search(store, start, goal)?;
    let outcome = graph_kernel_algorithms::parallel_astar(&view, start.as_u64(), goal.as_u64());
    Ok(finish_search(start, goal, outcome))
}

fn prepare_search(store: &GraphStore, start: VertexId, goal: VertexId) -> GraphResult<GraphView> {
    for id in [start, goal] {
        if !store.contains_vertex(id) {
            return Err(GraphError::VertexNotFound(id));
        }
    }
    if store.edges().any(|edge| edge.weight.is_some_and(|w| w < 0.0)) {
        debug!("Negative-weight edges are skipped by A*");
    }
    Ok(build_view(store))
}

fn finish_search(start: VertexId, goal: VertexId, outcome: Option<PathResult>) -> SearchOutcome {
    match outcome {
        Some(result) => {
            debug!("A* {} -> {}: cost {} over {} vertices", start, goal, result.cost, result.path.len());
            SearchOutcome::Found(result)
        }
        None => {
            debug!("A* {} -> {}: search exhausted", start, goal);
            SearchOutcome::Exhausted
        }
    }
}

fn to_vertex_ids(nodes: &[AlgoNodeId]) -> Vec<VertexId> {
    nodes.iter().map(|&node| VertexId::new(node)).collect()
}
