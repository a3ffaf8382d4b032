//! Pruning breadth-first traversal
//!
//! Each dequeued node first has all of its inbound edges deleted by a batch
//! of concurrent workers, one per in-neighbor. The batch is joined before the
//! node's out-neighbors are read, and only then does the walk move on. The
//! workers reach the store through a [`StoreActor`], which applies their
//! deletions one at a time.

use super::actor::{StoreActor, StoreHandle};
use crate::graph::{Edge, GraphError, GraphStore, VertexId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

/// Errors raised by a coordinated traversal
#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Store actor is no longer running")]
    StoreUnavailable,

    #[error("Pruning worker failed: {0}")]
    WorkerFailed(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Coordinator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Capacity of the request queue in front of the store actor
    pub channel_capacity: usize,
    /// Worker threads for [`PruningTraversal::run_blocking`] (None = tokio default)
    pub worker_threads: Option<usize>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
            worker_threads: None,
        }
    }
}

/// Result of a pruning traversal
#[derive(Debug)]
pub struct PruningOutcome {
    /// Vertices in discovery order
    pub order: Vec<VertexId>,
    /// The store after pruning, handed back by the actor
    pub store: GraphStore,
    /// Number of inbound edges deleted
    pub pruned_edges: usize,
}

/// BFS that deletes the inbound edges of every node it visits
#[derive(Debug, Clone, Default)]
pub struct PruningTraversal {
    config: CoordinatorConfig,
}

impl PruningTraversal {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Run the traversal from `start`, taking the store for the session.
    ///
    /// Only directed stores are accepted: in an undirected store every
    /// neighbor is an in-neighbor, so pruning would cut the frontier off.
    pub async fn run(&self, store: GraphStore, start: VertexId) -> Result<PruningOutcome, CoordinatorError> {
        if !store.is_directed() {
            return Err(GraphError::InvalidOperation(
                "pruning traversal requires a directed graph".to_string(),
            )
            .into());
        }
        if !store.contains_vertex(start) {
            return Err(GraphError::VertexNotFound(start).into());
        }

        let (handle, owner) = StoreActor::spawn(store, self.config.channel_capacity);
        let walked = walk(&handle, start).await;

        // The actor returns the store once the last handle is gone
        drop(handle);
        let store = owner
            .await
            .map_err(|e| CoordinatorError::Runtime(format!("store actor failed: {}", e)))?;

        let (order, pruned_edges) = walked?;
        info!(
            "Pruning traversal from {} visited {} vertices, pruned {} edges",
            start,
            order.len(),
            pruned_edges
        );

        Ok(PruningOutcome {
            order,
            store,
            pruned_edges,
        })
    }

    /// Run the traversal on a dedicated multi-thread runtime.
    ///
    /// For synchronous callers only: called from inside a tokio runtime it
    /// returns [`CoordinatorError::Runtime`] instead of nesting runtimes.
    pub fn run_blocking(&self, store: GraphStore, start: VertexId) -> Result<PruningOutcome, CoordinatorError> {
        if Handle::try_current().is_ok() {
            return Err(CoordinatorError::Runtime(
                "run_blocking called from within a tokio runtime; use run().await".to_string(),
            ));
        }

        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.enable_all();
        if let Some(threads) = self.config.worker_threads {
            builder.worker_threads(threads.max(1));
        }
        let runtime = builder
            .build()
            .map_err(|e| CoordinatorError::Runtime(e.to_string()))?;

        runtime.block_on(self.run(store, start))
    }
}

async fn walk(handle: &StoreHandle, start: VertexId) -> Result<(Vec<VertexId>, usize), CoordinatorError> {
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    let mut order = Vec::new();
    let mut pruned = 0;

    visited.insert(start);
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        order.push(node);

        pruned += prune_inbound(handle, node).await?;

        for next in handle.out_neighbors(node).await? {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    Ok((order, pruned))
}

/// Delete every edge into `node`, one worker per in-neighbor, and wait for all of them
async fn prune_inbound(handle: &StoreHandle, node: VertexId) -> Result<usize, CoordinatorError> {
    let sources = handle.in_neighbors(node).await?;
    if sources.is_empty() {
        return Ok(0);
    }
    prune_edges(handle, sources, node).await
}

/// Fan out one `delete_edge(source, node)` worker per source and join them all.
/// The first failure is returned; dropping the set aborts the rest.
async fn prune_edges(handle: &StoreHandle, sources: Vec<VertexId>, node: VertexId) -> Result<usize, CoordinatorError> {
    let mut workers = JoinSet::new();
    for source in sources {
        let handle = handle.clone();
        workers.spawn(async move { handle.delete_edge(source, node).await });
    }

    let mut pruned = 0;
    while let Some(joined) = workers.join_next().await {
        if let Err(e) = worker_result(joined) {
            warn!("Pruning inbound edges of {} failed: {}", node, e);
            return Err(e);
        }
        pruned += 1;
    }

    debug!("Pruned {} inbound edges of {}", pruned, node);
    Ok(pruned)
}

/// Flatten a joined worker: a panicked or cancelled task becomes `WorkerFailed`
fn worker_result(joined: Result<Result<Edge, CoordinatorError>, JoinError>) -> Result<Edge, CoordinatorError> {
    joined.unwrap_or_else(|e| Err(CoordinatorError::WorkerFailed(e.to_string())))
}
