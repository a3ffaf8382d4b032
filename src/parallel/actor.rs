//! Single-owner access to a shared graph store
//!
//! One tokio task owns the [`GraphStore`] and applies requests one at a time
//! in arrival order. Workers hold a cloneable [`StoreHandle`] and never touch
//! the store directly, so concurrent mutations are serialized by the channel.

use super::coordinator::CoordinatorError;
use crate::graph::{Edge, GraphResult, GraphStore, VertexId};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

/// Operations the owner task performs on behalf of workers
#[derive(Debug)]
pub enum StoreRequest {
    InNeighbors {
        vertex: VertexId,
        reply: oneshot::Sender<GraphResult<Vec<VertexId>>>,
    },
    OutNeighbors {
        vertex: VertexId,
        reply: oneshot::Sender<GraphResult<Vec<VertexId>>>,
    },
    DeleteEdge {
        from: VertexId,
        to: VertexId,
        reply: oneshot::Sender<GraphResult<Edge>>,
    },
}

/// The task that exclusively owns the store for one session
pub struct StoreActor {
    store: GraphStore,
    receiver: mpsc::Receiver<StoreRequest>,
    processed: u64,
}

impl StoreActor {
    /// Move `store` into a new owner task.
    ///
    /// The task runs until every handle is dropped, then yields the store
    /// back through the returned join handle.
    pub fn spawn(store: GraphStore, channel_capacity: usize) -> (StoreHandle, JoinHandle<GraphStore>) {
        let (sender, receiver) = mpsc::channel(channel_capacity.max(1));
        let actor = StoreActor {
            store,
            receiver,
            processed: 0,
        };
        let owner = tokio::spawn(actor.run());
        (StoreHandle { sender }, owner)
    }

    async fn run(mut self) -> GraphStore {
        debug!(
            "Store actor started with {} vertices, {} edges",
            self.store.vertex_count(),
            self.store.edge_count()
        );

        while let Some(request) = self.receiver.recv().await {
            self.handle(request);
            self.processed += 1;
        }

        debug!("Store actor stopped after {} requests", self.processed);
        self.store
    }

    fn handle(&mut self, request: StoreRequest) {
        // A dropped reply receiver means the requester gave up; nothing to report
        match request {
            StoreRequest::InNeighbors { vertex, reply } => {
                let _ = reply.send(self.store.in_neighbors(vertex));
            }
            StoreRequest::OutNeighbors { vertex, reply } => {
                let _ = reply.send(self.store.out_neighbors(vertex));
            }
            StoreRequest::DeleteEdge { from, to, reply } => {
                let _ = reply.send(self.store.delete_edge(from, to));
            }
        }
    }
}

/// Cloneable client side of a [`StoreActor`]
#[derive(Debug, Clone)]
pub struct StoreHandle {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreHandle {
    pub async fn in_neighbors(&self, vertex: VertexId) -> Result<Vec<VertexId>, CoordinatorError> {
        let neighbors = self
            .request(|reply| StoreRequest::InNeighbors { vertex, reply })
            .await?;
        Ok(neighbors?)
    }

    pub async fn out_neighbors(&self, vertex: VertexId) -> Result<Vec<VertexId>, CoordinatorError> {
        let neighbors = self
            .request(|reply| StoreRequest::OutNeighbors { vertex, reply })
            .await?;
        Ok(neighbors?)
    }

    pub async fn delete_edge(&self, from: VertexId, to: VertexId) -> Result<Edge, CoordinatorError> {
        let edge = self
            .request(|reply| StoreRequest::DeleteEdge { from, to, reply })
            .await?;
        Ok(edge?)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> StoreRequest,
    ) -> Result<T, CoordinatorError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(build(reply))
            .await
            .map_err(|_| CoordinatorError::StoreUnavailable)?;
        response.await.map_err(|_| CoordinatorError::StoreUnavailable)
    }
}
