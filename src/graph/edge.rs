//! Edge records
//!
//! Directed graphs store an edge per explicitly added orientation. Undirected
//! graphs store each logical edge once, keyed with `from < to`.

use super::types::{VertexId, Weight};
use serde::{Deserialize, Serialize};

/// Lookup key of a stored edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub from: VertexId,
    pub to: VertexId,
}

impl EdgeKey {
    /// Key for the edge `(u, v)` under the given directedness
    pub fn new(u: VertexId, v: VertexId, directed: bool) -> Self {
        if directed || u < v {
            EdgeKey { from: u, to: v }
        } else {
            EdgeKey { from: v, to: u }
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// A stored edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex (the smaller id for undirected edges)
    pub from: VertexId,

    /// Target vertex (the larger id for undirected edges)
    pub to: VertexId,

    /// Weight, present only in weighted graphs
    pub weight: Option<Weight>,
}

impl Edge {
    pub fn new(key: EdgeKey, weight: Option<Weight>) -> Self {
        Edge { from: key.from, to: key.to, weight }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey { from: self.from, to: self.to }
    }
}
