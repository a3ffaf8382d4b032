//! Core type definitions for the graph engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge weight
pub type Weight = f64;

/// Unique identifier for a vertex
///
/// The total order on ids drives undirected edge canonicalization and A*
/// tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        VertexId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({})", self.0)
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        VertexId(id)
    }
}

/// Graph-level modes, fixed when the store is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMode {
    /// Edges have an orientation
    pub directed: bool,
    /// Edges carry a weight
    pub weighted: bool,
}

impl GraphMode {
    pub fn directed() -> Self {
        GraphMode { directed: true, weighted: false }
    }

    pub fn undirected() -> Self {
        GraphMode { directed: false, weighted: false }
    }

    pub fn with_weights(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }
}

impl Default for GraphMode {
    fn default() -> Self {
        GraphMode::directed()
    }
}

/// One `(from, to, weight?)` line from an external edge-list loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeTriple {
    pub from: u64,
    pub to: u64,
    pub weight: Option<i64>,
}

impl EdgeTriple {
    pub fn new(from: u64, to: u64, weight: Option<i64>) -> Self {
        EdgeTriple { from, to, weight }
    }
}

impl From<(u64, u64)> for EdgeTriple {
    fn from((from, to): (u64, u64)) -> Self {
        EdgeTriple::new(from, to, None)
    }
}

impl From<(u64, u64, i64)> for EdgeTriple {
    fn from((from, to, weight): (u64, u64, i64)) -> Self {
        EdgeTriple::new(from, to, Some(weight))
    }
}
