//! Core graph engine
//!
//! This module implements the mutable vertex/edge store:
//! - Directed or undirected, weighted or unweighted, fixed per store
//! - At most one edge per endpoint pair, never a self-loop
//! - Structural edits: add/delete vertex, add/delete edge, edge contraction

pub mod contract;
pub mod edge;
pub mod store;
pub mod types;
pub mod vertex;

// Re-export main types
pub use edge::{Edge, EdgeKey};
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{EdgeTriple, GraphMode, VertexId, Weight};
pub use vertex::{Adjacency, NeighborSet, Vertex};
