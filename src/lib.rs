//! Graph Kernel
//!
//! An in-memory graph engine with structural edits, traversal, heuristic
//! shortest-path search and a concurrent pruning traversal.
//!
//! # Components
//!
//! - [`graph`]: the vertex/edge store. Directed or undirected and weighted
//!   or unweighted, fixed at construction. Supports add/delete of vertices and
//!   edges plus edge contraction.
//! - [`algo`]: BFS, DFS, A* and parallel A*, run over a CSR snapshot of the
//!   store built by the `graph-kernel-algorithms` crate.
//! - [`parallel`]: a BFS that prunes the inbound edges of each visited node
//!   with one worker per in-neighbor, all going through a single store owner.
//!
//! ## Example Usage
//!
//! ```rust
//! use graph_kernel::graph::{EdgeTriple, GraphMode, GraphStore, VertexId};
//! use graph_kernel::algo;
//!
//! let triples = vec![
//!     EdgeTriple::new(1, 2, Some(1)),
//!     EdgeTriple::new(1, 3, Some(4)),
//!     EdgeTriple::new(2, 3, Some(1)),
//! ];
//! let store = GraphStore::from_triples(GraphMode::directed().with_weights(true), triples).unwrap();
//!
//! let order = algo::bfs(&store, VertexId::new(1)).unwrap();
//! assert_eq!(order.len(), 3);
//!
//! let outcome = algo::astar(&store, VertexId::new(1), VertexId::new(3)).unwrap();
//! assert_eq!(outcome.cost(), Some(2.0));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod parallel;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeTriple, GraphError, GraphMode, GraphResult, GraphStatistics, GraphStore, Vertex,
    VertexId, Weight,
};

pub use algo::{PathResult, SearchOutcome};

pub use parallel::{
    CoordinatorConfig, CoordinatorError, PruningOutcome, PruningTraversal, StoreActor, StoreHandle,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
