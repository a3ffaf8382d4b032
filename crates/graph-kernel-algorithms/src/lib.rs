pub mod common;
pub mod traversal;
pub mod pathfinding;

pub use common::{GraphView, NodeId};
pub use traversal::{bfs_order, dfs_order};
pub use pathfinding::{astar, parallel_astar, PathResult};
