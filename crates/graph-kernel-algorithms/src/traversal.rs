//! Whole-graph traversals
//!
//! Breadth-first and depth-first walks that report discovery order.

use super::common::{GraphView, NodeId};
use std::collections::VecDeque;

/// Breadth-First Search visitation order
///
/// Follows successors only, so directed views respect edge orientation.
/// Returns `None` when `start` is not part of the view.
pub fn bfs_order(view: &GraphView, start: NodeId) -> Option<Vec<NodeId>> {
    let start_idx = view.index_of(start)?;

    let mut visited = vec![false; view.node_count];
    let mut queue = VecDeque::new();
    let mut order = Vec::new();

    visited[start_idx] = true;
    queue.push_back(start_idx);

    while let Some(current_idx) = queue.pop_front() {
        order.push(view.index_to_node[current_idx]);

        for &next_idx in view.successors(current_idx) {
            if !visited[next_idx] {
                visited[next_idx] = true;
                queue.push_back(next_idx);
            }
        }
    }

    Some(order)
}

/// Depth-First Search visitation order
///
/// Uses an explicit stack, so depth is bounded by heap memory rather than the
/// call stack. Successors are explored in their stored order, which gives the
/// same sequence as the textbook recursive formulation.
pub fn dfs_order(view: &GraphView, start: NodeId) -> Option<Vec<NodeId>> {
    let start_idx = view.index_of(start)?;

    let mut visited = vec![false; view.node_count];
    let mut stack = vec![start_idx];
    let mut order = Vec::new();

    while let Some(current_idx) = stack.pop() {
        if visited[current_idx] {
            continue;
        }
        visited[current_idx] = true;
        order.push(view.index_to_node[current_idx]);

        // Reverse push so the first stored successor is popped first
        for &next_idx in view.successors(current_idx).iter().rev() {
            if !visited[next_idx] {
                stack.push(next_idx);
            }
        }
    }

    Some(order)
}
