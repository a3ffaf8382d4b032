//! Pathfinding algorithms
//!
//! A* best-first search over weighted views, plus a variant that fans the
//! neighbor relaxations of each expanded node out across the rayon pool.

use super::common::{GraphView, NodeId};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

/// Open-set entry, ordered by f-score then node id
#[derive(Copy, Clone, PartialEq)]
struct State {
    f_score: f64,
    node: NodeId,
    idx: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap; ties go to the smaller node id
        other
            .f_score
            .partial_cmp(&self.f_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-search bookkeeping shared by the sequential and parallel variants
struct SearchState {
    g_score: Vec<f64>,
    f_score: Vec<f64>,
    came_from: Vec<Option<usize>>,
    open_set: BinaryHeap<State>,
}

impl SearchState {
    fn new(view: &GraphView, source_idx: usize) -> Self {
        let n = view.node_count;
        let mut state = SearchState {
            g_score: vec![f64::INFINITY; n],
            f_score: vec![f64::INFINITY; n],
            came_from: vec![None; n],
            open_set: BinaryHeap::new(),
        };
        state.g_score[source_idx] = 0.0;
        state.f_score[source_idx] = view.heuristic(source_idx);
        state.open_set.push(State {
            f_score: state.f_score[source_idx],
            node: view.index_to_node[source_idx],
            idx: source_idx,
        });
        state
    }

    /// Pop the best live entry, skipping entries superseded by a later improvement
    fn pop(&mut self) -> Option<usize> {
        while let Some(State { f_score, idx, .. }) = self.open_set.pop() {
            if f_score > self.f_score[idx] {
                continue;
            }
            return Some(idx);
        }
        None
    }

    /// Record a better route to `next` through `current`
    fn commit(&mut self, view: &GraphView, current: usize, next: usize, tentative: f64) {
        if tentative >= self.g_score[next] {
            return;
        }
        self.came_from[next] = Some(current);
        self.g_score[next] = tentative;
        self.f_score[next] = tentative + view.heuristic(next);
        self.open_set.push(State {
            f_score: self.f_score[next],
            node: view.index_to_node[next],
            idx: next,
        });
    }

    fn reconstruct(&self, view: &GraphView, source: NodeId, target_idx: usize) -> PathResult {
        let mut path = Vec::new();
        let mut curr = Some(target_idx);
        while let Some(idx) = curr {
            path.push(view.index_to_node[idx]);
            curr = self.came_from[idx];
        }
        path.reverse();
        PathResult {
            source,
            target: view.index_to_node[target_idx],
            path,
            cost: self.g_score[target_idx],
        }
    }
}

/// Cost of the `i`-th outgoing edge; unweighted views cost 1.0 per hop.
/// Negative and non-finite weights are not traversable.
fn edge_cost(weights: Option<&[f64]>, i: usize) -> Option<f64> {
    let weight = weights.map_or(1.0, |w| w[i]);
    (weight.is_finite() && weight >= 0.0).then_some(weight)
}

/// A* Search (Weighted Shortest Path with heuristic guidance)
///
/// Uses edge weights from the view if available, otherwise assumes 1.0.
/// Negative, NaN and infinite weights are ignored. The heuristic is assumed admissible;
/// with an all-zero heuristic this is Dijkstra's algorithm.
///
/// Returns `None` when either endpoint is missing from the view or when the
/// open set empties without reaching `target`.
pub fn astar(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = view.index_of(source)?;
    let target_idx = view.index_of(target)?;

    let mut state = SearchState::new(view, source_idx);

    while let Some(current) = state.pop() {
        if current == target_idx {
            return Some(state.reconstruct(view, source, target_idx));
        }

        let weights = view.weights(current);
        for (i, &next) in view.successors(current).iter().enumerate() {
            let Some(weight) = edge_cost(weights, i) else {
                continue;
            };
            let tentative = state.g_score[current] + weight;
            state.commit(view, current, next, tentative);
        }
    }

    None
}

/// A* Search with parallel neighbor relaxation
///
/// Every relaxation for one expanded node is computed against the same
/// immutable snapshot of g-scores; the improvements are gathered first and
/// committed afterwards in successor order, so the result matches [`astar`].
pub fn parallel_astar(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = view.index_of(source)?;
    let target_idx = view.index_of(target)?;

    let mut state = SearchState::new(view, source_idx);

    while let Some(current) = state.pop() {
        if current == target_idx {
            return Some(state.reconstruct(view, source, target_idx));
        }

        let g_current = state.g_score[current];
        let g_snapshot = &state.g_score;
        let weights = view.weights(current);
        let improvements: Vec<(usize, f64)> = view
            .successors(current)
            .par_iter()
            .enumerate()
            .filter_map(|(i, &next)| {
                let weight = edge_cost(weights, i)?;
                let tentative = g_current + weight;
                (tentative < g_snapshot[next]).then_some((next, tentative))
            })
            .collect();

        for (next, tentative) in improvements {
            state.commit(view, current, next, tentative);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> GraphView {
        // A(1) -> B(2) (1.0), A -> C(3) (4.0), B -> C (1.0)
        GraphView::from_adjacency_list(
            vec![1, 2, 3],
            vec![vec![1, 2], vec![2], vec![]],
            Some(vec![vec![1.0, 4.0], vec![1.0], vec![]]),
            vec![0.0, 0.0, 0.0],
        )
    }

    #[test]
    fn test_astar_zero_heuristic() {
        let view = abc();
        let result = astar(&view, 1, 3).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.cost, 2.0);
    }

    #[test]
    fn test_astar_unweighted_counts_hops() {
        let view = GraphView::from_adjacency_list(
            vec![1, 2, 3],
            vec![vec![1], vec![2], vec![]],
            None,
            vec![],
        );
        let result = astar(&view, 1, 3).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.cost, 2.0);
    }

    #[test]
    fn test_astar_no_path() {
        let view = abc();
        assert!(astar(&view, 3, 1).is_none());
    }

    #[test]
    fn test_astar_source_is_target() {
        let view = abc();
        let result = astar(&view, 2, 2).unwrap();
        assert_eq!(result.path, vec![2]);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_astar_admissible_heuristic() {
        // 1 -> 2 (1), 1 -> 3 (3), 2 -> 4 (2), 2 -> 5 (4), 3 -> 4 (1), 3 -> 5 (7),
        // 4 -> 6 (5), 5 -> 6 (3); heuristic is a lower bound on remaining cost
        let view = GraphView::from_adjacency_list(
            vec![1, 2, 3, 4, 5, 6],
            vec![vec![1, 2], vec![3, 4], vec![3, 4], vec![5], vec![5], vec![]],
            Some(vec![
                vec![1.0, 3.0],
                vec![2.0, 4.0],
                vec![1.0, 7.0],
                vec![5.0],
                vec![3.0],
                vec![],
            ]),
            vec![5.0, 4.0, 2.0, 3.0, 1.0, 0.0],
        );

        let result = astar(&view, 1, 6).unwrap();
        assert_eq!(result.cost, 8.0);
        assert_eq!(result.path.first(), Some(&1));
        assert_eq!(result.path.last(), Some(&6));
    }

    #[test]
    fn test_tie_break_prefers_smaller_id() {
        // Two equal-cost routes 1 -> 2 -> 4 and 1 -> 3 -> 4
        let view = GraphView::from_adjacency_list(
            vec![1, 3, 2, 4],
            vec![vec![1, 2], vec![3], vec![3], vec![]],
            Some(vec![vec![1.0, 1.0], vec![1.0], vec![1.0], vec![]]),
            vec![],
        );
        let result = astar(&view, 1, 4).unwrap();
        assert_eq!(result.path, vec![1, 2, 4]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let view = abc();
        let sequential = astar(&view, 1, 3).unwrap();
        let parallel = parallel_astar(&view, 1, 3).unwrap();
        assert_eq!(sequential, parallel);
        assert!(parallel_astar(&view, 3, 1).is_none());
    }

    #[test]
    fn test_negative_weights_skipped() {
        let view = GraphView::from_adjacency_list(
            vec![1, 2, 3],
            vec![vec![1, 2], vec![2], vec![]],
            Some(vec![vec![-5.0, 10.0], vec![1.0], vec![]]),
            vec![],
        );
        let result = astar(&view, 1, 3).unwrap();
        assert_eq!(result.path, vec![1, 3]);
        assert_eq!(result.cost, 10.0);
    }

    #[test]
    fn test_non_finite_weights_skipped() {
        // 1 -> 2 (NaN), 1 -> 3 (5.0), 2 -> 3 (1.0), 1 -> 4 (inf)
        let view = GraphView::from_adjacency_list(
            vec![1, 2, 3, 4],
            vec![vec![1, 2, 3], vec![2], vec![], vec![]],
            Some(vec![vec![f64::NAN, 5.0, f64::INFINITY], vec![1.0], vec![], vec![]]),
            vec![],
        );

        for result in [astar(&view, 1, 3), parallel_astar(&view, 1, 3)] {
            let result = result.unwrap();
            assert_eq!(result.path, vec![1, 3]);
            assert_eq!(result.cost, 5.0);
        }
        assert!(astar(&view, 1, 4).is_none());
    }
}
