//! Edge contraction
//!
//! Merging `v` into `u` keeps every external connection of `v`. When `u`
//! already reaches a neighbor `w` of `v`, the existing `u`-`w` edge and its
//! weight survive and the edge through `v` is dropped.

use super::edge::EdgeKey;
use super::store::{GraphError, GraphResult, GraphStore};
use super::types::VertexId;
use tracing::debug;

impl GraphStore {
    /// Contract the stored edge `(u, v)`, merging `v` into `u`.
    ///
    /// Returns how many edges `u` inherited from `v`. The vertex count drops
    /// by exactly one and no self-loop is created at `u`.
    pub fn contract_edge(&mut self, u: VertexId, v: VertexId) -> GraphResult<usize> {
        if u == v {
            return Err(GraphError::InvalidOperation(format!(
                "cannot contract {} into itself",
                u
            )));
        }

        let key = self.key(u, v);
        if self.remove_edge(key).is_none() {
            return Err(GraphError::EdgeNotFound(u, v));
        }

        let directed = self.is_directed();
        let mut inherited = 0;

        // v -> w becomes u -> w (undirected: every neighbor of v)
        for w in self.out_neighbors(v)? {
            if w == u {
                continue;
            }
            if self.redirect(self.key(v, w), self.key(u, w)) {
                inherited += 1;
            }
        }

        // w -> v becomes w -> u
        if directed {
            for w in self.in_neighbors(v)? {
                if w == u {
                    continue;
                }
                if self.redirect(EdgeKey::new(w, v, true), EdgeKey::new(w, u, true)) {
                    inherited += 1;
                }
            }
        }

        // Drops any remaining edge between u and v (the reverse orientation)
        self.delete_vertex(v)?;

        debug!("Contracted ({}, {}): {} edges inherited", u, v, inherited);
        Ok(inherited)
    }

    /// Move the edge `stale` onto `replacement` unless `replacement` is already stored
    fn redirect(&mut self, stale: EdgeKey, replacement: EdgeKey) -> bool {
        let Some(edge) = self.remove_edge(stale) else {
            return false;
        };
        if self.contains_edge(replacement.from, replacement.to) {
            return false;
        }
        self.insert_edge(replacement, edge.weight);
        true
    }
}
