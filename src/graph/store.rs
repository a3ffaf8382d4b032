//! In-memory graph storage implementation
//!
//! Vertices and edges live in insertion-ordered hash tables:
//! - vertices: VertexId -> Vertex (adjacency sets live inside the vertex)
//! - edges: EdgeKey -> Edge (one entry per logical edge)
//!
//! Every public mutation either completes fully or fails before touching
//! anything, so adjacency sets, degree counters and the edge table always agree.

use super::edge::{Edge, EdgeKey};
use super::types::{EdgeTriple, GraphMode, VertexId, Weight};
use super::vertex::{Adjacency, Vertex};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("Edge ({0}, {1}) not found")]
    EdgeNotFound(VertexId, VertexId),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Summary numbers for a store
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStatistics {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
}

/// In-memory graph storage
///
/// Directedness and weightedness are fixed at construction. The store is a
/// plain single-writer structure; share it across tasks only through
/// [`crate::parallel::StoreActor`].
#[derive(Debug, Clone)]
pub struct GraphStore {
    mode: GraphMode,

    /// Vertex table in creation order
    vertices: FxIndexMap<VertexId, Vertex>,

    /// Edge table keyed by canonical endpoint pair
    edges: FxIndexMap<EdgeKey, Edge>,
}

impl Default for GraphStore {
    fn default() -> Self {
        GraphStore::new(GraphMode::default())
    }
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new(mode: GraphMode) -> Self {
        GraphStore {
            mode,
            vertices: FxIndexMap::default(),
            edges: FxIndexMap::default(),
        }
    }

    /// Build a store from loader triples, adding each edge in order
    pub fn from_triples<I, T>(mode: GraphMode, triples: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<EdgeTriple>,
    {
        let mut store = GraphStore::new(mode);
        for triple in triples {
            let EdgeTriple { from, to, weight } = triple.into();
            store.add_edge(from.into(), to.into(), weight.map(|w| w as Weight))?;
        }
        debug!(
            "Loaded {} vertices and {} edges from triples",
            store.vertex_count(),
            store.edge_count()
        );
        Ok(store)
    }

    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    pub fn is_directed(&self) -> bool {
        self.mode.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.mode.weighted
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of logical edges (an undirected edge counts once)
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertex ids in creation order
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Stored edges in storage order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Whether `(u, v)` is stored; undirected graphs accept either order
    pub fn contains_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.edges.contains_key(&self.key(u, v))
    }

    pub fn get_edge(&self, u: VertexId, v: VertexId) -> Option<&Edge> {
        self.edges.get(&self.key(u, v))
    }

    /// Add a vertex; a no-op returning `false` if the id is already present
    pub fn add_vertex(&mut self, id: VertexId, heuristic: Option<f64>) -> GraphResult<bool> {
        if let Some(h) = heuristic {
            validate_heuristic(h)?;
        }
        if self.vertices.contains_key(&id) {
            return Ok(false);
        }
        self.vertices
            .insert(id, Vertex::new(id, heuristic, self.mode.directed));
        Ok(true)
    }

    pub fn heuristic(&self, id: VertexId) -> GraphResult<Option<f64>> {
        Ok(self.vertex(id)?.heuristic)
    }

    /// Replace the heuristic estimate of an existing vertex
    pub fn set_heuristic(&mut self, id: VertexId, heuristic: f64) -> GraphResult<()> {
        validate_heuristic(heuristic)?;
        let vertex = self
            .vertices
            .get_mut(&id)
            .ok_or(GraphError::VertexNotFound(id))?;
        vertex.heuristic = Some(heuristic);
        Ok(())
    }

    /// Add an edge, creating missing endpoints.
    ///
    /// Returns `false` without changing anything when the logical edge already
    /// exists. In a weighted graph an absent weight is stored as `0.0`; in an
    /// unweighted graph any weight is dropped. NaN and infinite weights are
    /// rejected in either mode.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Option<Weight>) -> GraphResult<bool> {
        if u == v {
            return Err(GraphError::InvalidOperation(format!(
                "self-loop on {} is not allowed",
                u
            )));
        }
        if let Some(w) = weight {
            validate_weight(u, v, w)?;
        }

        self.add_vertex(u, None)?;
        self.add_vertex(v, None)?;

        let key = self.key(u, v);
        if self.edges.contains_key(&key) {
            debug!("Ignoring duplicate edge ({}, {})", key.from, key.to);
            return Ok(false);
        }

        let weight = if self.mode.weighted {
            Some(weight.unwrap_or(0.0))
        } else {
            None
        };
        self.insert_edge(key, weight);
        Ok(true)
    }

    /// Remove a vertex together with every incident edge
    pub fn delete_vertex(&mut self, id: VertexId) -> GraphResult<Vertex> {
        let vertex = self.vertex(id)?;
        let directed = self.mode.directed;

        let mut incident: Vec<EdgeKey> = vertex
            .out_neighbors()
            .iter()
            .map(|&w| EdgeKey::new(id, w, directed))
            .collect();
        if directed {
            incident.extend(vertex.in_neighbors().iter().map(|&w| EdgeKey::new(w, id, true)));
        }

        for key in &incident {
            self.remove_edge(*key);
        }

        let removed = self
            .vertices
            .shift_remove(&id)
            .ok_or(GraphError::VertexNotFound(id))?;
        debug!("Deleted vertex {} and {} incident edges", id, incident.len());
        Ok(removed)
    }

    /// Remove the stored edge `(u, v)`.
    ///
    /// Directed graphs only match the stored orientation.
    pub fn delete_edge(&mut self, u: VertexId, v: VertexId) -> GraphResult<Edge> {
        let key = self.key(u, v);
        self.remove_edge(key).ok_or(GraphError::EdgeNotFound(u, v))
    }

    /// Weight of the stored edge `(u, v)`
    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> GraphResult<Option<Weight>> {
        self.get_edge(u, v)
            .map(|edge| edge.weight)
            .ok_or(GraphError::EdgeNotFound(u, v))
    }

    /// Number of distinct adjacent vertices
    pub fn degree_of(&self, id: VertexId) -> GraphResult<usize> {
        Ok(self.vertex(id)?.degree())
    }

    /// Distinct adjacent vertices (directed: out-neighbors, then in-only neighbors)
    pub fn neighbors_of(&self, id: VertexId) -> GraphResult<Vec<VertexId>> {
        Ok(self.vertex(id)?.neighbors())
    }

    /// Whether any stored edge joins `a` and `b`, in either direction
    pub fn are_neighbors(&self, a: VertexId, b: VertexId) -> GraphResult<bool> {
        let first = self.vertex(a)?;
        self.vertex(b)?;
        Ok(first.is_adjacent_to(b))
    }

    pub fn in_neighbors(&self, id: VertexId) -> GraphResult<Vec<VertexId>> {
        Ok(self.vertex(id)?.in_neighbors().iter().copied().collect())
    }

    pub fn out_neighbors(&self, id: VertexId) -> GraphResult<Vec<VertexId>> {
        Ok(self.vertex(id)?.out_neighbors().iter().copied().collect())
    }

    pub fn in_degree(&self, id: VertexId) -> GraphResult<usize> {
        Ok(self.vertex(id)?.in_degree())
    }

    pub fn out_degree(&self, id: VertexId) -> GraphResult<usize> {
        Ok(self.vertex(id)?.out_degree())
    }

    pub fn statistics(&self) -> GraphStatistics {
        let vertex_count = self.vertices.len();
        let total: usize = self.vertices.values().map(Vertex::degree).sum();
        let max_degree = self.vertices.values().map(Vertex::degree).max().unwrap_or(0);
        let avg_degree = if vertex_count == 0 {
            0.0
        } else {
            total as f64 / vertex_count as f64
        };

        GraphStatistics {
            vertex_count,
            edge_count: self.edges.len(),
            avg_degree,
            max_degree,
        }
    }

    /// Verify the structural invariants, reporting the first violation found
    pub fn check_invariants(&self) -> GraphResult<()> {
        let violation = |msg: String| Err(GraphError::InvalidOperation(msg));
        let directed = self.mode.directed;

        for (key, edge) in &self.edges {
            if key.is_self_loop() {
                return violation(format!("self-loop stored on {}", key.from));
            }
            if !directed && key.from > key.to {
                return violation(format!("edge ({}, {}) is not canonical", key.from, key.to));
            }
            if edge.key() != *key {
                return violation(format!("edge record does not match key ({}, {})", key.from, key.to));
            }
            if self.mode.weighted != edge.weight.is_some() {
                return violation(format!("edge ({}, {}) has wrong weight mode", key.from, key.to));
            }
            if edge.weight.is_some_and(|w| !w.is_finite()) {
                return violation(format!("edge ({}, {}) has a non-finite weight", key.from, key.to));
            }
            let (Some(from), Some(to)) = (self.vertices.get(&key.from), self.vertices.get(&key.to)) else {
                return violation(format!("edge ({}, {}) names a missing vertex", key.from, key.to));
            };
            if !from.out_neighbors().contains(&key.to) || !to.in_neighbors().contains(&key.from) {
                return violation(format!("edge ({}, {}) missing from adjacency", key.from, key.to));
            }
        }

        let mut adjacency_entries = 0;
        for (id, vertex) in &self.vertices {
            if vertex.is_directed() != directed {
                return violation(format!("vertex {} has the wrong adjacency mode", id));
            }
            for &w in vertex.out_neighbors() {
                if !self.edges.contains_key(&EdgeKey::new(*id, w, directed)) {
                    return violation(format!("{} lists {} without a stored edge", id, w));
                }
            }
            for &w in vertex.in_neighbors() {
                if !self.edges.contains_key(&EdgeKey::new(w, *id, directed)) {
                    return violation(format!("{} lists {} without a stored edge", id, w));
                }
            }
            if let Adjacency::Undirected { neighbors, degree } = vertex.adjacency() {
                if *degree != neighbors.len() {
                    return violation(format!("degree of {} disagrees with its neighbors", id));
                }
            }
            adjacency_entries += vertex.out_degree();
        }

        let expected = if directed { self.edges.len() } else { 2 * self.edges.len() };
        if adjacency_entries != expected {
            return violation(format!(
                "{} adjacency entries for {} edges",
                adjacency_entries,
                self.edges.len()
            ));
        }

        Ok(())
    }

    pub(crate) fn key(&self, u: VertexId, v: VertexId) -> EdgeKey {
        EdgeKey::new(u, v, self.mode.directed)
    }

    pub(crate) fn vertex(&self, id: VertexId) -> GraphResult<&Vertex> {
        self.vertices.get(&id).ok_or(GraphError::VertexNotFound(id))
    }

    /// Store an edge and link both endpoints; both must exist and `key` must be new
    pub(crate) fn insert_edge(&mut self, key: EdgeKey, weight: Option<Weight>) {
        if let Some(from) = self.vertices.get_mut(&key.from) {
            from.link_out(key.to);
        }
        if let Some(to) = self.vertices.get_mut(&key.to) {
            to.link_in(key.from);
        }
        self.edges.insert(key, Edge::new(key, weight));
    }

    /// Drop an edge and unlink its endpoints; `None` if it was not stored
    pub(crate) fn remove_edge(&mut self, key: EdgeKey) -> Option<Edge> {
        let edge = self.edges.swap_remove(&key)?;
        if let Some(from) = self.vertices.get_mut(&key.from) {
            from.unlink_out(key.to);
        }
        if let Some(to) = self.vertices.get_mut(&key.to) {
            to.unlink_in(key.from);
        }
        Some(edge)
    }
}

fn validate_weight(u: VertexId, v: VertexId, w: Weight) -> GraphResult<()> {
    if w.is_finite() {
        Ok(())
    } else {
        Err(GraphError::InvalidOperation(format!(
            "weight of ({}, {}) must be finite, got {}",
            u, v, w
        )))
    }
}

fn validate_heuristic(h: f64) -> GraphResult<()> {
    if h.is_finite() && h >= 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidOperation(format!(
            "heuristic must be finite and non-negative, got {}",
            h
        )))
    }
}
