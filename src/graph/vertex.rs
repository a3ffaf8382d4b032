//! Vertex records
//!
//! One record type per graph, tagged by the graph's directedness so a vertex
//! only carries the adjacency fields that are meaningful for its mode.

use super::types::VertexId;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Insertion-ordered neighbor set
pub type NeighborSet = IndexSet<VertexId, FxBuildHasher>;

/// Mode-specific adjacency of a vertex
#[derive(Debug, Clone, PartialEq)]
pub enum Adjacency {
    /// Directed graphs track both edge orientations separately
    Directed {
        incoming: NeighborSet,
        outgoing: NeighborSet,
    },
    /// Undirected graphs keep a single neighbor set and its degree
    Undirected { neighbors: NeighborSet, degree: usize },
}

/// A vertex in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Unique identifier for this vertex
    pub id: VertexId,

    /// A* estimate of remaining cost, if one was supplied
    pub heuristic: Option<f64>,

    adjacency: Adjacency,
}

impl Vertex {
    /// Create a vertex with no neighbors
    pub fn new(id: VertexId, heuristic: Option<f64>, directed: bool) -> Self {
        let adjacency = if directed {
            Adjacency::Directed {
                incoming: NeighborSet::default(),
                outgoing: NeighborSet::default(),
            }
        } else {
            Adjacency::Undirected {
                neighbors: NeighborSet::default(),
                degree: 0,
            }
        };

        Vertex { id, heuristic, adjacency }
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn is_directed(&self) -> bool {
        matches!(self.adjacency, Adjacency::Directed { .. })
    }

    /// Vertices with an edge into this one
    pub fn in_neighbors(&self) -> &NeighborSet {
        match &self.adjacency {
            Adjacency::Directed { incoming, .. } => incoming,
            Adjacency::Undirected { neighbors, .. } => neighbors,
        }
    }

    /// Vertices this one has an edge to
    pub fn out_neighbors(&self) -> &NeighborSet {
        match &self.adjacency {
            Adjacency::Directed { outgoing, .. } => outgoing,
            Adjacency::Undirected { neighbors, .. } => neighbors,
        }
    }

    /// All adjacent vertices, each once: out-neighbors first, then in-only neighbors
    pub fn neighbors(&self) -> Vec<VertexId> {
        match &self.adjacency {
            Adjacency::Directed { incoming, outgoing } => outgoing
                .iter()
                .chain(incoming.iter().filter(|v| !outgoing.contains(*v)))
                .copied()
                .collect(),
            Adjacency::Undirected { neighbors, .. } => neighbors.iter().copied().collect(),
        }
    }

    /// Number of distinct adjacent vertices
    pub fn degree(&self) -> usize {
        match &self.adjacency {
            Adjacency::Directed { incoming, outgoing } => {
                outgoing.len() + incoming.iter().filter(|v| !outgoing.contains(*v)).count()
            }
            Adjacency::Undirected { degree, .. } => *degree,
        }
    }

    pub fn in_degree(&self) -> usize {
        self.in_neighbors().len()
    }

    pub fn out_degree(&self) -> usize {
        self.out_neighbors().len()
    }

    pub fn is_adjacent_to(&self, other: VertexId) -> bool {
        match &self.adjacency {
            Adjacency::Directed { incoming, outgoing } => {
                outgoing.contains(&other) || incoming.contains(&other)
            }
            Adjacency::Undirected { neighbors, .. } => neighbors.contains(&other),
        }
    }

    /// Record that this vertex has an edge to `target`
    pub(crate) fn link_out(&mut self, target: VertexId) {
        match &mut self.adjacency {
            Adjacency::Directed { outgoing, .. } => {
                outgoing.insert(target);
            }
            Adjacency::Undirected { neighbors, degree } => link(neighbors, degree, target),
        }
    }

    /// Record that `source` has an edge to this vertex
    pub(crate) fn link_in(&mut self, source: VertexId) {
        match &mut self.adjacency {
            Adjacency::Directed { incoming, .. } => {
                incoming.insert(source);
            }
            Adjacency::Undirected { neighbors, degree } => link(neighbors, degree, source),
        }
    }

    pub(crate) fn unlink_out(&mut self, target: VertexId) {
        match &mut self.adjacency {
            Adjacency::Directed { outgoing, .. } => {
                outgoing.shift_remove(&target);
            }
            Adjacency::Undirected { neighbors, degree } => unlink(neighbors, degree, target),
        }
    }

    pub(crate) fn unlink_in(&mut self, source: VertexId) {
        match &mut self.adjacency {
            Adjacency::Directed { incoming, .. } => {
                incoming.shift_remove(&source);
            }
            Adjacency::Undirected { neighbors, degree } => unlink(neighbors, degree, source),
        }
    }
}

fn link(neighbors: &mut NeighborSet, degree: &mut usize, other: VertexId) {
    if neighbors.insert(other) {
        *degree += 1;
    }
}

fn unlink(neighbors: &mut NeighborSet, degree: &mut usize, other: VertexId) {
    if neighbors.shift_remove(&other) {
        *degree -= 1;
    }
}
