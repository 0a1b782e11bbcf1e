//! The typed multigraph container and its edge/vertex contracts.
//!
//! A [`Multigraph`] is a directed, labeled multigraph: several edges may
//! connect the same ordered vertex pair as long as their labels differ.
//! The (source, target, label) triple, the [`EdgeKey`], is the unit of
//! edge identity everywhere in menet. Vertices are keyed by the entity
//! model's stable string identifier.
//!
//! Graph kinds (compound graph, reaction graph, bipartite graph, ...) are
//! the same container instantiated with different vertex and edge-payload
//! types; see [`vertex`] and [`link`]. Bipartite type safety is enforced at
//! insertion through [`Vertex::partition`].

pub mod link;
pub mod vertex;

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by multigraph construction and mutation.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeKey),

    #[error("dangling edge: source {src} or target {dst} not in graph")]
    DanglingEdge { src: String, dst: String },

    #[error("duplicate edge: {0}")]
    DuplicateEdge(EdgeKey),

    #[error("edge {src} -> {target} does not cross the bipartition")]
    SamePartition { src: String, target: String },
}

/// Which side of a bipartition a vertex occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Compound,
    Reaction,
}

/// Vertex contract: stable string identity plus an optional bipartition side.
///
/// Homogeneous graph kinds (compound graph, reaction graph) leave
/// `partition` at its `None` default; the bipartite vertex kind reports its
/// side so [`Multigraph::add_edge`] can reject same-side edges at runtime.
pub trait Vertex: Clone {
    /// The vertex identifier, unique within a graph.
    fn id(&self) -> &str;

    /// Bipartition side, if this vertex kind participates in one.
    fn partition(&self) -> Option<Side> {
        None
    }
}

/// Identity of an edge: the ordered endpoint pair plus the label that
/// distinguishes parallel edges (reaction id, compound id, or
/// reaction+direction depending on graph kind).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
    pub label: String,
}

impl EdgeKey {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.label, self.target)
    }
}

/// A directed edge carrying a weight, a score, and a kind-specific payload.
///
/// Weight (default 1.0) and score (default 0.0) are independent numeric
/// attributes: weighting policies write weights, similarity passes write
/// scores, and filters may threshold on either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<P> {
    pub source: String,
    pub target: String,
    pub label: String,
    pub weight: f64,
    pub score: f64,
    pub payload: P,
}

impl<P: Clone> Edge<P> {
    /// Create an edge with default weight 1.0 and score 0.0.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
        payload: P,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
            weight: 1.0,
            score: 0.0,
            payload,
        }
    }

    /// Set the weight on this edge.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the score on this edge.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// The (source, target, label) identity of this edge.
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.source, &self.target, &self.label)
    }

    /// Duplicate this edge as a new object, preserving endpoints, label,
    /// weight, score, and payload.
    pub fn copy_edge(&self) -> Self {
        self.clone()
    }

    /// A new edge with endpoints swapped and everything else preserved.
    /// Applying `reverse_edge` twice yields an edge equal to the original.
    pub fn reverse_edge(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            label: self.label.clone(),
            weight: self.weight,
            score: self.score,
            payload: self.payload.clone(),
        }
    }
}

impl<P> fmt::Display for Edge<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.label, self.target)
    }
}

/// A directed labeled multigraph over a vertex kind `V` and an edge payload
/// kind `P`.
///
/// Stores vertices and edges in insertion-ordered maps with incidence
/// indexes for O(1) adjacency lookup. Iteration order over vertices and
/// edges is insertion order, which makes every algorithm downstream
/// deterministic for a given build sequence.
///
/// Deep copy is [`Clone`]: vertex and edge sets are duplicated with weights
/// and scores preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize, P: Serialize",
    deserialize = "V: Deserialize<'de>, P: Deserialize<'de>"
))]
pub struct Multigraph<V, P> {
    vertices: IndexMap<String, V>,
    // Serialized as a key/value sequence: EdgeKey is a struct and cannot
    // be a JSON map key.
    #[serde(with = "indexmap::map::serde_seq")]
    edges: IndexMap<EdgeKey, Edge<P>>,

    /// Index: vertex id -> keys of edges leaving it.
    outgoing: IndexMap<String, Vec<EdgeKey>>,
    /// Index: vertex id -> keys of edges entering it.
    incoming: IndexMap<String, Vec<EdgeKey>>,
}

impl<V: Vertex, P: Clone> Multigraph<V, P> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            outgoing: IndexMap::new(),
            incoming: IndexMap::new(),
        }
    }

    /// Insert a vertex. Returns `false` (and leaves the existing vertex
    /// untouched) if a vertex with the same id is already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        let id = vertex.id().to_string();
        if self.vertices.contains_key(&id) {
            return false;
        }
        self.outgoing.entry(id.clone()).or_default();
        self.incoming.entry(id.clone()).or_default();
        self.vertices.insert(id, vertex);
        true
    }

    /// Insert an edge. Both endpoints must exist, the (source, target,
    /// label) key must be free, and, for bipartite vertex kinds, the
    /// endpoints must occupy different partition sides.
    pub fn add_edge(&mut self, edge: Edge<P>) -> Result<EdgeKey, GraphError> {
        let key = edge.key();
        let (source, target) = match (
            self.vertices.get(&edge.source),
            self.vertices.get(&edge.target),
        ) {
            (Some(s), Some(t)) => (s, t),
            _ => {
                return Err(GraphError::DanglingEdge {
                    src: edge.source.clone(),
                    dst: edge.target.clone(),
                })
            }
        };
        if let (Some(a), Some(b)) = (source.partition(), target.partition()) {
            if a == b {
                return Err(GraphError::SamePartition {
                    src: edge.source.clone(),
                    target: edge.target.clone(),
                });
            }
        }
        if self.edges.contains_key(&key) {
            return Err(GraphError::DuplicateEdge(key));
        }
        self.outgoing
            .entry(edge.source.clone())
            .or_default()
            .push(key.clone());
        self.incoming
            .entry(edge.target.clone())
            .or_default()
            .push(key.clone());
        self.edges.insert(key.clone(), edge);
        Ok(key)
    }

    /// Insert an edge with a default payload, weight 1.0, and score 0.0.
    pub fn add_edge_with(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<EdgeKey, GraphError>
    where
        P: Default,
    {
        self.add_edge(Edge::new(source, target, label, P::default()))
    }

    /// Remove an edge, returning it.
    pub fn remove_edge(&mut self, key: &EdgeKey) -> Result<Edge<P>, GraphError> {
        let edge = self
            .edges
            .shift_remove(key)
            .ok_or_else(|| GraphError::EdgeNotFound(key.clone()))?;
        if let Some(list) = self.outgoing.get_mut(&edge.source) {
            list.retain(|k| k != key);
        }
        if let Some(list) = self.incoming.get_mut(&edge.target) {
            list.retain(|k| k != key);
        }
        Ok(edge)
    }

    /// Remove a vertex and every edge incident to it, returning the vertex.
    pub fn remove_vertex(&mut self, id: &str) -> Result<V, GraphError> {
        if !self.vertices.contains_key(id) {
            return Err(GraphError::VertexNotFound(id.to_string()));
        }
        let mut incident: Vec<EdgeKey> = self.outgoing.get(id).cloned().unwrap_or_default();
        incident.extend(self.incoming.get(id).cloned().unwrap_or_default());
        for key in incident {
            // A self-loop appears in both lists; the second removal is a no-op.
            if self.edges.contains_key(&key) {
                self.remove_edge(&key)?;
            }
        }
        self.outgoing.shift_remove(id);
        self.incoming.shift_remove(id);
        Ok(self
            .vertices
            .shift_remove(id)
            .expect("vertex presence checked above"))
    }

    /// Look up a vertex by id.
    pub fn vertex(&self, id: &str) -> Option<&V> {
        self.vertices.get(id)
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.vertices.contains_key(id)
    }

    /// Iterate over all vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.values()
    }

    /// Iterate over all vertex ids in insertion order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(String::as_str)
    }

    /// Look up an edge by key.
    pub fn edge(&self, key: &EdgeKey) -> Option<&Edge<P>> {
        self.edges.get(key)
    }

    /// Look up an edge by its string components.
    pub fn get_edge(&self, source: &str, target: &str, label: &str) -> Option<&Edge<P>> {
        self.edges.get(&EdgeKey::new(source, target, label))
    }

    pub fn contains_edge(&self, key: &EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    /// Iterate over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<P>> {
        self.edges.values()
    }

    /// Iterate over all edge keys in insertion order.
    pub fn edge_keys(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges leaving a vertex, in insertion order. Empty for unknown ids.
    pub fn out_edges(&self, id: &str) -> impl Iterator<Item = &Edge<P>> {
        self.outgoing
            .get(id)
            .map(|keys| keys.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|k| &self.edges[k])
    }

    /// Edges entering a vertex, in insertion order. Empty for unknown ids.
    pub fn in_edges(&self, id: &str) -> impl Iterator<Item = &Edge<P>> {
        self.incoming
            .get(id)
            .map(|keys| keys.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|k| &self.edges[k])
    }

    /// All edges incident to a vertex: outgoing first, then incoming.
    pub fn edges_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge<P>> {
        self.out_edges(id).chain(self.in_edges(id))
    }

    /// Number of edges leaving a vertex. 0 for unknown ids.
    pub fn out_degree(&self, id: &str) -> usize {
        self.outgoing.get(id).map(Vec::len).unwrap_or(0)
    }

    /// Number of edges entering a vertex. 0 for unknown ids.
    pub fn in_degree(&self, id: &str) -> usize {
        self.incoming.get(id).map(Vec::len).unwrap_or(0)
    }

    /// Total incident edge count (a self-loop counts twice).
    pub fn degree(&self, id: &str) -> usize {
        self.in_degree(id) + self.out_degree(id)
    }

    /// Distinct successor vertex ids, in first-seen order.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        if let Some(keys) = self.outgoing.get(id) {
            for key in keys {
                seen.insert(key.target.as_str());
            }
        }
        seen.into_iter().collect()
    }

    /// Distinct predecessor vertex ids, in first-seen order.
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        if let Some(keys) = self.incoming.get(id) {
            for key in keys {
                seen.insert(key.source.as_str());
            }
        }
        seen.into_iter().collect()
    }

    /// Distinct neighbors regardless of edge direction, successors first.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        if let Some(keys) = self.outgoing.get(id) {
            for key in keys {
                seen.insert(key.target.as_str());
            }
        }
        if let Some(keys) = self.incoming.get(id) {
            for key in keys {
                seen.insert(key.source.as_str());
            }
        }
        seen.shift_remove(id);
        seen.into_iter().collect()
    }

    /// Read an edge weight by key.
    pub fn weight(&self, key: &EdgeKey) -> Option<f64> {
        self.edges.get(key).map(|e| e.weight)
    }

    /// Write an edge weight by key.
    pub fn set_weight(&mut self, key: &EdgeKey, weight: f64) -> Result<(), GraphError> {
        let edge = self
            .edges
            .get_mut(key)
            .ok_or_else(|| GraphError::EdgeNotFound(key.clone()))?;
        edge.weight = weight;
        Ok(())
    }

    /// Read an edge score by key.
    pub fn score(&self, key: &EdgeKey) -> Option<f64> {
        self.edges.get(key).map(|e| e.score)
    }

    /// Write an edge score by key.
    pub fn set_score(&mut self, key: &EdgeKey, score: f64) -> Result<(), GraphError> {
        let edge = self
            .edges
            .get_mut(key)
            .ok_or_else(|| GraphError::EdgeNotFound(key.clone()))?;
        edge.score = score;
        Ok(())
    }

    /// A new graph with the same vertices and every edge reversed.
    ///
    /// Reversal is closed over the edge set: mirrored pairs reverse into
    /// each other, so no key collision can occur.
    pub fn reverse(&self) -> Self {
        let mut reversed = Self::new();
        for vertex in self.vertices.values() {
            reversed.add_vertex(vertex.clone());
        }
        for edge in self.edges.values() {
            reversed
                .add_edge(edge.reverse_edge())
                .expect("reversing a consistent edge set cannot collide");
        }
        reversed
    }
}

impl<V: Vertex, P: Clone> Default for Multigraph<V, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::link::{BipartiteLink, ReactionLink};
    use super::vertex::{BioVertex, CompoundVertex, ReactionVertex};
    use super::*;

    type TestGraph = Multigraph<CompoundVertex, ReactionLink>;

    fn compound_pair() -> TestGraph {
        let mut g = TestGraph::new();
        g.add_vertex(CompoundVertex::new("a"));
        g.add_vertex(CompoundVertex::new("b"));
        g
    }

    fn edge(src: &str, dst: &str, label: &str) -> Edge<ReactionLink> {
        Edge::new(src, dst, label, ReactionLink::new(label))
    }

    #[test]
    fn empty_graph() {
        let g = TestGraph::new();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn add_vertices_and_edges() {
        let mut g = compound_pair();
        g.add_edge(edge("a", "b", "r1")).unwrap();

        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.out_degree("a"), 1);
        assert_eq!(g.in_degree("b"), 1);
        assert_eq!(g.successors("a"), vec!["b"]);
        assert_eq!(g.predecessors("b"), vec!["a"]);
    }

    #[test]
    fn duplicate_vertex_kept_once() {
        let mut g = TestGraph::new();
        assert!(g.add_vertex(CompoundVertex::new("a")));
        assert!(!g.add_vertex(CompoundVertex::new("a")));
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn dangling_edge_rejected() {
        let mut g = TestGraph::new();
        g.add_vertex(CompoundVertex::new("a"));
        let err = g.add_edge(edge("a", "missing", "r1")).unwrap_err();
        assert!(matches!(err, GraphError::DanglingEdge { .. }));
    }

    #[test]
    fn parallel_edges_need_distinct_labels() {
        let mut g = compound_pair();
        g.add_edge(edge("a", "b", "r1")).unwrap();
        g.add_edge(edge("a", "b", "r2")).unwrap();
        assert_eq!(g.edge_count(), 2);

        let err = g.add_edge(edge("a", "b", "r1")).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateEdge(_)));
    }

    #[test]
    fn bipartite_rejects_same_side_edges() {
        let mut g: Multigraph<BioVertex, BipartiteLink> = Multigraph::new();
        g.add_vertex(BioVertex::Compound(CompoundVertex::new("a")));
        g.add_vertex(BioVertex::Compound(CompoundVertex::new("b")));
        g.add_vertex(BioVertex::Reaction(ReactionVertex::new("r1")));

        g.add_edge(Edge::new("a", "r1", "r1", BipartiteLink::default()))
            .unwrap();
        let err = g
            .add_edge(Edge::new("a", "b", "r1", BipartiteLink::default()))
            .unwrap_err();
        assert!(matches!(err, GraphError::SamePartition { .. }));
    }

    #[test]
    fn copy_edge_preserves_identity() {
        let e = edge("a", "b", "r1").with_weight(3.5).with_score(0.25);
        let copy = e.copy_edge();
        assert_eq!(copy.key(), e.key());
        assert_eq!(copy.weight, 3.5);
        assert_eq!(copy.score, 0.25);
    }

    #[test]
    fn reverse_edge_round_trips() {
        let e = edge("a", "b", "r1").with_weight(2.0);
        let rev = e.reverse_edge();
        assert_eq!(rev.source, "b");
        assert_eq!(rev.target, "a");
        assert_eq!(rev.label, "r1");
        assert_eq!(rev.reverse_edge(), e);
    }

    #[test]
    fn remove_edge_updates_indexes() {
        let mut g = compound_pair();
        let key = g.add_edge(edge("a", "b", "r1")).unwrap();
        let removed = g.remove_edge(&key).unwrap();
        assert_eq!(removed.label, "r1");
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.out_degree("a"), 0);
        assert_eq!(g.in_degree("b"), 0);
        assert!(matches!(
            g.remove_edge(&key),
            Err(GraphError::EdgeNotFound(_))
        ));
    }

    #[test]
    fn remove_vertex_cascades() {
        let mut g = compound_pair();
        g.add_vertex(CompoundVertex::new("c"));
        g.add_edge(edge("a", "b", "r1")).unwrap();
        g.add_edge(edge("b", "c", "r2")).unwrap();

        g.remove_vertex("b").unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(matches!(
            g.remove_vertex("b"),
            Err(GraphError::VertexNotFound(_))
        ));
    }

    #[test]
    fn weight_and_score_are_independent() {
        let mut g = compound_pair();
        let key = g.add_edge(edge("a", "b", "r1")).unwrap();
        assert_eq!(g.weight(&key), Some(1.0));
        assert_eq!(g.score(&key), Some(0.0));

        g.set_weight(&key, 4.0).unwrap();
        g.set_score(&key, 0.9).unwrap();
        assert_eq!(g.weight(&key), Some(4.0));
        assert_eq!(g.score(&key), Some(0.9));
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut g = compound_pair();
        let key = g.add_edge(edge("a", "b", "r1")).unwrap();
        let snapshot = g.clone();
        g.set_weight(&key, 10.0).unwrap();
        assert_eq!(snapshot.weight(&key), Some(1.0));
    }

    #[test]
    fn reverse_whole_graph() {
        let mut g = compound_pair();
        g.add_edge(edge("a", "b", "r1")).unwrap();
        g.add_edge(edge("b", "a", "r1")).unwrap();
        let rev = g.reverse();
        assert_eq!(rev.edge_count(), 2);
        assert!(rev.get_edge("b", "a", "r1").is_some());
        assert!(rev.get_edge("a", "b", "r1").is_some());
    }

    #[test]
    fn neighbors_merge_both_directions() {
        let mut g = compound_pair();
        g.add_vertex(CompoundVertex::new("c"));
        g.add_edge(edge("a", "b", "r1")).unwrap();
        g.add_edge(edge("c", "a", "r2")).unwrap();
        assert_eq!(g.neighbors("a"), vec!["b", "c"]);
    }
}
