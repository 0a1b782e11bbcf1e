//! Steiner tree 2-approximation.
//!
//! Classic closure-based scheme: build the metric closure over the
//! terminals, take a minimum spanning tree of the closure, then expand
//! every closure edge back into its represented shortest path, collapsing
//! duplicate edges.

use indexmap::IndexMap;

use menet_core::{CompressedGraph, Edge, EdgeKey, Multigraph, Vertex};

use crate::closure::{metric_closure, metric_closure_among};
use crate::error::PathError;

/// Approximate Steiner tree over one terminal set. Returns the union of
/// the expanded MST paths as a deduplicated edge list (empty when fewer
/// than two terminals are given). Terminal ids absent from the graph fail
/// fast.
pub fn steiner_tree<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    terminals: &[&str],
    undirected: bool,
) -> Result<Vec<Edge<P>>, PathError> {
    let closure = metric_closure_among(graph, terminals, undirected)?;
    Ok(expand_spanning_tree(&closure))
}

/// Approximate Steiner tree between separate "from" and "to" terminal
/// sets: the closure is asymmetric and directed, the spanning structure is
/// computed over it treating closure edges as connections.
pub fn steiner_tree_between<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    from: &[&str],
    to: &[&str],
    undirected: bool,
) -> Result<Vec<Edge<P>>, PathError> {
    let closure = metric_closure(graph, from, to, undirected)?;
    Ok(expand_spanning_tree(&closure))
}

/// Kruskal over the closure (ignoring edge direction for connectivity),
/// then expansion of the selected closure edges. Deterministic: closure
/// edges are taken in (weight, key) order.
fn expand_spanning_tree<V: Vertex, P: Clone>(closure: &CompressedGraph<V, P>) -> Vec<Edge<P>> {
    let mut indices: IndexMap<&str, usize> = IndexMap::new();
    for (i, id) in closure.vertex_ids().enumerate() {
        indices.insert(id, i);
    }
    let mut forest = UnionFind::new(indices.len());

    let mut closure_edges: Vec<&Edge<menet_core::PathLink<P>>> = closure.edges().collect();
    closure_edges.sort_by(|a, b| {
        a.weight
            .partial_cmp(&b.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key().to_string().cmp(&b.key().to_string()))
    });

    let mut expanded: IndexMap<EdgeKey, Edge<P>> = IndexMap::new();
    for closure_edge in closure_edges {
        let a = indices[closure_edge.source.as_str()];
        let b = indices[closure_edge.target.as_str()];
        if !forest.union(a, b) {
            continue;
        }
        for edge in &closure_edge.payload.edges {
            expanded.entry(edge.key()).or_insert_with(|| edge.clone());
        }
    }
    expanded.into_values().collect()
}

/// Minimal union-find with path halving.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`; false if already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        self.parent[rb] = ra;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menet_core::{CompoundGraph, CompoundVertex, ReactionLink};

    fn edge(src: &str, dst: &str, label: &str, weight: f64) -> Edge<ReactionLink> {
        Edge::new(src, dst, label, ReactionLink::new(label)).with_weight(weight)
    }

    /// A star through a hub plus an expensive direct rim edge.
    fn star() -> CompoundGraph {
        let mut g = CompoundGraph::new();
        for id in ["hub", "a", "b", "c"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge(edge("a", "hub", "ah", 1.0)).unwrap();
        g.add_edge(edge("hub", "b", "hb", 1.0)).unwrap();
        g.add_edge(edge("hub", "c", "hc", 1.0)).unwrap();
        g.add_edge(edge("a", "b", "ab", 10.0)).unwrap();
        g
    }

    #[test]
    fn tree_routes_through_the_hub() {
        let g = star();
        let edges = steiner_tree(&g, &["a", "b", "c"], false).unwrap();
        let labels: Vec<&str> = edges.iter().map(|e| e.label.as_str()).collect();
        assert!(labels.contains(&"ah"));
        assert!(labels.contains(&"hb"));
        assert!(labels.contains(&"hc"));
        assert!(!labels.contains(&"ab"));
        // Shared prefix edges are collapsed: a->hub appears once.
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn fewer_than_two_terminals_is_empty() {
        let g = star();
        assert!(steiner_tree(&g, &["a"], false).unwrap().is_empty());
        assert!(steiner_tree(&g, &[], false).unwrap().is_empty());
    }

    #[test]
    fn directed_variant_connects_sources_to_targets() {
        let g = star();
        let edges = steiner_tree_between(&g, &["a"], &["b", "c"], false).unwrap();
        let labels: Vec<&str> = edges.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels.len(), 3);
        assert!(labels.contains(&"ah"));
        assert!(labels.contains(&"hb"));
        assert!(labels.contains(&"hc"));
    }

    #[test]
    fn unknown_terminal_fails_fast() {
        let g = star();
        assert!(matches!(
            steiner_tree(&g, &["a", "nope"], false),
            Err(PathError::VertexNotFound(_))
        ));
    }
}
