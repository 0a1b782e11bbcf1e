//! Set operations between two graphs of the same kind.

use indexmap::IndexSet;

use menet_core::{Multigraph, Vertex};

/// Union of vertex and edge sets. Vertices and edges present in both
/// graphs are taken from the left operand.
pub fn union<V: Vertex, P: Clone>(
    left: &Multigraph<V, P>,
    right: &Multigraph<V, P>,
) -> Multigraph<V, P> {
    let mut result = left.clone();
    for vertex in right.vertices() {
        result.add_vertex(vertex.clone());
    }
    for edge in right.edges() {
        if !result.contains_edge(&edge.key()) {
            result
                .add_edge(edge.clone())
                .expect("both endpoints were added above");
        }
    }
    result
}

/// Intersection of vertex and edge sets, taking objects from the left
/// operand.
pub fn intersect<V: Vertex, P: Clone>(
    left: &Multigraph<V, P>,
    right: &Multigraph<V, P>,
) -> Multigraph<V, P> {
    let mut result = Multigraph::new();
    for vertex in left.vertices() {
        if right.contains_vertex(vertex.id()) {
            result.add_vertex(vertex.clone());
        }
    }
    for edge in left.edges() {
        if right.contains_edge(&edge.key()) {
            result
                .add_edge(edge.clone())
                .expect("shared edges connect shared vertices");
        }
    }
    result
}

/// Vertex count of the union, without materializing it.
pub fn union_order<V: Vertex, P: Clone>(
    left: &Multigraph<V, P>,
    right: &Multigraph<V, P>,
) -> usize {
    let mut ids: IndexSet<&str> = left.vertex_ids().collect();
    ids.extend(right.vertex_ids());
    ids.len()
}

/// Edge count of the union, without materializing it.
pub fn union_size<V: Vertex, P: Clone>(
    left: &Multigraph<V, P>,
    right: &Multigraph<V, P>,
) -> usize {
    left.edge_count()
        + right
            .edge_keys()
            .filter(|k| !left.contains_edge(k))
            .count()
}

/// Vertex count of the intersection, without materializing it.
pub fn intersect_order<V: Vertex, P: Clone>(
    left: &Multigraph<V, P>,
    right: &Multigraph<V, P>,
) -> usize {
    left.vertex_ids().filter(|id| right.contains_vertex(id)).count()
}

/// Edge count of the intersection, without materializing it.
pub fn intersect_size<V: Vertex, P: Clone>(
    left: &Multigraph<V, P>,
    right: &Multigraph<V, P>,
) -> usize {
    left.edge_keys().filter(|k| right.contains_edge(k)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use menet_core::{CompoundGraph, CompoundVertex, Edge, ReactionLink};

    fn edge(src: &str, dst: &str, label: &str) -> Edge<ReactionLink> {
        Edge::new(src, dst, label, ReactionLink::new(label))
    }

    fn pair() -> (CompoundGraph, CompoundGraph) {
        let mut left = CompoundGraph::new();
        for id in ["a", "b", "c"] {
            left.add_vertex(CompoundVertex::new(id));
        }
        left.add_edge(edge("a", "b", "r1")).unwrap();
        left.add_edge(edge("b", "c", "r2")).unwrap();

        let mut right = CompoundGraph::new();
        for id in ["b", "c", "d"] {
            right.add_vertex(CompoundVertex::new(id));
        }
        right.add_edge(edge("b", "c", "r2")).unwrap();
        right.add_edge(edge("c", "d", "r3")).unwrap();
        (left, right)
    }

    #[test]
    fn union_merges_without_duplicates() {
        let (left, right) = pair();
        let u = union(&left, &right);
        assert_eq!(u.vertex_count(), 4);
        assert_eq!(u.edge_count(), 3);
        assert_eq!(union_order(&left, &right), 4);
        assert_eq!(union_size(&left, &right), 3);
    }

    #[test]
    fn intersection_keeps_the_shared_core() {
        let (left, right) = pair();
        let i = intersect(&left, &right);
        assert_eq!(i.vertex_count(), 2); // b, c
        assert_eq!(i.edge_count(), 1); // r2
        assert_eq!(intersect_order(&left, &right), 2);
        assert_eq!(intersect_size(&left, &right), 1);
    }

    #[test]
    fn cardinalities_match_materialized_results() {
        let (left, right) = pair();
        assert_eq!(union(&left, &right).vertex_count(), union_order(&left, &right));
        assert_eq!(union(&left, &right).edge_count(), union_size(&left, &right));
        assert_eq!(
            intersect(&left, &right).vertex_count(),
            intersect_order(&left, &right)
        );
        assert_eq!(
            intersect(&left, &right).edge_count(),
            intersect_size(&left, &right)
        );
    }
}
