//! Metric closure: compressing a graph into super-edges between terminals.

use menet_core::{CompressedGraph, Edge, Multigraph, PathLink, Vertex};

use crate::dijkstra::tree_with_constraints;
use crate::error::PathError;

/// Build the metric closure between two terminal sets: one compressed edge
/// per ordered (from, to) pair for which a path exists, carrying the
/// represented shortest path together with its length and weight.
/// Terminal ids absent from the graph fail fast.
pub fn metric_closure<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    from: &[&str],
    to: &[&str],
    undirected: bool,
) -> Result<CompressedGraph<V, P>, PathError> {
    for id in from.iter().chain(to) {
        if !graph.contains_vertex(id) {
            return Err(PathError::VertexNotFound(id.to_string()));
        }
    }

    let mut closure = CompressedGraph::new();
    for id in from.iter().chain(to) {
        closure.add_vertex(
            graph
                .vertex(id)
                .expect("terminal presence checked above")
                .clone(),
        );
    }

    for &source in from {
        let tree = tree_with_constraints(graph, source, undirected, None, None);
        for &target in to {
            let label = format!("{source}->{target}");
            // from and to may overlap; the pair is then visited once per
            // listing but keyed identically.
            if target == source || closure.get_edge(source, target, &label).is_some() {
                continue;
            }
            let Some(path) = tree.path_to(target) else {
                continue;
            };
            let weight = path.weight();
            let length = path.length();
            let link = PathLink {
                edges: path.into_edges(),
                length,
                weight,
            };
            closure
                .add_edge(Edge::new(source, target, label, link).with_weight(weight))
                .expect("closure vertices were inserted above");
        }
    }
    Ok(closure)
}

/// Metric closure among a single terminal set.
pub fn metric_closure_among<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    terminals: &[&str],
    undirected: bool,
) -> Result<CompressedGraph<V, P>, PathError> {
    metric_closure(graph, terminals, terminals, undirected)
}
