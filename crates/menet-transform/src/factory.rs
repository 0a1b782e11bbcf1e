//! Pure graph constructors: from elements, from edge or path lists, copy,
//! reverse, induced subgraph, and seeded random sampling.

use indexmap::IndexSet;
use rand::seq::index;
use rand::Rng;

use menet_core::{Edge, EdgeKey, Multigraph, Vertex};
use menet_path::Path;

use crate::error::TransformError;

/// Build a graph from explicit vertex and edge sets. Fails on the first
/// edge referencing a vertex outside the supplied set.
pub fn from_elements<V: Vertex, P: Clone>(
    vertices: Vec<V>,
    edges: Vec<Edge<P>>,
) -> Result<Multigraph<V, P>, TransformError> {
    let mut graph = Multigraph::new();
    for vertex in vertices {
        graph.add_vertex(vertex);
    }
    for edge in edges {
        for endpoint in [&edge.source, &edge.target] {
            if !graph.contains_vertex(endpoint) {
                return Err(TransformError::MissingVertex {
                    edge: edge.key(),
                    vertex: endpoint.clone(),
                });
            }
        }
        if !graph.contains_edge(&edge.key()) {
            graph
                .add_edge(edge)
                .expect("endpoints checked and key free");
        }
    }
    Ok(graph)
}

/// Build the subgraph of `parent` spanned by the given edge keys, copying
/// endpoint vertices from the parent. Unknown keys fail fast.
pub fn subgraph_from_edges<V: Vertex, P: Clone>(
    parent: &Multigraph<V, P>,
    keys: &[EdgeKey],
) -> Result<Multigraph<V, P>, TransformError> {
    let mut graph = Multigraph::new();
    for key in keys {
        let edge = parent
            .edge(key)
            .ok_or_else(|| TransformError::EdgeNotFound(key.clone()))?;
        for endpoint in [&edge.source, &edge.target] {
            if let Some(vertex) = parent.vertex(endpoint) {
                graph.add_vertex(vertex.clone());
            }
        }
        if !graph.contains_edge(key) {
            graph
                .add_edge(edge.clone())
                .expect("endpoints copied from parent");
        }
    }
    Ok(graph)
}

/// Build a graph from the union of the given paths' edges, copying
/// vertices from `parent`. Paths produced by undirected traversal may
/// contain reversed copies of parent edges; they are admitted as-is.
/// A path visiting a vertex unknown to the parent fails fast.
pub fn subgraph_from_paths<V: Vertex, P: Clone>(
    parent: &Multigraph<V, P>,
    paths: &[Path<P>],
) -> Result<Multigraph<V, P>, TransformError> {
    let mut graph = Multigraph::new();
    for path in paths {
        for edge in path.edges() {
            for endpoint in [&edge.source, &edge.target] {
                let vertex = parent
                    .vertex(endpoint)
                    .ok_or_else(|| TransformError::VertexNotFound(endpoint.clone()))?;
                graph.add_vertex(vertex.clone());
            }
            if !graph.contains_edge(&edge.key()) {
                graph
                    .add_edge(edge.clone())
                    .expect("endpoints copied from parent");
            }
        }
    }
    Ok(graph)
}

/// A deep copy of the graph.
pub fn create_copy<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> Multigraph<V, P> {
    graph.clone()
}

/// A new graph with every edge reversed.
pub fn reverse<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> Multigraph<V, P> {
    graph.reverse()
}

/// The subgraph induced by a vertex subset: those vertices plus every
/// parent edge with both endpoints inside the subset. Unknown ids fail
/// fast.
pub fn induced_subgraph<V: Vertex, P: Clone>(
    parent: &Multigraph<V, P>,
    ids: &[&str],
) -> Result<Multigraph<V, P>, TransformError> {
    let mut graph = Multigraph::new();
    let selection: IndexSet<&str> = ids.iter().copied().collect();
    for id in &selection {
        let vertex = parent
            .vertex(id)
            .ok_or_else(|| TransformError::VertexNotFound(id.to_string()))?;
        graph.add_vertex(vertex.clone());
    }
    for edge in parent.edges() {
        if selection.contains(edge.source.as_str()) && selection.contains(edge.target.as_str()) {
            graph
                .add_edge(edge.clone())
                .expect("both endpoints are in the selection");
        }
    }
    Ok(graph)
}

/// Sample `count` distinct vertices uniformly. Requesting more than the
/// graph holds is a validation error, not a truncation.
pub fn sample_vertices<'a, V: Vertex, P: Clone>(
    graph: &'a Multigraph<V, P>,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<&'a V>, TransformError> {
    let all: Vec<&V> = graph.vertices().collect();
    if count > all.len() {
        return Err(TransformError::SampleTooLarge {
            requested: count,
            available: all.len(),
        });
    }
    Ok(index::sample(rng, all.len(), count)
        .iter()
        .map(|i| all[i])
        .collect())
}

/// Sample `count` distinct edges uniformly.
pub fn sample_edges<'a, V: Vertex, P: Clone>(
    graph: &'a Multigraph<V, P>,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<&'a Edge<P>>, TransformError> {
    let all: Vec<&Edge<P>> = graph.edges().collect();
    if count > all.len() {
        return Err(TransformError::SampleTooLarge {
            requested: count,
            available: all.len(),
        });
    }
    Ok(index::sample(rng, all.len(), count)
        .iter()
        .map(|i| all[i])
        .collect())
}

/// The induced subgraph over a uniform random vertex sample.
pub fn random_subgraph<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Multigraph<V, P>, TransformError> {
    let sampled = sample_vertices(graph, count, rng)?;
    let ids: Vec<&str> = sampled.iter().map(|v| v.id()).collect();
    induced_subgraph(graph, &ids)
}
