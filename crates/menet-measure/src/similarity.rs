//! Local neighborhood similarity between vertex pairs.
//!
//! All indices here work on undirected neighbor sets (distinct neighbors
//! regardless of edge direction, the vertex itself excluded), except the
//! directed clustering-coefficient variant.

use indexmap::IndexSet;

use menet_core::{Multigraph, Vertex};

use crate::error::MeasureError;

fn require_vertex<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    id: &str,
) -> Result<(), MeasureError> {
    if graph.contains_vertex(id) {
        Ok(())
    } else {
        Err(MeasureError::VertexNotFound(id.to_string()))
    }
}

fn neighbor_set<'a, V: Vertex, P: Clone>(
    graph: &'a Multigraph<V, P>,
    id: &str,
) -> IndexSet<&'a str> {
    graph.neighbors(id).into_iter().collect()
}

/// Number of distinct common neighbors of two vertices.
pub fn common_neighbors<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    a: &str,
    b: &str,
) -> Result<usize, MeasureError> {
    require_vertex(graph, a)?;
    require_vertex(graph, b)?;
    let na = neighbor_set(graph, a);
    let nb = neighbor_set(graph, b);
    Ok(na.intersection(&nb).count())
}

/// Adamic–Adar index: Σ 1/ln(deg(w)) over common neighbors w. Common
/// neighbors with fewer than two neighbors of their own contribute
/// nothing (ln 1 = 0 has no reciprocal).
pub fn adamic_adar<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    a: &str,
    b: &str,
) -> Result<f64, MeasureError> {
    require_vertex(graph, a)?;
    require_vertex(graph, b)?;
    let na = neighbor_set(graph, a);
    let nb = neighbor_set(graph, b);
    Ok(na
        .intersection(&nb)
        .map(|w| neighbor_set(graph, w).len())
        .filter(|&deg| deg >= 2)
        .map(|deg| 1.0 / (deg as f64).ln())
        .sum())
}

/// Salton (cosine) index: |common neighbors| / √(deg(a)·deg(b)), zero when
/// either vertex is isolated.
pub fn salton_index<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    a: &str,
    b: &str,
) -> Result<f64, MeasureError> {
    require_vertex(graph, a)?;
    require_vertex(graph, b)?;
    let na = neighbor_set(graph, a);
    let nb = neighbor_set(graph, b);
    if na.is_empty() || nb.is_empty() {
        return Ok(0.0);
    }
    let common = na.intersection(&nb).count() as f64;
    Ok(common / ((na.len() * nb.len()) as f64).sqrt())
}

/// Undirected clustering coefficient: realized links among the vertex's
/// neighbors over the k(k−1)/2 possible ones. Zero for fewer than two
/// neighbors.
pub fn clustering_coefficient<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    id: &str,
) -> Result<f64, MeasureError> {
    require_vertex(graph, id)?;
    let neighbors = neighbor_set(graph, id);
    let k = neighbors.len();
    if k < 2 {
        return Ok(0.0);
    }
    let mut links = 0usize;
    for (i, a) in neighbors.iter().enumerate() {
        for b in neighbors.iter().skip(i + 1) {
            if has_any_edge(graph, a, b) || has_any_edge(graph, b, a) {
                links += 1;
            }
        }
    }
    Ok(2.0 * links as f64 / (k * (k - 1)) as f64)
}

/// Directed clustering coefficient: realized directed links among the
/// vertex's neighbors over the k(k−1) possible ordered pairs.
pub fn directed_clustering_coefficient<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    id: &str,
) -> Result<f64, MeasureError> {
    require_vertex(graph, id)?;
    let neighbors = neighbor_set(graph, id);
    let k = neighbors.len();
    if k < 2 {
        return Ok(0.0);
    }
    let mut links = 0usize;
    for a in &neighbors {
        for b in &neighbors {
            if a != b && has_any_edge(graph, a, b) {
                links += 1;
            }
        }
    }
    Ok(links as f64 / (k * (k - 1)) as f64)
}

/// Whether any edge a → b exists, regardless of label.
fn has_any_edge<V: Vertex, P: Clone>(graph: &Multigraph<V, P>, a: &str, b: &str) -> bool {
    graph.out_edges(a).any(|e| e.target == b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use menet_core::{CompoundGraph, CompoundVertex, Edge, ReactionLink};

    fn edge(src: &str, dst: &str, label: &str) -> Edge<ReactionLink> {
        Edge::new(src, dst, label, ReactionLink::new(label))
    }

    /// u and v share the neighbors w1 and w2; w1 also links elsewhere.
    fn shared_neighborhood() -> CompoundGraph {
        let mut g = CompoundGraph::new();
        for id in ["u", "v", "w1", "w2", "z"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge(edge("u", "w1", "r1")).unwrap();
        g.add_edge(edge("u", "w2", "r2")).unwrap();
        g.add_edge(edge("w1", "v", "r3")).unwrap();
        g.add_edge(edge("v", "w2", "r4")).unwrap();
        g.add_edge(edge("w1", "z", "r5")).unwrap();
        g
    }

    #[test]
    fn common_neighbor_count_ignores_direction() {
        let g = shared_neighborhood();
        assert_eq!(common_neighbors(&g, "u", "v").unwrap(), 2);
        assert_eq!(common_neighbors(&g, "u", "z").unwrap(), 1); // w1
        assert!(matches!(
            common_neighbors(&g, "u", "nope"),
            Err(MeasureError::VertexNotFound(_))
        ));
    }

    #[test]
    fn adamic_adar_weighs_rare_neighbors() {
        let g = shared_neighborhood();
        // w1 has 3 neighbors (u, v, z), w2 has 2 (u, v).
        let expected = 1.0 / 3.0f64.ln() + 1.0 / 2.0f64.ln();
        assert!((adamic_adar(&g, "u", "v").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn salton_normalizes_by_degree() {
        let g = shared_neighborhood();
        // |common| = 2, deg(u) = 2, deg(v) = 2.
        assert!((salton_index(&g, "u", "v").unwrap() - 1.0).abs() < 1e-12);
        assert!(salton_index(&g, "u", "nope").is_err());
    }

    #[test]
    fn clustering_coefficients() {
        let mut g = CompoundGraph::new();
        for id in ["c", "n1", "n2", "n3"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge(edge("c", "n1", "r1")).unwrap();
        g.add_edge(edge("c", "n2", "r2")).unwrap();
        g.add_edge(edge("c", "n3", "r3")).unwrap();
        g.add_edge(edge("n1", "n2", "r4")).unwrap();

        // One of three possible neighbor pairs is linked.
        assert!((clustering_coefficient(&g, "c").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        // One of six ordered pairs.
        assert!(
            (directed_clustering_coefficient(&g, "c").unwrap() - 1.0 / 6.0).abs() < 1e-12
        );
        // Degree-one vertices have coefficient zero.
        assert_eq!(clustering_coefficient(&g, "n3").unwrap(), 0.0);
    }
}
