//! Per-vertex centrality measures built on all-sources shortest-path trees.

use indexmap::IndexMap;

use menet_core::{Multigraph, Vertex};
use menet_path::shortest_path_tree;

use crate::error::MeasureError;

/// Shortest-path betweenness: for every ordered vertex pair, each vertex
/// interior to the shortest path scores one. Iterating ordered pairs sums
/// both directions of every unordered pair, which is the doubled-count
/// convention the rest of the measures expect.
pub fn betweenness<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
) -> Result<IndexMap<String, f64>, MeasureError> {
    let mut counts: IndexMap<String, f64> = graph
        .vertex_ids()
        .map(|id| (id.to_string(), 0.0))
        .collect();
    let ids: Vec<String> = graph.vertex_ids().map(str::to_string).collect();

    for source in &ids {
        let tree = shortest_path_tree(graph, source, false)?;
        for target in &ids {
            if target == source || tree.distance(target).is_none() {
                continue;
            }
            let mut cursor = target.as_str();
            while cursor != source {
                let edge = tree
                    .parent_edge(cursor)
                    .expect("reached vertices have parent edges");
                let previous = edge.source.as_str();
                if previous != source {
                    *counts
                        .get_mut(previous)
                        .expect("edge endpoints are vertices") += 1.0;
                }
                cursor = previous;
            }
        }
    }
    Ok(counts)
}

/// Sum of finite shortest-path distances from each vertex to everything it
/// reaches (out-farness).
pub fn farness<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
) -> Result<IndexMap<String, f64>, MeasureError> {
    let mut result = IndexMap::new();
    let ids: Vec<String> = graph.vertex_ids().map(str::to_string).collect();
    for source in &ids {
        let tree = shortest_path_tree(graph, source, false)?;
        let total: f64 = tree
            .reached()
            .filter(|(id, _)| *id != source.as_str())
            .map(|(_, d)| d)
            .sum();
        result.insert(source.clone(), total);
    }
    Ok(result)
}

/// Out-closeness: `(reachable / (V−1)) / (mean distance to reachable)`,
/// zero for vertices reaching nothing.
pub fn out_closeness<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
) -> Result<IndexMap<String, f64>, MeasureError> {
    let mut result = IndexMap::new();
    let v = graph.vertex_count();
    let ids: Vec<String> = graph.vertex_ids().map(str::to_string).collect();
    for source in &ids {
        let tree = shortest_path_tree(graph, source, false)?;
        let distances: Vec<f64> = tree
            .reached()
            .filter(|(id, _)| *id != source.as_str())
            .map(|(_, d)| d)
            .collect();
        let closeness = if distances.is_empty() || v < 2 {
            0.0
        } else {
            let reachable = distances.len() as f64;
            let mean = distances.iter().sum::<f64>() / reachable;
            (reachable / (v - 1) as f64) / mean
        };
        result.insert(source.clone(), closeness);
    }
    Ok(result)
}

/// In-closeness: out-closeness over the reversed graph.
pub fn in_closeness<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
) -> Result<IndexMap<String, f64>, MeasureError> {
    out_closeness(&graph.reverse())
}

/// Geodesic neighborhood centrality: the number of distinct vertices in
/// the vertex's shortest-path tree, the root excluded.
pub fn geodesic_neighborhood<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    undirected: bool,
) -> Result<IndexMap<String, usize>, MeasureError> {
    let mut result = IndexMap::new();
    let ids: Vec<String> = graph.vertex_ids().map(str::to_string).collect();
    for source in &ids {
        let tree = shortest_path_tree(graph, source, undirected)?;
        let reached = tree
            .reached()
            .filter(|(id, _)| *id != source.as_str())
            .count();
        result.insert(source.clone(), reached);
    }
    Ok(result)
}

/// Load-point centrality: `ln((paths_through_v / degree(v)) / (Σpaths /
/// Σdegrees))`. Vertices carrying no shortest-path mass yield `ln 0`,
/// negative infinity: a value, not an error.
pub fn load_points<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
) -> Result<IndexMap<String, f64>, MeasureError> {
    let counts = betweenness(graph)?;
    let total_paths: f64 = counts.values().sum();
    let total_degree: f64 = graph.vertex_ids().map(|id| graph.degree(id) as f64).sum();

    let mut result = IndexMap::new();
    for (id, paths) in &counts {
        let degree = graph.degree(id) as f64;
        let value = if *paths == 0.0 || degree == 0.0 {
            f64::NEG_INFINITY
        } else {
            ((paths / degree) / (total_paths / total_degree)).ln()
        };
        result.insert(id.clone(), value);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use menet_core::{CompoundGraph, CompoundVertex, Edge, ReactionLink};

    fn edge(src: &str, dst: &str, label: &str) -> Edge<ReactionLink> {
        Edge::new(src, dst, label, ReactionLink::new(label))
    }

    fn chain() -> CompoundGraph {
        let mut g = CompoundGraph::new();
        for id in ["a", "b", "c"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge(edge("a", "b", "r1")).unwrap();
        g.add_edge(edge("b", "c", "r2")).unwrap();
        g
    }

    #[test]
    fn betweenness_counts_interior_vertices() {
        let g = chain();
        let b = betweenness(&g).unwrap();
        assert_eq!(b["a"], 0.0);
        assert_eq!(b["b"], 1.0); // interior of a -> c only
        assert_eq!(b["c"], 0.0);
    }

    #[test]
    fn betweenness_doubles_on_symmetric_graphs() {
        let mut g = chain();
        g.add_edge(edge("b", "a", "r1r")).unwrap();
        g.add_edge(edge("c", "b", "r2r")).unwrap();
        let b = betweenness(&g).unwrap();
        // a -> c and c -> a both pass through b.
        assert_eq!(b["b"], 2.0);
    }

    #[test]
    fn farness_and_closeness() {
        let g = chain();
        let f = farness(&g).unwrap();
        assert_eq!(f["a"], 3.0); // 1 to b, 2 to c
        assert_eq!(f["c"], 0.0);

        let c = out_closeness(&g).unwrap();
        assert!((c["a"] - (2.0 / 2.0) / 1.5).abs() < 1e-12);
        assert_eq!(c["c"], 0.0); // reaches nothing

        let ic = in_closeness(&g).unwrap();
        assert_eq!(ic["a"], 0.0); // nothing reaches a
        assert!(ic["c"] > 0.0);
    }

    #[test]
    fn geodesic_neighborhood_counts_tree_successors() {
        let g = chain();
        let n = geodesic_neighborhood(&g, false).unwrap();
        assert_eq!(n["a"], 2);
        assert_eq!(n["b"], 1);
        assert_eq!(n["c"], 0);

        let n = geodesic_neighborhood(&g, true).unwrap();
        assert_eq!(n["c"], 2);
    }

    #[test]
    fn load_point_zero_mass_is_negative_infinity() {
        let g = chain();
        let lp = load_points(&g).unwrap();
        // No shortest path passes through a or c.
        assert_eq!(lp["a"], f64::NEG_INFINITY);
        assert_eq!(lp["c"], f64::NEG_INFINITY);
        // b: (1 / 2) / (1 / 4) = 2.
        assert!((lp["b"] - 2.0f64.ln()).abs() < 1e-12);
    }
}
