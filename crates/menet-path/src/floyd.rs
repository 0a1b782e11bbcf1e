//! All-pairs shortest paths (Floyd–Warshall) with path reconstruction.

use indexmap::IndexMap;

use menet_core::{EdgeKey, Multigraph, Vertex};

use crate::error::PathError;
use crate::path::Path;

/// All-pairs distance and path tables over a graph (or a vertex subset).
///
/// Distances are keyed source label → target label, with 0 on the diagonal
/// and `f64::INFINITY` for unreachable pairs. The parallel path table omits
/// self and unreachable entries. Unlike Dijkstra, arbitrary edge weights
/// are accepted.
#[derive(Debug, Clone)]
pub struct FloydWarshall {
    order: Vec<String>,
    distances: IndexMap<String, IndexMap<String, f64>>,
    /// First edge on the shortest i → j path.
    next_edge: IndexMap<String, IndexMap<String, EdgeKey>>,
}

impl FloydWarshall {
    /// Run over every vertex of the graph.
    pub fn new<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> Self {
        let ids: Vec<&str> = graph.vertex_ids().collect();
        Self::over(graph, &ids).expect("all ids were read from the graph")
    }

    /// Run over a vertex subset; only edges with both endpoints inside the
    /// subset are considered. Unknown ids fail fast.
    pub fn over<V: Vertex, P: Clone>(
        graph: &Multigraph<V, P>,
        ids: &[&str],
    ) -> Result<Self, PathError> {
        for id in ids {
            if !graph.contains_vertex(id) {
                return Err(PathError::VertexNotFound(id.to_string()));
            }
        }
        let order: Vec<String> = ids.iter().map(|s| s.to_string()).collect();

        let mut distances: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();
        let mut next_edge: IndexMap<String, IndexMap<String, EdgeKey>> = IndexMap::new();
        for from in &order {
            let row = distances.entry(from.clone()).or_default();
            for to in &order {
                row.insert(to.clone(), if from == to { 0.0 } else { f64::INFINITY });
            }
            next_edge.entry(from.clone()).or_default();
        }

        // Seed with the lightest parallel edge per ordered pair.
        for edge in graph.edges() {
            if !distances.contains_key(&edge.source) || !distances.contains_key(&edge.target) {
                continue;
            }
            if edge.source == edge.target {
                continue;
            }
            let known = distances[&edge.source][&edge.target];
            if edge.weight < known {
                distances[&edge.source][&edge.target] = edge.weight;
                next_edge[&edge.source].insert(edge.target.clone(), edge.key());
            }
        }

        for via in &order {
            for from in &order {
                let through = distances[from][via];
                if !through.is_finite() {
                    continue;
                }
                for to in &order {
                    let candidate = through + distances[via][to];
                    if candidate < distances[from][to] {
                        distances[from][to] = candidate;
                        let first = next_edge[from][via].clone();
                        next_edge[from].insert(to.clone(), first);
                    }
                }
            }
        }

        Ok(Self {
            order,
            distances,
            next_edge,
        })
    }

    /// Vertex labels in table order.
    pub fn labels(&self) -> &[String] {
        &self.order
    }

    /// Distance between two labels; `None` if either is outside the table.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        self.distances.get(from)?.get(to).copied()
    }

    /// The full label → label → distance table.
    pub fn distances(&self) -> &IndexMap<String, IndexMap<String, f64>> {
        &self.distances
    }

    /// Reconstruct the shortest path between two labels from the same graph
    /// the table was computed on. `None` for self pairs, unreachable pairs,
    /// and labels outside the table.
    pub fn path<V: Vertex, P: Clone>(
        &self,
        graph: &Multigraph<V, P>,
        from: &str,
        to: &str,
    ) -> Option<Path<P>> {
        if from == to || !self.distance(from, to)?.is_finite() {
            return None;
        }
        let mut edges = Vec::new();
        let mut cursor = from.to_string();
        while cursor != to {
            let key = self.next_edge.get(&cursor)?.get(to)?;
            edges.push(graph.edge(key)?.clone());
            cursor = key.target.clone();
        }
        Some(Path::new(edges))
    }

    /// The full label → label → path table, omitting self and unreachable
    /// entries.
    pub fn paths<V: Vertex, P: Clone>(
        &self,
        graph: &Multigraph<V, P>,
    ) -> IndexMap<String, IndexMap<String, Path<P>>> {
        let mut table: IndexMap<String, IndexMap<String, Path<P>>> = IndexMap::new();
        for from in &self.order {
            let row = table.entry(from.clone()).or_default();
            for to in &self.order {
                if let Some(path) = self.path(graph, from, to) {
                    row.insert(to.clone(), path);
                }
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menet_core::{CompoundGraph, CompoundVertex, Edge, ReactionLink};

    fn edge(src: &str, dst: &str, label: &str, weight: f64) -> Edge<ReactionLink> {
        Edge::new(src, dst, label, ReactionLink::new(label)).with_weight(weight)
    }

    fn triangle() -> CompoundGraph {
        let mut g = CompoundGraph::new();
        for id in ["a", "b", "c"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge(edge("a", "b", "ab", 1.0)).unwrap();
        g.add_edge(edge("b", "c", "bc", 2.0)).unwrap();
        g.add_edge(edge("a", "c", "ac", 5.0)).unwrap();
        g
    }

    #[test]
    fn distances_have_infinity_and_zero_semantics() {
        let g = triangle();
        let fw = FloydWarshall::new(&g);
        assert_eq!(fw.distance("a", "a"), Some(0.0));
        assert_eq!(fw.distance("a", "c"), Some(3.0)); // via b, not the direct 5
        assert_eq!(fw.distance("c", "a"), Some(f64::INFINITY));
    }

    #[test]
    fn paths_omit_self_and_unreachable() {
        let g = triangle();
        let fw = FloydWarshall::new(&g);
        let table = fw.paths(&g);
        assert!(!table["a"].contains_key("a"));
        assert!(!table["c"].contains_key("a"));

        let path = &table["a"]["c"];
        assert_eq!(path.vertices(), vec!["a", "b", "c"]);
        assert_eq!(path.weight(), 3.0);
    }

    #[test]
    fn lightest_parallel_edge_wins() {
        let mut g = triangle();
        g.add_edge(edge("a", "b", "ab2", 0.25)).unwrap();
        let fw = FloydWarshall::new(&g);
        assert_eq!(fw.distance("a", "b"), Some(0.25));
        let path = fw.path(&g, "a", "b").unwrap();
        assert_eq!(path.edges()[0].label, "ab2");
    }

    #[test]
    fn subset_restricts_edges() {
        let g = triangle();
        let fw = FloydWarshall::over(&g, &["a", "c"]).unwrap();
        // b is outside the subset, so only the direct edge remains.
        assert_eq!(fw.distance("a", "c"), Some(5.0));
        assert!(matches!(
            FloydWarshall::over(&g, &["a", "nope"]),
            Err(PathError::VertexNotFound(_))
        ));
    }
}
