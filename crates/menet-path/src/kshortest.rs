//! K loopless shortest paths (Yen's algorithm).

use std::collections::BTreeMap;

use indexmap::IndexSet;

use menet_core::{EdgeKey, Multigraph, Vertex};

use crate::dijkstra::{tree_with_constraints, Constraints};
use crate::error::PathError;
use crate::path::Path;

/// Signature used to deduplicate and deterministically order candidate
/// paths: total weight first, then the rendered edge-key sequence.
fn candidate_key<P: Clone>(path: &Path<P>) -> (u64, String) {
    let signature = path
        .edges()
        .iter()
        .map(|e| e.key().to_string())
        .collect::<Vec<_>>()
        .join("|");
    (path.weight().to_bits(), signature)
}

/// The k shortest loopless paths from `source` to `target`, ranked by
/// ascending total weight. Returns fewer than k paths when fewer simple
/// paths exist. Absent endpoints fail fast.
pub fn k_shortest<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    source: &str,
    target: &str,
    k: usize,
) -> Result<Vec<Path<P>>, PathError> {
    for id in [source, target] {
        if !graph.contains_vertex(id) {
            return Err(PathError::VertexNotFound(id.to_string()));
        }
    }
    if k == 0 {
        return Ok(Vec::new());
    }

    let first = tree_with_constraints(graph, source, false, None, Some(target)).path_to(target);
    let Some(first) = first else {
        return Ok(Vec::new());
    };
    if first.is_empty() {
        // source == target: the empty path is the only loopless path.
        return Ok(vec![first]);
    }

    let mut accepted: Vec<Path<P>> = vec![first];
    let mut seen: IndexSet<(u64, String)> = IndexSet::new();
    seen.insert(candidate_key(&accepted[0]));
    let mut candidates: BTreeMap<(u64, String), Path<P>> = BTreeMap::new();

    while accepted.len() < k {
        let previous = accepted.last().expect("accepted starts non-empty").clone();

        for spur_index in 0..previous.len() {
            let root_edges = &previous.edges()[..spur_index];
            let spur_vertex = if spur_index == 0 {
                source
            } else {
                root_edges[spur_index - 1].target.as_str()
            };

            // Ban the outgoing edge of every accepted path that shares this
            // root, so each spur search finds a genuinely new continuation.
            let mut banned_edges: IndexSet<EdgeKey> = IndexSet::new();
            for path in &accepted {
                if path.len() > spur_index
                    && path.edges()[..spur_index]
                        .iter()
                        .map(|e| e.key())
                        .eq(root_edges.iter().map(|e| e.key()))
                {
                    banned_edges.insert(path.edges()[spur_index].key());
                }
            }

            // Ban root vertices before the spur so spur paths stay loopless.
            let mut banned_vertices: IndexSet<String> = IndexSet::new();
            if spur_index > 0 {
                banned_vertices.insert(source.to_string());
                for edge in &root_edges[..spur_index - 1] {
                    banned_vertices.insert(edge.target.clone());
                }
            }

            let constraints = Constraints {
                banned_vertices: &banned_vertices,
                banned_edges: &banned_edges,
            };
            let spur_tree = tree_with_constraints(
                graph,
                spur_vertex,
                false,
                Some(&constraints),
                Some(target),
            );
            let Some(spur_path) = spur_tree.path_to(target) else {
                continue;
            };

            let mut edges = root_edges.to_vec();
            edges.extend(spur_path.into_edges());
            let candidate = Path::new(edges);
            let key = candidate_key(&candidate);
            if !seen.contains(&key) && !candidates.contains_key(&key) {
                candidates.insert(key, candidate);
            }
        }

        let Some((key, next)) = candidates.pop_first() else {
            break;
        };
        seen.insert(key);
        accepted.push(next);
    }

    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use menet_core::{CompoundGraph, CompoundVertex, Edge, ReactionLink};

    fn edge(src: &str, dst: &str, label: &str, weight: f64) -> Edge<ReactionLink> {
        Edge::new(src, dst, label, ReactionLink::new(label)).with_weight(weight)
    }

    fn two_route_graph() -> CompoundGraph {
        let mut g = CompoundGraph::new();
        for id in ["a", "b", "c", "d", "e", "f"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge(edge("a", "b", "ab", 1.0)).unwrap();
        g.add_edge(edge("b", "c", "bc", 1.0)).unwrap();
        g.add_edge(edge("a", "d", "ad", 1.0)).unwrap();
        g.add_edge(edge("d", "e", "de", 1.0)).unwrap();
        g.add_edge(edge("e", "f", "ef", 1.0)).unwrap();
        g.add_edge(edge("f", "c", "fc", 1.0)).unwrap();
        g
    }

    #[test]
    fn returns_at_most_k_loopless_paths_in_weight_order() {
        let g = two_route_graph();
        let paths = k_shortest(&g, "a", "c", 3).unwrap();
        // Only two simple paths exist.
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].weight(), 2.0);
        assert_eq!(paths[1].weight(), 4.0);
        assert!(paths.windows(2).all(|w| w[0].weight() <= w[1].weight()));
        for path in &paths {
            let mut vertices = path.vertices();
            vertices.sort_unstable();
            vertices.dedup();
            assert_eq!(vertices.len(), path.len() + 1, "path must be loopless");
        }
    }

    #[test]
    fn parallel_edges_count_as_distinct_paths() {
        let mut g = CompoundGraph::new();
        for id in ["a", "b"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge(edge("a", "b", "r1", 1.0)).unwrap();
        g.add_edge(edge("a", "b", "r2", 2.0)).unwrap();

        let paths = k_shortest(&g, "a", "b", 5).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].edges()[0].label, "r1");
        assert_eq!(paths[1].edges()[0].label, "r2");
    }

    #[test]
    fn k_zero_and_unreachable_yield_empty() {
        let g = two_route_graph();
        assert!(k_shortest(&g, "a", "c", 0).unwrap().is_empty());
        assert!(k_shortest(&g, "c", "a", 3).unwrap().is_empty());
    }

    #[test]
    fn missing_vertex_fails_fast() {
        let g = two_route_graph();
        assert!(matches!(
            k_shortest(&g, "a", "nope", 2),
            Err(PathError::VertexNotFound(_))
        ));
    }
}
