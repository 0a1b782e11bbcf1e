//! Single-source shortest paths (Dijkstra) and set-to-set distance
//! aggregation.
//!
//! Edge weights must be non-negative; every weighting policy shipped with
//! menet produces non-negative weights. Tie-breaking is deterministic: the
//! heap orders equal distances by insertion sequence, and adjacency is
//! iterated in edge insertion order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use indexmap::{IndexMap, IndexSet};

use menet_core::{Edge, EdgeKey, Multigraph, Vertex};

use crate::error::PathError;
use crate::path::Path;

/// The result of one single-source run: settled distances and, per reached
/// vertex, the edge its shortest path arrives through.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<P> {
    source: String,
    distances: IndexMap<String, f64>,
    parents: IndexMap<String, Edge<P>>,
}

impl<P: Clone> ShortestPathTree<P> {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Shortest distance to a vertex, `None` if unreached.
    pub fn distance(&self, id: &str) -> Option<f64> {
        self.distances.get(id).copied()
    }

    /// All reached vertices with their distances, in settle order.
    /// The source itself is included at distance 0.
    pub fn reached(&self) -> impl Iterator<Item = (&str, f64)> {
        self.distances.iter().map(|(id, d)| (id.as_str(), *d))
    }

    /// The edge the shortest path to `id` arrives through.
    pub fn parent_edge(&self, id: &str) -> Option<&Edge<P>> {
        self.parents.get(id)
    }

    /// Reconstruct the shortest path to a vertex. `None` if unreached;
    /// the empty path if `id` is the source itself.
    pub fn path_to(&self, id: &str) -> Option<Path<P>> {
        if id == self.source {
            return Some(Path::empty());
        }
        self.distances.get(id)?;
        let mut edges = Vec::new();
        let mut cursor = id;
        while cursor != self.source {
            let edge = self
                .parents
                .get(cursor)
                .expect("every reached non-source vertex has a parent edge");
            edges.push(edge.clone());
            cursor = &edge.source;
        }
        edges.reverse();
        Some(Path::new(edges))
    }
}

/// Heap entry: (distance bits, insertion sequence, vertex index).
/// Non-negative f64 bit patterns order the same way the values do.
type HeapEntry = Reverse<(u64, u64, usize)>;

pub(crate) struct Constraints<'a> {
    pub banned_vertices: &'a IndexSet<String>,
    pub banned_edges: &'a IndexSet<EdgeKey>,
}

pub(crate) fn tree_with_constraints<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    source: &str,
    undirected: bool,
    constraints: Option<&Constraints<'_>>,
    stop_at: Option<&str>,
) -> ShortestPathTree<P> {
    let mut distances: IndexMap<String, f64> = IndexMap::new();
    let mut parents: IndexMap<String, Edge<P>> = IndexMap::new();
    let mut settled: IndexSet<String> = IndexSet::new();
    let mut best: IndexMap<String, f64> = IndexMap::new();
    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();
    // Heap entries carry an index into this arena instead of a String so
    // ordering stays cheap and deterministic.
    let mut ids: Vec<String> = Vec::new();
    let mut seq: u64 = 0;

    best.insert(source.to_string(), 0.0);
    ids.push(source.to_string());
    heap.push(Reverse((0.0f64.to_bits(), seq, 0)));

    while let Some(Reverse((bits, _, idx))) = heap.pop() {
        let current = ids[idx].clone();
        let dist = f64::from_bits(bits);
        if settled.contains(&current) {
            continue;
        }
        settled.insert(current.clone());
        distances.insert(current.clone(), dist);
        if stop_at == Some(current.as_str()) {
            break;
        }

        let mut relax = |edge: Edge<P>| {
            if let Some(c) = constraints {
                if c.banned_edges.contains(&edge.key()) || c.banned_vertices.contains(&edge.target)
                {
                    return;
                }
            }
            let candidate = dist + edge.weight;
            let target = edge.target.clone();
            if settled.contains(&target) {
                return;
            }
            let improved = match best.get(&target) {
                Some(&known) => candidate < known,
                None => true,
            };
            if improved {
                best.insert(target.clone(), candidate);
                parents.insert(target.clone(), edge);
                seq += 1;
                ids.push(target);
                heap.push(Reverse((candidate.to_bits(), seq, ids.len() - 1)));
            }
        };

        for edge in graph.out_edges(&current) {
            relax(edge.clone());
        }
        if undirected {
            // Traverse incoming edges backwards; the path materializes the
            // reversed copy, the graph itself is untouched.
            for edge in graph.in_edges(&current) {
                // Bans refer to the edge as stored in the graph.
                if let Some(c) = constraints {
                    if c.banned_edges.contains(&edge.key()) {
                        continue;
                    }
                }
                relax(edge.reverse_edge());
            }
        }
    }

    ShortestPathTree {
        source: source.to_string(),
        distances,
        parents,
    }
}

fn require_vertex<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    id: &str,
) -> Result<(), PathError> {
    if graph.contains_vertex(id) {
        Ok(())
    } else {
        Err(PathError::VertexNotFound(id.to_string()))
    }
}

/// The full shortest-path tree rooted at `source`.
pub fn shortest_path_tree<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    source: &str,
    undirected: bool,
) -> Result<ShortestPathTree<P>, PathError> {
    require_vertex(graph, source)?;
    Ok(tree_with_constraints(graph, source, undirected, None, None))
}

/// Single-pair weighted shortest path over directed edges. Absent endpoints
/// fail fast; an unreachable target is `Ok(None)`.
pub fn shortest<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    source: &str,
    target: &str,
) -> Result<Option<Path<P>>, PathError> {
    require_vertex(graph, source)?;
    require_vertex(graph, target)?;
    let tree = tree_with_constraints(graph, source, false, None, Some(target));
    Ok(tree.path_to(target))
}

/// Single-pair shortest path treating every edge as bidirectional for the
/// traversal only; the graph is not mutated.
pub fn shortest_undirected<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    source: &str,
    target: &str,
) -> Result<Option<Path<P>>, PathError> {
    require_vertex(graph, source)?;
    require_vertex(graph, target)?;
    let tree = tree_with_constraints(graph, source, true, None, Some(target));
    Ok(tree.path_to(target))
}

/// For each source, the minimum shortest-path distance to any target.
/// Self-distances are excluded; sources reaching no target are absent from
/// the result.
pub fn min_sp_distance<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    sources: &[&str],
    targets: &[&str],
    undirected: bool,
) -> Result<IndexMap<String, f64>, PathError> {
    set_distance(graph, sources, targets, undirected, |distances| {
        distances.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

/// For each source, the mean shortest-path distance to the reachable
/// targets. Unreachable targets are excluded from the mean; sources
/// reaching no target are absent from the result.
pub fn average_sp_distance<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    sources: &[&str],
    targets: &[&str],
    undirected: bool,
) -> Result<IndexMap<String, f64>, PathError> {
    set_distance(graph, sources, targets, undirected, |distances| {
        distances.iter().sum::<f64>() / distances.len() as f64
    })
}

fn set_distance<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
    sources: &[&str],
    targets: &[&str],
    undirected: bool,
    fold: impl Fn(&[f64]) -> f64,
) -> Result<IndexMap<String, f64>, PathError> {
    for id in sources.iter().chain(targets) {
        require_vertex(graph, id)?;
    }
    let mut result = IndexMap::new();
    for &source in sources {
        let tree = tree_with_constraints(graph, source, undirected, None, None);
        let reached: Vec<f64> = targets
            .iter()
            .filter(|&&t| t != source)
            .filter_map(|&t| tree.distance(t))
            .collect();
        if !reached.is_empty() {
            result.insert(source.to_string(), fold(&reached));
        }
    }
    Ok(result)
}
