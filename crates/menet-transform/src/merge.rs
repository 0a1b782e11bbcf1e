//! Merging: parallel edges into meta-edges, compartment-split vertices
//! into single vertices.

use indexmap::{IndexMap, IndexSet};

use menet_core::{
    CompoundGraph, CompoundVertex, Edge, MergedGraph, MergedLink, Multigraph, Vertex,
};

/// Collapse all parallel edges between the same ordered vertex pair into
/// one meta-edge carrying the original edge list. The meta-edge's weight
/// and score are the means of its constituents; its label is the sorted
/// `+`-join of the constituent labels.
pub fn merge_parallel_edges<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
) -> MergedGraph<V, P> {
    let mut merged = MergedGraph::new();
    for vertex in graph.vertices() {
        merged.add_vertex(vertex.clone());
    }

    let mut groups: IndexMap<(String, String), Vec<Edge<P>>> = IndexMap::new();
    for edge in graph.edges() {
        groups
            .entry((edge.source.clone(), edge.target.clone()))
            .or_default()
            .push(edge.clone());
    }

    for ((source, target), edges) in groups {
        let mut labels: Vec<&str> = edges.iter().map(|e| e.label.as_str()).collect();
        labels.sort_unstable();
        let label = labels.join("+");
        let count = edges.len() as f64;
        let weight = edges.iter().map(|e| e.weight).sum::<f64>() / count;
        let score = edges.iter().map(|e| e.score).sum::<f64>() / count;
        merged
            .add_edge(
                Edge::new(source, target, label, MergedLink { merged: edges })
                    .with_weight(weight)
                    .with_score(score),
            )
            .expect("one meta-edge per ordered pair cannot collide");
    }
    merged
}

/// The merged identity of a compound vertex: its id with the trailing
/// `_{compartment}` suffix stripped, when present.
fn compartmentless_id(vertex: &CompoundVertex) -> String {
    if let Some(compartment) = &vertex.compartment {
        let suffix = format!("_{compartment}");
        if let Some(base) = vertex.id.strip_suffix(&suffix) {
            if !base.is_empty() {
                return base.to_string();
            }
        }
    }
    vertex.id.clone()
}

/// Collapse compound vertices that differ only by compartment into single
/// vertices (all compartments into one).
///
/// Edges between members of one merge group represent pure transport and
/// are dropped; edges crossing group boundaries are re-pointed to the
/// merged vertices and deduplicated by (source, target) pair only;
/// per-reaction label granularity is lost at this step.
pub fn merge_compartments(graph: &CompoundGraph) -> CompoundGraph {
    merge_by(graph, compartmentless_id)
}

/// Collapse compound vertices whose ids end with one of the given
/// compartment suffixes (e.g. `"_c"`, `"_e"`), leaving other vertices
/// untouched.
pub fn merge_compartments_matching(graph: &CompoundGraph, suffixes: &[&str]) -> CompoundGraph {
    merge_by(graph, |vertex| {
        for suffix in suffixes {
            if let Some(base) = vertex.id.strip_suffix(suffix) {
                if !base.is_empty() {
                    return base.to_string();
                }
            }
        }
        vertex.id.clone()
    })
}

fn merge_by(graph: &CompoundGraph, merged_id: impl Fn(&CompoundVertex) -> String) -> CompoundGraph {
    let mut mapping: IndexMap<String, String> = IndexMap::new();
    let mut result = CompoundGraph::new();
    for vertex in graph.vertices() {
        let base = merged_id(vertex);
        mapping.insert(vertex.id.clone(), base.clone());
        result.add_vertex(CompoundVertex {
            id: base,
            side: vertex.side,
            compartment: None,
        });
    }

    let mut pairs: IndexSet<(String, String)> = IndexSet::new();
    for edge in graph.edges() {
        let source = mapping[&edge.source].clone();
        let target = mapping[&edge.target].clone();
        if source == target {
            // Intra-group edge: pure transport, dropped.
            continue;
        }
        if !pairs.insert((source.clone(), target.clone())) {
            continue;
        }
        let mut moved = edge.clone();
        moved.source = source;
        moved.target = target;
        result
            .add_edge(moved)
            .expect("pair-level dedup guarantees a free key");
    }
    result
}
