//! Global metrics over an immutable graph snapshot.
//!
//! Unless stated otherwise the graph is treated as undirected. Density
//! metrics (α, γ) use the multigraph-adjusted edge count (parallel edges
//! between the same pair counted once), while β, η, and the cyclomatic
//! number keep the raw multigraph count.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use menet_core::{Multigraph, Vertex};
use menet_path::shortest_path_tree;

use crate::error::MeasureError;

/// The bundle of global indices computed by [`global_metrics`].
#[derive(Debug, Clone, Serialize)]
pub struct GlobalMetrics {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub adjusted_edge_count: usize,
    /// Cyclomatic ratio (E' − (V−1)) / (V(V−1)/2 − (V−1)).
    pub alpha: f64,
    /// Edge/vertex ratio E/V.
    pub beta: f64,
    /// Density E' / (V(V−1)/2).
    pub gamma: f64,
    /// Average edge length, total_length / E.
    pub eta: f64,
    /// Diameter over total length.
    pub pi: f64,
    /// Max finite undirected shortest-path weight over all pairs.
    pub diameter: f64,
    /// Sum of all edge weights.
    pub total_length: f64,
    pub weak_components: usize,
    pub strong_components: usize,
    /// E − V + weak components.
    pub cyclomatic_number: usize,
}

/// Logical edge count for density metrics: parallel edges between the same
/// unordered vertex pair collapse to one.
pub fn adjusted_edge_count<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> usize {
    let mut pairs: IndexSet<(String, String)> = IndexSet::new();
    for edge in graph.edges() {
        let (a, b) = if edge.source <= edge.target {
            (edge.source.clone(), edge.target.clone())
        } else {
            (edge.target.clone(), edge.source.clone())
        };
        pairs.insert((a, b));
    }
    pairs.len()
}

/// Sum of all edge weights.
pub fn total_length<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> f64 {
    graph.edges().map(|e| e.weight).sum()
}

/// Maximum finite shortest-path weight over all vertex pairs, treating the
/// graph as undirected. 0 for graphs without a connected pair.
pub fn diameter<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> Result<f64, MeasureError> {
    let mut diameter = 0.0f64;
    let ids: Vec<String> = graph.vertex_ids().map(str::to_string).collect();
    for id in &ids {
        let tree = shortest_path_tree(graph, id, true)?;
        for (_, distance) in tree.reached() {
            if distance.is_finite() && distance > diameter {
                diameter = distance;
            }
        }
    }
    Ok(diameter)
}

/// Number of weakly connected components.
pub fn weak_components<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> usize {
    let mut indices: IndexMap<&str, usize> = IndexMap::new();
    for (i, id) in graph.vertex_ids().enumerate() {
        indices.insert(id, i);
    }
    let mut parent: Vec<usize> = (0..indices.len()).collect();

    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }

    for edge in graph.edges() {
        let a = find(&mut parent, indices[edge.source.as_str()]);
        let b = find(&mut parent, indices[edge.target.as_str()]);
        if a != b {
            parent[b] = a;
        }
    }
    (0..parent.len()).filter(|&i| find(&mut parent, i) == i).count()
}

/// Number of strongly connected components (iterative Tarjan).
pub fn strong_components<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> usize {
    let ids: Vec<&str> = graph.vertex_ids().collect();
    let mut indices: IndexMap<&str, usize> = IndexMap::new();
    for (i, id) in ids.iter().enumerate() {
        indices.insert(id, i);
    }
    let adjacency: Vec<Vec<usize>> = ids
        .iter()
        .map(|id| {
            graph
                .successors(id)
                .into_iter()
                .map(|s| indices[s])
                .collect()
        })
        .collect();

    let n = ids.len();
    const UNVISITED: usize = usize::MAX;
    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0usize;
    let mut components = 0usize;

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }
        let mut call_stack: Vec<(usize, usize)> = vec![(root, 0)];
        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;

        while let Some(&(v, child)) = call_stack.last() {
            if child < adjacency[v].len() {
                call_stack.last_mut().expect("frame checked above").1 += 1;
                let w = adjacency[v][child];
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    call_stack.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
            } else {
                call_stack.pop();
                if let Some(&(parent, _)) = call_stack.last() {
                    lowlink[parent] = lowlink[parent].min(lowlink[v]);
                }
                if lowlink[v] == index[v] {
                    components += 1;
                    loop {
                        let w = stack.pop().expect("stack holds the open component");
                        on_stack[w] = false;
                        if w == v {
                            break;
                        }
                    }
                }
            }
        }
    }
    components
}

/// Cyclomatic number E − V + weak components.
pub fn cyclomatic_number<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> usize {
    (graph.edge_count() + weak_components(graph)).saturating_sub(graph.vertex_count())
}

/// Compute the full bundle of global indices in one pass.
pub fn global_metrics<V: Vertex, P: Clone>(
    graph: &Multigraph<V, P>,
) -> Result<GlobalMetrics, MeasureError> {
    let v = graph.vertex_count();
    let e = graph.edge_count();
    let adjusted = adjusted_edge_count(graph);
    let max_edges = (v * v.saturating_sub(1)) as f64 / 2.0;
    let spanning = v.saturating_sub(1) as f64;

    let alpha = if max_edges > spanning {
        (adjusted as f64 - spanning) / (max_edges - spanning)
    } else {
        0.0
    };
    let beta = if v > 0 { e as f64 / v as f64 } else { 0.0 };
    let gamma = if max_edges > 0.0 {
        adjusted as f64 / max_edges
    } else {
        0.0
    };
    let length = total_length(graph);
    let eta = if e > 0 { length / e as f64 } else { 0.0 };
    let diameter = diameter(graph)?;
    let pi = if length > 0.0 { diameter / length } else { 0.0 };

    Ok(GlobalMetrics {
        vertex_count: v,
        edge_count: e,
        adjusted_edge_count: adjusted,
        alpha,
        beta,
        gamma,
        eta,
        pi,
        diameter,
        total_length: length,
        weak_components: weak_components(graph),
        strong_components: strong_components(graph),
        cyclomatic_number: cyclomatic_number(graph),
    })
}
