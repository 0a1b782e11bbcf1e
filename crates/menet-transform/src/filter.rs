//! In-place edge filters over weight and score.
//!
//! Filters remove the edges *matching* the comparison against the
//! threshold and return how many were removed. They mutate the graph in
//! place; callers needing the original must clone first. The rank and
//! percentile variants first derive the threshold from the edge values
//! themselves, then apply the same six operators.

use menet_core::{Edge, EdgeKey, Multigraph, Vertex};

/// The six comparison operators filters accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    /// Whether `value` matches the comparison against `threshold`.
    pub fn test(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Eq => value == threshold,
            Comparison::Ne => value != threshold,
            Comparison::Lt => value < threshold,
            Comparison::Le => value <= threshold,
            Comparison::Gt => value > threshold,
            Comparison::Ge => value >= threshold,
        }
    }
}

fn remove_matching<V: Vertex, P: Clone>(
    graph: &mut Multigraph<V, P>,
    threshold: f64,
    comparison: Comparison,
    value_of: impl Fn(&Edge<P>) -> f64,
) -> usize {
    let doomed: Vec<EdgeKey> = graph
        .edges()
        .filter(|e| comparison.test(value_of(e), threshold))
        .map(|e| e.key())
        .collect();
    for key in &doomed {
        graph
            .remove_edge(key)
            .expect("key was just read from the graph");
    }
    doomed.len()
}

/// Remove every edge whose weight matches the comparison. Returns the
/// number of edges removed.
pub fn weight_filter<V: Vertex, P: Clone>(
    graph: &mut Multigraph<V, P>,
    threshold: f64,
    comparison: Comparison,
) -> usize {
    remove_matching(graph, threshold, comparison, |e| e.weight)
}

/// Remove every edge whose score matches the comparison.
pub fn score_filter<V: Vertex, P: Clone>(
    graph: &mut Multigraph<V, P>,
    threshold: f64,
    comparison: Comparison,
) -> usize {
    remove_matching(graph, threshold, comparison, |e| e.score)
}

/// The rank-th highest distinct value (1-based), clamped to the smallest
/// distinct value when rank exceeds the population.
fn rank_cutoff(mut values: Vec<f64>, rank: usize) -> Option<f64> {
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    values.dedup();
    if values.is_empty() || rank == 0 {
        return None;
    }
    Some(values[rank.min(values.len()) - 1])
}

/// Nearest-rank percentile cutoff over ascending values.
fn percentile_cutoff(mut values: Vec<f64>, percentile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    let rank = ((percentile / 100.0) * n as f64).ceil() as usize;
    Some(values[rank.clamp(1, n) - 1])
}

/// Rank filter on weights: the threshold is the rank-th highest distinct
/// weight, then the comparison removes matching edges as usual.
pub fn weight_rank_filter<V: Vertex, P: Clone>(
    graph: &mut Multigraph<V, P>,
    rank: usize,
    comparison: Comparison,
) -> usize {
    match rank_cutoff(graph.edges().map(|e| e.weight).collect(), rank) {
        Some(cutoff) => weight_filter(graph, cutoff, comparison),
        None => 0,
    }
}

/// Percentile filter on weights (nearest-rank convention).
pub fn weight_percentile_filter<V: Vertex, P: Clone>(
    graph: &mut Multigraph<V, P>,
    percentile: f64,
    comparison: Comparison,
) -> usize {
    match percentile_cutoff(graph.edges().map(|e| e.weight).collect(), percentile) {
        Some(cutoff) => weight_filter(graph, cutoff, comparison),
        None => 0,
    }
}

/// Rank filter on scores.
pub fn score_rank_filter<V: Vertex, P: Clone>(
    graph: &mut Multigraph<V, P>,
    rank: usize,
    comparison: Comparison,
) -> usize {
    match rank_cutoff(graph.edges().map(|e| e.score).collect(), rank) {
        Some(cutoff) => score_filter(graph, cutoff, comparison),
        None => 0,
    }
}

/// Percentile filter on scores (nearest-rank convention).
pub fn score_percentile_filter<V: Vertex, P: Clone>(
    graph: &mut Multigraph<V, P>,
    percentile: f64,
    comparison: Comparison,
) -> usize {
    match percentile_cutoff(graph.edges().map(|e| e.score).collect(), percentile) {
        Some(cutoff) => score_filter(graph, cutoff, comparison),
        None => 0,
    }
}
