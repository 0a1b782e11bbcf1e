//! Edge weighting policies.
//!
//! A policy assigns a weight to every edge of a graph in place and is
//! idempotent given the same graph state. Callers who need the original
//! weights must clone the graph first; the clone primitive is part of the
//! container contract, not an optional nicety.

pub mod table;

use indexmap::IndexMap;

use crate::graph::{EdgeKey, Multigraph, Vertex};

pub use table::{WeightError, WeightTable};

/// Strategy assigning a numeric weight to every edge of a graph.
pub trait WeightingPolicy<V: Vertex, P: Clone> {
    /// Overwrite every edge weight in place.
    fn set_weights(&self, graph: &mut Multigraph<V, P>);
}

/// Constant weight for all edges; 1.0 by default.
#[derive(Debug, Clone, Copy)]
pub struct UniformWeights {
    pub weight: f64,
}

impl Default for UniformWeights {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

impl<V: Vertex, P: Clone> WeightingPolicy<V, P> for UniformWeights {
    fn set_weights(&self, graph: &mut Multigraph<V, P>) {
        let keys: Vec<EdgeKey> = graph.edge_keys().cloned().collect();
        for key in keys {
            graph
                .set_weight(&key, self.weight)
                .expect("key was just read from the graph");
        }
    }
}

/// Hub-penalizing weight: `(deg(source) · deg(target))^k`, default k = 2.
#[derive(Debug, Clone, Copy)]
pub struct DegreeWeights {
    pub exponent: f64,
}

impl Default for DegreeWeights {
    fn default() -> Self {
        Self { exponent: 2.0 }
    }
}

impl<V: Vertex, P: Clone> WeightingPolicy<V, P> for DegreeWeights {
    fn set_weights(&self, graph: &mut Multigraph<V, P>) {
        let keys: Vec<EdgeKey> = graph.edge_keys().cloned().collect();
        for key in keys {
            let product = (graph.degree(&key.source) * graph.degree(&key.target)) as f64;
            graph
                .set_weight(&key, product.powf(self.exponent))
                .expect("key was just read from the graph");
        }
    }
}

/// Uniform branching probability: `1 / out-degree(source)`, so the parallel
/// edges a vertex fans out into share its unit of outgoing mass equally.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilityWeights;

impl<V: Vertex, P: Clone> WeightingPolicy<V, P> for ProbabilityWeights {
    fn set_weights(&self, graph: &mut Multigraph<V, P>) {
        let keys: Vec<EdgeKey> = graph.edge_keys().cloned().collect();
        for key in keys {
            let branches = graph.out_degree(&key.source) as f64;
            graph
                .set_weight(&key, 1.0 / branches)
                .expect("key was just read from the graph");
        }
    }
}

/// Row-stochastic normalization of an already-scored graph: each edge's
/// weight becomes its score divided by the total score mass leaving its
/// source vertex. Falls back to 1.0 when that mass is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct StochasticWeights;

impl<V: Vertex, P: Clone> WeightingPolicy<V, P> for StochasticWeights {
    fn set_weights(&self, graph: &mut Multigraph<V, P>) {
        let mut outgoing_mass: IndexMap<String, f64> = IndexMap::new();
        for edge in graph.edges() {
            *outgoing_mass.entry(edge.source.clone()).or_insert(0.0) += edge.score;
        }
        let scored: Vec<(EdgeKey, f64)> = graph
            .edges()
            .map(|e| (e.key(), e.score))
            .collect();
        for (key, score) in scored {
            let mass = outgoing_mass[&key.source];
            let weight = if mass > 0.0 { score / mass } else { 1.0 };
            graph
                .set_weight(&key, weight)
                .expect("key was just read from the graph");
        }
    }
}

/// Structural-similarity weight between the two endpoint entities.
///
/// The similarity computation itself lives outside the core (a chemistry
/// fingerprint library, typically); this policy only defines the seam and
/// clamps the result into the documented [0, 1] contract.
pub struct SimilarityWeights<F> {
    scorer: F,
}

impl<F> SimilarityWeights<F> {
    pub fn new(scorer: F) -> Self {
        Self { scorer }
    }
}

impl<V, P, F> WeightingPolicy<V, P> for SimilarityWeights<F>
where
    V: Vertex,
    P: Clone,
    F: Fn(&V, &V) -> f64,
{
    fn set_weights(&self, graph: &mut Multigraph<V, P>) {
        let keys: Vec<EdgeKey> = graph.edge_keys().cloned().collect();
        for key in keys {
            let similarity = {
                let source = graph
                    .vertex(&key.source)
                    .expect("edge endpoints are always vertices");
                let target = graph
                    .vertex(&key.target)
                    .expect("edge endpoints are always vertices");
                (self.scorer)(source, target).clamp(0.0, 1.0)
            };
            graph
                .set_weight(&key, similarity)
                .expect("key was just read from the graph");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::link::CompoundGraph;
    use crate::graph::vertex::CompoundVertex;

    fn fan_graph() -> CompoundGraph {
        // a fans out to b (twice, via parallel reactions) and c.
        let mut g = CompoundGraph::new();
        for id in ["a", "b", "c"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge_with("a", "b", "r1").unwrap();
        g.add_edge_with("a", "b", "r2").unwrap();
        g.add_edge_with("a", "c", "r3").unwrap();
        g
    }

    #[test]
    fn uniform_resets_every_weight() {
        let mut g = fan_graph();
        let key = g.edge_keys().next().cloned().unwrap();
        g.set_weight(&key, 42.0).unwrap();

        UniformWeights::default().set_weights(&mut g);
        assert!(g.edges().all(|e| e.weight == 1.0));
    }

    #[test]
    fn degree_weight_penalizes_hubs() {
        let mut g = fan_graph();
        DegreeWeights::default().set_weights(&mut g);
        // deg(a) = 3, deg(b) = 2 -> (3 * 2)^2 = 36.
        let e = g.get_edge("a", "b", "r1").unwrap();
        assert_eq!(e.weight, 36.0);
        // deg(c) = 1 -> (3 * 1)^2 = 9.
        let e = g.get_edge("a", "c", "r3").unwrap();
        assert_eq!(e.weight, 9.0);
    }

    #[test]
    fn probability_splits_branching_mass() {
        let mut g = fan_graph();
        ProbabilityWeights.set_weights(&mut g);
        for edge in g.edges() {
            assert!((edge.weight - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn stochastic_normalizes_scores_per_source() {
        let mut g = fan_graph();
        g.set_score(&EdgeKey::new("a", "b", "r1"), 3.0).unwrap();
        g.set_score(&EdgeKey::new("a", "b", "r2"), 1.0).unwrap();
        g.set_score(&EdgeKey::new("a", "c", "r3"), 4.0).unwrap();

        StochasticWeights.set_weights(&mut g);
        assert_eq!(g.get_edge("a", "b", "r1").unwrap().weight, 3.0 / 8.0);
        assert_eq!(g.get_edge("a", "b", "r2").unwrap().weight, 1.0 / 8.0);
        assert_eq!(g.get_edge("a", "c", "r3").unwrap().weight, 0.5);
    }

    #[test]
    fn stochastic_falls_back_on_zero_mass() {
        let mut g = fan_graph();
        StochasticWeights.set_weights(&mut g);
        assert!(g.edges().all(|e| e.weight == 1.0));
    }

    #[test]
    fn similarity_is_clamped() {
        let mut g = fan_graph();
        let policy = SimilarityWeights::new(|a: &CompoundVertex, b: &CompoundVertex| {
            if a.id == "a" && b.id == "b" {
                2.5
            } else {
                -1.0
            }
        });
        policy.set_weights(&mut g);
        assert_eq!(g.get_edge("a", "b", "r1").unwrap().weight, 1.0);
        assert_eq!(g.get_edge("a", "c", "r3").unwrap().weight, 0.0);
    }

    #[test]
    fn policies_are_idempotent() {
        let mut g = fan_graph();
        DegreeWeights::default().set_weights(&mut g);
        let first: Vec<f64> = g.edges().map(|e| e.weight).collect();
        DegreeWeights::default().set_weights(&mut g);
        let second: Vec<f64> = g.edges().map(|e| e.weight).collect();
        assert_eq!(first, second);
    }
}
