//! The labeled adjacency matrix and the injected numeric backend.
//!
//! The measures in this module only build the matrix and wire parameters;
//! the eigen-decomposition itself sits behind the [`EigenSolver`]
//! capability trait so any linear-algebra implementation can be plugged
//! in. [`PowerIteration`] is the small deterministic backend shipped by
//! default.

use indexmap::IndexMap;

use menet_core::{Multigraph, Vertex};

use crate::error::MeasureError;

/// A square, dense, double-valued matrix whose rows and columns are keyed
/// by vertex id.
#[derive(Debug, Clone)]
pub struct LabeledMatrix {
    labels: IndexMap<String, usize>,
    data: Vec<f64>,
}

impl LabeledMatrix {
    /// A zero matrix over the given labels (insertion order preserved).
    pub fn zeros(labels: impl IntoIterator<Item = String>) -> Self {
        let labels: IndexMap<String, usize> = labels
            .into_iter()
            .enumerate()
            .map(|(i, l)| (l, i))
            .collect();
        let n = labels.len();
        Self {
            labels,
            data: vec![0.0; n * n],
        }
    }

    /// The weighted adjacency matrix of a graph: cell (i, j) is the summed
    /// weight of all edges i → j.
    pub fn from_graph<V: Vertex, P: Clone>(graph: &Multigraph<V, P>) -> Self {
        let mut matrix = Self::zeros(graph.vertex_ids().map(str::to_string));
        for edge in graph.edges() {
            let i = matrix.labels[&edge.source];
            let j = matrix.labels[&edge.target];
            let n = matrix.len();
            matrix.data[i * n + j] += edge.weight;
        }
        matrix
    }

    /// Matrix dimension.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row/column labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Cell by labels; `None` when either label is unknown.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.index_of(row)?;
        let j = self.index_of(col)?;
        Some(self.data[i * self.len() + j])
    }

    /// Cell by indices.
    pub fn get_at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.len() + col]
    }

    /// Write a cell by labels.
    pub fn set(&mut self, row: &str, col: &str, value: f64) -> Result<(), MeasureError> {
        let i = self
            .index_of(row)
            .ok_or_else(|| MeasureError::UnknownLabel(row.to_string()))?;
        let j = self
            .index_of(col)
            .ok_or_else(|| MeasureError::UnknownLabel(col.to_string()))?;
        let n = self.len();
        self.data[i * n + j] = value;
        Ok(())
    }

    pub fn row_sum(&self, row: usize) -> f64 {
        let n = self.len();
        self.data[row * n..(row + 1) * n].iter().sum()
    }
}

/// Caller-supplied iteration bounds for the numeric backend.
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// Probability of following the matrix rather than jumping to the
    /// prior (PageRank damping).
    pub damping: f64,
    /// L1 convergence tolerance.
    pub tolerance: f64,
    /// Hard iteration bound; the solver stops here deterministically even
    /// without convergence.
    pub max_iterations: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-9,
            max_iterations: 100,
        }
    }
}

/// The numeric capability the measures depend on.
pub trait EigenSolver {
    /// The principal left eigenvector of the matrix, label-keyed and
    /// L2-normalized.
    fn principal_eigenvector(
        &self,
        matrix: &LabeledMatrix,
        options: &SolverOptions,
    ) -> Result<IndexMap<String, f64>, MeasureError>;

    /// Power iteration with a jump prior: the stationary distribution of
    /// `damping · row-stochastic(M) + (1 − damping) · prior`.
    fn power_iteration_with_prior(
        &self,
        matrix: &LabeledMatrix,
        prior: &IndexMap<String, f64>,
        options: &SolverOptions,
    ) -> Result<IndexMap<String, f64>, MeasureError>;
}

/// The default backend: plain deterministic power iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerIteration;

impl EigenSolver for PowerIteration {
    fn principal_eigenvector(
        &self,
        matrix: &LabeledMatrix,
        options: &SolverOptions,
    ) -> Result<IndexMap<String, f64>, MeasureError> {
        let n = matrix.len();
        if n == 0 {
            return Err(MeasureError::EmptyMatrix);
        }
        let mut x = vec![1.0 / n as f64; n];
        for _ in 0..options.max_iterations {
            let mut next = vec![0.0; n];
            for (i, &xi) in x.iter().enumerate() {
                if xi == 0.0 {
                    continue;
                }
                for j in 0..n {
                    next[j] += xi * matrix.get_at(i, j);
                }
            }
            let norm = next.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm == 0.0 {
                // The iterate died; report the zero vector rather than NaN.
                x = next;
                break;
            }
            for v in &mut next {
                *v /= norm;
            }
            let delta: f64 = x.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
            x = next;
            if delta < options.tolerance {
                break;
            }
        }
        Ok(matrix
            .labels()
            .zip(&x)
            .map(|(l, v)| (l.to_string(), *v))
            .collect())
    }

    fn power_iteration_with_prior(
        &self,
        matrix: &LabeledMatrix,
        prior: &IndexMap<String, f64>,
        options: &SolverOptions,
    ) -> Result<IndexMap<String, f64>, MeasureError> {
        let n = matrix.len();
        if n == 0 {
            return Err(MeasureError::EmptyMatrix);
        }
        for label in prior.keys() {
            if matrix.index_of(label).is_none() {
                return Err(MeasureError::UnknownLabel(label.clone()));
            }
        }
        let mass: f64 = prior.values().sum();
        if mass <= 0.0 {
            return Err(MeasureError::EmptyPrior);
        }
        let mut jump = vec![0.0; n];
        for (label, value) in prior {
            jump[matrix.index_of(label).expect("validated above")] = value / mass;
        }

        let mut x = jump.clone();
        for _ in 0..options.max_iterations {
            let mut next = vec![0.0; n];
            for (i, &xi) in x.iter().enumerate() {
                if xi == 0.0 {
                    continue;
                }
                let row_sum = matrix.row_sum(i);
                if row_sum > 0.0 {
                    for j in 0..n {
                        next[j] += options.damping * xi * matrix.get_at(i, j) / row_sum;
                    }
                } else {
                    // Dangling row: all mass jumps to the prior.
                    for (j, &jv) in jump.iter().enumerate() {
                        next[j] += options.damping * xi * jv;
                    }
                }
            }
            for (j, &jv) in jump.iter().enumerate() {
                next[j] += (1.0 - options.damping) * jv;
            }
            let delta: f64 = x.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
            x = next;
            if delta < options.tolerance {
                break;
            }
        }
        Ok(matrix
            .labels()
            .zip(&x)
            .map(|(l, v)| (l.to_string(), *v))
            .collect())
    }
}

/// Eigenvector centrality of a graph through an injected solver.
pub fn eigenvector_centrality<V: Vertex, P: Clone, S: EigenSolver>(
    graph: &Multigraph<V, P>,
    solver: &S,
    options: &SolverOptions,
) -> Result<IndexMap<String, f64>, MeasureError> {
    solver.principal_eigenvector(&LabeledMatrix::from_graph(graph), options)
}

/// PageRank with a prior/seed vector through an injected solver.
pub fn pagerank_with_prior<V: Vertex, P: Clone, S: EigenSolver>(
    graph: &Multigraph<V, P>,
    solver: &S,
    prior: &IndexMap<String, f64>,
    options: &SolverOptions,
) -> Result<IndexMap<String, f64>, MeasureError> {
    solver.power_iteration_with_prior(&LabeledMatrix::from_graph(graph), prior, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use menet_core::{CompoundGraph, CompoundVertex, Edge, ReactionLink};

    fn edge(src: &str, dst: &str, label: &str, weight: f64) -> Edge<ReactionLink> {
        Edge::new(src, dst, label, ReactionLink::new(label)).with_weight(weight)
    }

    fn cycle() -> CompoundGraph {
        let mut g = CompoundGraph::new();
        for id in ["a", "b", "c"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge(edge("a", "b", "r1", 1.0)).unwrap();
        g.add_edge(edge("b", "c", "r2", 1.0)).unwrap();
        g.add_edge(edge("c", "a", "r3", 1.0)).unwrap();
        g
    }

    #[test]
    fn adjacency_sums_parallel_edges() {
        let mut g = cycle();
        g.add_edge(edge("a", "b", "r4", 2.5)).unwrap();
        let m = LabeledMatrix::from_graph(&g);
        assert_eq!(m.len(), 3);
        assert_eq!(m.get("a", "b"), Some(3.5));
        assert_eq!(m.get("b", "a"), Some(0.0));
        assert_eq!(m.get("a", "nope"), None);
    }

    #[test]
    fn symmetric_cycle_has_uniform_eigenvector() {
        let g = cycle();
        let result =
            eigenvector_centrality(&g, &PowerIteration, &SolverOptions::default()).unwrap();
        let expected = 1.0 / 3.0f64.sqrt();
        for value in result.values() {
            assert!((value - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn pagerank_respects_the_prior() {
        let g = cycle();
        let mut prior = IndexMap::new();
        prior.insert("a".to_string(), 1.0);
        let result =
            pagerank_with_prior(&g, &PowerIteration, &prior, &SolverOptions::default()).unwrap();
        let total: f64 = result.values().sum();
        assert!((total - 1.0).abs() < 1e-6);
        // The jump always lands on a, so a carries the most mass.
        assert!(result["a"] > result["b"]);
        assert!(result["a"] > result["c"]);
    }

    #[test]
    fn pagerank_validates_the_prior() {
        let g = cycle();
        let mut prior = IndexMap::new();
        prior.insert("nope".to_string(), 1.0);
        assert!(matches!(
            pagerank_with_prior(&g, &PowerIteration, &prior, &SolverOptions::default()),
            Err(MeasureError::UnknownLabel(_))
        ));

        let empty = IndexMap::new();
        assert!(matches!(
            pagerank_with_prior(&g, &PowerIteration, &empty, &SolverOptions::default()),
            Err(MeasureError::EmptyPrior)
        ));
    }

    #[test]
    fn empty_matrix_is_an_error() {
        let m = LabeledMatrix::zeros(Vec::new());
        assert!(matches!(
            PowerIteration.principal_eigenvector(&m, &SolverOptions::default()),
            Err(MeasureError::EmptyMatrix)
        ));
    }
}
