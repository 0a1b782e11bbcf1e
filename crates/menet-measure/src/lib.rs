//! Graph measures and centrality for menet graphs.
//!
//! Three families, all reading an immutable graph snapshot:
//!
//! - global indices ([`global_metrics`]): α/β/γ/η/π, diameter, total
//!   length, connected components, cyclomatic number, with the
//!   multigraph-adjusted edge count feeding the density metrics,
//! - per-vertex centrality: [`betweenness`], [`out_closeness`] /
//!   [`in_closeness`], [`farness`], [`geodesic_neighborhood`],
//!   [`load_points`], and the matrix-backed [`eigenvector_centrality`] /
//!   [`pagerank_with_prior`] behind the [`EigenSolver`] seam,
//! - pairwise neighborhood similarity: [`common_neighbors`],
//!   [`adamic_adar`], [`salton_index`], clustering coefficients.

pub mod centrality;
pub mod error;
pub mod global;
pub mod matrix;
pub mod similarity;

pub use centrality::{
    betweenness, farness, geodesic_neighborhood, in_closeness, load_points, out_closeness,
};
pub use error::MeasureError;
pub use global::{
    adjusted_edge_count, cyclomatic_number, diameter, global_metrics, strong_components,
    total_length, weak_components, GlobalMetrics,
};
pub use matrix::{
    eigenvector_centrality, pagerank_with_prior, EigenSolver, LabeledMatrix, PowerIteration,
    SolverOptions,
};
pub use similarity::{
    adamic_adar, clustering_coefficient, common_neighbors, directed_clustering_coefficient,
    salton_index,
};
