//! Path and shortest-path engine for menet graphs.
//!
//! Everything here reads a graph without mutating it:
//!
//! - [`shortest`] / [`shortest_undirected`]: single-pair Dijkstra,
//! - [`k_shortest`]: Yen's k loopless shortest paths,
//! - [`min_sp_distance`] / [`average_sp_distance`]: set-to-set distance
//!   aggregation,
//! - [`FloydWarshall`]: all-pairs distances and path reconstruction,
//! - [`metric_closure`]: compression of a graph into super-edges between
//!   terminal vertices,
//! - [`steiner_tree`]: the closure-based 2-approximation.
//!
//! Path length (edge count) and path weight (sum of edge weights) are
//! tracked separately throughout; see [`Path`].

pub mod closure;
pub mod dijkstra;
pub mod error;
pub mod floyd;
pub mod kshortest;
pub mod path;
pub mod steiner;

pub use closure::{metric_closure, metric_closure_among};
pub use dijkstra::{
    average_sp_distance, min_sp_distance, shortest, shortest_path_tree, shortest_undirected,
    ShortestPathTree,
};
pub use error::PathError;
pub use floyd::FloydWarshall;
pub use kshortest::k_shortest;
pub use path::Path;
pub use steiner::{steiner_tree, steiner_tree_between};
