//! Graph transforms for menet: filters, merging, set operations, and the
//! graph factory.
//!
//! Filters are the one documented family of in-place mutations ("removes
//! and returns count removed"); everything else here is non-destructive
//! and returns a new graph built through the container's `copy_edge` /
//! `reverse_edge` seam.

pub mod error;
pub mod factory;
pub mod filter;
pub mod merge;
pub mod ops;

pub use error::TransformError;
pub use factory::{
    create_copy, from_elements, induced_subgraph, random_subgraph, reverse, sample_edges,
    sample_vertices, subgraph_from_edges, subgraph_from_paths,
};
pub use filter::{
    score_filter, score_percentile_filter, score_rank_filter, weight_filter,
    weight_percentile_filter, weight_rank_filter, Comparison,
};
pub use merge::{merge_compartments, merge_compartments_matching, merge_parallel_edges};
pub use ops::{intersect, intersect_order, intersect_size, union, union_order, union_size};
