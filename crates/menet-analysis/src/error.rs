//! Error type for network analyses.

use thiserror::Error;

/// Errors from choke-point and scope analysis.
///
/// An empty result (no choke points, an unexpanded scope) is a value;
/// errors are reserved for seed/blocked/avoid sets inconsistent with the
/// graph.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    #[error("expected a compound vertex: {0}")]
    NotACompound(String),

    #[error("expected a reaction vertex: {0}")]
    NotAReaction(String),
}
