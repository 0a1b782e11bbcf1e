//! Error type for graph measures.

use thiserror::Error;

use menet_path::PathError;

/// Errors from measure and centrality computations.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    #[error("label not in matrix: {0}")]
    UnknownLabel(String),

    #[error("prior vector has no mass")]
    EmptyPrior,

    #[error("matrix is empty")]
    EmptyMatrix,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MeasureError::UnknownLabel("atp".into());
        assert!(err.to_string().contains("atp"));
    }
}
