//! Error type for graph transforms.

use thiserror::Error;

use menet_core::EdgeKey;

/// Errors from filters, merges, set operations, and the factory.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("edge {edge} references vertex {vertex} missing from the supplied vertex set")]
    MissingVertex { edge: EdgeKey, vertex: String },

    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeKey),

    #[error("requested {requested} random samples but only {available} available")]
    SampleTooLarge { requested: usize, available: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TransformError::SampleTooLarge {
            requested: 5,
            available: 2,
        };
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("2"));
    }
}
