//! Error type for the path engine.

use thiserror::Error;

/// Errors from shortest-path, closure, and Steiner computations.
///
/// Unreachability is never an error; it surfaces as `None` or an absent
/// map entry. Errors are reserved for malformed requests.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("vertex not found: {0}")]
    VertexNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PathError::VertexNotFound("glc".into());
        assert!(err.to_string().contains("glc"));
    }
}
