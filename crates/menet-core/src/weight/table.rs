//! Externally supplied edge weights from a delimited table.
//!
//! The format is one edge override per row, whitespace or tab delimited:
//!
//! ```text
//! # source  target  label  value
//! a  b  r1  0.25
//! ```
//!
//! Blank lines and `#` comment lines are skipped. Applying the table to a
//! graph is strict for weights (an edge without a row is an error) and
//! lenient for scores (unmatched edges keep their default and a warning is
//! logged); both policies are explicit entry points.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::warn;

use crate::graph::{EdgeKey, Multigraph, Vertex};

/// Errors raised while reading or applying a weight table.
#[derive(Debug, Error)]
pub enum WeightError {
    #[error("i/o error reading weight table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed row {line}: expected `source target label value`, got `{text}`")]
    MalformedRow { line: usize, text: String },

    #[error("unparseable value on row {line}: `{value}`")]
    BadValue { line: usize, value: String },

    #[error("duplicate row for edge {0}")]
    DuplicateRow(EdgeKey),

    #[error("no table row for edge {0}")]
    MissingEdge(EdgeKey),
}

/// A parsed (source, target, label) → value table.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    rows: IndexMap<EdgeKey, f64>,
}

impl WeightTable {
    /// Parse a table from any buffered reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, WeightError> {
        let mut rows = IndexMap::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = text.split_whitespace().collect();
            let [source, target, label, value] = fields[..] else {
                return Err(WeightError::MalformedRow {
                    line: index + 1,
                    text: text.to_string(),
                });
            };
            let value: f64 = value.parse().map_err(|_| WeightError::BadValue {
                line: index + 1,
                value: value.to_string(),
            })?;
            let key = EdgeKey::new(source, target, label);
            if rows.insert(key.clone(), value).is_some() {
                return Err(WeightError::DuplicateRow(key));
            }
        }
        Ok(Self { rows })
    }

    /// Parse a table from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WeightError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn get(&self, key: &EdgeKey) -> Option<f64> {
        self.rows.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply the table to every edge weight. Strict: the first graph edge
    /// without a matching row aborts with [`WeightError::MissingEdge`],
    /// leaving already-written weights in place (clone first to keep the
    /// original).
    pub fn apply_weights<V: Vertex, P: Clone>(
        &self,
        graph: &mut Multigraph<V, P>,
    ) -> Result<(), WeightError> {
        let keys: Vec<EdgeKey> = graph.edge_keys().cloned().collect();
        for key in keys {
            let value = self
                .get(&key)
                .ok_or_else(|| WeightError::MissingEdge(key.clone()))?;
            graph
                .set_weight(&key, value)
                .expect("key was just read from the graph");
        }
        Ok(())
    }

    /// Apply the table to edge weights, skipping edges without a row (their
    /// current weight is kept and a warning is logged). Returns the number
    /// of edges updated.
    pub fn apply_weights_lenient<V: Vertex, P: Clone>(
        &self,
        graph: &mut Multigraph<V, P>,
    ) -> usize {
        let keys: Vec<EdgeKey> = graph.edge_keys().cloned().collect();
        let mut applied = 0;
        for key in keys {
            match self.get(&key) {
                Some(value) => {
                    graph
                        .set_weight(&key, value)
                        .expect("key was just read from the graph");
                    applied += 1;
                }
                None => warn!(edge = %key, "no weight-table row for edge, keeping current weight"),
            }
        }
        applied
    }

    /// Apply the table to edge scores. Lenient: unmatched edges keep their
    /// default score. Returns the number of edges updated.
    pub fn apply_scores<V: Vertex, P: Clone>(&self, graph: &mut Multigraph<V, P>) -> usize {
        let keys: Vec<EdgeKey> = graph.edge_keys().cloned().collect();
        let mut applied = 0;
        for key in keys {
            match self.get(&key) {
                Some(value) => {
                    graph
                        .set_score(&key, value)
                        .expect("key was just read from the graph");
                    applied += 1;
                }
                None => warn!(edge = %key, "no weight-table row for edge, keeping current score"),
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::graph::link::CompoundGraph;
    use crate::graph::vertex::CompoundVertex;

    fn two_edge_graph() -> CompoundGraph {
        let mut g = CompoundGraph::new();
        for id in ["a", "b", "c"] {
            g.add_vertex(CompoundVertex::new(id));
        }
        g.add_edge_with("a", "b", "r1").unwrap();
        g.add_edge_with("b", "c", "r2").unwrap();
        g
    }

    #[test]
    fn parses_comments_and_blanks() {
        let table = WeightTable::from_reader(
            "# header comment\n\na b r1 0.25\nb\tc\tr2\t4\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&EdgeKey::new("a", "b", "r1")), Some(0.25));
        assert_eq!(table.get(&EdgeKey::new("b", "c", "r2")), Some(4.0));
    }

    #[test]
    fn malformed_row_is_an_error() {
        let err = WeightTable::from_reader("a b r1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, WeightError::MalformedRow { line: 1, .. }));

        let err = WeightTable::from_reader("a b r1 abc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, WeightError::BadValue { line: 1, .. }));

        let err = WeightTable::from_reader("a b r1 1\na b r1 2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, WeightError::DuplicateRow(_)));
    }

    #[test]
    fn strict_weights_require_full_coverage() {
        let mut g = two_edge_graph();
        let table = WeightTable::from_reader("a b r1 0.5\n".as_bytes()).unwrap();
        let err = table.apply_weights(&mut g).unwrap_err();
        assert!(matches!(err, WeightError::MissingEdge(_)));

        let table = WeightTable::from_reader("a b r1 0.5\nb c r2 2.0\n".as_bytes()).unwrap();
        table.apply_weights(&mut g).unwrap();
        assert_eq!(g.get_edge("a", "b", "r1").unwrap().weight, 0.5);
        assert_eq!(g.get_edge("b", "c", "r2").unwrap().weight, 2.0);
    }

    #[test]
    fn lenient_scores_keep_defaults() {
        let mut g = two_edge_graph();
        let table = WeightTable::from_reader("a b r1 0.9\n".as_bytes()).unwrap();
        assert_eq!(table.apply_scores(&mut g), 1);
        assert_eq!(g.get_edge("a", "b", "r1").unwrap().score, 0.9);
        assert_eq!(g.get_edge("b", "c", "r2").unwrap().score, 0.0);
    }

    #[test]
    fn lenient_weights_report_applied_count() {
        let mut g = two_edge_graph();
        let table = WeightTable::from_reader("a b r1 0.9\n".as_bytes()).unwrap();
        assert_eq!(table.apply_weights_lenient(&mut g), 1);
        assert_eq!(g.get_edge("b", "c", "r2").unwrap().weight, 1.0);
    }

    #[test]
    fn reads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a b r1 0.125").unwrap();
        writeln!(file, "b c r2 8").unwrap();
        let table = WeightTable::from_path(file.path()).unwrap();
        assert_eq!(table.get(&EdgeKey::new("a", "b", "r1")), Some(0.125));
        assert_eq!(table.get(&EdgeKey::new("b", "c", "r2")), Some(8.0));
    }
}
