//! The seam between the benchmark engine and the remote graph service.
//!
//! The engine only needs two calls: execute one statement against a named
//! graph (optionally scoped to an open change) and list the graphs the
//! service currently serves. Everything network-shaped lives behind
//! [`GraphService`]; tests script it, the `graphmark-client` crate implements
//! it over HTTP.

use thiserror::Error;

/// Error detail reported by a failed service call.
///
/// The wire client distinguishes transport, status and decode failures on its
/// own error type; by the time a failure reaches the benchmark engine only
/// the human-readable detail matters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One named, homogeneously typed result column.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedColumn {
    pub name: String,
    pub values: ColumnValues,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
    Bool(Vec<bool>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Typed columns returned by a single statement execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<TypedColumn>,
}

impl ResultSet {
    /// `(row_count, column_count)` of this result.
    ///
    /// Row count is the tallest column; ragged results are tolerated since
    /// the shape is a sanity signal, not a correctness input.
    pub fn shape(&self) -> (usize, usize) {
        let rows = self
            .columns
            .iter()
            .map(|c| c.values.len())
            .max()
            .unwrap_or(0);
        (rows, self.columns.len())
    }
}

/// Blocking interface to the remote graph service.
///
/// `change` scopes a statement to an open change; the empty string means
/// unscoped. Calls block for the full round-trip and the executor measures
/// exactly that interval, so implementations must not retry or buffer.
pub trait GraphService {
    fn query(
        &mut self,
        statement: &str,
        graph: &str,
        change: &str,
    ) -> Result<ResultSet, ServiceError>;

    /// Names of the graphs currently available on the service.
    fn list_graphs(&mut self) -> Result<Vec<String>, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_of_empty_result_is_zero_by_zero() {
        assert_eq!(ResultSet::default().shape(), (0, 0));
    }

    #[test]
    fn shape_uses_tallest_column() {
        let result = ResultSet {
            columns: vec![
                TypedColumn {
                    name: "id".into(),
                    values: ColumnValues::Int(vec![1, 2, 3]),
                },
                TypedColumn {
                    name: "name".into(),
                    values: ColumnValues::Text(vec!["a".into()]),
                },
            ],
        };
        assert_eq!(result.shape(), (3, 2));
    }
}
