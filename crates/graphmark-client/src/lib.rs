//! Blocking HTTP client for the remote graph service.
//!
//! Speaks the service's versioned JSON API:
//! - `POST /query` executes one statement against a named graph, optionally
//!   scoped to an open change, and returns typed result columns;
//! - `GET /graphs` lists the graphs the service currently serves.
//!
//! No request timeout is configured: the harness measures the full
//! round-trip of each blocking call, and a hung service call blocks the
//! benchmark.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use graphmark_core::service::{ColumnValues, GraphService, ResultSet, ServiceError, TypedColumn};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("service returned an unreadable response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        ServiceError::new(err.to_string())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
struct QueryRequestV1<'a> {
    query: &'a str,
    graph: &'a str,
    /// Change scope; omitted from the body when the statement is unscoped.
    #[serde(skip_serializing_if = "str::is_empty")]
    change: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct QueryResponseV1 {
    #[serde(default)]
    columns: Vec<ColumnV1>,
}

/// One result column on the wire. `values` stays dynamically typed until
/// `kind` selects the decoding.
#[derive(Debug, Clone, Deserialize)]
struct ColumnV1 {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    values: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphListResponseV1 {
    #[serde(default)]
    graphs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorResponseV1 {
    error: String,
}

fn decode_column(col: ColumnV1) -> Result<TypedColumn, ClientError> {
    let values = match col.kind.as_str() {
        "int" => ColumnValues::Int(serde_json::from_value(col.values)?),
        "float" => ColumnValues::Float(serde_json::from_value(col.values)?),
        "bool" => ColumnValues::Bool(serde_json::from_value(col.values)?),
        // "string", and any kind this client does not know: keep the text form.
        _ => {
            let raw: Vec<serde_json::Value> = serde_json::from_value(col.values)?;
            ColumnValues::Text(
                raw.into_iter()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            )
        }
    };
    Ok(TypedColumn {
        name: col.name,
        values,
    })
}

// ============================================================================
// Client
// ============================================================================

/// Blocking client for one service endpoint.
pub struct GraphHttpClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl GraphHttpClient {
    /// `base_url` is the service endpoint, e.g. `http://127.0.0.1:6666`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute one statement against `graph`, scoped to `change` ("" =
    /// unscoped), returning the typed result columns.
    pub fn run_query(
        &self,
        statement: &str,
        graph: &str,
        change: &str,
    ) -> Result<ResultSet, ClientError> {
        let url = format!("{}/query", self.base_url);
        let request = QueryRequestV1 {
            query: statement,
            graph,
            change,
        };
        let response = self.http.post(&url).json(&request).send()?;
        let response = check_status(response)?;
        let body: QueryResponseV1 = serde_json::from_str(&response.text()?)?;
        let columns = body
            .columns
            .into_iter()
            .map(decode_column)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResultSet { columns })
    }

    /// Names of the graphs the service currently serves.
    pub fn graphs(&self) -> Result<Vec<String>, ClientError> {
        let url = format!("{}/graphs", self.base_url);
        let response = self.http.get(&url).send()?;
        let response = check_status(response)?;
        let body: GraphListResponseV1 = serde_json::from_str(&response.text()?)?;
        Ok(body.graphs)
    }
}

fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().unwrap_or_default();
    // Prefer the structured error body; fall back to the raw text.
    let message = serde_json::from_str::<ErrorResponseV1>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

impl GraphService for GraphHttpClient {
    fn query(
        &mut self,
        statement: &str,
        graph: &str,
        change: &str,
    ) -> Result<ResultSet, ServiceError> {
        self.run_query(statement, graph, change)
            .map_err(ServiceError::from)
    }

    fn list_graphs(&mut self) -> Result<Vec<String>, ServiceError> {
        self.graphs().map_err(ServiceError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_typed_columns() {
        let col: ColumnV1 = serde_json::from_str(
            r#"{"name": "age", "type": "int", "values": [1, 2, 3]}"#,
        )
        .expect("parse column");
        let decoded = decode_column(col).expect("decode");
        assert_eq!(decoded.name, "age");
        assert_eq!(decoded.values, ColumnValues::Int(vec![1, 2, 3]));
    }

    #[test]
    fn unknown_column_kind_falls_back_to_text() {
        let col: ColumnV1 = serde_json::from_str(
            r#"{"name": "n", "type": "node", "values": ["a", 7]}"#,
        )
        .expect("parse column");
        let decoded = decode_column(col).expect("decode");
        assert_eq!(
            decoded.values,
            ColumnValues::Text(vec!["a".to_string(), "7".to_string()])
        );
    }

    #[test]
    fn mistyped_column_values_are_a_decode_error() {
        let col: ColumnV1 = serde_json::from_str(
            r#"{"name": "age", "type": "int", "values": ["not-a-number"]}"#,
        )
        .expect("parse column");
        assert!(matches!(decode_column(col), Err(ClientError::Decode(_))));
    }

    #[test]
    fn change_scope_is_omitted_when_empty() {
        let unscoped = serde_json::to_value(QueryRequestV1 {
            query: "MATCH (n)",
            graph: "default",
            change: "",
        })
        .expect("serialize");
        assert!(unscoped.get("change").is_none());

        let scoped = serde_json::to_value(QueryRequestV1 {
            query: "CREATE (n)",
            graph: "default",
            change: "0",
        })
        .expect("serialize");
        assert_eq!(scoped["change"], "0");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_the_base_url() {
        let client = GraphHttpClient::new("http://127.0.0.1:6666/").expect("client");
        assert_eq!(client.base_url(), "http://127.0.0.1:6666");
    }
}
