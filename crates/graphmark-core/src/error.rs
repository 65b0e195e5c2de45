//! Error taxonomy for the benchmark engine.
//!
//! Setup failures are always fatal: the session aborts before any
//! benchmarking or presentation. Execution failures are policy-gated by the
//! debug flag and only surface through the per-query hard stop.

use thiserror::Error;

use crate::service::ServiceError;

/// Fatal failures while preparing a session (graph build or statement load).
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("build file contained no statements")]
    EmptyBuildSet,

    #[error("query file contained no statements")]
    EmptyQuerySet,

    #[error("build statement does not start with CREATE: {0}")]
    InvalidBuildStatement(String),

    #[error("failed to open a new change: {0}")]
    TransactionOpenFailed(ServiceError),

    #[error("build statement failed: {statement}: {detail}")]
    BuildStatementFailed {
        statement: String,
        detail: ServiceError,
    },

    #[error("failed to submit change: {0}")]
    TransactionCommitFailed(ServiceError),

    #[error("failed to list graphs on the service: {0}")]
    GraphListFailed(ServiceError),

    #[error("graph `{graph}` is not available on the service (available: {})", .available.join(", "))]
    GraphUnavailable {
        graph: String,
        available: Vec<String>,
    },
}

/// Per-statement failure surfaced by the per-query hard stop in debug mode.
///
/// With debug off, execution failures never reach this type: they are
/// swallowed by policy and their samples recorded as normal.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("statement failed to execute: {statement}: {detail}")]
    StatementFailed {
        statement: String,
        detail: ServiceError,
    },
}
