//! Graphmark core: benchmark execution and statistics engine.
//!
//! The pipeline, leaf-first:
//! - [`statements`] splits statement files into trimmed, ordered statements;
//! - [`session`] owns the per-invocation state (graph handle, change counter,
//!   statement set, samples) and drives the transactional graph build;
//! - [`executor`] runs the statement set under the aggregate or per-query
//!   timing regime;
//! - [`stats`] reduces duration samples to summary statistics;
//! - [`report`] renders them as terminal tables or a JSON document.
//!
//! The remote service is consumed through the [`service::GraphService`] trait;
//! this crate never opens a connection itself.

pub mod error;
pub mod executor;
pub mod report;
pub mod service;
pub mod session;
pub mod statements;
pub mod stats;

pub use error::{ExecutionError, SetupError};
pub use executor::TimingMode;
pub use report::{json_report, render_report, ReportV1};
pub use service::{ColumnValues, GraphService, ResultSet, ServiceError, TypedColumn};
pub use session::{BenchResult, BenchSession};
pub use statements::{parse_statement_file, parse_statements};
pub use stats::{average_throughput, summarize, Stats};
