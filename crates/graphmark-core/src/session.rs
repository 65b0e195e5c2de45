//! Benchmark session state and the transactional graph bootstrap.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::error::SetupError;
use crate::service::GraphService;
use crate::statements::parse_statement_file;

/// Timing samples accumulated over a session.
#[derive(Debug, Clone, Default)]
pub struct BenchResult {
    /// One aggregate sample per completed total-time pass.
    pub total_times: Vec<Duration>,
    /// Per-statement samples, keyed by statement text.
    pub query_times: HashMap<String, Vec<Duration>>,
    /// `(rows, cols)` of each statement's most recent successful result.
    pub query_dims: HashMap<String, (usize, usize)>,
}

impl BenchResult {
    pub fn is_empty(&self) -> bool {
        self.total_times.is_empty() && self.query_times.is_empty()
    }
}

/// One benchmarking session against a single graph.
///
/// The service connection is borrowed for the session's lifetime; the
/// session owns everything else: the target graph name (fixed at
/// construction), the change counter, the parsed benchmark statements, the
/// run configuration and the accumulated samples. All mutation happens on
/// the single execution thread.
pub struct BenchSession<'a, S: GraphService> {
    pub(crate) graph: String,
    pub(crate) service: &'a mut S,
    pub(crate) runs: u32,
    pub(crate) current_run: u32,
    change_no: u64,
    pub(crate) statements: Vec<String>,
    pub(crate) result: BenchResult,
}

impl<'a, S: GraphService> BenchSession<'a, S> {
    pub fn new(graph: impl Into<String>, service: &'a mut S, runs: u32) -> Self {
        Self {
            graph: graph.into(),
            service,
            runs,
            current_run: 0,
            change_no: 0,
            statements: Vec::new(),
            result: BenchResult::default(),
        }
    }

    pub fn graph(&self) -> &str {
        &self.graph
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Count of successfully committed build cycles.
    pub fn change_no(&self) -> u64 {
        self.change_no
    }

    pub fn current_run(&self) -> u32 {
        self.current_run
    }

    /// The loaded benchmark statements, in file order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn result(&self) -> &BenchResult {
        &self.result
    }

    /// Reset the run cursor. Must be called between independent benchmark
    /// phases (e.g. before switching from aggregate to per-query timing).
    pub fn reset(&mut self) {
        self.current_run = 0;
    }

    /// Build the target graph from `build_file`, then load the benchmark
    /// statements from `query_file`.
    pub fn setup(&mut self, build_file: &Path, query_file: &Path) -> Result<(), SetupError> {
        info!(
            "building graph from creation statements in {}",
            build_file.display()
        );
        let build = parse_statement_file(build_file);
        self.build_graph(&build)?;
        self.load_statements(query_file)
    }

    /// Benchmark a graph the service has already loaded: verify the service
    /// lists it, then load the benchmark statements from `query_file`.
    ///
    /// No change is opened and the change counter is untouched.
    pub fn attach(&mut self, query_file: &Path) -> Result<(), SetupError> {
        let available = self
            .service
            .list_graphs()
            .map_err(SetupError::GraphListFailed)?;
        if !available.iter().any(|g| g == &self.graph) {
            return Err(SetupError::GraphUnavailable {
                graph: self.graph.clone(),
                available,
            });
        }
        info!("using already-loaded graph `{}`", self.graph);
        self.load_statements(query_file)
    }

    fn load_statements(&mut self, query_file: &Path) -> Result<(), SetupError> {
        info!("parsing benchmark statements in {}", query_file.display());
        self.statements = parse_statement_file(query_file);
        if self.statements.is_empty() {
            return Err(SetupError::EmptyQuerySet);
        }
        Ok(())
    }

    /// Replay creation `statements` inside one change against the service.
    ///
    /// Opens a change, executes every statement in order scoped to the
    /// current change number, submits the change, and only then increments
    /// the change counter. Every statement must start with `CREATE`
    /// (case-sensitive); the first offender stops processing without being
    /// executed. On any failure the opened change is left as-is (no rollback
    /// is issued) and the counter is unchanged.
    pub fn build_graph(&mut self, statements: &[String]) -> Result<(), SetupError> {
        if statements.is_empty() {
            return Err(SetupError::EmptyBuildSet);
        }

        self.service
            .query("change new", &self.graph, "")
            .map_err(SetupError::TransactionOpenFailed)?;

        let change = self.change_no.to_string();

        for statement in statements {
            if !statement.starts_with("CREATE") {
                return Err(SetupError::InvalidBuildStatement(statement.clone()));
            }
            self.service
                .query(statement, &self.graph, &change)
                .map_err(|detail| SetupError::BuildStatementFailed {
                    statement: statement.clone(),
                    detail,
                })?;
        }

        self.service
            .query("change submit", &self.graph, &change)
            .map_err(SetupError::TransactionCommitFailed)?;

        self.change_no += 1;
        Ok(())
    }
}
