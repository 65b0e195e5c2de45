//! Benchmark execution: the two timing regimes.

use std::time::Instant;

use tracing::{error, info, warn};

use crate::error::ExecutionError;
use crate::service::GraphService;
use crate::session::BenchSession;

/// Which question a benchmark run answers.
///
/// Aggregate timing wraps one timer around a full pass over the statement
/// set and captures mixed-workload behavior; per-query timing repeats each
/// statement back-to-back to isolate its steady-state cost from
/// cross-statement interference. The two regimes are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingMode {
    Aggregate,
    PerQuery,
}

impl<S: GraphService> BenchSession<'_, S> {
    /// Execute the loaded statement set under `mode`.
    ///
    /// Aggregate mode performs a single pass over the set in file order and
    /// appends one sample to `total_times`; callers repeat it once per
    /// configured run. Per-query mode performs the whole sweep in one call:
    /// every statement executed `runs` times consecutively (query-major),
    /// each execution individually timed.
    ///
    /// With `debug` enabled every failed execution is logged with the
    /// statement text and the service's error detail; in per-query mode a
    /// failure additionally drops the failed sample, aborts the statement's
    /// remaining repetitions and returns the error. With `debug` off,
    /// failures are silently ignored and their samples recorded as normal;
    /// logging sits inside the timed path and skews collected numbers.
    pub fn run(&mut self, mode: TimingMode, debug: bool) -> Result<(), ExecutionError> {
        match mode {
            TimingMode::Aggregate => self.run_aggregate_pass(debug),
            TimingMode::PerQuery => self.run_per_query_sweep(debug),
        }
    }

    fn run_aggregate_pass(&mut self, debug: bool) -> Result<(), ExecutionError> {
        if self.current_run >= self.runs {
            warn!(
                "aggregate pass requested after {} configured runs; skipping (reset first)",
                self.runs
            );
            return Ok(());
        }

        let pass_timer = Instant::now();
        for statement in &self.statements {
            if let Err(detail) = self.service.query(statement, &self.graph, "") {
                if debug {
                    error!("statement failed to execute: {statement}");
                    error!("{detail}");
                }
            }
        }
        self.result.total_times.push(pass_timer.elapsed());
        self.current_run += 1;
        Ok(())
    }

    fn run_per_query_sweep(&mut self, debug: bool) -> Result<(), ExecutionError> {
        if self.current_run >= self.runs {
            warn!("per-query sweep requested after a completed phase; skipping (reset first)");
            return Ok(());
        }

        for statement in &self.statements {
            info!("benchmarking statement: {statement}");
            for _ in 0..self.runs {
                let timer = Instant::now();
                match self.service.query(statement, &self.graph, "") {
                    Ok(result) => {
                        let elapsed = timer.elapsed();
                        self.result
                            .query_times
                            .entry(statement.clone())
                            .or_default()
                            .push(elapsed);
                        self.result
                            .query_dims
                            .insert(statement.clone(), result.shape());
                    }
                    Err(detail) => {
                        if debug {
                            error!("statement failed to execute: {statement}");
                            error!("{detail}");
                            return Err(ExecutionError::StatementFailed {
                                statement: statement.clone(),
                                detail,
                            });
                        }
                        self.result
                            .query_times
                            .entry(statement.clone())
                            .or_default()
                            .push(timer.elapsed());
                    }
                }
            }
        }

        // One sweep covers every configured repetition; saturate the cursor
        // so an un-reset second sweep cannot overfill the sample vectors.
        self.current_run = self.runs;
        Ok(())
    }
}
