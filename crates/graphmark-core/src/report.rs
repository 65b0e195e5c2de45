//! Rendering accumulated benchmark results.
//!
//! Presentation is read-only over [`BenchResult`]: tables for the terminal,
//! [`ReportV1`] for machine consumers. Sections whose sample sequence is
//! empty are skipped entirely.

use std::time::Duration;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::session::BenchResult;
use crate::stats::{average_throughput, summarize, Stats};

pub const REPORT_VERSION_V1: &str = "graphmark_report_v1";

fn ms(d: Duration) -> String {
    d.as_millis().to_string()
}

fn secs(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64())
}

/// Render the aggregate and per-query tables for `result`.
///
/// `statements` fixes the per-query row order (file order); `runs` is the
/// configured repetition count shown in the aggregate header. An entirely
/// empty result renders as an empty string.
pub fn render_report(result: &BenchResult, statements: &[String], runs: u32) -> String {
    let mut out = String::new();

    if !result.total_times.is_empty() {
        out.push_str(&render_total(result, statements.len(), runs));
        out.push('\n');
    }

    if !result.query_times.is_empty() {
        out.push_str(&render_per_query(result, statements));
        out.push('\n');
    }

    out
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn render_total(result: &BenchResult, statement_count: usize, runs: u32) -> String {
    let stats = summarize(&result.total_times);
    let throughput = average_throughput(statement_count, stats.mean);

    let mut table = new_table();
    table.set_header(vec![
        format!("Results over {runs} runs"),
        "ms".to_string(),
        "s".to_string(),
    ]);
    table.add_row(vec!["Mean".to_string(), ms(stats.mean), secs(stats.mean)]);
    table.add_row(vec!["Min".to_string(), ms(stats.min), secs(stats.min)]);
    table.add_row(vec!["Max".to_string(), ms(stats.max), secs(stats.max)]);
    table.add_row(vec![
        "Median".to_string(),
        ms(stats.median),
        secs(stats.median),
    ]);
    table.add_row(vec![
        "Average throughput".to_string(),
        String::new(),
        format!("{throughput} statements / second"),
    ]);

    table.to_string()
}

fn render_per_query(result: &BenchResult, statements: &[String]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Statement",
        "Mean (ms)",
        "Min (ms)",
        "Max (ms)",
        "Median (ms)",
        "Result shape",
    ]);

    for statement in statements {
        let Some(times) = result.query_times.get(statement) else {
            continue;
        };
        if times.is_empty() {
            continue;
        }
        let stats = summarize(times);
        let shape = result
            .query_dims
            .get(statement)
            .map(|(rows, cols)| format!("{rows} x {cols}"))
            .unwrap_or_else(|| "?".to_string());
        table.add_row(vec![
            statement.clone(),
            ms(stats.mean),
            ms(stats.min),
            ms(stats.max),
            ms(stats.median),
            shape,
        ]);
    }

    table.to_string()
}

// ============================================================================
// JSON report
// ============================================================================

/// Machine-readable benchmark report (`graphmark_report_v1`).
#[derive(Debug, Clone, Serialize)]
pub struct ReportV1 {
    pub version: &'static str,
    pub runs: u32,
    pub statement_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalStatsV1>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub per_query: Vec<QueryStatsV1>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalStatsV1 {
    pub samples: usize,
    pub mean_us: u128,
    pub min_us: u128,
    pub max_us: u128,
    pub median_us: u128,
    pub avg_throughput_per_sec: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryStatsV1 {
    pub statement: String,
    pub samples: usize,
    pub mean_us: u128,
    pub min_us: u128,
    pub max_us: u128,
    pub median_us: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_cols: Option<usize>,
}

fn stats_us(stats: &Stats) -> (u128, u128, u128, u128) {
    (
        stats.mean.as_micros(),
        stats.min.as_micros(),
        stats.max.as_micros(),
        stats.median.as_micros(),
    )
}

/// Build the JSON report document for `result`.
///
/// Empty sections are omitted from the document the same way the tables
/// skip them.
pub fn json_report(result: &BenchResult, statements: &[String], runs: u32) -> ReportV1 {
    let total = if result.total_times.is_empty() {
        None
    } else {
        let stats = summarize(&result.total_times);
        let (mean_us, min_us, max_us, median_us) = stats_us(&stats);
        Some(TotalStatsV1 {
            samples: result.total_times.len(),
            mean_us,
            min_us,
            max_us,
            median_us,
            avg_throughput_per_sec: average_throughput(statements.len(), stats.mean),
        })
    };

    let per_query = statements
        .iter()
        .filter_map(|statement| {
            let times = result.query_times.get(statement)?;
            if times.is_empty() {
                return None;
            }
            let stats = summarize(times);
            let (mean_us, min_us, max_us, median_us) = stats_us(&stats);
            let dims = result.query_dims.get(statement);
            Some(QueryStatsV1 {
                statement: statement.clone(),
                samples: times.len(),
                mean_us,
                min_us,
                max_us,
                median_us,
                result_rows: dims.map(|d| d.0),
                result_cols: dims.map(|d| d.1),
            })
        })
        .collect();

    ReportV1 {
        version: REPORT_VERSION_V1,
        runs,
        statement_count: statements.len(),
        total,
        per_query,
    }
}
