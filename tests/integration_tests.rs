//! Integration tests for the complete graphmark pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - statement files → session setup → transactional graph build
//! - benchmark execution under both timing regimes
//! - sample reduction → table rendering → JSON report
//!
//! Run with: cargo test --test integration_tests

use std::path::{Path, PathBuf};

use graphmark_core::{
    json_report, render_report, BenchSession, GraphService, ResultSet, ServiceError, TimingMode,
};

// ============================================================================
// Scripted service
// ============================================================================

#[derive(Default)]
struct RecordingService {
    calls: Vec<(String, String, String)>,
}

impl GraphService for RecordingService {
    fn query(
        &mut self,
        statement: &str,
        graph: &str,
        change: &str,
    ) -> Result<ResultSet, ServiceError> {
        self.calls
            .push((statement.to_string(), graph.to_string(), change.to_string()));
        Ok(ResultSet::default())
    }

    fn list_graphs(&mut self) -> Result<Vec<String>, ServiceError> {
        Ok(vec!["default".to_string()])
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write statement file");
    path
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn build_then_benchmark_both_regimes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let build = write_file(
        dir.path(),
        "build.cypher",
        "CREATE (a:Person {name: 'Ada'});\nCREATE (b:Person {name: 'Bob'});\n",
    );
    let queries = write_file(
        dir.path(),
        "queries.cypher",
        "MATCH (n) RETURN n;\nMATCH (n)-[r]->(m) RETURN r;\n",
    );

    let runs = 3;
    let mut svc = RecordingService::default();
    let mut session = BenchSession::new("default", &mut svc, runs);

    session.setup(&build, &queries).expect("setup");
    assert_eq!(session.change_no(), 1);
    assert_eq!(session.statements().len(), 2);

    // Aggregate phase: one pass per configured run.
    for _ in 0..runs {
        session.run(TimingMode::Aggregate, false).expect("pass");
    }
    session.reset();

    // Per-query phase: one sweep covering every repetition.
    session.run(TimingMode::PerQuery, false).expect("sweep");
    session.reset();

    let result = session.result();
    assert_eq!(result.total_times.len(), runs as usize);
    for statement in session.statements() {
        assert_eq!(result.query_times[statement].len(), runs as usize);
    }

    let rendered = render_report(result, session.statements(), runs);
    assert!(rendered.contains("Results over 3 runs"));
    assert!(rendered.contains("Average throughput"));
    assert!(rendered.contains("MATCH (n) RETURN n"));

    let report = json_report(result, session.statements(), runs);
    let doc = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(doc["version"], "graphmark_report_v1");
    assert_eq!(doc["runs"], 3);
    assert_eq!(doc["per_query"].as_array().map(|a| a.len()), Some(2));
    drop(session);

    // The build ran inside one change, scoped by the change counter.
    let build_calls: Vec<&str> = svc
        .calls
        .iter()
        .take(4)
        .map(|(s, _, _)| s.as_str())
        .collect();
    assert_eq!(
        build_calls,
        vec![
            "change new",
            "CREATE (a:Person {name: 'Ada'})",
            "CREATE (b:Person {name: 'Bob'})",
            "change submit",
        ]
    );
    // 4 build calls + 3 aggregate passes of 2 + one 3x2 per-query sweep.
    assert_eq!(svc.calls.len(), 4 + 6 + 6);
}

#[test]
fn attach_skips_the_build_protocol_entirely() {
    let dir = tempfile::tempdir().expect("tempdir");
    let queries = write_file(dir.path(), "queries.cypher", "MATCH (n) RETURN n;");

    let mut svc = RecordingService::default();
    let mut session = BenchSession::new("default", &mut svc, 2);

    session.attach(&queries).expect("attach");
    session.run(TimingMode::PerQuery, false).expect("sweep");

    let result = session.result();
    assert_eq!(result.query_times["MATCH (n) RETURN n"].len(), 2);
    assert!(result.total_times.is_empty());

    // Only the per-query section renders.
    let rendered = render_report(result, session.statements(), 2);
    assert!(!rendered.contains("Average throughput"));
    assert!(rendered.contains("MATCH (n) RETURN n"));
    drop(session);

    assert!(svc.calls.iter().all(|(s, _, _)| s == "MATCH (n) RETURN n"));
}
