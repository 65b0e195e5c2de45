//! Graphmark: benchmark harness for a remote graph-query service.
//!
//! Builds a graph on the service from a file of creation statements (or
//! attaches to one the service already serves), replays a statement file
//! against it under the selected timing regimes, and renders latency and
//! throughput tables.
//!
//! Exit codes: 0 on success, 1 on an argument error, 2 on a setup or
//! benchmark failure.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::Colorize;
use tracing::info;

use graphmark_client::GraphHttpClient;
use graphmark_core::{json_report, render_report, BenchSession, TimingMode};

const DEFAULT_GRAPH: &str = "default";

/// Benchmark a remote graph-query service.
#[derive(Parser, Debug)]
#[command(name = "graphmark", version, about = "Benchmark a remote graph-query service")]
#[command(group(ArgGroup::new("target").required(true).args(["build", "load"])))]
struct Cli {
    /// File of CREATE statements to build the benchmark graph from.
    #[arg(short = 'b', long, value_name = "FILE")]
    build: Option<PathBuf>,

    /// Benchmark a graph already loaded on the service instead of building
    /// one.
    #[arg(short = 'l', long, value_name = "GRAPH")]
    load: Option<String>,

    /// The statement file to replay against the graph.
    #[arg(short = 'q', long, value_name = "FILE")]
    query: PathBuf,

    /// Measure the total time of full passes over the statement set.
    #[arg(short = 't', long)]
    total_time: bool,

    /// Measure each statement's execution time in isolation.
    #[arg(short = 'p', long)]
    per_query: bool,

    /// Log failing statements with the service's error detail. Logging sits
    /// inside the timed path; not for collecting meaningful data.
    #[arg(short = 'd', long)]
    debug: bool,

    /// The number of runs per benchmark.
    #[arg(short = 'r', long, default_value_t = 1)]
    runs: u32,

    /// Service endpoint.
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:6666")]
    url: String,

    /// Write a machine-readable JSON report to this path.
    #[arg(short = 'o', long, value_name = "PATH")]
    out_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders its own output, including --help and --version.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(message) = validate(&cli) {
        eprintln!("{} {message}", "error:".red().bold());
        return ExitCode::from(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("graphmark_core=info".parse().expect("static directive"))
                .add_directive("graphmark_cli=info".parse().expect("static directive")),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn validate(cli: &Cli) -> Result<(), String> {
    if !cli.total_time && !cli.per_query {
        return Err("at least one of --total-time/--per-query must be selected".to_string());
    }
    url::Url::parse(&cli.url).map_err(|e| format!("invalid --url `{}`: {e}", cli.url))?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut client = GraphHttpClient::new(cli.url.clone())
        .with_context(|| format!("failed to construct a client for {}", cli.url))?;

    let graph = cli
        .load
        .clone()
        .unwrap_or_else(|| DEFAULT_GRAPH.to_string());
    let mut session = BenchSession::new(graph, &mut client, cli.runs);

    if let Some(build_file) = &cli.build {
        session.setup(build_file, &cli.query).context("setup failed")?;
    } else {
        session.attach(&cli.query).context("setup failed")?;
    }

    if cli.total_time {
        for i in 1..=cli.runs {
            info!("performing total-time run {i}/{}", cli.runs);
            session.run(TimingMode::Aggregate, cli.debug)?;
        }
        info!("finished total-time runs");
        session.reset();
    }

    if cli.per_query {
        info!(
            "performing per-query sweep ({} repetitions per statement)",
            cli.runs
        );
        session.run(TimingMode::PerQuery, cli.debug)?;
        info!("finished per-query sweep");
        session.reset();
    }

    let rendered = render_report(session.result(), session.statements(), cli.runs);
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    if let Some(path) = &cli.out_json {
        let report = json_report(session.result(), session.statements(), cli.runs);
        let doc = serde_json::to_string_pretty(&report)?;
        fs::write(path, doc).with_context(|| format!("failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
