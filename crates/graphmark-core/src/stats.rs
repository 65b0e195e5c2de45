//! Duration-sample reduction.

use std::time::Duration;

/// Summary statistics over a non-empty sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
    pub median: Duration,
}

/// Reduce `samples` to summary statistics.
///
/// Works on a sorted copy; the input is untouched and its order is
/// irrelevant. Mean and median use truncating `Duration` division; the
/// median of an even-sized sequence is the average of the two central
/// elements.
///
/// Callers must guard for non-emptiness: zero samples is a programming
/// error, not a recoverable condition.
pub fn summarize(samples: &[Duration]) -> Stats {
    assert!(!samples.is_empty(), "summarize requires at least one sample");

    let mut sorted = samples.to_vec();
    sorted.sort();

    let n = sorted.len();
    let sum: Duration = sorted.iter().sum();
    let mean = sum / n as u32;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2
    } else {
        sorted[n / 2]
    };

    Stats {
        mean,
        min: sorted[0],
        max: sorted[n - 1],
        median,
    }
}

/// Statements per second derived from the mean aggregate pass duration.
///
/// Truncating integer division on whole seconds: a mean under one second
/// yields 0.
pub fn average_throughput(statement_count: usize, mean: Duration) -> u64 {
    let secs = mean.as_secs();
    if secs == 0 {
        return 0;
    }
    statement_count as u64 / secs
}
