//! Property tests for the duration-sample reducer.

use std::time::Duration;

use graphmark_core::{average_throughput, summarize};
use proptest::prelude::*;

fn micros(samples: Vec<u64>) -> Vec<Duration> {
    samples.into_iter().map(Duration::from_micros).collect()
}

proptest! {
    #[test]
    fn median_and_mean_sit_between_min_and_max(
        raw in prop::collection::vec(0u64..10_000_000, 1..64)
    ) {
        let samples = micros(raw);
        let stats = summarize(&samples);
        prop_assert!(stats.min <= stats.median);
        prop_assert!(stats.median <= stats.max);
        prop_assert!(stats.min <= stats.mean);
        prop_assert!(stats.mean <= stats.max);
    }

    #[test]
    fn min_and_max_are_attained_samples(
        raw in prop::collection::vec(0u64..10_000_000, 1..64)
    ) {
        let samples = micros(raw);
        let stats = summarize(&samples);
        prop_assert!(samples.contains(&stats.min));
        prop_assert!(samples.contains(&stats.max));
    }

    #[test]
    fn summarize_is_order_insensitive(
        raw in prop::collection::vec(0u64..10_000_000, 1..64)
    ) {
        let forward = micros(raw);
        let mut reversed = forward.clone();
        reversed.reverse();
        prop_assert_eq!(summarize(&forward), summarize(&reversed));
    }

    #[test]
    fn throughput_matches_truncating_division(
        count in 0usize..10_000,
        secs in 0u64..1_000
    ) {
        let expected = if secs == 0 { 0 } else { count as u64 / secs };
        prop_assert_eq!(average_throughput(count, Duration::from_secs(secs)), expected);
    }
}
