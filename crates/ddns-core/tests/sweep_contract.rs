//! Contract Test: Sequential Sweeps
//!
//! This test verifies how the scheduler walks the configured records.
//!
//! Constraints verified:
//! - Every record gets exactly one update per sweep
//! - Records are processed in configuration order
//! - No two updates are ever in flight at the same time
//! - The interval elapses after every record, not once per sweep
//!
//! If this test fails, someone has parallelised updates, reordered records,
//! or moved the interval wait.

mod common;

use common::*;
use ddns_core::Scheduler;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn one_update_per_record_per_sweep_in_order() {
    let subdomains = ["@", "www", "home", "vpn"];
    let provider = RecordingProvider::new();

    let scheduler = Scheduler::new(
        records(&subdomains),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        Duration::from_secs(60),
        false,
    )
    .expect("scheduler construction succeeds");

    let summary = scheduler.run_sweep().await;

    assert_eq!(summary.attempts(), subdomains.len());
    assert_eq!(summary.succeeded, subdomains.len());
    assert_eq!(provider.calls(), labels(&subdomains));

    // A second sweep repeats the same order
    scheduler.run_sweep().await;
    let mut expected = labels(&subdomains);
    expected.extend(labels(&subdomains));
    assert_eq!(provider.calls(), expected);
}

#[tokio::test(start_paused = true)]
async fn updates_never_overlap() {
    let provider = RecordingProvider::new().with_latency(Duration::from_secs(5));

    let scheduler = Scheduler::new(
        records(&["a", "b", "c"]),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        Duration::from_secs(1),
        true,
    )
    .expect("scheduler construction succeeds");

    scheduler.run_sweep().await;
    scheduler.run_sweep().await;

    assert_eq!(provider.call_count(), 6);
    assert_eq!(
        provider.max_in_flight(),
        1,
        "Scheduler must never run two updates concurrently"
    );
}

#[tokio::test(start_paused = true)]
async fn interval_elapses_after_every_record() {
    let interval = Duration::from_secs(60);
    let latency = Duration::from_secs(2);
    let provider = RecordingProvider::new().with_latency(latency);

    let scheduler = Scheduler::new(
        records(&["a", "b", "c"]),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        interval,
        false,
    )
    .expect("scheduler construction succeeds");

    let start = Instant::now();
    scheduler.run_sweep().await;
    let elapsed = start.elapsed();

    // Three records: three updates, each followed by one interval
    let expected = (latency + interval) * 3;
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_secs(1),
        "sweep took {:?}, expected {:?}",
        elapsed,
        expected
    );

    let started = provider.started_at();
    assert_eq!(started.len(), 3);
    for pair in started.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(
            gap >= latency + interval && gap < latency + interval + Duration::from_secs(1),
            "gap between updates was {:?}",
            gap
        );
    }
}
