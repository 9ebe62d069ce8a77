//! Update scheduler
//!
//! The Scheduler is responsible for:
//! - Walking the configured records in a fixed order
//! - Issuing one update attempt per record via DnsProvider
//! - Reporting every outcome as log lines
//! - Waiting the configured interval after each record
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐       ┌─────────────┐       ┌──────────────┐
//! │ Vec<Record>  │──────▶│  Scheduler  │──────▶│ DnsProvider  │
//! │ (immutable)  │       └─────────────┘       │ (update)     │
//! └──────────────┘              │              └──────────────┘
//!                               ▼
//!                        ┌─────────────┐
//!                        │   report    │
//!                        │  (tracing)  │
//!                        └─────────────┘
//! ```
//!
//! ## Cadence
//!
//! The interval elapses after every record, not once per sweep: with N
//! records a full sweep takes N × interval.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::outcome::UpdateOutcome;
use crate::record::Record;
use crate::traits::DnsProvider;

/// Counts of one sweep's outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Attempts that ended in [`UpdateOutcome::Success`]
    pub succeeded: usize,
    /// Attempts that ended in any other outcome
    pub failed: usize,
}

impl SweepSummary {
    /// Total number of attempts in the sweep
    pub fn attempts(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Fixed-interval update scheduler
///
/// ## Lifecycle
///
/// 1. Create with [`Scheduler::new()`]
/// 2. Start with [`Scheduler::run()`]
/// 3. Runs until the process is terminated
///
/// ## Threading
///
/// Records are processed strictly one at a time; an update is awaited to
/// completion before the next one starts. No state is shared or mutated.
pub struct Scheduler {
    /// Records to keep updated, in configuration order
    records: Vec<Record>,

    /// Provider performing the update attempts
    provider: Box<dyn DnsProvider>,

    /// Wait after each record's update
    interval: Duration,

    /// Log attempts and successes at info level
    verbose: bool,
}

impl Scheduler {
    /// Create a new scheduler
    ///
    /// # Parameters
    ///
    /// - `records`: Records to keep updated, in the order they are processed
    /// - `provider`: DNS provider implementation
    /// - `interval`: Wait after each record's update
    /// - `verbose`: Report attempts and successes at info level
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if there are no records or the interval is
    /// zero.
    pub fn new(
        records: Vec<Record>,
        provider: Box<dyn DnsProvider>,
        interval: Duration,
        verbose: bool,
    ) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::config("No records configured"));
        }
        if interval.is_zero() {
            return Err(Error::config("Update interval must be > 0"));
        }

        Ok(Self {
            records,
            provider,
            interval,
            verbose,
        })
    }

    /// Records managed by this scheduler, in processing order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Run sweeps forever
    ///
    /// Only returns on a fatal error; per-record failures are reported and
    /// never end the loop.
    pub async fn run(&self) -> Result<()> {
        self.run_internal(None).await
    }

    /// Run sweeps until `shutdown_rx` fires (or its sender is dropped)
    ///
    /// An update in flight when the signal arrives is abandoned.
    pub async fn run_with_shutdown(&self, shutdown_rx: Option<oneshot::Receiver<()>>) -> Result<()> {
        self.run_internal(shutdown_rx).await
    }

    async fn run_internal(&self, shutdown_rx: Option<oneshot::Receiver<()>>) -> Result<()> {
        info!(
            "Scheduler started: {} record(s) via {}, interval {:?}",
            self.records.len(),
            self.provider.provider_name(),
            self.interval
        );

        let shutdown = async move {
            match shutdown_rx {
                Some(rx) => {
                    let _ = rx.await;
                }
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(shutdown);

        let mut sweep: u64 = 0;
        loop {
            sweep += 1;
            tokio::select! {
                summary = self.run_sweep() => {
                    debug!(
                        "Sweep {} finished: {} succeeded, {} failed",
                        sweep, summary.succeeded, summary.failed
                    );
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received, scheduler stopped");
                    return Ok(());
                }
            }
        }
    }

    /// Process every record once, in order
    ///
    /// Each record gets exactly one update attempt, followed by one interval
    /// wait.
    pub async fn run_sweep(&self) -> SweepSummary {
        let mut summary = SweepSummary::default();

        for record in &self.records {
            if self.process(record).await.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }

            tokio::time::sleep(self.interval).await;
        }

        summary
    }

    /// Run one update attempt and report its outcome
    async fn process(&self, record: &Record) -> UpdateOutcome {
        if self.verbose {
            info!("Updating {}", record);
        } else {
            debug!("Updating {}", record);
        }

        let outcome = match AssertUnwindSafe(self.provider.update(record))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(panic) => UpdateOutcome::UnknownFailure {
                reason: format!("provider panicked: {}", panic_message(panic.as_ref())),
            },
        };
        report(record, &outcome, self.verbose);
        outcome
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

/// Log one outcome for a record
///
/// Failures are always reported. Successes are reported at info level only
/// when `verbose` is set.
pub fn report(record: &Record, outcome: &UpdateOutcome, verbose: bool) {
    let kind = outcome.kind();
    match outcome {
        UpdateOutcome::Success => {
            if verbose {
                info!(outcome = kind, "[{}] Successful!", record);
            } else {
                debug!(outcome = kind, "[{}] Successful!", record);
            }
        }
        UpdateOutcome::MalformedResponse { reason } => {
            warn!(outcome = kind, "[{}] Bad response", record);
            debug!("[{}] Bad response detail: {}", record, reason);
        }
        UpdateOutcome::NotDone => {
            warn!(outcome = kind, "[{}] Not updated", record);
        }
        UpdateOutcome::ProviderErrors(errors) => {
            warn!(outcome = kind, "[{}] Errors:", record);
            for entry in errors {
                warn!("  {}", entry);
            }
        }
        UpdateOutcome::TransportFailure { reason } => {
            error!(outcome = kind, "[{}] Transport failure: {}", record, reason);
        }
        UpdateOutcome::UnknownFailure { reason } => {
            error!(outcome = kind, "[{}] Unknown error: {}", record, reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    struct AlwaysSucceeds;

    #[async_trait]
    impl DnsProvider for AlwaysSucceeds {
        async fn update(&self, _record: &Record) -> UpdateOutcome {
            UpdateOutcome::Success
        }

        fn provider_name(&self) -> &'static str {
            "always-succeeds"
        }
    }

    #[test]
    fn test_rejects_empty_records() {
        let result = Scheduler::new(
            Vec::new(),
            Box::new(AlwaysSucceeds),
            Duration::from_secs(60),
            false,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let result = Scheduler::new(
            vec![Record::new("example.com", "pw", "@")],
            Box::new(AlwaysSucceeds),
            Duration::ZERO,
            false,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_summary_attempts() {
        let summary = SweepSummary {
            succeeded: 2,
            failed: 3,
        };
        assert_eq!(summary.attempts(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_counts_successes() {
        let scheduler = Scheduler::new(
            vec![
                Record::new("example.com", "pw", "@"),
                Record::new("example.com", "pw", "www"),
            ],
            Box::new(AlwaysSucceeds),
            Duration::from_secs(60),
            true,
        )
        .unwrap();

        let summary = scheduler.run_sweep().await;
        assert_eq!(
            summary,
            SweepSummary {
                succeeded: 2,
                failed: 0
            }
        );
    }

    /// Shared buffer collecting formatted log output
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    /// Log lines emitted at info level and above while running `f`
    fn captured_info_lines(f: impl FnOnce()) -> Vec<String> {
        let logs = LogBuffer::default();
        let writer = logs.clone();

        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(Level::INFO)
            .without_time()
            .with_target(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        logs.lines()
    }

    fn record() -> Record {
        Record::new("example.com", "pw", "www")
    }

    fn count_containing(lines: &[String], needle: &str) -> usize {
        lines.iter().filter(|line| line.contains(needle)).count()
    }

    #[test]
    fn test_report_success_only_when_verbose() {
        let verbose = captured_info_lines(|| report(&record(), &UpdateOutcome::Success, true));
        assert_eq!(verbose.len(), 1);
        assert!(verbose[0].contains("[example.com: www] Successful!"));
        assert!(verbose[0].contains("INFO"));

        let quiet = captured_info_lines(|| report(&record(), &UpdateOutcome::Success, false));
        assert!(quiet.is_empty(), "unexpected lines: {:?}", quiet);
    }

    #[test]
    fn test_report_bad_response() {
        let lines = captured_info_lines(|| {
            report(&record(), &UpdateOutcome::malformed("no root element"), false)
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("[example.com: www] Bad response"));
        assert!(lines[0].contains("malformed_response"));
    }

    #[test]
    fn test_report_not_done() {
        let lines = captured_info_lines(|| report(&record(), &UpdateOutcome::NotDone, false));

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("[example.com: www] Not updated"));
    }

    #[test]
    fn test_report_one_line_per_provider_error() {
        let outcome = UpdateOutcome::ProviderErrors(vec![
            crate::ProviderError::new("Err1", "Invalid password"),
            crate::ProviderError::new("Err2", "Domain not found"),
        ]);

        let lines = captured_info_lines(|| report(&record(), &outcome, false));

        assert_eq!(lines.len(), 3, "got {:?}", lines);
        assert!(lines[0].contains("[example.com: www] Errors:"));
        assert!(lines[1].contains("  Err1: Invalid password"));
        assert!(lines[2].contains("  Err2: Domain not found"));
        assert_eq!(count_containing(&lines, "WARN"), 3);
    }

    #[test]
    fn test_report_failures_at_error_level() {
        let transport = UpdateOutcome::TransportFailure {
            reason: "connection refused".to_string(),
        };
        let unknown = UpdateOutcome::UnknownFailure {
            reason: "builder error".to_string(),
        };

        let lines = captured_info_lines(|| {
            report(&record(), &transport, false);
            report(&record(), &unknown, false);
        });

        assert_eq!(lines.len(), 2);
        assert_eq!(count_containing(&lines, "ERROR"), 2);
        assert!(lines[0].contains("[example.com: www] Transport failure: connection refused"));
        assert!(lines[1].contains("[example.com: www] Unknown error: builder error"));
    }

    #[test]
    fn test_report_never_logs_password() {
        let record = Record::new("example.com", "secret_password_12345", "www");
        let lines = captured_info_lines(|| {
            report(&record, &UpdateOutcome::Success, true);
            report(&record, &UpdateOutcome::NotDone, true);
        });

        assert_eq!(lines.len(), 2);
        assert_eq!(count_containing(&lines, "secret_password_12345"), 0);
    }

    struct Panics;

    #[async_trait]
    impl DnsProvider for Panics {
        async fn update(&self, _record: &Record) -> UpdateOutcome {
            panic!("provider exploded");
        }

        fn provider_name(&self) -> &'static str {
            "panics"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_panic_becomes_unknown_failure() {
        let scheduler = Scheduler::new(
            vec![record()],
            Box::new(Panics),
            Duration::from_secs(60),
            false,
        )
        .unwrap();

        let outcome = scheduler.process(&record()).await;
        match outcome {
            UpdateOutcome::UnknownFailure { reason } => {
                assert!(reason.contains("provider exploded"), "got {}", reason);
            }
            other => panic!("expected unknown failure, got {:?}", other),
        }

        let summary = scheduler.run_sweep().await;
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_records_in_processing_order() {
        let scheduler = Scheduler::new(
            vec![
                Record::new("example.com", "pw", "@"),
                Record::new("example.org", "pw", "www"),
            ],
            Box::new(AlwaysSucceeds),
            Duration::from_secs(60),
            false,
        )
        .unwrap();

        let labels: Vec<String> = scheduler.records().iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["example.com: @", "example.org: www"]);
    }
}
