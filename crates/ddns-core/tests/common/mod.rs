//! Test doubles and common utilities for scheduler contract tests
//!
//! This module provides minimal test doubles that verify scheduling
//! constraints without talking to a real provider.

#![allow(dead_code)]

use ddns_core::traits::DnsProvider;
use ddns_core::{Record, UpdateOutcome};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// A DnsProvider that records every call and replays scripted outcomes
pub struct RecordingProvider {
    /// Labels of updated records, in call order
    calls: Arc<Mutex<Vec<String>>>,
    /// Instants at which each update started
    started_at: Arc<Mutex<Vec<Instant>>>,
    /// Updates currently in progress
    in_flight: Arc<AtomicUsize>,
    /// Highest number of simultaneous updates observed
    max_in_flight: Arc<AtomicUsize>,
    /// Outcomes returned in rotation
    outcomes: Vec<UpdateOutcome>,
    /// Simulated request latency
    latency: Duration,
}

impl RecordingProvider {
    /// A provider whose every update succeeds instantly
    pub fn new() -> Self {
        Self::with_outcomes(vec![UpdateOutcome::Success])
    }

    /// A provider that cycles through the given outcomes
    pub fn with_outcomes(outcomes: Vec<UpdateOutcome>) -> Self {
        assert!(!outcomes.is_empty(), "at least one outcome is required");
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            started_at: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            outcomes,
            latency: Duration::ZERO,
        }
    }

    /// Make each update take `latency` to complete
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Create a provider that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            calls: Arc::clone(&other.calls),
            started_at: Arc::clone(&other.started_at),
            in_flight: Arc::clone(&other.in_flight),
            max_in_flight: Arc::clone(&other.max_in_flight),
            outcomes: other.outcomes.clone(),
            latency: other.latency,
        }
    }

    /// Labels of the records updated so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of update calls so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Instants at which each update started
    pub fn started_at(&self) -> Vec<Instant> {
        self.started_at.lock().unwrap().clone()
    }

    /// Highest number of updates observed in progress at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DnsProvider for RecordingProvider {
    async fn update(&self, record: &Record) -> UpdateOutcome {
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(record.to_string());
            self.started_at.lock().unwrap().push(Instant::now());
            calls.len() - 1
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.outcomes[index % self.outcomes.len()].clone()
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Records for `subdomains` under a single test domain
pub fn records(subdomains: &[&str]) -> Vec<Record> {
    subdomains
        .iter()
        .map(|sub| Record::new("example.com", "test-password", *sub))
        .collect()
}

/// Labels the scheduler reports for `subdomains` under the test domain
pub fn labels(subdomains: &[&str]) -> Vec<String> {
    subdomains
        .iter()
        .map(|sub| format!("example.com: {}", sub))
        .collect()
}
