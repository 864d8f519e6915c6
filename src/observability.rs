//! Observability stubs (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};

use crate::chain::DispatchOutcome;

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    dispatches: AtomicU64,
    actions: AtomicU64,
    action_failures: AtomicU64,
    unhandled: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed dispatch from its outcome
    pub fn record_dispatch(&self, outcome: &DispatchOutcome) {
        self.dispatches.fetch_add(1, Ordering::Relaxed);
        self.actions
            .fetch_add(outcome.actions_taken.len() as u64, Ordering::Relaxed);
        self.action_failures
            .fetch_add(outcome.failures.len() as u64, Ordering::Relaxed);
        if !outcome.handled {
            self.unhandled.fetch_add(1, Ordering::Relaxed);
        }
        tracing::debug!(
            handled = outcome.handled,
            actions = outcome.actions_taken.len(),
            failures = outcome.failures.len(),
            "Dispatch recorded"
        );
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            dispatches: self.dispatches.load(Ordering::Relaxed),
            actions: self.actions.load(Ordering::Relaxed),
            action_failures: self.action_failures.load(Ordering::Relaxed),
            unhandled: self.unhandled.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub dispatches: u64,
    pub actions: u64,
    pub action_failures: u64,
    pub unhandled: u64,
}
