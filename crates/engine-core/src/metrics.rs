use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    records_loaded: AtomicU64,
    batches_loaded: AtomicU64,
    windows_fetched: AtomicU64,
    failure_count: AtomicU64,
}

/// Counters shared between the orchestrator and whoever reports on it.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_loaded: u64,
    pub batches_loaded: u64,
    pub windows_fetched: u64,
    pub failure_count: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    pub fn increment_records(&self, count: u64) {
        self.inner.records_loaded.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_batches(&self, count: u64) {
        self.inner.batches_loaded.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_windows(&self, count: u64) {
        self.inner.windows_fetched.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_failures(&self, count: u64) {
        self.inner.failure_count.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_loaded: self.inner.records_loaded.load(Ordering::Relaxed),
            batches_loaded: self.inner.batches_loaded.load(Ordering::Relaxed),
            windows_fetched: self.inner.windows_fetched.load(Ordering::Relaxed),
            failure_count: self.inner.failure_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
