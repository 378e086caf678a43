//! Metrics Sink Module
//!
//! A process-wide counter sink injected into handlers and workers instead of
//! a global singleton. Counters track ingestion progress (uploads received,
//! jobs queued, packages indexed or skipped, files indexed or deleted) and
//! merge timings; they exist for operator visibility in logs and tests, not
//! as an HTTP surface.

#[cfg(test)]
mod tests;

use dashmap::DashMap;

/// Concurrent counter map, safe to share across all tasks behind an `Arc`.
#[derive(Debug, Default)]
pub struct Metrics {
    counters: DashMap<String, i64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self, key: &str) {
        *self.counters.entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn decrement(&self, key: &str) {
        *self.counters.entry(key.to_string()).or_insert(0) -= 1;
    }

    pub fn set(&self, key: &str, value: i64) {
        self.counters.insert(key.to_string(), value);
    }

    /// Current value of a counter, zero if it was never touched.
    pub fn get(&self, key: &str) -> i64 {
        self.counters.get(key).map(|entry| *entry.value()).unwrap_or(0)
    }
}
