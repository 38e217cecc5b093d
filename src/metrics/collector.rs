//! In-memory sink for per-operation timings and structure sizes.
//!
//! The core hands over `(label, value, body_count)` triples after each
//! indexed operation; the collector files them away and never feeds
//! anything back, so it cannot influence the simulation. Entries are keyed
//! by label plus body count, and the first measurement recorded under a
//! key wins — later ones for the same key are dropped.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MeasurementCollector {
    timings: BTreeMap<String, (usize, f64)>,
    sizes: BTreeMap<String, (usize, usize)>,
}

impl MeasurementCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_timing(&mut self, label: &str, elapsed_ms: f64, body_count: usize) {
        self.timings
            .entry(format!("{label}{body_count}"))
            .or_insert((body_count, elapsed_ms));
    }

    pub fn record_size(&mut self, label: &str, bytes: usize, body_count: usize) {
        self.sizes
            .entry(format!("{label}{body_count}"))
            .or_insert((body_count, bytes));
    }

    /// Key → (body count, elapsed milliseconds).
    pub fn timings(&self) -> &BTreeMap<String, (usize, f64)> {
        &self.timings
    }

    /// Key → (body count, bytes).
    pub fn sizes(&self) -> &BTreeMap<String, (usize, usize)> {
        &self.sizes
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty() && self.sizes.is_empty()
    }
}
