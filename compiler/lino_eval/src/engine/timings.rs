//! Per-statement timing table for `--time`.

use std::time::Duration;

use rustc_hash::FxHashMap;

/// Aggregated timing of one statement kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingSummary {
    pub label: &'static str,
    pub count: usize,
    pub total: Duration,
    pub mean: Duration,
}

/// Step durations, grouped by statement label.
#[derive(Clone, Debug, Default)]
pub struct Timings {
    entries: FxHashMap<&'static str, Vec<Duration>>,
}

impl Timings {
    pub fn record(&mut self, label: &'static str, elapsed: Duration) {
        self.entries.entry(label).or_default().push(elapsed);
    }

    pub fn samples(&self, label: &str) -> &[Duration] {
        self.entries.get(label).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One row per label, slowest total first.
    pub fn summary(&self) -> Vec<TimingSummary> {
        let mut rows: Vec<TimingSummary> = self
            .entries
            .iter()
            .map(|(label, samples)| {
                let total: Duration = samples.iter().sum();
                let count = samples.len();
                let mean = u32::try_from(count)
                    .ok()
                    .filter(|n| *n > 0)
                    .map_or(Duration::ZERO, |n| total / n);
                TimingSummary {
                    label: *label,
                    count,
                    total,
                    mean,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total).then(a.label.cmp(b.label)));
        rows
    }
}
