//! Metrics collection
//!
//! Named stopwatch/counter registry used by the pipeline to break down
//! where a run spends its time. Timers, raw metrics, and counters are
//! three separate namespaces: a timer stop appends an elapsed sample to
//! the metric of the same name, counters never mix with samples.
//!
//! Single-threaded sequential use is assumed; one pipeline instance
//! serves one logical run at a time. Concurrent callers sharing a timer
//! name would race on the start marker (documented limitation).

use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

/// Statistics over the raw samples of one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
}

impl MetricStats {
    fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            total: 0.0,
        }
    }
}

/// Timing statistics rounded for reporting, keyed by timer name
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingStats {
    pub avg_seconds: f64,
    pub min_seconds: f64,
    pub max_seconds: f64,
    pub total_seconds: f64,
    pub count: usize,
}

/// Full metrics snapshot: timings, counters, and names of still-running timers
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub timings: HashMap<String, TimingStats>,
    pub counters: HashMap<String, i64>,
    pub active_timers: Vec<String>,
}

/// Collects timings, raw metric samples, and counters for a workflow
#[derive(Debug, Default)]
pub struct MetricsCollector {
    timers: HashMap<String, Instant>,
    metrics: HashMap<String, Vec<f64>>,
    counters: HashMap<String, i64>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a wall-clock start for `name`. A prior unstopped start for
    /// the same name is overwritten: last start wins.
    pub fn start_timer(&mut self, name: &str) {
        self.timers.insert(name.to_string(), Instant::now());
    }

    /// Stop the timer for `name`, append the elapsed seconds to the metric
    /// sample list of the same name, and return the elapsed time.
    ///
    /// Stopping a timer that was never started is a no-op returning 0.0:
    /// no sample is recorded.
    pub fn stop_timer(&mut self, name: &str) -> f64 {
        match self.timers.remove(name) {
            Some(started) => {
                let elapsed = started.elapsed().as_secs_f64();
                self.metrics
                    .entry(name.to_string())
                    .or_default()
                    .push(elapsed);
                elapsed
            }
            None => 0.0,
        }
    }

    /// Elapsed seconds of a running timer, without stopping it.
    /// Returns `None` if no timer is running under `name`.
    pub fn get_timer(&self, name: &str) -> Option<f64> {
        self.timers.get(name).map(|s| s.elapsed().as_secs_f64())
    }

    /// Append a raw value to `name`'s sample list, no timer pair required.
    pub fn record_metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    /// Add to a counter. Counters are a separate namespace from timers
    /// and metric samples.
    pub fn increment_counter(&mut self, name: &str, amount: i64) {
        *self.counters.entry(name.to_string()).or_insert(0) += amount;
    }

    pub fn get_counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Statistics for one metric; all-zero stats if no samples exist.
    pub fn get_metric_stats(&self, name: &str) -> MetricStats {
        let samples = match self.metrics.get(name) {
            Some(s) if !s.is_empty() => s,
            _ => return MetricStats::empty(),
        };

        let total: f64 = samples.iter().sum();
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        MetricStats {
            count: samples.len(),
            mean: total / samples.len() as f64,
            min,
            max,
            total,
        }
    }

    /// Timing statistics for every metric, rounded to 2 decimals.
    pub fn get_all_timings(&self) -> HashMap<String, TimingStats> {
        self.metrics
            .keys()
            .map(|name| {
                let stats = self.get_metric_stats(name);
                (
                    name.clone(),
                    TimingStats {
                        avg_seconds: round2(stats.mean),
                        min_seconds: round2(stats.min),
                        max_seconds: round2(stats.max),
                        total_seconds: round2(stats.total),
                        count: stats.count,
                    },
                )
            })
            .collect()
    }

    pub fn get_all_counters(&self) -> HashMap<String, i64> {
        self.counters.clone()
    }

    /// Comprehensive snapshot of the collector's state.
    pub fn get_summary(&self) -> MetricsSummary {
        MetricsSummary {
            timings: self.get_all_timings(),
            counters: self.counters.clone(),
            active_timers: self.timers.keys().cloned().collect(),
        }
    }

    /// Drop all timers, samples, and counters.
    pub fn reset(&mut self) {
        self.timers.clear();
        self.metrics.clear();
        self.counters.clear();
    }
}
