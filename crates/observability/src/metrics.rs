//! Sender metrics
//!
//! Counters exported through the `metrics` facade, plus an in-memory
//! aggregator over the responses a sender publishes.

use std::collections::HashMap;
use std::fmt;

use contracts::Response;
use metrics::counter;

/// Record one event handed to a sender
pub fn record_event_added(sender: &str) {
    counter!(
        "telemetry_tx_events_added_total",
        "sender" => sender.to_string()
    )
    .increment(1);
}

/// Record one response published on a sender's stream
pub fn record_response(sender: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "telemetry_tx_responses_total",
        "sender" => sender.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a response dropped on a full stream
pub fn record_response_dropped(sender: &str) {
    counter!(
        "telemetry_tx_responses_dropped_total",
        "sender" => sender.to_string()
    )
    .increment(1);
}

/// Record a start/stop call and its outcome
pub fn record_lifecycle(sender: &str, op: &'static str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "telemetry_tx_lifecycle_total",
        "sender" => sender.to_string(),
        "op" => op,
        "status" => status
    )
    .increment(1);
}

/// Response statistics aggregator
///
/// Fed from a response stream; keeps counts per status code and
/// duration statistics in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct ResponseStatsAggregator {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub status_counts: HashMap<u16, u64>,
    pub duration_stats: RunningStats,
}

impl ResponseStatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, response: &Response) {
        self.total += 1;
        if response.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        *self.status_counts.entry(response.status_code).or_insert(0) += 1;
        self.duration_stats
            .push(response.duration.as_secs_f64() * 1000.0);
    }

    pub fn summary(&self) -> ResponseSummary {
        ResponseSummary {
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            failure_rate: if self.total > 0 {
                self.failed as f64 / self.total as f64 * 100.0
            } else {
                0.0
            },
            duration_ms: StatsSummary::from(&self.duration_stats),
            status_counts: self.status_counts.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Response summary
#[derive(Debug, Clone, Default)]
pub struct ResponseSummary {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub failure_rate: f64,
    pub duration_ms: StatsSummary,
    pub status_counts: HashMap<u16, u64>,
}

impl fmt::Display for ResponseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Response Summary ===")?;
        writeln!(f, "Total responses: {}", self.total)?;
        writeln!(f, "Succeeded: {}", self.succeeded)?;
        writeln!(f, "Failed: {} ({:.2}%)", self.failed, self.failure_rate)?;
        writeln!(f, "Duration (ms): {}", self.duration_ms)?;

        if !self.status_counts.is_empty() {
            let mut codes: Vec<_> = self.status_counts.iter().collect();
            codes.sort();
            writeln!(f, "Status codes:")?;
            for (code, count) in codes {
                writeln!(f, "  {}: {}", code, count)?;
            }
        }

        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            self.m2 += delta * (value - self.mean);
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.push(v);
        }

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_update() {
        let mut aggregator = ResponseStatsAggregator::new();

        aggregator.update(&Response::ok(200, None).with_duration(Duration::from_millis(4)));
        aggregator.update(&Response::ok(200, None).with_duration(Duration::from_millis(6)));
        aggregator.update(&Response::failed("timeout", None));

        assert_eq!(aggregator.total, 3);
        assert_eq!(aggregator.succeeded, 2);
        assert_eq!(aggregator.failed, 1);
        assert_eq!(aggregator.status_counts.get(&200), Some(&2));
        assert_eq!(aggregator.status_counts.get(&0), Some(&1));
        assert_eq!(aggregator.duration_stats.count(), 3);

        aggregator.reset();
        assert_eq!(aggregator.total, 0);
    }

    #[test]
    fn test_summary_display() {
        let mut aggregator = ResponseStatsAggregator::new();
        for _ in 0..3 {
            aggregator.update(&Response::ok(200, None));
        }
        aggregator.update(&Response::failed("refused", None));

        let output = aggregator.summary().to_string();
        assert!(output.contains("Total responses: 4"));
        assert!(output.contains("25.00%"));
        assert!(output.contains("  200: 3"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = ResponseStatsAggregator::new().summary();
        assert_eq!(summary.failure_rate, 0.0);
        assert_eq!(summary.duration_ms.to_string(), "N/A");
    }
}
