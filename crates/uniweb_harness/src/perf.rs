//! Wall-clock timing of named operations with threshold checks.

use crate::error::{HarnessError, Result};
use crate::options::PageOptions;
use crate::sandbox::Sandbox;
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// Timer name used by [`PerformanceHelper::benchmark_bulk_operations`].
pub const BULK_OPERATION: &str = "bulk_operations";

/// One recorded timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Elapsed wall-clock time.
    pub duration: Duration,
    /// Whether the operation returned `Ok`.
    pub succeeded: bool,
}

/// Result of a bulk benchmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulkReport {
    /// Number of operations run.
    pub count: usize,
    /// Total elapsed time.
    pub duration: Duration,
    /// `duration / count` in milliseconds (0 when `count` is 0).
    pub avg_time_per_operation: f64,
}

/// Named timings. Recording a name twice keeps only the latest.
#[derive(Debug, Default)]
pub struct PerformanceHelper {
    measurements: HashMap<String, Measurement>,
}

impl PerformanceHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Await `op`, record its duration under `name` whether it succeeds or
    /// fails, and pass its result through.
    pub async fn time_operation<T, E, F>(&mut self, name: &str, op: F) -> std::result::Result<T, E>
    where
        F: Future<Output = std::result::Result<T, E>>,
    {
        let started = Instant::now();
        let result = op.await;
        let duration = started.elapsed();

        debug!("{} took {:?} (ok: {})", name, duration, result.is_ok());
        self.measurements.insert(
            name.to_string(),
            Measurement {
                duration,
                succeeded: result.is_ok(),
            },
        );
        result
    }

    /// Recorded timing for `name`.
    pub fn measurement(&self, name: &str) -> Option<&Measurement> {
        self.measurements.get(name)
    }

    /// Record a timing directly.
    pub fn record(&mut self, name: &str, duration: Duration) {
        self.measurements.insert(
            name.to_string(),
            Measurement {
                duration,
                succeeded: true,
            },
        );
    }

    /// Fails if `name` was never timed or took `max` or longer.
    pub fn expect_operation_faster_than(&self, name: &str, max: Duration) -> Result<()> {
        let measurement = self
            .measurement(name)
            .ok_or_else(|| HarnessError::MissingMeasurement {
                name: name.to_string(),
            })?;
        if measurement.duration >= max {
            return Err(HarnessError::TooSlow {
                name: name.to_string(),
                elapsed: measurement.duration,
                limit: max,
            });
        }
        Ok(())
    }

    /// Create `count` pages (`test-page-0` ...) as one batch under a single
    /// timer and derive the average per page.
    pub async fn benchmark_bulk_operations(
        &mut self,
        sandbox: &mut Sandbox,
        count: usize,
    ) -> Result<BulkReport> {
        let batch = (0..count).fold(sandbox.batch(), |batch, i| {
            batch.add_page(format!("test-page-{}", i), PageOptions::default())
        });
        self.time_operation(BULK_OPERATION, batch.execute()).await?;

        let duration = self
            .measurement(BULK_OPERATION)
            .map(|m| m.duration)
            .unwrap_or_default();
        let avg_time_per_operation = if count == 0 {
            0.0
        } else {
            duration.as_secs_f64() * 1000.0 / count as f64
        };

        Ok(BulkReport {
            count,
            duration,
            avg_time_per_operation,
        })
    }

    /// All measurements sorted by name.
    pub fn report(&self) -> Vec<(&str, Measurement)> {
        let mut rows: Vec<(&str, Measurement)> = self
            .measurements
            .iter()
            .map(|(name, m)| (name.as_str(), *m))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }
}
