//! Metrics hooks for purification calls
//!
//! ## Usage
//!
//! ```ignore
//! use purify_core::metrics::Metrics;
//!
//! let metrics = Metrics::new();
//! let result = service.purify(args);
//! metrics.record_call(&result);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::StopReason;
use crate::error::{PurifyError, Status};
use crate::ports::PurifyOutcome;

/// Thread-safe counters for purification calls
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total boundary calls
    pub calls: AtomicU64,
    /// Calls that returned success (including no-ops)
    pub successes: AtomicU64,
    /// Successful calls that touched nothing but the intercept
    pub no_ops: AtomicU64,
    /// Calls rejected with an invalid argument
    pub invalid_arguments: AtomicU64,
    /// Calls rejected as too large
    pub resources_exhausted: AtomicU64,
    /// Engine runs that converged
    pub converged: AtomicU64,
    /// Engine runs stopped by the plateau guard
    pub plateaus: AtomicU64,
    /// Engine runs stopped by the pass cap
    pub pass_limits: AtomicU64,
    /// Engine runs on zero total weight
    pub zero_weights: AtomicU64,
    /// Sum of sweeps over all engine runs
    pub passes: AtomicU64,
    /// Sum of cells over all engine runs that swept
    pub cells_purified: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of one boundary call.
    ///
    /// `cells` is the tensor's cell count when known; it is only counted for
    /// runs that actually swept.
    pub fn record_call(&self, result: &Result<PurifyOutcome, PurifyError>, cells: usize) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match Status::of(result) {
            Status::Success => {
                self.successes.fetch_add(1, Ordering::Relaxed);
            }
            Status::InvalidArgument => {
                self.invalid_arguments.fetch_add(1, Ordering::Relaxed);
            }
            Status::ResourceExhausted => {
                self.resources_exhausted.fetch_add(1, Ordering::Relaxed);
            }
        }

        let Ok(outcome) = result else {
            return;
        };
        if outcome.is_no_op() {
            self.no_ops.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(convergence) = outcome.convergence() {
            let counter = match convergence.stop {
                StopReason::Converged => &self.converged,
                StopReason::Plateau => &self.plateaus,
                StopReason::PassLimit => &self.pass_limits,
                StopReason::ZeroWeight => &self.zero_weights,
            };
            counter.fetch_add(1, Ordering::Relaxed);
            self.passes
                .fetch_add(convergence.passes as u64, Ordering::Relaxed);
            if convergence.stop != StopReason::ZeroWeight {
                self.cells_purified.fetch_add(cells as u64, Ordering::Relaxed);
            }
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls: self.calls.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            no_ops: self.no_ops.load(Ordering::Relaxed),
            invalid_arguments: self.invalid_arguments.load(Ordering::Relaxed),
            resources_exhausted: self.resources_exhausted.load(Ordering::Relaxed),
            converged: self.converged.load(Ordering::Relaxed),
            plateaus: self.plateaus.load(Ordering::Relaxed),
            pass_limits: self.pass_limits.load(Ordering::Relaxed),
            zero_weights: self.zero_weights.load(Ordering::Relaxed),
            passes: self.passes.load(Ordering::Relaxed),
            cells_purified: self.cells_purified.load(Ordering::Relaxed),
        }
    }

    /// Average sweeps per engine run that swept at least once
    pub fn avg_passes(&self) -> f64 {
        let runs = self.converged.load(Ordering::Relaxed)
            + self.plateaus.load(Ordering::Relaxed)
            + self.pass_limits.load(Ordering::Relaxed);
        if runs > 0 {
            self.passes.load(Ordering::Relaxed) as f64 / runs as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.calls,
            &self.successes,
            &self.no_ops,
            &self.invalid_arguments,
            &self.resources_exhausted,
            &self.converged,
            &self.plateaus,
            &self.pass_limits,
            &self.zero_weights,
            &self.passes,
            &self.cells_purified,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub calls: u64,
    pub successes: u64,
    pub no_ops: u64,
    pub invalid_arguments: u64,
    pub resources_exhausted: u64,
    pub converged: u64,
    pub plateaus: u64,
    pub pass_limits: u64,
    pub zero_weights: u64,
    pub passes: u64,
    pub cells_purified: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems
/// like Prometheus.
pub trait MetricsRecorder: Send + Sync {
    /// Record one boundary call and the tensor's cell count
    fn record_call(&self, result: &Result<PurifyOutcome, PurifyError>, cells: usize);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_call(&self, _: &Result<PurifyOutcome, PurifyError>, _: usize) {}
}

impl MetricsRecorder for Metrics {
    fn record_call(&self, result: &Result<PurifyOutcome, PurifyError>, cells: usize) {
        Metrics::record_call(self, result, cells);
    }
}
