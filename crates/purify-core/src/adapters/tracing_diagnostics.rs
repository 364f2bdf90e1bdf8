//! `tracing` adapter for the diagnostics port
//!
//! Severities follow the boundary's decision points: entry and exit at
//! debug, no-op and zero-weight notices at info, rank-too-large at warn, every other
//! rejection at error.

use crate::domain::StopReason;
use crate::error::PurifyError;
use crate::ports::{CallSummary, DiagnosticsSink, PurifyOutcome};

const COMPONENT: &str = "purify";

/// Emits one `tracing` event per decision point.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn entered(&self, call: &CallSummary) {
        tracing::debug!(
            component = COMPONENT,
            tolerance = call.tolerance,
            dimension_count = call.dimension_count,
            dimension_lengths = ?call.dimension_lengths,
            weights = ?call.weights,
            scores = ?call.scores,
            impurities = ?call.impurities,
            intercept_requested = call.intercept_requested,
            "Entered purify"
        );
    }

    fn rejected(&self, error: &PurifyError) {
        match error {
            PurifyError::TooManyDimensions { .. } => tracing::warn!(
                component = COMPONENT,
                status = %error.status(),
                "Purify rejected: {}",
                error
            ),
            _ => tracing::error!(
                component = COMPONENT,
                status = %error.status(),
                "Purify rejected: {}",
                error
            ),
        }
    }

    fn zero_dimensions(&self) {
        tracing::info!(component = COMPONENT, "Purify zero dimensions");
    }

    fn empty_tensor(&self) {
        tracing::info!(component = COMPONENT, "Purify empty tensor");
    }

    fn exited(&self, outcome: &PurifyOutcome) {
        match outcome.convergence() {
            Some(convergence) if convergence.stop == StopReason::ZeroWeight => {
                tracing::info!(component = COMPONENT, "Purify zero total weight")
            }
            Some(convergence) => tracing::debug!(
                component = COMPONENT,
                stop = %convergence.stop,
                passes = convergence.passes,
                threshold = convergence.threshold,
                final_pass_impurity = convergence.final_pass_impurity,
                "Exited purify"
            ),
            None => tracing::debug!(component = COMPONENT, "Exited purify without work"),
        }
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpDiagnostics;

impl DiagnosticsSink for NoOpDiagnostics {
    fn entered(&self, _: &CallSummary) {}
    fn rejected(&self, _: &PurifyError) {}
    fn zero_dimensions(&self) {}
    fn empty_tensor(&self) {}
    fn exited(&self, _: &PurifyOutcome) {}
}
