//! Purification Service
//!
//! Binds configuration, the diagnostics collaborator and a metrics recorder
//! to the boundary, and offers an owned variant that purifies a copy.

use std::sync::Arc;

use super::boundary::purify_with;
use crate::adapters::TracingDiagnostics;
use crate::domain::{PurifyConfig, Shape, MAX_DIMENSIONS};
use crate::error::PurifyError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{Decomposition, DiagnosticsSink, PurifyApi, PurifyArgs, PurifyOutcome};

/// Purification Service implementation
///
/// Implements the `PurifyApi` port using injected dependencies.
pub struct PurificationService<D: DiagnosticsSink = TracingDiagnostics, M: MetricsRecorder = NoOpMetrics> {
    config: PurifyConfig,
    diagnostics: D,
    metrics: Arc<M>,
}

impl PurificationService {
    /// Service with the given configuration, `tracing` diagnostics and no metrics.
    pub fn new(config: PurifyConfig) -> Result<Self, PurifyError> {
        Self::with_parts(config, TracingDiagnostics, Arc::new(NoOpMetrics))
    }
}

impl Default for PurificationService {
    fn default() -> Self {
        Self {
            config: PurifyConfig::default(),
            diagnostics: TracingDiagnostics,
            metrics: Arc::new(NoOpMetrics),
        }
    }
}

impl<D: DiagnosticsSink, M: MetricsRecorder> PurificationService<D, M> {
    /// Service with every collaborator supplied; the configuration is validated.
    pub fn with_parts(config: PurifyConfig, diagnostics: D, metrics: Arc<M>) -> Result<Self, PurifyError> {
        config.validate()?;
        Ok(Self {
            config,
            diagnostics,
            metrics,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PurifyConfig {
        &self.config
    }

    /// Diagnostics collaborator
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Metrics recorder
    pub fn metrics(&self) -> &Arc<M> {
        &self.metrics
    }

    /// Purify caller-owned buffers using the configured tolerance.
    ///
    /// The intercept is extracted into `intercept` when the configuration
    /// asks for it, and left alone otherwise.
    pub fn purify_buffers(
        &self,
        lengths: &[i64],
        weights: &[f64],
        scores: &mut [f64],
        impurities: &mut [f64],
        intercept: &mut f64,
    ) -> Result<PurifyOutcome, PurifyError> {
        let args = PurifyArgs::new(self.config.tolerance, lengths, weights, scores, impurities);
        let args = if self.config.extract_intercept {
            args.with_intercept(intercept)
        } else {
            args
        };
        self.purify(args)
    }
}

impl<D: DiagnosticsSink, M: MetricsRecorder> PurifyApi for PurificationService<D, M> {
    fn purify(&self, args: PurifyArgs<'_>) -> Result<PurifyOutcome, PurifyError> {
        let cells = declared_cell_count(&args);
        let result = purify_with(args, self.config.limits(), &self.diagnostics);
        self.metrics.record_call(&result, cells);
        result
    }

    fn decompose(
        &self,
        lengths: &[usize],
        weights: &[f64],
        scores: &[f64],
    ) -> Result<Decomposition, PurifyError> {
        let rank = lengths.len().min(MAX_DIMENSIONS);
        let mut declared = [0i64; MAX_DIMENSIONS];
        for (dimension, (slot, &length)) in declared.iter_mut().zip(lengths).enumerate() {
            *slot = i64::try_from(length).map_err(|_| PurifyError::DimensionLengthOverflow {
                dimension,
                length: i64::MAX,
            })?;
        }

        let shape = Shape::new(lengths).ok();
        let mut residual = scores.to_vec();
        let mut marginals = vec![0.0; shape.map_or(0, |s| s.line_count())];
        let mut intercept = 0.0;

        let args = PurifyArgs {
            tolerance: self.config.tolerance,
            dimension_count: i64::try_from(lengths.len()).unwrap_or(i64::MAX),
            dimension_lengths: Some(&declared[..rank]),
            weights: Some(weights),
            scores: Some(residual.as_mut_slice()),
            impurities: Some(marginals.as_mut_slice()),
            intercept: self.config.extract_intercept.then_some(&mut intercept),
        };
        let outcome = self.purify(args)?;

        if outcome.is_no_op() {
            marginals.clear();
        }
        match (outcome, shape) {
            (PurifyOutcome::EmptyTensor, _) => residual.clear(),
            // cells past the shape were never touched
            (_, Some(shape)) => residual.truncate(shape.cell_count()),
            _ => {}
        }

        Ok(Decomposition {
            lengths: lengths.to_vec(),
            intercept,
            marginals,
            residual,
            outcome,
        })
    }
}

/// Cell count implied by the declared lengths, zero when it cannot be formed.
fn declared_cell_count(args: &PurifyArgs<'_>) -> usize {
    let Some(lengths) = args.dimension_lengths else {
        return 0;
    };
    let Ok(rank) = usize::try_from(args.dimension_count) else {
        return 0;
    };
    if rank == 0 || rank > lengths.len() {
        return 0;
    }
    lengths[..rank]
        .iter()
        .try_fold(1usize, |cells, &length| {
            usize::try_from(length).ok().and_then(|l| cells.checked_mul(l))
        })
        .unwrap_or(0)
}
