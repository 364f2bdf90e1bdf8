//! Inbound Ports (Driving Ports)
//!
//! The call boundary external callers use, plus its request and response
//! types.

use serde::Serialize;

use crate::domain::{Convergence, Shape, StopReason};
use crate::error::PurifyError;

/// Arguments crossing the call boundary.
///
/// `None` stands for a missing (null) buffer. Buffers may be longer than the
/// shape requires; only the leading cells are touched.
#[derive(Debug)]
pub struct PurifyArgs<'a> {
    /// Convergence slack as a fraction of mean absolute weighted score
    pub tolerance: f64,
    /// Declared rank; `0` is a no-op, negative is rejected
    pub dimension_count: i64,
    /// One length per declared dimension
    pub dimension_lengths: Option<&'a [i64]>,
    /// Non-negative sample mass per cell
    pub weights: Option<&'a [f64]>,
    /// Raw tensor in, residual out
    pub scores: Option<&'a mut [f64]>,
    /// One accumulated mean per line, dimension-major
    pub impurities: Option<&'a mut [f64]>,
    /// Receives the global weighted mean; always zeroed first
    pub intercept: Option<&'a mut f64>,
}

impl<'a> PurifyArgs<'a> {
    /// Arguments for a fully supplied call without intercept extraction.
    pub fn new(
        tolerance: f64,
        dimension_lengths: &'a [i64],
        weights: &'a [f64],
        scores: &'a mut [f64],
        impurities: &'a mut [f64],
    ) -> Self {
        Self {
            tolerance,
            dimension_count: i64::try_from(dimension_lengths.len()).unwrap_or(i64::MAX),
            dimension_lengths: Some(dimension_lengths),
            weights: Some(weights),
            scores: Some(scores),
            impurities: Some(impurities),
            intercept: None,
        }
    }

    /// Request intercept extraction into `out`.
    pub fn with_intercept(mut self, out: &'a mut f64) -> Self {
        self.intercept = Some(out);
        self
    }

    /// Loggable view of the arguments.
    pub fn summary(&self) -> CallSummary {
        CallSummary {
            tolerance: self.tolerance,
            dimension_count: self.dimension_count,
            dimension_lengths: self.dimension_lengths.map(<[i64]>::len),
            weights: self.weights.map(<[f64]>::len),
            scores: self.scores.as_deref().map(<[f64]>::len),
            impurities: self.impurities.as_deref().map(<[f64]>::len),
            intercept_requested: self.intercept.is_some(),
        }
    }
}

/// Scalar description of a call, buffer lengths in place of buffers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CallSummary {
    pub tolerance: f64,
    pub dimension_count: i64,
    pub dimension_lengths: Option<usize>,
    pub weights: Option<usize>,
    pub scores: Option<usize>,
    pub impurities: Option<usize>,
    pub intercept_requested: bool,
}

/// Successful result of a boundary call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PurifyOutcome {
    /// Declared rank was zero
    ZeroDimensions,
    /// Some dimension had length zero
    EmptyTensor,
    /// The engine ran (possibly stopping immediately on zero weight)
    Purified(Convergence),
}

impl PurifyOutcome {
    /// Engine summary, when the engine ran.
    pub fn convergence(&self) -> Option<&Convergence> {
        match self {
            PurifyOutcome::Purified(convergence) => Some(convergence),
            _ => None,
        }
    }

    /// Stop reason, when the engine ran.
    pub fn stop(&self) -> Option<StopReason> {
        self.convergence().map(|c| c.stop)
    }

    /// True when no buffer other than the intercept could have changed.
    pub fn is_no_op(&self) -> bool {
        !matches!(self.stop(), Some(stop) if stop != StopReason::ZeroWeight)
    }
}

/// Owned result of purifying a copy of the caller's tensor.
#[derive(Clone, Debug, PartialEq)]
pub struct Decomposition {
    /// Per-dimension lengths
    pub lengths: Vec<usize>,
    /// Global weighted mean (zero when not extracted)
    pub intercept: f64,
    /// All marginal blocks, dimension-major
    pub marginals: Vec<f64>,
    /// Pure interaction residual
    pub residual: Vec<f64>,
    pub outcome: PurifyOutcome,
}

impl Decomposition {
    /// Marginal curve of one dimension: one entry per line along it.
    ///
    /// Empty when the dimension does not exist or nothing was purified.
    pub fn marginal(&self, dimension: usize) -> &[f64] {
        let Ok(shape) = Shape::new(&self.lengths) else {
            return &[];
        };
        if dimension >= shape.rank() {
            return &[];
        }
        let start = shape.dimension_offset(dimension);
        let end = start + shape.lines_in_dimension(dimension);
        self.marginals.get(start..end).unwrap_or(&[])
    }
}

/// Tensor purification API (Driving Port)
pub trait PurifyApi: Send + Sync {
    /// Purify caller-owned buffers in place.
    ///
    /// Validation happens before anything but the intercept is written;
    /// on error no other buffer is touched.
    fn purify(&self, args: PurifyArgs<'_>) -> Result<PurifyOutcome, PurifyError>;

    /// Purify a copy of `scores` and return the owned decomposition.
    fn decompose(
        &self,
        lengths: &[usize],
        weights: &[f64],
        scores: &[f64],
    ) -> Result<Decomposition, PurifyError>;
}
