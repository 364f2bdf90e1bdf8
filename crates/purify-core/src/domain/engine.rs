//! Purification engine
//!
//! Decomposes a weighted score tensor into an intercept, one marginal curve
//! per dimension and a residual whose weighted mean along every axis-aligned
//! line is (near) zero.
//!
//! ## Algorithm
//!
//! 1. One linear scan computes the total weight, the weighted score sum and
//!    the absolute weighted score sum.
//! 2. Zero total weight: nothing to purify, buffers are left untouched.
//! 3. `threshold = absolute_weighted_score * tolerance / weight`.
//! 4. Optionally extract the global weighted mean as the intercept.
//! 5. Sweep every line in enumeration order, moving its weighted mean from
//!    the scores into its marginal slot. Repeat until no line's mean exceeds
//!    the threshold, or the summed magnitude of a pass stops strictly
//!    decreasing (plateau), or the optional pass cap is reached.
//!
//! The engine never allocates and never fails. It must only be handed a
//! shape and buffers that already passed the boundary checks.

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Aggregates from the initial linear scan.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TensorTotals {
    /// Sum of weights
    pub weight: f64,
    /// Sum of `score * weight`
    pub weighted_score: f64,
    /// Sum of `|score * weight|`
    pub absolute_weighted_score: f64,
}

impl TensorTotals {
    /// Scan `weights` and `scores` pairwise.
    pub fn scan(weights: &[f64], scores: &[f64]) -> Self {
        let mut totals = Self::default();
        for (&weight, &score) in weights.iter().zip(scores) {
            totals.weight += weight;
            let impurity = score * weight;
            totals.weighted_score += impurity;
            totals.absolute_weighted_score += impurity.abs();
        }
        totals
    }

    /// Convergence threshold for a given tolerance.
    ///
    /// Zero when the total weight is zero.
    pub fn threshold(&self, tolerance: f64) -> f64 {
        if self.weight == 0.0 {
            return 0.0;
        }
        self.absolute_weighted_score * tolerance / self.weight
    }
}

/// Why the sweep loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No line's mean exceeded the threshold in the last pass
    Converged,
    /// The last pass did not strictly reduce the summed line impurity
    Plateau,
    /// The configured pass cap was reached first
    PassLimit,
    /// Total weight was zero; nothing was touched
    ZeroWeight,
}

impl StopReason {
    /// Stable lowercase label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Converged => "converged",
            StopReason::Plateau => "plateau",
            StopReason::PassLimit => "pass_limit",
            StopReason::ZeroWeight => "zero_weight",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one engine run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence {
    pub stop: StopReason,
    /// Number of full sweeps over every line
    pub passes: usize,
    /// Threshold a line mean had to exceed to force another pass
    pub threshold: f64,
    /// Sum of `|mean|` over every line in the last pass
    pub final_pass_impurity: f64,
}

/// Optional safety limits for the sweep loop.
///
/// The default imposes no cap, which keeps the loop's stopping behaviour
/// exactly the dual converged/plateau condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineLimits {
    pub max_passes: Option<usize>,
}

/// Purify `scores` in place.
///
/// `weights` and `scores` must hold at least `shape.cell_count()` values and
/// `impurities` at least `shape.line_count()`; only those prefixes are read
/// or written. `impurities` is zeroed before accumulation unless the total
/// weight is zero. Buffer lengths are checked by the call boundary before
/// this runs.
pub(crate) fn purify_tensor(
    shape: &Shape,
    tolerance: f64,
    limits: EngineLimits,
    weights: &[f64],
    scores: &mut [f64],
    impurities: &mut [f64],
    intercept: Option<&mut f64>,
) -> Convergence {
    let weights = &weights[..shape.cell_count()];
    let scores = &mut scores[..shape.cell_count()];
    let impurities = &mut impurities[..shape.line_count()];

    let totals = TensorTotals::scan(weights, scores);
    if totals.weight == 0.0 {
        return Convergence {
            stop: StopReason::ZeroWeight,
            passes: 0,
            threshold: 0.0,
            final_pass_impurity: 0.0,
        };
    }

    let threshold = totals.threshold(tolerance);

    if let Some(out) = intercept {
        let value = totals.weighted_score / totals.weight;
        *out = value;
        for score in scores.iter_mut() {
            *score -= value;
        }
    }

    impurities.fill(0.0);

    // TODO: shuffle the line order per pass once a seeded variant is wanted;
    // the fixed order decides which dimension absorbs shared mass on plateau.
    let mut previous = f64::INFINITY;
    let mut passes = 0;
    loop {
        passes += 1;
        let mut current = 0.0;
        let mut retry = false;

        for (slot, line) in shape.lines() {
            let mut weighted = 0.0;
            let mut weight_total = 0.0;
            for cell in line.cells() {
                let weight = weights[cell];
                weighted += scores[cell] * weight;
                weight_total += weight;
            }

            let impurity = if weight_total == 0.0 {
                0.0
            } else {
                weighted / weight_total
            };

            let magnitude = impurity.abs();
            retry |= threshold < magnitude;
            current += magnitude;

            impurities[slot] += impurity;
            for cell in line.cells() {
                scores[cell] -= impurity;
            }
        }

        let stop = if previous <= current {
            // floating point noise can keep a few lines above threshold forever
            Some(if retry {
                StopReason::Plateau
            } else {
                StopReason::Converged
            })
        } else if !retry {
            Some(StopReason::Converged)
        } else if limits.max_passes.is_some_and(|max| passes >= max) {
            Some(StopReason::PassLimit)
        } else {
            None
        };

        previous = current;
        if let Some(stop) = stop {
            return Convergence {
                stop,
                passes,
                threshold,
                final_pass_impurity: current,
            };
        }
    }
}
