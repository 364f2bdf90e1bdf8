//! Purify CLI: JSON in, decomposition out.
//!
//! Input:
//!
//! ```json
//! { "lengths": [2, 2], "weights": [1, 1, 1, 1], "scores": [1, 2, 3, 4] }
//! ```
//!
//! `weights` may be omitted, in which case every cell weighs 1.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use purify_core::{
    Decomposition, DiagnosticsSink, MetricsRecorder, PurificationService, PurifyApi, PurifyConfig,
    Shape, StopReason,
};

/// Tensor as read from the input document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TensorInput {
    pub lengths: Vec<usize>,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
    pub scores: Vec<f64>,
}

impl TensorInput {
    /// Weights as given, or all ones sized to the declared shape.
    pub fn weights_or_uniform(&self) -> Vec<f64> {
        match &self.weights {
            Some(weights) => weights.clone(),
            None => {
                let cells = Shape::new(&self.lengths)
                    .map(|shape| shape.cell_count())
                    .unwrap_or(self.scores.len());
                vec![1.0; cells]
            }
        }
    }
}

/// Decomposition as written to the output document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DecompositionOutput {
    pub intercept: f64,
    /// One marginal curve per dimension
    pub marginals: Vec<Vec<f64>>,
    pub residual: Vec<f64>,
    /// `None` when the call was a no-op before the engine ran
    pub stop: Option<StopReason>,
    pub passes: usize,
}

impl From<&Decomposition> for DecompositionOutput {
    fn from(decomposition: &Decomposition) -> Self {
        Self {
            intercept: decomposition.intercept,
            marginals: (0..decomposition.lengths.len())
                .map(|d| decomposition.marginal(d).to_vec())
                .collect(),
            residual: decomposition.residual.clone(),
            stop: decomposition.outcome.stop(),
            passes: decomposition
                .outcome
                .convergence()
                .map_or(0, |convergence| convergence.passes),
        }
    }
}

/// Command-line overrides applied on top of the environment configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Overrides {
    pub tolerance: Option<f64>,
    pub max_passes: Option<usize>,
    pub no_intercept: bool,
}

impl Overrides {
    /// Apply to `base`; the result is validated by the service.
    pub fn apply(self, mut base: PurifyConfig) -> PurifyConfig {
        if let Some(tolerance) = self.tolerance {
            base = base.with_tolerance(tolerance);
        }
        if let Some(max_passes) = self.max_passes {
            base = base.with_max_passes(max_passes);
        }
        if self.no_intercept {
            base.extract_intercept = false;
        }
        base
    }
}

/// Read the input document from a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<TensorInput> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read tensor from stdin")?;
        text
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read tensor from {}", path.display()))?
    };
    parse_input(&text)
}

/// Parse the input document.
pub fn parse_input(text: &str) -> Result<TensorInput> {
    serde_json::from_str(text).context("input is not a valid tensor document")
}

/// Decompose `input` with `service`.
pub fn run<D, M>(service: &PurificationService<D, M>, input: &TensorInput) -> Result<DecompositionOutput>
where
    D: DiagnosticsSink,
    M: MetricsRecorder,
{
    let weights = input.weights_or_uniform();
    let decomposition = service
        .decompose(&input.lengths, &weights, &input.scores)
        .with_context(|| format!("purification of shape {:?} failed", input.lengths))?;
    Ok(DecompositionOutput::from(&decomposition))
}
