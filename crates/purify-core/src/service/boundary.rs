//! Boundary validator
//!
//! Checks every argument in a fixed order before handing a validated shape
//! to the engine. The intercept output is zeroed first, unconditionally;
//! no other buffer is touched unless every check passes.
//!
//! Order of checks:
//!
//! 1. zero the intercept output
//! 2. `dimension_count == 0` is a successful no-op
//! 3. `dimension_count < 0` is an invalid argument
//! 4. `dimension_count > MAX_DIMENSIONS` exhausts resources
//! 5. missing or short `dimension_lengths` is an invalid argument
//! 6. a single forward scan: the first negative length fails immediately,
//!    otherwise any zero length makes the call an empty-tensor no-op
//! 7. lengths must convert to `usize` and their product (and the line
//!    count) must not overflow
//! 8. missing or short `weights`, `scores`, `impurities` are invalid arguments

use crate::adapters::TracingDiagnostics;
use crate::domain::{purify_tensor, EngineLimits, Shape, MAX_DIMENSIONS};
use crate::error::{BufferKind, PurifyError};
use crate::ports::{DiagnosticsSink, PurifyArgs, PurifyOutcome};

/// Purify with no pass cap, reporting to `tracing`.
pub fn purify(args: PurifyArgs<'_>) -> Result<PurifyOutcome, PurifyError> {
    purify_with(args, EngineLimits::default(), &TracingDiagnostics)
}

/// Purify with explicit limits and diagnostics collaborator.
pub fn purify_with(
    args: PurifyArgs<'_>,
    limits: EngineLimits,
    diagnostics: &dyn DiagnosticsSink,
) -> Result<PurifyOutcome, PurifyError> {
    diagnostics.entered(&args.summary());

    let result = validate_and_run(args, limits, diagnostics);
    match &result {
        Ok(outcome) => diagnostics.exited(outcome),
        Err(error) => diagnostics.rejected(error),
    }
    result
}

fn validate_and_run(
    args: PurifyArgs<'_>,
    limits: EngineLimits,
    diagnostics: &dyn DiagnosticsSink,
) -> Result<PurifyOutcome, PurifyError> {
    let PurifyArgs {
        tolerance,
        dimension_count,
        dimension_lengths,
        weights,
        scores,
        impurities,
        mut intercept,
    } = args;

    if let Some(out) = intercept.as_deref_mut() {
        *out = 0.0;
    }

    if dimension_count == 0 {
        diagnostics.zero_dimensions();
        return Ok(PurifyOutcome::ZeroDimensions);
    }
    if dimension_count < 0 {
        return Err(PurifyError::NegativeDimensionCount {
            count: dimension_count,
        });
    }
    let rank = usize::try_from(dimension_count)
        .ok()
        .filter(|&rank| rank <= MAX_DIMENSIONS)
        .ok_or(PurifyError::TooManyDimensions {
            count: dimension_count,
            max: MAX_DIMENSIONS,
        })?;

    let dimension_lengths = dimension_lengths
        .ok_or(PurifyError::MissingBuffer(BufferKind::DimensionLengths))?;
    let dimension_lengths = require(BufferKind::DimensionLengths, dimension_lengths, rank)?;

    let mut has_zero = false;
    for (dimension, &length) in dimension_lengths.iter().enumerate() {
        if length < 0 {
            return Err(PurifyError::NegativeDimensionLength { dimension, length });
        }
        has_zero |= length == 0;
    }
    if has_zero {
        diagnostics.empty_tensor();
        return Ok(PurifyOutcome::EmptyTensor);
    }

    let mut lengths = [0usize; MAX_DIMENSIONS];
    for (dimension, (slot, &length)) in lengths.iter_mut().zip(dimension_lengths).enumerate() {
        *slot = usize::try_from(length)
            .map_err(|_| PurifyError::DimensionLengthOverflow { dimension, length })?;
    }
    let shape = Shape::new(&lengths[..rank])?;

    let weights = weights.ok_or(PurifyError::MissingBuffer(BufferKind::Weights))?;
    let weights = require(BufferKind::Weights, weights, shape.cell_count())?;

    let scores = scores.ok_or(PurifyError::MissingBuffer(BufferKind::Scores))?;
    require(BufferKind::Scores, &*scores, shape.cell_count())?;

    let impurities = impurities.ok_or(PurifyError::MissingBuffer(BufferKind::Impurities))?;
    require(BufferKind::Impurities, &*impurities, shape.line_count())?;

    let convergence = purify_tensor(
        &shape, tolerance, limits, weights, scores, impurities, intercept,
    );
    Ok(PurifyOutcome::Purified(convergence))
}

/// Length check that keeps the buffer usable afterwards.
fn require<T>(buffer: BufferKind, values: &[T], required: usize) -> Result<&[T], PurifyError> {
    if values.len() < required {
        return Err(PurifyError::BufferTooSmall {
            buffer,
            required,
            actual: values.len(),
        });
    }
    Ok(&values[..required])
}
