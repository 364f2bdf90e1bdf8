//! Error types for tensor purification

use std::fmt;

use thiserror::Error;

/// Which caller-owned buffer a rejection refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    DimensionLengths,
    Weights,
    Scores,
    Impurities,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::DimensionLengths => write!(f, "dimension_lengths"),
            BufferKind::Weights => write!(f, "weights"),
            BufferKind::Scores => write!(f, "scores"),
            BufferKind::Impurities => write!(f, "impurities"),
        }
    }
}

/// Errors that can occur while validating or configuring a purification
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PurifyError {
    #[error("Dimension count must not be negative: {count}")]
    NegativeDimensionCount { count: i64 },

    #[error("Too many dimensions: {count} > {max}")]
    TooManyDimensions { count: i64, max: usize },

    #[error("Missing required buffer: {0}")]
    MissingBuffer(BufferKind),

    #[error("Buffer {buffer} too small: {actual} < {required}")]
    BufferTooSmall {
        buffer: BufferKind,
        required: usize,
        actual: usize,
    },

    #[error("Dimension {dimension} has negative length {length}")]
    NegativeDimensionLength { dimension: usize, length: i64 },

    #[error("Dimension {dimension} has zero length")]
    ZeroDimensionLength { dimension: usize },

    #[error("Dimension {dimension} length {length} does not fit the index type")]
    DimensionLengthOverflow { dimension: usize, length: i64 },

    #[error("Tensor cell count overflows at dimension {dimension}")]
    CellCountOverflow { dimension: usize },

    #[error("Shape must have at least one dimension")]
    EmptyShape,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PurifyError {
    /// Status code this error reports at the call boundary
    pub fn status(&self) -> Status {
        match self {
            PurifyError::TooManyDimensions { .. }
            | PurifyError::DimensionLengthOverflow { .. }
            | PurifyError::CellCountOverflow { .. } => Status::ResourceExhausted,
            _ => Status::InvalidArgument,
        }
    }
}

/// Flat status taxonomy reported at the call boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// No-ops and fully computed results
    Success,
    /// Missing buffer, negative count or length, bad configuration
    InvalidArgument,
    /// Rank above the supported maximum or cell count overflow
    ResourceExhausted,
}

impl Status {
    /// Collapse any boundary result into its status code.
    pub fn of<T>(result: &Result<T, PurifyError>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }

    /// Stable lowercase label, used for metric labels and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::InvalidArgument => "invalid_argument",
            Status::ResourceExhausted => "resource_exhausted",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
