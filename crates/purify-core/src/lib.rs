//! # Purify Core
//!
//! Weighted tensor purification: split a dense score tensor into a global
//! intercept, one marginal curve per dimension, and a pure interaction
//! residual whose every axis-aligned line has zero weighted mean.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure numerics, no I/O, no allocation
//!   - `Shape`: Mixed-radix layout, strides and line enumeration
//!   - `engine`: The sweep loop, reached only through the call boundary
//!   - `PurifyConfig`: Configuration with validation
//!   - `PurifyConfigBuilder`: Fluent builder for configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `PurifyApi`: Driving port (inbound API)
//!   - `DiagnosticsSink`: Driven port for decision-point diagnostics
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `purify`: Validating call boundary
//!   - `PurificationService`: Implements `PurifyApi`
//!
//! - **Adapters Layer** (`adapters/`): Diagnostics sinks
//!   - `TracingDiagnostics`: Emits `tracing` events
//!   - `RecordingDiagnostics`: Keeps events in memory
//!
//! ## Layout
//!
//! Cells are stored with dimension 0 varying fastest. Impurities hold one
//! entry per line, all lines of dimension 0 first, then dimension 1, and so
//! on. A rank `r` tensor with `N` cells needs `sum(N / L_d)` impurity slots.
//!
//! ## Invariants
//!
//! - Validation completes before any buffer other than the intercept is written
//! - `scores + intercept + sum of broadcast marginals` is preserved up to rounding
//! - On zero total weight nothing but the intercept changes
//!
//! ## Usage Example
//!
//! ```ignore
//! use purify_core::{PurificationService, PurifyApi, PurifyConfigBuilder};
//!
//! let config = PurifyConfigBuilder::new().tolerance(1e-9).build()?;
//! let service = PurificationService::new(config)?;
//!
//! let decomposition = service.decompose(&[2, 2], &[1.0; 4], &[1.0, 2.0, 3.0, 4.0])?;
//! assert_eq!(decomposition.intercept, 2.5);
//! assert_eq!(decomposition.marginal(0), &[-1.0, 1.0]);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{DiagnosticEvent, NoOpDiagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use domain::{
    Convergence, EngineLimits, PurifyConfig, PurifyConfigBuilder, Shape, StopReason, TensorTotals,
    MAX_DIMENSIONS,
};
pub use error::{BufferKind, PurifyError, Status};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{CallSummary, Decomposition, DiagnosticsSink, PurifyApi, PurifyArgs, PurifyOutcome};
pub use service::{purify, purify_with, PurificationService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
