//! Adapters Layer - implementations of the outbound diagnostics port

pub mod recording;
pub mod tracing_diagnostics;

pub use recording::{DiagnosticEvent, RecordingDiagnostics};
pub use tracing_diagnostics::{NoOpDiagnostics, TracingDiagnostics};
