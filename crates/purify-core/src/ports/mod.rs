//! Ports Layer - trait seams of the purification subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::{CallSummary, Decomposition, PurifyApi, PurifyArgs, PurifyOutcome};
pub use outbound::DiagnosticsSink;
