//! # Integration Tests
//!
//! Exercise the public boundary and service together with the telemetry
//! recorder, the way a caller of the workspace would.

pub mod properties;
