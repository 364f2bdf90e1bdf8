//! Service Layer
//!
//! The validating call boundary and the service that binds it to
//! configuration, diagnostics and metrics.

pub mod boundary;
pub mod purification_service;

pub use boundary::{purify, purify_with};
pub use purification_service::PurificationService;
