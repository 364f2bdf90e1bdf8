//! Domain Layer - pure numerics
//!
//! This layer contains:
//! - The mixed-radix shape and line codec
//! - The purification engine
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No allocation on the purification path

pub mod config;
pub mod engine;
pub mod shape;

pub use config::{PurifyConfig, PurifyConfigBuilder};
pub use engine::{Convergence, EngineLimits, StopReason, TensorTotals};
pub(crate) use engine::purify_tensor;
pub use shape::{Line, Lines, Shape, MAX_DIMENSIONS};
