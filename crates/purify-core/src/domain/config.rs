//! Purification configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use purify_core::domain::PurifyConfigBuilder;
//!
//! let config = PurifyConfigBuilder::new()
//!     .tolerance(1e-6)
//!     .max_passes(500)
//!     .build()
//!     .expect("Valid config");
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use super::engine::EngineLimits;
use crate::error::PurifyError;

/// Purification configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurifyConfig {
    /// Convergence slack as a fraction of mean absolute weighted score
    pub tolerance: f64,
    /// Optional cap on full sweeps; `None` runs until converged or plateau
    pub max_passes: Option<usize>,
    /// Whether to pull the global weighted mean out as an intercept
    pub extract_intercept: bool,
}

impl Default for PurifyConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.0,
            max_passes: None,
            extract_intercept: true,
        }
    }
}

impl PurifyConfig {
    /// Create a new configuration with validation
    pub fn new(
        tolerance: f64,
        max_passes: Option<usize>,
        extract_intercept: bool,
    ) -> Result<Self, PurifyError> {
        let config = Self {
            tolerance,
            max_passes,
            extract_intercept,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from the environment.
    ///
    /// - `PURIFY_TOLERANCE` (default: 0.0)
    /// - `PURIFY_MAX_PASSES` (default: unlimited)
    /// - `PURIFY_EXTRACT_INTERCEPT` (default: true)
    ///
    /// Unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tolerance: env::var("PURIFY_TOLERANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tolerance),

            max_passes: env::var("PURIFY_MAX_PASSES")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(defaults.max_passes),

            extract_intercept: env::var("PURIFY_EXTRACT_INTERCEPT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.extract_intercept),
        }
    }

    /// Validate ranges
    pub fn validate(&self) -> Result<(), PurifyError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(PurifyError::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }

        if self.max_passes == Some(0) {
            return Err(PurifyError::InvalidConfig(
                "max_passes cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Engine limits derived from this configuration.
    pub fn limits(&self) -> EngineLimits {
        EngineLimits {
            max_passes: self.max_passes,
        }
    }

    /// Builder-style method to set the tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder-style method to set the pass cap
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }
}

/// Builder for PurifyConfig with validation
#[derive(Default)]
pub struct PurifyConfigBuilder {
    tolerance: Option<f64>,
    max_passes: Option<usize>,
    extract_intercept: Option<bool>,
}

impl PurifyConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the convergence tolerance (finite, non-negative)
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Cap the number of full sweeps
    pub fn max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes);
        self
    }

    /// Toggle intercept extraction
    pub fn extract_intercept(mut self, extract: bool) -> Self {
        self.extract_intercept = Some(extract);
        self
    }

    /// Build the PurifyConfig, validating all parameters
    pub fn build(self) -> Result<PurifyConfig, PurifyError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> PurifyConfig {
        let defaults = PurifyConfig::default();

        PurifyConfig {
            tolerance: self.tolerance.unwrap_or(defaults.tolerance),
            max_passes: self.max_passes.or(defaults.max_passes),
            extract_intercept: self.extract_intercept.unwrap_or(defaults.extract_intercept),
        }
    }
}
