//! # Purify Telemetry
//!
//! Logging and metrics wiring for tensor purification.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter` and pretty or JSON output
//! - **Metrics**: Prometheus counters and histograms behind a `MetricsRecorder`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use purify_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let guard = init_telemetry(TelemetryConfig::from_env())?;
//! let service = PurificationService::with_parts(config, TracingDiagnostics, guard.recorder())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `purify` | Service name in logs |
//! | `PURIFY_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `PURIFY_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `PURIFY_JSON_LOGS` | `false` | JSON instead of pretty output |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, encode_registry, register_metrics, PrometheusRecorder, REGISTRY,
};

use std::sync::Arc;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and register metrics with the global registry.
///
/// Returns a guard that hands out the Prometheus recorder.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so registration errors surface before logging is global
    let recorder = register_metrics()?;
    init_logging(&config)?;

    tracing::info!(service = %config.service_name, "telemetry initialized");
    Ok(TelemetryGuard {
        recorder: Arc::new(recorder),
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    recorder: Arc<PrometheusRecorder>,
    service_name: String,
}

impl TelemetryGuard {
    /// Shared recorder to hand to a `PurificationService`.
    pub fn recorder(&self) -> Arc<PrometheusRecorder> {
        Arc::clone(&self.recorder)
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!(service = %self.service_name, "shutting down telemetry");
    }
}
