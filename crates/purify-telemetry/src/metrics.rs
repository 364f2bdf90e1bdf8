//! Prometheus metrics for purification calls.
//!
//! All metrics follow the naming convention: `purify_<metric>[_<unit>]`
//!
//! - `purify_calls_total{status}`: boundary calls by returned status
//! - `purify_stops_total{reason}`: engine runs by stop reason
//! - `purify_passes`: sweeps per engine run that swept
//! - `purify_cells`: tensor size per engine run that swept

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};

use purify_core::{MetricsRecorder, PurifyError, PurifyOutcome, Status, StopReason};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();
}

/// Prometheus-backed [`MetricsRecorder`].
#[derive(Clone)]
pub struct PrometheusRecorder {
    calls: CounterVec,
    stops: CounterVec,
    passes: Histogram,
    cells: Histogram,
}

impl PrometheusRecorder {
    /// Build the collectors without registering them anywhere.
    pub fn new() -> Result<Self, TelemetryError> {
        let calls = CounterVec::new(
            Opts::new("purify_calls_total", "Purification calls by returned status"),
            &["status"], // status: success/invalid_argument/resource_exhausted
        )
        .map_err(metrics_error)?;

        let stops = CounterVec::new(
            Opts::new("purify_stops_total", "Engine runs by stop reason"),
            &["reason"], // reason: converged/plateau/pass_limit/zero_weight
        )
        .map_err(metrics_error)?;

        let passes = Histogram::with_opts(
            HistogramOpts::new("purify_passes", "Sweeps per engine run")
                .buckets(exponential_buckets(1.0, 2.0, 12).map_err(metrics_error)?),
        )
        .map_err(metrics_error)?;

        let cells = Histogram::with_opts(
            HistogramOpts::new("purify_cells", "Tensor cells per engine run")
                .buckets(exponential_buckets(1.0, 4.0, 14).map_err(metrics_error)?),
        )
        .map_err(metrics_error)?;

        Ok(Self {
            calls,
            stops,
            passes,
            cells,
        })
    }

    /// Register every collector with `registry`.
    pub fn register(&self, registry: &Registry) -> Result<(), TelemetryError> {
        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(self.calls.clone()),
            Box::new(self.stops.clone()),
            Box::new(self.passes.clone()),
            Box::new(self.cells.clone()),
        ];

        for collector in collectors {
            registry.register(collector).map_err(metrics_error)?;
        }
        Ok(())
    }
}

impl MetricsRecorder for PrometheusRecorder {
    fn record_call(&self, result: &Result<PurifyOutcome, PurifyError>, cells: usize) {
        self.calls
            .with_label_values(&[Status::of(result).as_str()])
            .inc();

        let Some(convergence) = result.as_ref().ok().and_then(PurifyOutcome::convergence) else {
            return;
        };
        self.stops
            .with_label_values(&[convergence.stop.as_str()])
            .inc();
        if convergence.stop != StopReason::ZeroWeight {
            self.passes.observe(convergence.passes as f64);
            self.cells.observe(cells as f64);
        }
    }
}

/// Register purification metrics with the global registry.
///
/// Fails when called twice in one process.
pub fn register_metrics() -> Result<PrometheusRecorder, TelemetryError> {
    let recorder = PrometheusRecorder::new()?;
    recorder.register(&REGISTRY)?;
    Ok(recorder)
}

/// Encode the global registry as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    encode_registry(&REGISTRY)
}

/// Encode any registry as Prometheus text format.
pub fn encode_registry(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(metrics_error)?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

fn metrics_error(e: prometheus::Error) -> TelemetryError {
    TelemetryError::MetricsInit(e.to_string())
}
