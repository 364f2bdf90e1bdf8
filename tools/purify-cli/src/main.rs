//! purify-cli: split a weighted score tensor into intercept, marginals and
//! pure interaction residual.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use purify_cli::{read_input, run, Overrides};
use purify_core::{PurificationService, PurifyConfig, TracingDiagnostics};
use purify_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};

/// Purify a weighted score tensor read from JSON
#[derive(Parser, Debug)]
#[command(name = "purify-cli")]
#[command(about = "Decompose a tensor into intercept, marginals and pure interaction residual")]
struct Args {
    /// Input document, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Convergence tolerance (overrides PURIFY_TOLERANCE)
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Cap on full sweeps (overrides PURIFY_MAX_PASSES)
    #[arg(long)]
    max_passes: Option<usize>,

    /// Leave the global mean inside the marginals
    #[arg(long)]
    no_intercept: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Pretty-print the output document
    #[arg(long)]
    pretty: bool,

    /// Print Prometheus metrics to stderr after the run
    #[arg(long)]
    metrics: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let telemetry = TelemetryConfig::from_env();
    let json_logs = args.json_logs || telemetry.json_logs;
    let guard = init_telemetry(telemetry.with_json_logs(json_logs))
        .context("failed to initialize telemetry")?;

    let overrides = Overrides {
        tolerance: args.tolerance,
        max_passes: args.max_passes,
        no_intercept: args.no_intercept,
    };
    let config = overrides.apply(PurifyConfig::from_env());
    let service = PurificationService::with_parts(config, TracingDiagnostics, guard.recorder())
        .context("invalid purification settings")?;

    let input = read_input(&args.input)?;
    let output = run(&service, &input)?;
    purify_telemetry::log_event!(
        info,
        "cli",
        "purification finished",
        stop = ?output.stop,
        passes = output.passes
    );

    let document = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{document}");

    if args.metrics {
        eprint!("{}", encode_metrics()?);
    }
    Ok(())
}
