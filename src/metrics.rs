//! Prometheus metrics for probe outcomes and latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::present::classify;
use crate::probe::ProbeResult;

/// Probe latency metric name.
pub const METRIC_PROBE_LATENCY: &str = "probe_latency_ms";
/// Probe outcomes counter metric name.
pub const METRIC_PROBE_OUTCOMES: &str = "probe_outcomes_total";

/// Install the global Prometheus recorder and register metric descriptions.
/// Call this once at startup.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_histogram!(
        METRIC_PROBE_LATENCY,
        "Outbound probe latency in milliseconds"
    );
    describe_counter!(
        METRIC_PROBE_OUTCOMES,
        "Total number of probes by outcome category"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Record latency and outcome category of a finished probe.
pub fn record_probe(result: &ProbeResult, start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_PROBE_LATENCY).record(latency_ms);

    let category = classify(result).category;
    counter!(METRIC_PROBE_OUTCOMES, "category" => category.to_string()).increment(1);
}
