//! HTTP API handlers.
//!
//! The probe endpoints always answer 200: a failed probe is reported in the
//! body, never through the transport status.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::debug;

use crate::clock::Clock;
use crate::config::Config;
use crate::present::{classify, render_index, ApiTestResponse, HealthResponse, PageContext};
use crate::probe::Prober;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The outbound prober, built once at startup.
    pub prober: Arc<Prober>,
    /// Time source for timestamps.
    pub clock: Arc<dyn Clock>,
    /// Location label reported to callers.
    pub test_location: Arc<str>,
    /// Region label shown on the page.
    pub test_region: Arc<str>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(config: &Config, prober: Prober, clock: Arc<dyn Clock>) -> Self {
        Self {
            prober: Arc::new(prober),
            clock,
            test_location: Arc::from(config.test_location.as_str()),
            test_region: Arc::from(config.test_region.as_str()),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the metrics endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Test page handler: probe, classify and render HTML.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let result = state.prober.probe().await;
    let verdict = classify(&result);
    debug!(category = %verdict.category, "Rendering test page");

    let timestamp = state.clock.now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let test_date = state.prober.settings().formatted_test_date();

    Html(render_index(&PageContext {
        test_location: &state.test_location,
        test_region: &state.test_region,
        test_date: &test_date,
        timestamp: &timestamp,
        verdict: &verdict,
        result: &result,
    }))
}

/// JSON test handler: probe and return the raw result with context.
pub async fn api_test(State(state): State<AppState>) -> Json<ApiTestResponse> {
    let result = state.prober.probe().await;

    Json(ApiTestResponse {
        result,
        timestamp: state.clock.now().to_rfc3339(),
        test_location: state.test_location.to_string(),
        test_date: state.prober.settings().formatted_test_date(),
    })
}

/// Health check handler - always returns 200, never touches the network.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.clock.now().to_rfc3339()))
}

/// Prometheus exposition, 404 when no recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}
