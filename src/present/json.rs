//! JSON payloads served by the API.

use serde::Serialize;

use crate::probe::ProbeResult;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "algorate-api-test";

/// Body of `GET /api/test`: the probe result plus request context.
#[derive(Debug, Serialize)]
pub struct ApiTestResponse {
    /// Flattened probe result.
    #[serde(flatten)]
    pub result: ProbeResult,
    /// When the probe ran (RFC 3339).
    pub timestamp: String,
    /// Location label.
    pub test_location: String,
    /// Meeting date queried, `DD/MM/YYYY`.
    pub test_date: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy".
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Current time (RFC 3339).
    pub timestamp: String,
}

impl HealthResponse {
    /// Liveness payload stamped with `timestamp`.
    pub fn healthy(timestamp: String) -> Self {
        Self {
            status: "healthy",
            service: SERVICE_NAME,
            timestamp,
        }
    }
}
