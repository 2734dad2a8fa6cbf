//! Unified error types for the connectivity test service.
//!
//! Probe failures are not errors at this level: they are captured as
//! [`ProbeErrorKind`] data inside a [`ProbeResult`](crate::probe::ProbeResult)
//! and rendered to the caller. [`AppError`] only covers startup and CLI paths.

use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;

/// Unified error type for startup, configuration and CLI commands.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client could not be built.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transport-level failure classes for a probe. All are terminal; there is no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProbeErrorKind {
    /// The request did not complete within the configured timeout.
    Timeout,
    /// Connect failure (DNS, TCP, TLS) or the connection broke before a
    /// well-formed response arrived: peer closed early, malformed status
    /// line, body cut off.
    ConnectionError,
    /// Anything else the client reported: redirect, builder or decode errors.
    UnexpectedError,
}

impl ProbeErrorKind {
    /// Human-readable label used in the `error` field of the JSON payload.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeErrorKind::Timeout => "Request timeout",
            ProbeErrorKind::ConnectionError => "Connection error",
            ProbeErrorKind::UnexpectedError => "Unexpected error",
        }
    }

    /// Classify a `reqwest` failure.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeErrorKind::Timeout
        } else if err.is_connect() || err.is_request() || err.is_body() {
            ProbeErrorKind::ConnectionError
        } else {
            ProbeErrorKind::UnexpectedError
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
