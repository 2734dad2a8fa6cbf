//! Outcome of a single probe.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::ProbeErrorKind;

/// Result of one outbound request. Either the exchange completed (whatever
/// its status code) or it failed at the transport level; never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeResult {
    /// The HTTP exchange completed.
    Success(ProbeSuccess),
    /// The request failed before a response was received.
    Failure(ProbeFailure),
}

/// Fields captured from a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSuccess {
    /// HTTP status code.
    pub status_code: u16,
    /// Final resolved URL, query string included.
    pub url: String,
    /// Response headers; repeated names are joined with `", "`.
    pub headers: BTreeMap<String, String>,
    /// Body length in bytes.
    pub response_size: usize,
    /// Parsed or excerpted body.
    pub body: BodySummary,
}

/// Fields captured from a transport failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeFailure {
    /// Failure class.
    pub kind: ProbeErrorKind,
    /// Description of the underlying error.
    pub details: String,
}

/// What the prober kept of the response body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodySummary {
    /// Body parsed as JSON.
    Json {
        /// The parsed document.
        value: Value,
        /// Meeting data extracted from `payLoad`.
        meetings: Meetings,
    },
    /// Body was not JSON; at most 500 characters plus a `...` marker.
    Text(String),
}

/// Meeting data found in a parsed body.
#[derive(Debug, Clone, PartialEq)]
pub enum Meetings {
    /// `payLoad` was present and non-empty on a 200 response.
    Found {
        /// Number of entries (1 when `payLoad` is not an array).
        count: usize,
        /// First entry, `None` when `payLoad` is not an array.
        sample: Option<Value>,
    },
    /// Status was not 200 or `payLoad` was missing or empty.
    NotAvailable,
}

impl ProbeResult {
    /// Whether the exchange completed without a transport failure.
    pub fn succeeded(&self) -> bool {
        matches!(self, ProbeResult::Success(_))
    }

    /// Status code of a completed exchange.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProbeResult::Success(s) => Some(s.status_code),
            ProbeResult::Failure(_) => None,
        }
    }

    /// Failure class of a failed exchange.
    pub fn error_kind(&self) -> Option<ProbeErrorKind> {
        match self {
            ProbeResult::Success(_) => None,
            ProbeResult::Failure(f) => Some(f.kind),
        }
    }

    /// Failure details of a failed exchange.
    pub fn error_details(&self) -> Option<&str> {
        match self {
            ProbeResult::Success(_) => None,
            ProbeResult::Failure(f) => Some(&f.details),
        }
    }
}

impl Serialize for ProbeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            ProbeResult::Success(s) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("status_code", &s.status_code)?;
                map.serialize_entry("url", &s.url)?;
                map.serialize_entry("headers", &s.headers)?;
                map.serialize_entry("response_size", &s.response_size)?;
                match &s.body {
                    BodySummary::Json { value, meetings } => {
                        map.serialize_entry("json_response", value)?;
                        match meetings {
                            Meetings::Found { count, sample } => {
                                map.serialize_entry("meetings_count", count)?;
                                map.serialize_entry("sample_meeting", sample)?;
                            }
                            Meetings::NotAvailable => {
                                map.serialize_entry("meetings_count", "N/A")?;
                            }
                        }
                    }
                    BodySummary::Text(text) => {
                        map.serialize_entry("response_text", text)?;
                    }
                }
            }
            ProbeResult::Failure(f) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", f.kind.label())?;
                map.serialize_entry("error_kind", &f.kind)?;
                map.serialize_entry("details", &f.details)?;
            }
        }
        map.end()
    }
}
