//! Punting Form API connectivity probe.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Instant;

use reqwest::header::HeaderMap;
use tracing::{error, info, instrument};

use crate::config::ProbeSettings;
use crate::error::{AppError, ProbeErrorKind};
use crate::metrics;
use crate::utils::mask_secret;

use super::body::summarize;
use super::result::{ProbeFailure, ProbeResult, ProbeSuccess};

/// Path of the meetings list endpoint, appended to the API base.
pub const MEETINGS_PATH: &str = "/form/meetingslist";

/// Issues a single GET against the meetings list endpoint and records what
/// happened. One attempt, no retries.
#[derive(Debug, Clone)]
pub struct Prober {
    /// HTTP client with the probe timeout and user-agent baked in.
    http: reqwest::Client,
    /// Fixed probe parameters.
    settings: ProbeSettings,
    /// Full endpoint URL without query string.
    endpoint: String,
}

impl Prober {
    /// Build a prober and its HTTP client.
    pub fn new(settings: ProbeSettings) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()?;

        let endpoint = format!("{}{}", settings.api_base.trim_end_matches('/'), MEETINGS_PATH);

        Ok(Self {
            http,
            settings,
            endpoint,
        })
    }

    /// Endpoint URL without query string.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Probe parameters.
    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Run the probe. Never fails: transport errors become
    /// [`ProbeResult::Failure`].
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn probe(&self) -> ProbeResult {
        let test_date = self.settings.formatted_test_date();

        info!("Testing API connectivity to {}", self.endpoint);
        info!("Test date: {}", test_date);
        info!("Using API key: {}", mask_secret(&self.settings.api_key));

        let start = Instant::now();
        let result = match self.send(&test_date).await {
            Ok(success) => {
                info!("API test result: {}", success.status_code);
                ProbeResult::Success(success)
            }
            Err(err) => {
                let failure = self.describe_failure(err);
                error!("{}: {}", failure.kind.label(), failure.details);
                ProbeResult::Failure(failure)
            }
        };

        metrics::record_probe(&result, start);
        result
    }

    async fn send(&self, test_date: &str) -> Result<ProbeSuccess, reqwest::Error> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("meetingDate", test_date),
                ("apiKey", self.settings.api_key.as_str()),
            ])
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let url = response.url().to_string();
        let headers = flatten_headers(response.headers());
        let bytes = response.bytes().await?;

        Ok(ProbeSuccess {
            status_code,
            url,
            headers,
            response_size: bytes.len(),
            body: summarize(status_code, &bytes),
        })
    }

    /// The request URL carries the API key, so it is stripped from the error
    /// before anything is rendered.
    fn describe_failure(&self, err: reqwest::Error) -> ProbeFailure {
        let err = err.without_url();
        let kind = ProbeErrorKind::from_reqwest(&err);
        let details = match kind {
            ProbeErrorKind::Timeout => format!(
                "API request timed out after {} seconds",
                self.settings.timeout.as_secs()
            ),
            _ => report(&err),
        };
        ProbeFailure { kind, details }
    }
}

/// Collapse a header map into name → value, joining repeated names.
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        out.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    out
}

/// Render an error with its full source chain.
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
