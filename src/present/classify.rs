//! Status classification of a probe result.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::probe::ProbeResult;

/// Outcome category shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
    /// Connectivity and API both working.
    Success,
    /// 403: most likely a geo-restriction on the hosting region.
    Blocked,
    /// 401: connectivity is fine, the credential is not.
    AuthError,
    /// Any other status: connectivity is fine, the API is unhappy.
    ApiError,
    /// Transport-level failure.
    ConnectionFailed,
}

impl Category {
    /// CSS class of the status box.
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Success => "success",
            _ => "error",
        }
    }
}

/// Category plus the human-readable title and message for a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Outcome category.
    pub category: Category,
    /// Short headline.
    pub title: String,
    /// One-sentence explanation.
    pub message: String,
}

/// Map a probe result onto a [`Verdict`].
pub fn classify(result: &ProbeResult) -> Verdict {
    match result {
        ProbeResult::Success(s) => match s.status_code {
            200 => Verdict {
                category: Category::Success,
                title: "✅ API Connectivity SUCCESS".to_string(),
                message: format!(
                    "Successfully connected to Punting Form API! Status: {}",
                    s.status_code
                ),
            },
            403 => Verdict {
                category: Category::Blocked,
                title: "🚫 GEO-BLOCKED".to_string(),
                message: "API returned 403 Forbidden - likely geo-blocked. \
                          This region cannot reach the API; migrate hosting to an allowed region."
                    .to_string(),
            },
            401 => Verdict {
                category: Category::AuthError,
                title: "🔑 AUTHENTICATION ERROR".to_string(),
                message: "API returned 401 Unauthorized - API key issue, but connectivity works!"
                    .to_string(),
            },
            code => Verdict {
                category: Category::ApiError,
                title: format!("⚠️ API ERROR ({code})"),
                message: format!("API returned status {code} - connectivity works but API issue"),
            },
        },
        ProbeResult::Failure(f) => Verdict {
            category: Category::ConnectionFailed,
            title: "❌ CONNECTION FAILED".to_string(),
            message: format!("Failed to connect to API: {} ({})", f.kind.label(), f.kind),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeErrorKind;
    use crate::probe::{BodySummary, ProbeFailure, ProbeSuccess};
    use std::collections::BTreeMap;

    fn with_status(status_code: u16) -> ProbeResult {
        ProbeResult::Success(ProbeSuccess {
            status_code,
            url: "http://localhost/form/meetingslist".to_string(),
            headers: BTreeMap::new(),
            response_size: 0,
            body: BodySummary::Text(String::new()),
        })
    }

    #[test]
    fn ok_is_success() {
        let verdict = classify(&with_status(200));
        assert_eq!(verdict.category, Category::Success);
        assert_eq!(verdict.category.css_class(), "success");
    }

    #[test]
    fn forbidden_is_blocked() {
        let verdict = classify(&with_status(403));
        assert_eq!(verdict.category, Category::Blocked);
        assert!(verdict.message.contains("geo-blocked"));
        assert_eq!(verdict.category.css_class(), "error");
    }

    #[test]
    fn unauthorized_is_auth_error() {
        assert_eq!(classify(&with_status(401)).category, Category::AuthError);
    }

    #[test]
    fn other_statuses_are_api_errors() {
        for code in [201, 404, 429, 500, 503] {
            let verdict = classify(&with_status(code));
            assert_eq!(verdict.category, Category::ApiError);
            assert!(verdict.title.contains(&code.to_string()));
        }
    }

    #[test]
    fn failure_message_names_error_kind() {
        let result = ProbeResult::Failure(ProbeFailure {
            kind: ProbeErrorKind::Timeout,
            details: "API request timed out after 10 seconds".to_string(),
        });
        let verdict = classify(&result);
        assert_eq!(verdict.category, Category::ConnectionFailed);
        assert!(verdict.message.contains("timeout"));
    }

    #[test]
    fn category_display_is_kebab_case() {
        assert_eq!(Category::AuthError.to_string(), "auth-error");
        assert_eq!(Category::ConnectionFailed.to_string(), "connection-failed");
    }
}
