//! HTML rendering of the connectivity test page.
//!
//! The page lives in `templates/index.html`. Placeholders are written as
//! `{{name}}`; optional sections are wrapped in `{{#name}}...{{/name}}` and are
//! dropped entirely when the value is absent. Every substituted value is
//! HTML-escaped.

use crate::probe::ProbeResult;

use super::classify::Verdict;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Values substituted into the page.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    /// Location label.
    pub test_location: &'a str,
    /// Hosting region label.
    pub test_region: &'a str,
    /// Test date, `DD/MM/YYYY`.
    pub test_date: &'a str,
    /// When the probe ran, `YYYY-MM-DD HH:MM:SS UTC`.
    pub timestamp: &'a str,
    /// Classification of the result.
    pub verdict: &'a Verdict,
    /// The probe result itself.
    pub result: &'a ProbeResult,
}

/// Render the full page.
pub fn render_index(ctx: &PageContext<'_>) -> String {
    // Pretty-printing a `ProbeResult` cannot fail: every map key is a string.
    let api_response = ctx
        .result
        .succeeded()
        .then(|| serde_json::to_string_pretty(ctx.result).unwrap_or_default());
    let error_details = ctx.result.error_details();

    let mut page = INDEX_TEMPLATE.to_string();
    let category = ctx.verdict.category.to_string();
    let values = [
        ("test_location", ctx.test_location),
        ("test_region", ctx.test_region),
        ("test_date", ctx.test_date),
        ("timestamp", ctx.timestamp),
        ("status_class", ctx.verdict.category.css_class()),
        ("category", category.as_str()),
        ("status_title", ctx.verdict.title.as_str()),
        ("status_message", ctx.verdict.message.as_str()),
    ];
    for (name, value) in values {
        page = substitute(&page, name, value);
    }

    // Sections last, so dumped response bodies are never scanned for placeholders.
    page = render_section(&page, "api_response", api_response.as_deref());
    render_section(&page, "error_details", error_details)
}

/// Keep or drop the `{{#name}}...{{/name}}` section, filling `{{name}}`
/// inside it when kept.
fn render_section(template: &str, name: &str, value: Option<&str>) -> String {
    let open = format!("{{{{#{name}}}}}");
    let close = format!("{{{{/{name}}}}}");

    let (Some(start), Some(end)) = (template.find(&open), template.find(&close)) else {
        return template.to_string();
    };
    if end < start {
        return template.to_string();
    }

    let inner = skip_line_end(&template[start + open.len()..end]);
    let replacement = match value {
        Some(v) => substitute(inner, name, v),
        None => String::new(),
    };

    format!(
        "{}{}{}",
        &template[..start],
        replacement,
        skip_line_end(&template[end + close.len()..])
    )
}

/// Drop one leading `\n` or `\r\n`, so marker lines leave no blank line.
fn skip_line_end(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

fn substitute(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{{{name}}}}}"), &escape_html(value))
}

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
