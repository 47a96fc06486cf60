//! Log Redaction Layer
//!
//! Scrubs Google API keys, `key=` query parameters and bearer tokens from
//! strings (typically upstream error bodies) before they are logged or returned.

use regex::Regex;
use std::sync::LazyLock;

static GOOGLE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AIza[0-9A-Za-z\-_]{35}").unwrap());
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&]key=)[^&\s]+").unwrap());
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = GOOGLE_KEY_RE.replace_all(input, "[REDACTED_KEY]");
    let redacted = KEY_PARAM_RE.replace_all(&redacted, "${1}[REDACTED_KEY]");
    BEARER_RE
        .replace_all(&redacted, "Bearer [REDACTED_TOKEN]")
        .into_owned()
}
