//! Config redaction: produce safe-to-log config snapshots by masking secrets.

use serde_json::Value;

static SECRET_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "apikey",
    "accessToken",
    "access_token",
    "token",
    "secret",
    "password",
];

/// Redact a config JSON value, replacing sensitive fields with a short hint.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            // Preserve a length hint: first 4 chars + ***
            let hint = if s.chars().count() > 8 {
                format!("{}***", s.chars().take(4).collect::<String>())
            } else {
                "***".to_string()
            };
            Value::String(hint)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_api_key() {
        let v = json!({ "ocr": { "apiKey": "AIzaSyExampleExample" } });
        let redacted = redact(&v);
        assert_eq!(redacted["ocr"]["apiKey"], "AIza***");
    }

    #[test]
    fn short_secrets_are_fully_masked() {
        let v = json!({ "ocr": { "accessToken": "abc" } });
        assert_eq!(redact(&v)["ocr"]["accessToken"], "***");
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({ "logging": { "level": "debug" }, "server": { "port": 5000 } });
        let redacted = redact(&v);
        assert_eq!(redacted["logging"]["level"], "debug");
        assert_eq!(redacted["server"]["port"], 5000);
    }
}
