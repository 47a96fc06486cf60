//! `${VAR}` substitution in config values and environment-variable overrides.
//!
//! Substitution only matches uppercase `[A-Z_][A-Z0-9_]*` names; `$${VAR}`
//! escapes to a literal `${VAR}`.

use std::collections::HashMap;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

use crate::schema::PagecastConfig;

/// Matches `${VAR}` and the escaped form `$${VAR}` (group 1 set).
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\$)?\{([A-Z_][A-Z0-9_]*)\}").unwrap());

#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config value tree using the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute env vars using a provided map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    Ok(substitute_value(value, env, "")?)
}

fn substitute_value(
    value: &Value,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<Value, MissingEnvVarError> {
    match value {
        Value::String(s) => substitute_string(s, env, path).map(Value::String),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(
    s: &str,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<String, MissingEnvVarError> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing = None;
    let replaced = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if caps.get(1).is_some() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    match missing {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

/// Environment variables that override file settings, applied after substitution.
pub fn apply_env_overrides(mut config: PagecastConfig, env: &HashMap<String, String>) -> PagecastConfig {
    let get = |name: &str| env.get(name).filter(|v| !v.trim().is_empty()).cloned();
    let flag = |name: &str| get(name).map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"));

    if let Some(v) = get("PAGECAST_BIND") {
        config.server.bind_address = Some(v);
    }
    if let Some(port) = get("PAGECAST_PORT").and_then(|p| p.parse().ok()) {
        config.server.port = Some(port);
    }
    if let Some(v) = get("GOOGLE_VISION_API_KEY") {
        config.ocr.api_key = Some(v);
    }
    if let Some(v) = get("GOOGLE_ACCESS_TOKEN") {
        config.ocr.access_token = Some(v);
    }
    if let Some(v) = get("GEMINI_API_KEY") {
        config.llm.api_key = Some(v);
    }
    if let Some(v) = get("GEMINI_MODEL") {
        config.llm.model = Some(v);
    }
    if let Some(v) = get("KOKORO_URL") {
        config.tts.base_url = Some(v);
    }
    if let Some(v) = flag("PAGECAST_FORMAT_ON_EXTRACT") {
        config.features.format_on_extract = Some(v);
    }
    if let Some(v) = flag("PAGECAST_ECHO_IMAGE") {
        config.features.echo_image = Some(v);
    }
    if let Some(v) = get("RUST_LOG") {
        config.logging.level = Some(v);
    }
    if let Some(v) = get("PAGECAST_LOG_DIR") {
        config.logging.dir = Some(v);
    }

    debug!("Applied environment overrides");
    config
}
