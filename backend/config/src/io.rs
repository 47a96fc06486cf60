//! Config file loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

/// Default config file, relative to the working directory.
const CONFIG_FILE_NAME: &str = "pagecast.yaml";

/// Resolve the config file path.
/// Priority: `PAGECAST_CONFIG` env > `./pagecast.yaml`
pub fn config_file_path() -> PathBuf {
    std::env::var("PAGECAST_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE_NAME))
}

/// Read the config file as a raw value tree (before substitution).
///
/// Returns an empty object if the file doesn't exist.
pub async fn load_raw(path: &Path) -> Result<Value> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value = parse_yaml(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(value)
}

/// Parse YAML text into a JSON value tree. An empty document is an empty object.
pub fn parse_yaml(raw: &str) -> Result<Value> {
    let value: Value = serde_yaml::from_str(raw)?;
    Ok(match value {
        Value::Null => Value::Object(Default::default()),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_empty_object() {
        assert_eq!(parse_yaml("").unwrap(), serde_json::json!({}));
    }

    #[test]
    fn parses_nested_yaml() {
        let v = parse_yaml("tts:\n  baseUrl: http://kokoro:8880\n").unwrap();
        assert_eq!(v["tts"]["baseUrl"], "http://kokoro:8880");
    }

    #[tokio::test]
    async fn missing_file_is_empty_object() {
        let v = load_raw(Path::new("/nonexistent/pagecast.yaml")).await.unwrap();
        assert_eq!(v, serde_json::json!({}));
    }
}
