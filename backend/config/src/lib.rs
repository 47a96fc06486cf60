//! `pagecast-config` — runtime configuration for the Pagecast service.
//!
//! Provides:
//! - Typed config schema (server, OCR, LLM, TTS, features, logging)
//! - YAML loading
//! - `${ENV_VAR}` substitution and environment overrides
//! - Default value application
//! - Validation
//! - Redaction for safe logging

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_file_path, load_raw};
pub use redact::redact;
pub use schema::PagecastConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

/// Load, substitute env vars, apply overrides and defaults, and validate.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<PagecastConfig> {
    let raw = load_raw(path).await?;
    prepare(raw, &std::env::vars().collect())
}

/// The processing half of [`load_and_prepare`], over an explicit environment.
pub fn prepare(raw: Value, env: &HashMap<String, String>) -> Result<PagecastConfig> {
    let value = resolve_env_vars_with(&raw, env).context("Failed to resolve env vars in config")?;

    let config: PagecastConfig =
        serde_json::from_value(value).context("Failed to deserialize config")?;

    let config = apply_all_defaults(apply_env_overrides(config, env));

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        bail!("{}", report.errors[0]);
    }

    Ok(config)
}
