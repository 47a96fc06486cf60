//! Config validation: deep schema checks with user-friendly error messages.

use crate::schema::PagecastConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &PagecastConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_ocr(config, &mut report);
    validate_llm(config, &mut report);
    validate_tts(config, &mut report);
    report
}

fn check_url(report: &mut ValidationReport, path: &str, url: Option<&str>) {
    if let Some(url) = url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error(path, format!("'{url}' must start with http:// or https://"));
        }
    }
}

fn validate_server(config: &PagecastConfig, report: &mut ValidationReport) {
    if config.server.port == Some(0) {
        report.error("server.port", "port must be between 1 and 65535");
    }
    if config.server.max_upload_bytes == Some(0) {
        report.error("server.maxUploadBytes", "maxUploadBytes must be >= 1");
    }
}

fn validate_ocr(config: &PagecastConfig, report: &mut ValidationReport) {
    check_url(report, "ocr.endpoint", config.ocr.endpoint.as_deref());
    if config.ocr.api_key.is_none() && config.ocr.access_token.is_none() {
        report.warn("ocr", "No OCR credential configured; /extract requests will fail");
    }
}

fn validate_llm(config: &PagecastConfig, report: &mut ValidationReport) {
    check_url(report, "llm.endpoint", config.llm.endpoint.as_deref());
    if let Some(model) = &config.llm.model {
        if model.trim().is_empty() {
            report.error("llm.model", "Model id cannot be empty");
        }
    }
    if config.llm.api_key.is_none() {
        report.warn("llm.apiKey", "No LLM API key; text formatting returns input unchanged");
    }
}

fn validate_tts(config: &PagecastConfig, report: &mut ValidationReport) {
    check_url(report, "tts.baseUrl", config.tts.base_url.as_deref());
    if let Some(voice) = &config.tts.default_voice {
        if voice.trim().is_empty() {
            report.error("tts.defaultVoice", "Default voice cannot be empty");
        }
    }
    if let Some(model) = &config.tts.model {
        if model.trim().is_empty() {
            report.error("tts.model", "Model id cannot be empty");
        }
    }
    if let Some(speed) = config.tts.speed {
        if !(speed.is_finite() && speed > 0.0) {
            report.error("tts.speed", format!("speed must be a positive number, got {speed}"));
        }
    }
}
