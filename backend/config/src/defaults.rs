//! Config defaults: applies sensible default values to parsed config.

use crate::schema::PagecastConfig;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 5000;

/// Default request body cap for uploads (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com";

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

pub const DEFAULT_KOKORO_URL: &str = "http://localhost:8880";

pub const DEFAULT_VOICE: &str = "af_heart";

pub const DEFAULT_TTS_MODEL: &str = "kokoro";

pub const DEFAULT_TTS_SPEED: f32 = 1.0;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_LOG_DIR: &str = "logs";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: PagecastConfig) -> PagecastConfig {
    let config = apply_server_defaults(config);
    let config = apply_endpoint_defaults(config);
    let config = apply_feature_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: PagecastConfig) -> PagecastConfig {
    let server = &mut config.server;
    server
        .bind_address
        .get_or_insert_with(|| DEFAULT_BIND_ADDRESS.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    config
}

fn apply_endpoint_defaults(mut config: PagecastConfig) -> PagecastConfig {
    config
        .ocr
        .endpoint
        .get_or_insert_with(|| DEFAULT_VISION_ENDPOINT.to_string());
    config
        .llm
        .endpoint
        .get_or_insert_with(|| DEFAULT_GEMINI_ENDPOINT.to_string());
    config
        .llm
        .model
        .get_or_insert_with(|| DEFAULT_GEMINI_MODEL.to_string());
    config
        .tts
        .base_url
        .get_or_insert_with(|| DEFAULT_KOKORO_URL.to_string());
    config
        .tts
        .default_voice
        .get_or_insert_with(|| DEFAULT_VOICE.to_string());
    config
        .tts
        .model
        .get_or_insert_with(|| DEFAULT_TTS_MODEL.to_string());
    config.tts.speed.get_or_insert(DEFAULT_TTS_SPEED);
    config
}

fn apply_feature_defaults(mut config: PagecastConfig) -> PagecastConfig {
    config.features.format_on_extract.get_or_insert(false);
    config.features.echo_image.get_or_insert(true);
    config
}

fn apply_logging_defaults(mut config: PagecastConfig) -> PagecastConfig {
    config
        .logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
        .logging
        .dir
        .get_or_insert_with(|| DEFAULT_LOG_DIR.to_string());
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_gap() {
        let cfg = apply_all_defaults(PagecastConfig::default());
        assert_eq!(cfg.server.port, Some(DEFAULT_PORT));
        assert_eq!(cfg.ocr.endpoint.as_deref(), Some(DEFAULT_VISION_ENDPOINT));
        assert_eq!(cfg.tts.base_url.as_deref(), Some(DEFAULT_KOKORO_URL));
        assert_eq!(cfg.tts.model.as_deref(), Some("kokoro"));
        assert_eq!(cfg.tts.speed, Some(1.0));
        assert_eq!(cfg.features.echo_image, Some(true));
        assert_eq!(cfg.logging.dir.as_deref(), Some("logs"));
    }

    #[test]
    fn keeps_explicit_values() {
        let mut cfg = PagecastConfig::default();
        cfg.server.port = Some(9000);
        cfg.features.echo_image = Some(false);
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.port(), 9000);
        assert!(!cfg.echo_image());
    }
}
