//! Pagecast runtime configuration schema.
//!
//! Every field is optional in the file; `defaults::apply_all_defaults` fills
//! the gaps and the accessors below read the resolved values.

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_BIND_ADDRESS, DEFAULT_GEMINI_MODEL, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT, DEFAULT_TTS_MODEL, DEFAULT_TTS_SPEED, DEFAULT_VOICE,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagecastConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// OCR engine (Google Cloud Vision) credentials
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Text-cleanup model (Gemini)
    #[serde(default)]
    pub llm: LlmConfig,

    /// Speech engine (Kokoro HTTP server)
    #[serde(default)]
    pub tts: TtsConfig,

    /// Optional stages of the extract pipeline
    #[serde(default)]
    pub features: FeaturesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// OAuth access token, used when no API key is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_voice: Option<String>,
    /// Model id sent with each speech request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Playback speed multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_on_extract: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echo_image: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved accessors
// ---------------------------------------------------------------------------

impl PagecastConfig {
    /// `host:port` for the HTTP listener.
    pub fn listen_addr(&self) -> String {
        format!(
            "{}:{}",
            self.server.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS),
            self.port()
        )
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn llm_model(&self) -> &str {
        self.llm.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    pub fn default_voice(&self) -> &str {
        self.tts.default_voice.as_deref().unwrap_or(DEFAULT_VOICE)
    }

    pub fn tts_model(&self) -> &str {
        self.tts.model.as_deref().unwrap_or(DEFAULT_TTS_MODEL)
    }

    pub fn tts_speed(&self) -> f32 {
        self.tts.speed.unwrap_or(DEFAULT_TTS_SPEED)
    }

    pub fn format_on_extract(&self) -> bool {
        self.features.format_on_extract.unwrap_or(false)
    }

    pub fn echo_image(&self) -> bool {
        self.features.echo_image.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> &str {
        self.logging.dir.as_deref().unwrap_or(DEFAULT_LOG_DIR)
    }
}
