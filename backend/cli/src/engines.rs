//! Engine construction from the resolved config.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use pagecast_config::PagecastConfig;
use pagecast_core::{OcrEngine, SpeechEngine, TextAnnotation};
use pagecast_gateway::GatewayState;
use pagecast_tts::{KokoroTts, LazySpeechEngine};
use pagecast_understanding::{
    ExtractOptions, GeminiProvider, GoogleVisionOcr, TextFormatter, VisionCredential,
};
use tracing::{info, warn};

/// Stands in for the Vision client when no credential is configured, so the
/// server still starts and `/extract` reports the problem per request.
struct UnconfiguredOcr;

#[async_trait]
impl OcrEngine for UnconfiguredOcr {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn detect_document(&self, _image: &[u8]) -> Result<Option<TextAnnotation>> {
        anyhow::bail!("no Google Vision credential configured (set GOOGLE_VISION_API_KEY or GOOGLE_ACCESS_TOKEN)")
    }
}

/// API key wins over access token.
pub fn vision_credential(config: &PagecastConfig) -> Option<VisionCredential> {
    let non_empty = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
    non_empty(&config.ocr.api_key)
        .map(VisionCredential::ApiKey)
        .or_else(|| non_empty(&config.ocr.access_token).map(VisionCredential::AccessToken))
}

pub fn build_ocr(config: &PagecastConfig) -> Arc<dyn OcrEngine> {
    match vision_credential(config) {
        Some(credential) => {
            let mut ocr = GoogleVisionOcr::new(credential);
            if let Some(endpoint) = &config.ocr.endpoint {
                ocr = ocr.with_endpoint(endpoint);
            }
            info!("Registered Google Vision OCR engine");
            Arc::new(ocr)
        }
        None => {
            warn!("No OCR credential configured; /extract will fail until one is set");
            Arc::new(UnconfiguredOcr)
        }
    }
}

/// `None` when no Gemini key is configured.
pub fn build_formatter(config: &PagecastConfig) -> Option<TextFormatter> {
    let api_key = config.llm.api_key.as_deref().filter(|k| !k.is_empty())?;
    let mut provider = GeminiProvider::new(api_key);
    if let Some(endpoint) = &config.llm.endpoint {
        provider = provider.with_base_url(endpoint);
    }
    info!(model = config.llm_model(), "Registered Gemini formatter");
    Some(TextFormatter::new(Arc::new(provider)).with_model(config.llm_model()))
}

/// The Kokoro client described by the config, not yet connected.
pub fn kokoro_engine(config: &PagecastConfig) -> KokoroTts {
    let base_url = config
        .tts
        .base_url
        .as_deref()
        .unwrap_or(pagecast_tts::engine::DEFAULT_KOKORO_URL);
    KokoroTts::new(base_url)
        .with_model(config.tts_model())
        .with_speed(config.tts_speed())
}

/// A speech handle that connects to Kokoro on first use.
pub fn build_speech(config: &PagecastConfig) -> LazySpeechEngine {
    let config = config.clone();
    LazySpeechEngine::new(move || {
        let engine = kokoro_engine(&config);
        async move {
            let engine = engine.connect().await?;
            Ok::<_, anyhow::Error>(Arc::new(engine) as Arc<dyn SpeechEngine>)
        }
    })
}

pub fn extract_options(config: &PagecastConfig) -> ExtractOptions {
    ExtractOptions {
        format_on_extract: config.format_on_extract(),
        echo_image: config.echo_image(),
    }
}

pub fn gateway_state(config: &PagecastConfig) -> GatewayState {
    GatewayState {
        ocr: build_ocr(config),
        formatter: build_formatter(config),
        speech: Arc::new(build_speech(config)),
        options: extract_options(config),
        default_voice: config.default_voice().to_string(),
    }
}
