use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::document::TextAnnotation;

/// An external OCR engine exposing a document-text-detection operation.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Engine name for logs (e.g., "google-vision").
    fn name(&self) -> &str;

    /// Run document text detection on raw image bytes.
    ///
    /// `Ok(None)` means the engine found no text at all.
    async fn detect_document(&self, image: &[u8]) -> Result<Option<TextAnnotation>>;
}

/// Trait for LLM providers used to clean up recognized text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}

/// One chunk of synthesized audio, mono `f32` samples in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioSegment {
    pub samples: Vec<f32>,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples }
    }
}

/// A speech-synthesis engine.
///
/// `synthesize` yields one segment per chunk of the input text, in order.
/// The stream is finite and cannot be restarted.
pub trait SpeechEngine: Send + Sync {
    fn name(&self) -> &str;

    fn synthesize<'a>(&'a self, text: &'a str, voice: &'a str) -> BoxStream<'a, Result<AudioSegment>>;
}
