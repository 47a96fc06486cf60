/// Kokoro speech engine reached over its OpenAI-compatible HTTP API.
use anyhow::{Context, Result};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use pagecast_core::{AudioSegment, SpeechEngine};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

pub const DEFAULT_KOKORO_URL: &str = "http://localhost:8880";

pub struct KokoroTts {
    client: Client,
    base_url: String,
    model: String,
    speed: f32,
}

impl KokoroTts {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: "kokoro".to_string(),
            speed: 1.0,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Check that the server answers before handing the engine out.
    pub async fn connect(self) -> Result<Self> {
        self.client
            .get(format!("{}/v1/audio/voices", self.base_url))
            .send()
            .await
            .with_context(|| format!("Kokoro server unreachable at {}", self.base_url))?
            .error_for_status()
            .context("Kokoro server rejected voice listing")?;
        info!(url = %self.base_url, model = %self.model, speed = self.speed, "[TTS/Kokoro] Engine ready");
        Ok(self)
    }

    async fn synthesize_chunk(&self, chunk: &str, voice: &str) -> Result<AudioSegment> {
        let body = SpeechBody {
            model: &self.model,
            input: chunk,
            voice,
            response_format: "pcm",
            speed: self.speed,
        };
        debug!(voice, chars = chunk.len(), "[TTS/Kokoro] Synthesizing chunk");
        let pcm = self
            .client
            .post(format!("{}/v1/audio/speech", self.base_url))
            .json(&body)
            .send()
            .await
            .context("Kokoro speech request failed")?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(AudioSegment::new(pcm16_to_f32(&pcm)))
    }
}

#[derive(Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    speed: f32,
}

/// Split text the way the synthesis pipeline chunks it: on runs of newlines,
/// skipping blank pieces.
pub fn split_chunks(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

/// Decode 16-bit little-endian mono PCM into `[-1.0, 1.0]` floats.
/// A trailing odd byte is ignored.
pub fn pcm16_to_f32(pcm: &[u8]) -> Vec<f32> {
    pcm.chunks_exact(2)
        .map(|b| f32::from(i16::from_le_bytes([b[0], b[1]])) / 32768.0)
        .collect()
}

impl SpeechEngine for KokoroTts {
    fn name(&self) -> &str {
        "kokoro"
    }

    fn synthesize<'a>(&'a self, text: &'a str, voice: &'a str) -> BoxStream<'a, Result<AudioSegment>> {
        stream::iter(split_chunks(text))
            .then(move |chunk| self.synthesize_chunk(chunk, voice))
            .boxed()
    }
}
