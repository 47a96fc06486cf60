//! `POST /tts`: synthesize text into a base64 WAV.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pagecast_core::PagecastError;
use pagecast_logging::{EventLogger, ServiceEvent};
use pagecast_tts::synthesize_speech;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::server::GatewayState;

const ROUTE: &str = "/tts";

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TtsResponse {
    /// Base64 of a complete 16-bit mono WAV file.
    pub audio: String,
    pub sample_rate: u32,
}

#[instrument(skip_all)]
pub async fn tts(
    State(state): State<GatewayState>,
    body: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Json<TtsResponse>, ApiError> {
    let Ok(Json(req)) = body else {
        return Err(ApiError::bad_request("No text provided"));
    };
    let text = req
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("No text provided"))?;
    let voice = req
        .voice
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| state.default_voice.clone());

    let engine = state
        .speech
        .get()
        .await
        .map_err(|e| ApiError::from_service(ROUTE, PagecastError::Synthesis(format!("{e:#}"))))?;

    let speech = synthesize_speech(engine.as_ref(), &text, &voice)
        .await
        .map_err(|e| ApiError::from_service(ROUTE, e))?;

    let audio = speech
        .to_base64_wav()
        .map_err(|e| ApiError::from_service(ROUTE, PagecastError::Synthesis(format!("{e:#}"))))?;

    EventLogger::log_event(ServiceEvent::Synthesized {
        voice,
        segments: speech.segments,
        samples: speech.samples.len(),
        sample_rate: speech.sample_rate,
    });
    Ok(Json(TtsResponse {
        audio,
        sample_rate: speech.sample_rate,
    }))
}
