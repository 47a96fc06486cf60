//! Optical Character Recognition (OCR)
//!
//! Sends images to the Google Cloud Vision document-text-detection endpoint and
//! rebuilds per-block text and quadrilaterals from the returned document tree.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use pagecast_core::{ExtractionResult, OcrEngine, PagecastError, TextAnnotation, TextBlock};
use pagecast_logging::redact_sensitive_data;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com";

/// How requests to the Vision API are authenticated.
#[derive(Debug, Clone)]
pub enum VisionCredential {
    /// Sent as the `x-goog-api-key` header.
    ApiKey(String),
    /// OAuth2 access token, sent as a bearer token.
    AccessToken(String),
}

/// Google Cloud Vision client.
pub struct GoogleVisionOcr {
    client: Client,
    credential: VisionCredential,
    endpoint: String,
}

impl GoogleVisionOcr {
    pub fn new(credential: VisionCredential) -> Self {
        Self {
            client: Client::new(),
            credential,
            endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: [AnnotateImageRequest<'a>; 1],
}

#[derive(Serialize)]
struct AnnotateImageRequest<'a> {
    image: ImageContent,
    features: [Feature<'a>; 1],
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    full_text_annotation: Option<TextAnnotation>,
    #[serde(default)]
    error: Option<RpcStatus>,
}

#[derive(Debug, Deserialize)]
struct RpcStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Pull the single image result out of a batch response.
fn into_annotation(resp: AnnotateResponse) -> Result<Option<TextAnnotation>> {
    let Some(first) = resp.responses.into_iter().next() else {
        return Ok(None);
    };
    if let Some(status) = first.error {
        bail!("Vision API error {}: {}", status.code, status.message);
    }
    Ok(first.full_text_annotation)
}

#[async_trait]
impl OcrEngine for GoogleVisionOcr {
    fn name(&self) -> &str {
        "google-vision"
    }

    async fn detect_document(&self, image: &[u8]) -> Result<Option<TextAnnotation>> {
        let body = AnnotateRequest {
            requests: [AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: [Feature {
                    kind: "DOCUMENT_TEXT_DETECTION",
                }],
            }],
        };

        let url = format!("{}/v1/images:annotate", self.endpoint);
        info!("[OCR] Document text detection on {} bytes", image.len());

        let req = self.client.post(&url).json(&body);
        let req = match &self.credential {
            VisionCredential::ApiKey(key) => req.header("x-goog-api-key", key),
            VisionCredential::AccessToken(token) => req.bearer_auth(token),
        };
        let resp = req.send().await.context("Vision API request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("Vision API error {status}: {}", redact_sensitive_data(&body));
        }

        let parsed: AnnotateResponse = resp
            .json()
            .await
            .context("Failed to decode Vision API response")?;
        into_annotation(parsed)
    }
}

/// Walk the document tree and emit every block that has a four-vertex box
/// and non-empty text, in traversal order.
pub fn collect_blocks(document: &TextAnnotation) -> Vec<TextBlock> {
    let mut dropped = 0usize;
    let blocks: Vec<TextBlock> = document
        .pages
        .iter()
        .flat_map(|page| page.blocks.iter())
        .filter_map(|block| {
            let kept = block.quad().and_then(|quad| {
                let text = block.text();
                (!text.is_empty()).then(|| TextBlock {
                    text,
                    vertices: quad.to_vec(),
                })
            });
            if kept.is_none() {
                dropped += 1;
            }
            kept
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, kept = blocks.len(), "Skipped blocks without a quad or text");
    }
    blocks
}

/// Run one document-text-detection call and shape the result.
///
/// Fails as a whole: any engine error becomes [`PagecastError::Extraction`].
pub async fn extract_text(
    engine: &dyn OcrEngine,
    image: &[u8],
) -> Result<ExtractionResult, PagecastError> {
    let document = engine
        .detect_document(image)
        .await
        .map_err(|e| PagecastError::Extraction(format!("{e:#}")))?;

    let Some(document) = document else {
        info!(engine = engine.name(), "No text detected");
        return Ok(ExtractionResult::default());
    };

    let blocks = collect_blocks(&document);
    info!(
        engine = engine.name(),
        blocks = blocks.len(),
        chars = document.text.len(),
        "Extracted document text"
    );

    Ok(ExtractionResult {
        full_text: document.text,
        blocks,
        image_base64: None,
    })
}
