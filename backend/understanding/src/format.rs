//! LLM cleanup of OCR output.
//!
//! Formatting is an enhancement: `format_text` reports failures as errors and
//! callers choose the original text as the fallback value.

use std::sync::Arc;

use pagecast_core::{LlmProvider, LlmRequest, PagecastError};
use tracing::{debug, warn};

pub const DEFAULT_FORMAT_MODEL: &str = "gemini-2.5-flash-lite";

const MAX_OUTPUT_TOKENS: u32 = 8192;

fn build_prompt(raw_text: &str) -> String {
    format!(
        "You are a text formatting expert. Please take the following OCR-extracted text and:

1. Correct any OCR inaccuracies or misspellings
2. Remove hyphens that result from words being split across lines (e.g., \"hap-pened\" -> \"happened\")
3. Add paragraph breaks where appropriate for readability and logical grouping
4. Bold section titles or headings using **text** format
5. Preserve the overall structure and meaning of the original text

Original OCR text:
{raw_text}

Please provide the corrected, formatted text only. Do not add any explanations or metadata."
    )
}

/// Sends OCR text through an LLM provider for correction and layout.
#[derive(Clone)]
pub struct TextFormatter {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl TextFormatter {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_FORMAT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Correct and format `raw_text`. The reply is trimmed and otherwise trusted.
    pub async fn format_text(&self, raw_text: &str) -> Result<String, PagecastError> {
        let request = LlmRequest {
            model: self.model.clone(),
            system_prompt: String::new(),
            user_prompt: build_prompt(raw_text),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: 0.2,
        };

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| PagecastError::Formatting(format!("{e:#}")))?;

        let formatted = response.content.trim();
        if formatted.is_empty() {
            return Err(PagecastError::Formatting(format!(
                "{} returned an empty reply",
                self.provider.name()
            )));
        }

        debug!(
            provider = %response.provider,
            model = %response.model,
            tokens = response.tokens_used,
            latency_ms = response.latency_ms,
            "Formatted text"
        );
        Ok(formatted.to_string())
    }

    /// Like [`format_text`](Self::format_text), but any failure yields `raw_text`.
    pub async fn format_text_or_original(&self, raw_text: &str) -> String {
        match self.format_text(raw_text).await {
            Ok(formatted) => formatted,
            Err(e) => {
                warn!(error = %e, "Formatting failed; keeping original text");
                raw_text.to_string()
            }
        }
    }
}
