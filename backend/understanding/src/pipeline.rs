//! The `/extract` pipeline: OCR, optional per-block formatting, optional image echo.

use base64::{engine::general_purpose::STANDARD, Engine};
use pagecast_core::{ExtractionResult, OcrEngine, PagecastError};
use tracing::debug;

use crate::format::TextFormatter;
use crate::ocr::extract_text;

/// Which optional stages run after OCR.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Send every block and the full text through the formatter.
    pub format_on_extract: bool,
    /// Include the uploaded image as base64 in the result.
    pub echo_image: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            format_on_extract: false,
            echo_image: true,
        }
    }
}

pub async fn extract_document(
    engine: &dyn OcrEngine,
    formatter: Option<&TextFormatter>,
    image: &[u8],
    options: ExtractOptions,
) -> Result<ExtractionResult, PagecastError> {
    let mut result = extract_text(engine, image).await?;

    if let (true, Some(formatter)) = (options.format_on_extract, formatter) {
        debug!(blocks = result.blocks.len(), "Formatting extracted blocks");
        for block in &mut result.blocks {
            block.text = formatter.format_text_or_original(&block.text).await;
        }
        if !result.full_text.is_empty() {
            result.full_text = formatter.format_text_or_original(&result.full_text).await;
        }
    }

    if options.echo_image {
        result.image_base64 = Some(STANDARD.encode(image));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::mock::{MockOcr, MockProvider, block, document};

    fn engine() -> MockOcr {
        MockOcr::with_document(document("one\ntwo", vec![block("one", 0), block("two", 30)]))
    }

    #[tokio::test]
    async fn echoes_image_by_default() {
        let result = extract_document(&engine(), None, b"img", ExtractOptions::default())
            .await
            .unwrap();
        assert_eq!(result.image_base64.as_deref(), Some("aW1n"));
        assert_eq!(result.blocks.len(), 2);
    }

    #[tokio::test]
    async fn formats_blocks_and_full_text_when_enabled() {
        let formatter = TextFormatter::new(Arc::new(MockProvider::new("mock").with_response("clean")));
        let options = ExtractOptions {
            format_on_extract: true,
            echo_image: false,
        };
        let result = extract_document(&engine(), Some(&formatter), b"img", options)
            .await
            .unwrap();
        assert_eq!(result.full_text, "clean");
        assert!(result.blocks.iter().all(|b| b.text == "clean"));
        assert!(result.image_base64.is_none());
    }

    #[tokio::test]
    async fn formatting_failure_keeps_ocr_text() {
        let formatter = TextFormatter::new(Arc::new(MockProvider::failing("mock", "down")));
        let options = ExtractOptions {
            format_on_extract: true,
            echo_image: true,
        };
        let result = extract_document(&engine(), Some(&formatter), b"img", options)
            .await
            .unwrap();
        assert_eq!(result.full_text, "one\ntwo");
        assert_eq!(result.blocks[1].text, "two");
    }

    #[tokio::test]
    async fn ocr_failure_returns_no_partial_result() {
        let err = extract_document(&MockOcr::failing("boom"), None, b"img", ExtractOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error extracting text: boom");
    }
}
