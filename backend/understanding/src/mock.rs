//! In-process stand-ins for the OCR engine and LLM provider.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use pagecast_core::{
    Block, BoundingPoly, LlmProvider, LlmRequest, LlmResponse, OcrEngine, Page, Paragraph, Symbol,
    TextAnnotation, Vertex, Word,
};

/// An OCR engine that returns a canned document or a canned failure.
pub struct MockOcr {
    document: Option<TextAnnotation>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockOcr {
    pub fn with_document(document: TextAnnotation) -> Self {
        Self {
            document: Some(document),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// An engine that detects no text.
    pub fn empty() -> Self {
        Self {
            document: None,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            document: None,
            failure: Some(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEngine for MockOcr {
    fn name(&self) -> &str {
        "mock"
    }

    async fn detect_document(&self, _image: &[u8]) -> Result<Option<TextAnnotation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(self.document.clone())
    }
}

/// Build a block whose paragraphs/words/symbols spell out `text`
/// (lines become paragraphs, spaces separate words) inside a 100x20 box
/// anchored at `(offset, offset)`.
pub fn block(text: &str, offset: i32) -> Block {
    let paragraphs = text
        .split('\n')
        .map(|line| Paragraph {
            words: line
                .split(' ')
                .map(|w| Word {
                    symbols: w
                        .chars()
                        .map(|c| Symbol {
                            text: c.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Block {
        bounding_box: Some(BoundingPoly {
            vertices: vec![
                Vertex::new(offset, offset),
                Vertex::new(offset + 100, offset),
                Vertex::new(offset + 100, offset + 20),
                Vertex::new(offset, offset + 20),
            ],
        }),
        paragraphs,
    }
}

/// A block with text but only three corners.
pub fn malformed_block(text: &str) -> Block {
    let mut b = block(text, 0);
    if let Some(bbox) = b.bounding_box.as_mut() {
        bbox.vertices.truncate(3);
    }
    b
}

/// Single-page document with the given aggregate text and blocks.
pub fn document(text: &str, blocks: Vec<Block>) -> TextAnnotation {
    TextAnnotation {
        text: text.to_string(),
        pages: vec![Page {
            width: 800,
            height: 600,
            blocks,
        }],
    }
}

/// A mock LLM provider that returns canned responses.
pub struct MockProvider {
    name: String,
    fixed_response: Option<String>,
    failure: Option<String>,
    last_request: Mutex<Option<LlmRequest>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_response: None,
            failure: None,
            last_request: Mutex::new(None),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(name)
        }
    }

    pub fn last_request(&self) -> Option<LlmRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, req: &LlmRequest) -> Result<LlmResponse> {
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(req.clone());
        }
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(LlmResponse {
            content: self
                .fixed_response
                .clone()
                .unwrap_or_else(|| "Mock response".to_string()),
            provider: self.name.clone(),
            model: req.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
