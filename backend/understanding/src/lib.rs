//! Document understanding for Pagecast: OCR extraction and LLM text cleanup.

pub mod format;
pub mod gemini;
pub mod mock;
pub mod ocr;
pub mod pipeline;

pub use format::{TextFormatter, DEFAULT_FORMAT_MODEL};
pub use gemini::GeminiProvider;
pub use ocr::{collect_blocks, extract_text, GoogleVisionOcr, VisionCredential};
pub use pipeline::{extract_document, ExtractOptions};
