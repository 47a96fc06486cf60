pub mod document;
pub mod error;
pub mod traits;

pub use document::{
    Block, BoundingPoly, ExtractionResult, Page, Paragraph, Symbol, TextAnnotation, TextBlock,
    Vertex, Word,
};
pub use error::PagecastError;
pub use traits::{AudioSegment, LlmProvider, LlmRequest, LlmResponse, OcrEngine, SpeechEngine};
