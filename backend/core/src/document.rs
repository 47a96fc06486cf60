//! OCR document model and extraction result types.
//!
//! The input side mirrors the hierarchical `fullTextAnnotation` returned by a
//! document-text-detection call (page → block → paragraph → word → symbol).
//! Every field defaults, since the engine omits empty collections and zero
//! coordinates from its JSON.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Engine document
// ---------------------------------------------------------------------------

/// The engine's result for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    /// Aggregate text of the whole document, as produced by the engine.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingPoly>,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

/// One pixel-space corner of a bounding polygon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Word {
    /// Symbols concatenated with no separator.
    pub fn text(&self) -> String {
        self.symbols.iter().map(|s| s.text.as_str()).collect()
    }
}

impl Paragraph {
    /// Words joined by single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Block {
    /// Paragraphs joined by newlines, trimmed at both ends.
    ///
    /// Words are joined, not suffixed, so no space is left before a line break.
    pub fn text(&self) -> String {
        let joined = self
            .paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n");
        joined.trim().to_string()
    }

    /// The block's polygon, only when it is a well-formed quadrilateral.
    pub fn quad(&self) -> Option<&[Vertex]> {
        self.bounding_box
            .as_ref()
            .map(|b| b.vertices.as_slice())
            .filter(|v| v.len() == 4)
    }
}

// ---------------------------------------------------------------------------
// Response payload
// ---------------------------------------------------------------------------

/// A recognized text region paired with its quadrilateral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub vertices: Vec<Vertex>,
}

/// Payload returned by `/extract`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub full_text: String,
    pub blocks: Vec<TextBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word {
            symbols: s
                .chars()
                .map(|c| Symbol {
                    text: c.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn block_text_joins_words_and_paragraphs() {
        let block = Block {
            bounding_box: None,
            paragraphs: vec![
                Paragraph {
                    words: vec![word("Hello"), word("world")],
                },
                Paragraph {
                    words: vec![word("Next")],
                },
            ],
        };
        assert_eq!(block.text(), "Hello world\nNext");
        assert!(!block.text().contains(" \n"));
    }

    #[test]
    fn block_text_is_trimmed() {
        let block = Block {
            bounding_box: None,
            paragraphs: vec![Paragraph {
                words: vec![word(" "), word("x"), word(" ")],
            }],
        };
        assert_eq!(block.text(), "x");
    }

    #[test]
    fn quad_requires_four_vertices() {
        let mut block = Block::default();
        assert!(block.quad().is_none());

        block.bounding_box = Some(BoundingPoly {
            vertices: vec![Vertex::new(0, 0), Vertex::new(1, 0), Vertex::new(1, 1)],
        });
        assert!(block.quad().is_none());

        block
            .bounding_box
            .as_mut()
            .unwrap()
            .vertices
            .push(Vertex::new(0, 1));
        assert_eq!(block.quad().map(<[Vertex]>::len), Some(4));
    }

    #[test]
    fn parses_engine_json_with_omitted_zero_coordinates() {
        let raw = serde_json::json!({
            "text": "Hi\n",
            "pages": [{
                "blocks": [{
                    "boundingBox": { "vertices": [{}, {"x": 10}, {"x": 10, "y": 5}, {"y": 5}] },
                    "paragraphs": [{ "words": [{ "symbols": [{"text": "H"}, {"text": "i"}] }] }]
                }]
            }]
        });
        let doc: TextAnnotation = serde_json::from_value(raw).unwrap();
        let block = &doc.pages[0].blocks[0];
        assert_eq!(block.text(), "Hi");
        assert_eq!(block.quad().unwrap()[0], Vertex::new(0, 0));
        assert_eq!(block.quad().unwrap()[3], Vertex::new(0, 5));
    }

    #[test]
    fn image_base64_is_omitted_when_absent() {
        let result = ExtractionResult::default();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("image_base64").is_none());
        assert_eq!(json["full_text"], "");
    }
}
