//! Page-level types: the positioned text fragments handed over by the
//! upstream text-extraction facility.

use super::BBox;
use serde::{Deserialize, Serialize};

/// The smallest styled text run with its own font, size, and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,

    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font: String,

    /// Font size in points
    #[serde(default)]
    pub size: f32,

    /// Position on the page
    #[serde(default)]
    pub bbox: BBox,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: f32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
            bbox,
        }
    }

    /// Whether the font appears to be bold.
    pub fn is_bold(&self) -> bool {
        self.font.to_lowercase().contains("bold")
    }

    /// Whether the span carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Span text with NUL placeholders turned into spaces.
    pub fn clean_text(&self) -> String {
        self.text.replace('\0', " ")
    }
}

/// A raw text line as grouped by the extraction facility.
///
/// One visual line may arrive split over several raw lines; the
/// normalizer in [`crate::parser`] merges them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    /// Spans in reading order
    #[serde(default)]
    pub spans: Vec<Span>,

    /// Line position
    #[serde(default)]
    pub bbox: BBox,
}

impl RawLine {
    /// Create a raw line whose box is the union of its spans' boxes.
    pub fn new(spans: Vec<Span>) -> Self {
        let bbox = spans
            .iter()
            .map(|s| s.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self { spans, bbox }
    }

    /// Create a raw line with an explicit box.
    pub fn with_bbox(spans: Vec<Span>, bbox: BBox) -> Self {
        Self { spans, bbox }
    }

    /// Joined span text, right-trimmed.
    pub fn text(&self) -> String {
        join_span_text(&self.spans)
    }

    /// Font size of the first span, if any.
    pub fn first_size(&self) -> Option<f32> {
        self.spans.first().map(|s| s.size)
    }

    /// Whether every span is blank (or there are none).
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(Span::is_blank)
    }
}

/// Join span texts with single spaces and trim the right end.
pub(crate) fn join_span_text(spans: &[Span]) -> String {
    spans
        .iter()
        .map(Span::clean_text)
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// A text frame on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Frame position
    #[serde(default)]
    pub bbox: BBox,

    /// Raw lines inside the frame
    #[serde(default)]
    pub lines: Vec<RawLine>,

    /// Image payload; any value marks the block as image-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<serde_json::Value>,
}

impl Block {
    /// Create a text block whose box is the union of its lines' boxes.
    pub fn new(lines: Vec<RawLine>) -> Self {
        let bbox = lines
            .iter()
            .map(|l| l.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self {
            bbox,
            lines,
            image: None,
        }
    }

    /// Create an image-only block.
    pub fn image(bbox: BBox) -> Self {
        Self {
            bbox,
            lines: Vec::new(),
            image: Some(serde_json::Value::Bool(true)),
        }
    }

    /// Check if this block is image-only.
    pub fn is_image(&self) -> bool {
        self.image.is_some()
    }

    /// Whether the block has any text lines to offer.
    pub fn has_lines(&self) -> bool {
        !self.is_image() && !self.lines.is_empty()
    }

    /// Text of all lines joined with spaces.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(RawLine::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A single page in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page width in points
    #[serde(default)]
    pub width: f32,

    /// Page height in points
    #[serde(default)]
    pub height: f32,

    /// Text frames in extraction order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Builder-style variant of [`Page::add_block`].
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Horizontal midpoint used for column segmentation.
    pub fn midpoint(&self) -> f32 {
        self.width / 2.0
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Count raw lines across all text blocks.
    pub fn line_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| !b.is_image())
            .map(|b| b.lines.len())
            .sum()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x1: f32, x2: f32) -> Span {
        Span::new(text, "Times-Roman", 9.5, BBox::new(x1, 100.0, x2, 110.0))
    }

    #[test]
    fn test_span_bold() {
        let bold = Span::new("Title", "Helvetica-Bold", 9.0, BBox::default());
        let plain = Span::new("Body", "Helvetica", 9.0, BBox::default());
        assert!(bold.is_bold());
        assert!(!plain.is_bold());
    }

    #[test]
    fn test_raw_line_text_joins_spans() {
        let line = RawLine::new(vec![span("gene", 10.0, 40.0), span("tics\0 ", 42.0, 70.0)]);
        assert_eq!(line.text(), "gene tics");
        assert_eq!(line.bbox, BBox::new(10.0, 100.0, 70.0, 110.0));
    }

    #[test]
    fn test_raw_line_blank() {
        assert!(RawLine::new(vec![span("  ", 0.0, 5.0)]).is_blank());
        assert!(RawLine::new(vec![]).is_blank());
        assert!(!RawLine::new(vec![span("x", 0.0, 5.0)]).is_blank());
    }

    #[test]
    fn test_block_image() {
        let img = Block::image(BBox::new(0.0, 0.0, 100.0, 100.0));
        assert!(img.is_image());
        assert!(!img.has_lines());

        let text = Block::new(vec![RawLine::new(vec![span("a", 0.0, 5.0)])]);
        assert!(text.has_lines());
    }

    #[test]
    fn test_page_deserialize_dict_dump() {
        let json = r#"{
            "width": 612, "height": 792,
            "blocks": [
                {"type": 1, "bbox": [0, 0, 10, 10], "image": "aGVsbG8="},
                {"type": 0, "bbox": [50, 60, 200, 72], "lines": [
                    {"bbox": [50, 60, 200, 72], "wmode": 0, "spans": [
                        {"text": "PB1234 A title", "font": "Arial-BoldMT", "size": 9.0,
                         "flags": 16, "bbox": [50, 60, 200, 72]}
                    ]}
                ]}
            ]
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.midpoint(), 306.0);
        assert!(page.blocks[0].is_image());
        assert_eq!(page.blocks[1].text(), "PB1234 A title");
        assert_eq!(page.line_count(), 1);
    }
}
