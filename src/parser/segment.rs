//! Column and topic segmentation for two-column pages.
//!
//! Older proceedings print two columns of abstracts per page with the
//! session topic centered between them. Rows are not aligned across the
//! columns, so reading order is column-major: every left-column line comes
//! before any right-column line.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Block, Page};

use super::normalize::{normalize_blocks, Line};
use super::options::NoiseFilter;

/// Distance from the page midpoint a column block may reach.
pub const GUTTER_SLACK: f32 = 20.0;

/// Text that disqualifies a straddling block from being the topic banner.
pub const COPYRIGHT_MARKER: &str = "Copyright";

static TOPIC_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*Posters:?\s*|\s*\d+\s*").expect("topic noise pattern"));

/// Lines of one page in reading order, plus the page's topic banner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLines {
    /// Logical lines in reading order
    pub lines: Vec<Line>,
    /// Topic banner text, empty when the page has none
    pub topic: String,
}

/// Which region of a two-column page a block falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Entirely left of the gutter
    Left,
    /// Entirely right of the gutter
    Right,
    /// Straddles the midpoint
    Center,
}

/// Classify a block against the page midpoint.
pub fn classify_block(block: &Block, mid: f32) -> Region {
    if block.bbox.x2 < mid + GUTTER_SLACK {
        Region::Left
    } else if block.bbox.x1 > mid - GUTTER_SLACK {
        Region::Right
    } else {
        Region::Center
    }
}

/// Strip "Posters:" labels and page numbers from banner text.
pub fn clean_topic(text: &str) -> String {
    TOPIC_NOISE.replace_all(text, "").trim().to_string()
}

/// Split a page into left and right columns and pick out its topic.
///
/// Blocks without lines are ignored. Among straddling blocks, the last one
/// not mentioning copyright wins as the topic.
pub fn segment_page(page: &Page, filter: &NoiseFilter) -> PageLines {
    let mid = page.midpoint();
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut topic = String::new();

    for block in page.blocks.iter().filter(|b| b.has_lines()) {
        match classify_block(block, mid) {
            Region::Left => left.push(block),
            Region::Right => right.push(block),
            Region::Center => {
                let text = block.text();
                if !text.contains(COPYRIGHT_MARKER) {
                    topic = clean_topic(&text);
                }
            }
        }
    }

    log::debug!(
        "Segmented page: {} left blocks, {} right blocks, topic {:?}",
        left.len(),
        right.len(),
        topic
    );

    let mut lines = normalize_blocks(left, filter);
    lines.extend(normalize_blocks(right, filter));

    PageLines { lines, topic }
}

/// Read a single-column page in block order.
pub fn single_column(page: &Page, filter: &NoiseFilter) -> PageLines {
    PageLines {
        lines: normalize_blocks(&page.blocks, filter),
        topic: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, RawLine, Span};

    fn block(text: &str, x1: f32, y1: f32, x2: f32) -> Block {
        Block::new(vec![RawLine::new(vec![Span::new(
            text,
            "Times",
            9.5,
            BBox::new(x1, y1, x2, y1 + 10.0),
        )])])
    }

    #[test]
    fn test_classify_boundaries() {
        let mid = 300.0;
        assert_eq!(classify_block(&block("a", 40.0, 0.0, 319.0), mid), Region::Left);
        assert_eq!(classify_block(&block("a", 281.0, 0.0, 560.0), mid), Region::Right);
        assert_eq!(classify_block(&block("a", 280.0, 0.0, 320.0), mid), Region::Center);
    }

    #[test]
    fn test_clean_topic() {
        assert_eq!(clean_topic("Posters: Cancer Genetics 112"), "Cancer Genetics");
        assert_eq!(clean_topic("  Statistical Genetics  "), "Statistical Genetics");
    }

    #[test]
    fn test_column_major_order() {
        let page = Page::new(600.0, 800.0)
            .with_block(block("right top", 320.0, 50.0, 560.0))
            .with_block(block("left top", 40.0, 60.0, 280.0))
            .with_block(block("left bottom", 40.0, 400.0, 280.0))
            .with_block(block("Posters: Complex Traits 7", 150.0, 20.0, 450.0))
            .with_block(block("Copyright 2015 The Society", 150.0, 780.0, 450.0));

        let result = segment_page(&page, &NoiseFilter::default());
        let texts: Vec<_> = result.lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["left top", "left bottom", "right top"]);
        assert_eq!(result.topic, "Complex Traits");
    }

    #[test]
    fn test_last_topic_wins() {
        let page = Page::new(600.0, 800.0)
            .with_block(block("Posters: First", 150.0, 20.0, 450.0))
            .with_block(block("Posters: Second", 150.0, 500.0, 450.0));

        assert_eq!(segment_page(&page, &NoiseFilter::default()).topic, "Second");
    }

    #[test]
    fn test_image_blocks_ignored() {
        let page = Page::new(600.0, 800.0).with_block(Block::image(BBox::new(150.0, 20.0, 450.0, 60.0)));
        let result = segment_page(&page, &NoiseFilter::default());
        assert!(result.lines.is_empty());
        assert!(result.topic.is_empty());
    }

    #[test]
    fn test_single_column_keeps_block_order() {
        let page = Page::new(600.0, 800.0)
            .with_block(block("first", 320.0, 50.0, 560.0))
            .with_block(block("second", 40.0, 60.0, 280.0));

        let result = single_column(&page, &NoiseFilter::default());
        let texts: Vec<_> = result.lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
