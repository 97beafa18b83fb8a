//! Line reconstruction from raw text fragments.
//!
//! The extraction facility may split one visual line into several raw
//! lines (separate font runs, kerning gaps, leading invisible glyphs). This
//! module drops noise lines and merges the rest back into logical lines.

use crate::model::{join_span_text, BBox, Block, RawLine, Span};

use super::options::NoiseFilter;

/// A logical text line: one or more raw lines sharing a vertical band.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Spans in reading order, starting with a non-blank span
    pub spans: Vec<Span>,
    /// Line position; `x1` is the first non-blank span's left edge
    pub bbox: BBox,
}

/// A piece of span text together with its boldness.
///
/// Spans containing NUL separators are split into several fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Fragment text
    pub text: &'a str,
    /// Whether the owning span's font is bold
    pub bold: bool,
}

impl Line {
    /// Create a line directly from spans; the box is their union.
    pub fn new(spans: Vec<Span>) -> Self {
        let bbox = spans
            .iter()
            .map(|s| s.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
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

    /// Split the line into fragments, dropping empty NUL-separated pieces.
    pub fn fragments(&self) -> Vec<Fragment<'_>> {
        self.spans
            .iter()
            .flat_map(|span| {
                let bold = span.is_bold();
                span.text
                    .split('\0')
                    .filter(|t| !t.is_empty())
                    .map(move |text| Fragment { text, bold })
            })
            .collect()
    }

    /// Whether the line's text starts with a regular or non-breaking space.
    pub fn starts_with_space(&self) -> bool {
        self.text().starts_with([' ', '\u{a0}'])
    }
}

/// Index of the last bold fragment, if any.
pub fn last_bold_index(fragments: &[Fragment<'_>]) -> Option<usize> {
    fragments.iter().rposition(|f| f.bold)
}

/// Merge the raw lines of `blocks` into logical lines.
///
/// Image blocks are skipped and noise lines are dropped before merging. A
/// raw line joins the current logical line when its top edge lies within
/// the filter's merge tolerance of the logical line's top edge; otherwise
/// it opens a new logical line starting at its first non-blank span.
pub fn normalize_blocks<'a, I>(blocks: I, filter: &NoiseFilter) -> Vec<Line>
where
    I: IntoIterator<Item = &'a Block>,
{
    let mut lines: Vec<Line> = Vec::new();

    let raw_lines = blocks
        .into_iter()
        .filter(|b| !b.is_image())
        .flat_map(|b| b.lines.iter())
        .filter(|l| !filter.is_noise(l));

    for raw in raw_lines {
        match lines.last_mut() {
            Some(current) if (raw.bbox.y1 - current.bbox.y1).abs() <= filter.merge_tolerance => {
                current.spans.extend(raw.spans.iter().cloned());
                current.bbox.x2 = current.bbox.x2.max(raw.bbox.x2);
            }
            _ => {
                if let Some(line) = open_line(raw) {
                    lines.push(line);
                }
            }
        }
    }

    log::debug!("Rebuilt {} lines", lines.len());
    lines
}

fn open_line(raw: &RawLine) -> Option<Line> {
    let first = raw.spans.iter().position(|s| !s.is_blank())?;
    let mut bbox = raw.bbox;
    bbox.x1 = raw.spans[first].bbox.x1;
    Some(Line {
        spans: raw.spans[first..].to_vec(),
        bbox,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, font: &str, x1: f32, y1: f32, x2: f32) -> Span {
        Span::new(text, font, 9.5, BBox::new(x1, y1, x2, y1 + 10.0))
    }

    fn raw(spans: Vec<Span>) -> RawLine {
        RawLine::new(spans)
    }

    #[test]
    fn test_merges_lines_in_same_band() {
        let block = Block::new(vec![
            raw(vec![span("Genome", "Times", 50.0, 100.0, 90.0)]),
            raw(vec![span("wide", "Times", 92.0, 103.0, 120.0)]),
            raw(vec![span("study", "Times", 50.0, 112.0, 80.0)]),
        ]);

        let lines = normalize_blocks([&block], &NoiseFilter::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Genome wide");
        assert_eq!(lines[0].bbox.x2, 120.0);
        assert_eq!(lines[1].text(), "study");
    }

    #[test]
    fn test_merge_measured_from_group_top() {
        // 4 + 4 drifts past the tolerance measured from the first raw line
        let block = Block::new(vec![
            raw(vec![span("a", "Times", 50.0, 100.0, 60.0)]),
            raw(vec![span("b", "Times", 62.0, 104.0, 70.0)]),
            raw(vec![span("c", "Times", 72.0, 108.0, 80.0)]),
        ]);

        let lines = normalize_blocks([&block], &NoiseFilter::default());
        let texts: Vec<_> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["a b", "c"]);
    }

    #[test]
    fn test_leading_blank_spans_skipped() {
        let block = Block::new(vec![raw(vec![
            span(" ", "Symbol", 20.0, 100.0, 24.0),
            span("Title", "Times-Bold", 50.0, 100.0, 80.0),
        ])]);

        let lines = normalize_blocks([&block], &NoiseFilter::default());
        assert_eq!(lines[0].spans.len(), 1);
        assert_eq!(lines[0].bbox.x1, 50.0);
    }

    #[test]
    fn test_blank_only_line_never_extends_group() {
        let block = Block::new(vec![
            raw(vec![span("text", "Times", 50.0, 100.0, 80.0)]),
            raw(vec![span("   ", "Times", 90.0, 101.0, 200.0)]),
        ]);

        let lines = normalize_blocks([&block], &NoiseFilter::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].bbox.x2, 80.0);
    }

    #[test]
    fn test_noise_and_images_dropped() {
        let page_number = RawLine::new(vec![Span::new(
            "12",
            "Times",
            9.0,
            BBox::new(300.0, 760.0, 310.0, 770.0),
        )]);
        let text = Block::new(vec![
            raw(vec![span("Trainee Award Finalist", "Times", 50.0, 80.0, 150.0)]),
            raw(vec![span("body", "Times", 50.0, 100.0, 80.0)]),
            page_number,
        ]);
        let image = Block::image(BBox::new(0.0, 0.0, 100.0, 100.0));

        let lines = normalize_blocks([&image, &text], &NoiseFilter::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "body");
    }

    #[test]
    fn test_fragments_split_on_nul() {
        let line = Line::new(vec![
            span("1234\0A Title", "Arial-Bold", 50.0, 100.0, 150.0),
            span("J. Doe", "Arial", 152.0, 100.0, 200.0),
        ]);

        let fragments = line.fragments();
        let texts: Vec<_> = fragments.iter().map(|f| f.text).collect();
        assert_eq!(texts, vec!["1234", "A Title", "J. Doe"]);
        assert_eq!(last_bold_index(&fragments), Some(1));
        assert_eq!(last_bold_index(&fragments[2..]), None);
    }

    #[test]
    fn test_starts_with_space() {
        let nbsp = Line::new(vec![span("\u{a0}Body", "Times", 50.0, 100.0, 80.0)]);
        let plain = Line::new(vec![span("Body", "Times", 50.0, 100.0, 80.0)]);
        assert!(nbsp.starts_with_space());
        assert!(!plain.starts_with_space());
    }
}
