//! Geometry-driven layout of the 2013-2018 proceedings.
//!
//! These volumes carry no field labels. An abstract starts at a line set in
//! the identifier font size; the bold run that follows is the title, the
//! regular text after it the author list, and the body begins where the
//! next line's left or right edge breaks away from the identifier line.

use crate::model::{Field, Record, Stage};
use crate::parser::{last_bold_index, same_size, Fragment, Line};

use super::assembler::is_authors_end;
use super::context::ExtractionContext;
use super::variant::LayoutVariant;

/// Font size of identifier lines.
pub const IDENTIFIER_SIZE: f32 = 10.0;

/// Identifiers typeset in the body size that must still open a record.
pub const IDENTIFIER_OVERRIDES: [&str; 3] = ["2258W", "2549W", "3174T"];

/// Left-edge shift that marks the start of body text.
pub const LEFT_EDGE_TOLERANCE: f32 = 5.0;

/// Right-edge shift that ends a block of author lines.
pub const RIGHT_EDGE_TOLERANCE: f32 = 20.0;

/// The 2013-2018 two-column layout.
#[derive(Debug, Clone)]
pub struct Typeset {
    identifier_size: f32,
    overrides: Vec<String>,
    left_tolerance: f32,
    right_tolerance: f32,
}

impl Typeset {
    pub fn new() -> Self {
        Self {
            identifier_size: IDENTIFIER_SIZE,
            overrides: IDENTIFIER_OVERRIDES.iter().map(|s| s.to_string()).collect(),
            left_tolerance: LEFT_EDGE_TOLERANCE,
            right_tolerance: RIGHT_EDGE_TOLERANCE,
        }
    }

    /// Set the identifier font size.
    pub fn with_identifier_size(mut self, size: f32) -> Self {
        self.identifier_size = size;
        self
    }

    /// Treat a line with exactly this text as an identifier.
    pub fn with_override(mut self, id: impl Into<String>) -> Self {
        self.overrides.push(id.into());
        self
    }

    /// Set the left-edge tolerance.
    pub fn with_left_tolerance(mut self, tolerance: f32) -> Self {
        self.left_tolerance = tolerance;
        self
    }

    /// Set the right-edge tolerance.
    pub fn with_right_tolerance(mut self, tolerance: f32) -> Self {
        self.right_tolerance = tolerance;
        self
    }

    /// Whether the line opens a new abstract.
    pub fn is_identifier(&self, line: &Line, text: &str) -> bool {
        line.first_size()
            .is_some_and(|size| same_size(size, self.identifier_size))
            || self.overrides.iter().any(|o| o == text)
    }

    /// Whether `next` starts body text judged by its left edge.
    ///
    /// Without a reference edge every following line counts as shifted.
    fn starts_content_left(&self, next: Option<&Line>, left_edge: Option<f32>) -> bool {
        let Some(next) = next else {
            return false;
        };
        let shifted = left_edge.map_or(true, |x1| (next.bbox.x1 - x1).abs() > self.left_tolerance);
        shifted || next.starts_with_space()
    }

    /// Whether `next` starts body text judged by its right edge.
    fn starts_content_right(&self, next: Option<&Line>, right_edge: f32) -> bool {
        next.is_some_and(|n| (n.bbox.x2 - right_edge).abs() > self.right_tolerance)
    }

    fn title_line(&self, line: &Line, next: Option<&Line>, ctx: &mut ExtractionContext) {
        let Some(id) = ctx.assembler.current().map(|r| r.id.clone()) else {
            return;
        };
        separate_resumed_title(ctx);
        let fragments = line.fragments();
        let next_is_title = next.is_some_and(|n| last_bold_index(&n.fragments()).is_some())
            && !self.starts_content_left(next, ctx.left_edge);

        if next_is_title {
            ctx.assembler
                .append(Field::Title, &join_fragments(&fragments, Some(&id)));
            return;
        }

        let split = last_bold_index(&fragments).map_or(0, |i| i + 1);
        ctx.assembler
            .append_bare(Field::Title, &join_fragments(&fragments[..split], Some(&id)));
        let authors = join_fragments(&fragments[split..], None);
        if !authors.is_empty() {
            ctx.assembler.append(Field::Authors, &authors);
        }

        ctx.stage = Some(
            if self.starts_content_left(next, ctx.left_edge) && self.authors_done(ctx) {
                Stage::Content
            } else {
                Stage::Authors
            },
        );
    }

    fn authors_line(&self, line: &Line, text: &str, next: Option<&Line>, ctx: &mut ExtractionContext) {
        ctx.assembler.append(Field::Authors, text.trim_start());
        let breaks = self.starts_content_left(next, ctx.left_edge)
            || self.starts_content_right(next, line.bbox.x2);
        if breaks && self.authors_done(ctx) {
            ctx.stage = Some(Stage::Content);
        }
    }

    fn authors_done(&self, ctx: &ExtractionContext) -> bool {
        ctx.assembler
            .current()
            .is_some_and(|r| is_authors_end(&r.authors))
    }
}

impl Default for Typeset {
    fn default() -> Self {
        Self::new()
    }
}

/// Put a space after a title that a previous page left without one.
fn separate_resumed_title(ctx: &mut ExtractionContext) {
    if let Some(record) = ctx.assembler.current_mut() {
        let ends_open = record
            .title
            .chars()
            .last()
            .is_some_and(|c| !c.is_whitespace() && c != '-');
        if ends_open {
            record.title.push(' ');
        }
    }
}

/// Join fragment texts with spaces, leaving out the record identifier.
fn join_fragments(fragments: &[Fragment<'_>], skip: Option<&str>) -> String {
    fragments
        .iter()
        .map(|f| f.text)
        .filter(|t| skip != Some(*t))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_start()
        .to_string()
}

impl LayoutVariant for Typeset {
    fn name(&self) -> &'static str {
        "2013-2018"
    }

    fn fields(&self) -> &'static [Field] {
        &[
            Field::Id,
            Field::Title,
            Field::Authors,
            Field::Content,
            Field::Header,
        ]
    }

    fn is_two_column(&self) -> bool {
        true
    }

    fn extract_page(&self, lines: &[Line], topic: &str, ctx: &mut ExtractionContext) {
        for (idx, line) in lines.iter().enumerate() {
            let next = lines.get(idx + 1);
            let text = line.text();

            if ctx.stage.is_none() {
                ctx.stage = ctx.assembler.resume_stage();
            }

            if self.is_identifier(line, &text) {
                ctx.open(Record::with_id(text.as_str(), topic), Stage::Title);
                ctx.left_edge = Some(line.bbox.x1);
                continue;
            }

            match ctx.stage {
                Some(Stage::Title) => self.title_line(line, next, ctx),
                Some(Stage::Authors) => self.authors_line(line, &text, next, ctx),
                Some(Stage::Content) => {
                    ctx.assembler.append(Field::Content, text.trim_start());
                }
                Some(Stage::Affiliations) | None => {}
            }
        }
    }
}
