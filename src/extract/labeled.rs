//! Label-driven layouts.
//!
//! These proceedings print explicit field labels ("Authors:", "Abstract:",
//! program numbers). A line carrying a label switches the stage and seeds
//! the field with the text after the label; the line is then consumed. Any
//! other line extends the field of the current stage, or starts the body
//! text when the page has no stage yet.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::{Field, Record, Stage};
use crate::parser::{same_size, Line, PageSection};

use super::context::ExtractionContext;
use super::variant::{LayoutVariant, TitleMatch};

/// Vertical gap that separates the 2019 affiliations block from the body.
pub const AFFILIATION_CONTENT_GAP: f32 = 45.0;

/// Vertical gap that separates the 2023 poster author block from the body.
pub const POSTER_CONTENT_GAP: f32 = 20.0;

/// Font size of the 2021 session navigation lines.
pub const SESSION_LINK_SIZE: f32 = 8.0;

/// Kinds of marker a label-driven layout recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Page chrome to drop
    Skip,
    /// Session or topic header
    Topic,
    /// Identifier and title
    Title,
    /// Author list
    Authors,
    /// Affiliations
    Affiliations,
    /// Body text
    Content,
}

/// Compiled marker patterns of one layout.
#[derive(Debug, Clone, Default)]
pub struct Markers {
    patterns: HashMap<Marker, Regex>,
}

impl Markers {
    fn with(mut self, kind: Marker, pattern: &LazyLock<Regex>) -> Self {
        self.patterns.insert(kind, Regex::clone(pattern));
        self
    }

    /// Replace the pattern for one marker kind.
    pub fn set(&mut self, kind: Marker, pattern: &str) -> Result<()> {
        self.patterns.insert(kind, Regex::new(pattern)?);
        Ok(())
    }

    /// Pattern registered for a marker kind.
    pub fn get(&self, kind: Marker) -> Option<&Regex> {
        self.patterns.get(&kind)
    }

    fn is_match(&self, kind: Marker, text: &str) -> bool {
        self.get(kind).is_some_and(|re| re.is_match(text))
    }

    /// Text of capture group `idx`; empty when the group did not take part.
    fn group(&self, kind: Marker, text: &str, idx: usize) -> Option<String> {
        let caps = self.get(kind)?.captures(text)?;
        Some(caps.get(idx).map_or("", |m| m.as_str()).to_string())
    }

    fn title(&self, text: &str, id_group: Option<usize>, title_group: usize) -> Option<TitleMatch> {
        let caps = self.get(Marker::Title)?.captures(text)?;
        let group = |idx: usize| caps.get(idx).map_or("", |m| m.as_str()).to_string();
        Some(TitleMatch {
            id: id_group.map(group),
            title: group(title_group),
        })
    }
}

/// What a topic marker does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicAction {
    /// Open a new record headed by the topic; the title fills it later
    OpenRecord,
    /// Remember the topic for records opened afterwards
    SetHeader,
}

/// What a title marker does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleAction {
    /// Open a new record
    OpenRecord {
        /// Drop the previous record first if it lacks authors or content
        discard_incomplete: bool,
    },
    /// Fill the identifier and title of the record a topic opened
    FillCurrent,
}

/// Vertical-gap rule promoting an unlabeled line to body text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentGap {
    /// Bottom-edge distance that starts the body
    pub threshold: f32,
    /// Whether an affiliations label line becomes the gap anchor
    pub anchor_on_affiliations: bool,
    /// Only promote once the record has authors
    pub requires_authors: bool,
    /// Forget the anchor at every page break
    pub reset_per_page: bool,
}

/// Stage-transition rules of a label-driven layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRules {
    pub topic: TopicAction,
    pub title: TitleAction,
    pub gap: Option<ContentGap>,
}

/// Walk one page of a label-driven layout.
pub(crate) fn walk_page<V>(variant: &V, rules: &LabelRules, lines: &[Line], ctx: &mut ExtractionContext)
where
    V: LayoutVariant + ?Sized,
{
    if rules.gap.is_some_and(|g| g.reset_per_page) {
        ctx.gap_anchor = None;
    }

    for line in lines {
        let text = variant.line_text(line);
        if variant.skip_line(line, &text) {
            continue;
        }
        if consume_marker(variant, rules, line, &text, ctx) {
            continue;
        }

        let promote = match ctx.stage {
            None => true,
            Some(_) => rules.gap.is_some_and(|g| gap_exceeded(&g, line, ctx)),
        };
        if promote {
            ctx.stage = Some(Stage::Content);
        }
        if let Some(stage) = ctx.stage {
            ctx.assembler.append(stage.field(), &text);
        }
        ctx.gap_anchor = Some(line.bbox);
    }
}

fn gap_exceeded(gap: &ContentGap, line: &Line, ctx: &ExtractionContext) -> bool {
    if gap.requires_authors
        && !ctx
            .assembler
            .current()
            .is_some_and(|r| !r.authors.is_empty())
    {
        return false;
    }
    ctx.gap_anchor
        .is_some_and(|anchor| (anchor.y2 - line.bbox.y2).abs() > gap.threshold)
}

/// Apply the first marker the line carries. Returns whether it was consumed.
fn consume_marker<V>(
    variant: &V,
    rules: &LabelRules,
    line: &Line,
    text: &str,
    ctx: &mut ExtractionContext,
) -> bool
where
    V: LayoutVariant + ?Sized,
{
    if let Some(topic) = variant.match_topic(text) {
        match rules.topic {
            TopicAction::OpenRecord => ctx.assembler.open(Record::with_header(topic)),
            TopicAction::SetHeader => ctx.header = topic,
        }
        return true;
    }

    if let Some(title) = variant.match_title(text) {
        match rules.title {
            TitleAction::OpenRecord { discard_incomplete } => {
                if discard_incomplete {
                    ctx.assembler.discard_incomplete();
                }
                let id = title.id.unwrap_or_default();
                ctx.open(Record::with_id(id, ctx.header.clone()), Stage::Title);
                ctx.assembler.append(Field::Title, &title.title);
            }
            TitleAction::FillCurrent => {
                if ctx.assembler.current().is_some() {
                    if let Some(id) = &title.id {
                        ctx.assembler.set_id(id);
                    }
                    ctx.assembler.append(Field::Title, &title.title);
                    ctx.stage = Some(Stage::Title);
                }
            }
        }
        return true;
    }

    if let Some(authors) = variant.match_authors(text) {
        seed(ctx, Stage::Authors, &authors);
        return true;
    }

    if let Some(affiliations) = variant.match_affiliations(text) {
        seed(ctx, Stage::Affiliations, &affiliations);
        if rules.gap.is_some_and(|g| g.anchor_on_affiliations) {
            ctx.gap_anchor = Some(line.bbox);
        }
        return true;
    }

    if let Some(content) = variant.match_content(text) {
        seed(ctx, Stage::Content, &content);
        return true;
    }

    false
}

fn seed(ctx: &mut ExtractionContext, stage: Stage, text: &str) {
    ctx.stage = Some(stage);
    if !text.is_empty() {
        ctx.assembler.append(stage.field(), text);
    }
}

/// Expand typographic ligatures such as "ﬃ" into plain letters.
pub fn expand_ligatures(text: &str) -> String {
    let is_ligature = |c: char| ('\u{fb00}'..='\u{fb06}').contains(&c);
    if !text.chars().any(is_ligature) {
        return text.to_string();
    }
    text.chars()
        .flat_map(|c| {
            if is_ligature(c) {
                std::iter::once(c).nfkc().collect::<Vec<_>>()
            } else {
                vec![c]
            }
        })
        .collect()
}

// 2019

static SKIP_2019: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"View Session|Add to Schedule").expect("2019 skip pattern"));
static TITLE_2019: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PgmNr\s*(\d+):\s*(.*)").expect("2019 title pattern"));
static AUTHORS_2019: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Author[s]?:\s*(.*)").expect("2019 authors pattern"));
static AFFILIATIONS_2019: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Affiliation[s]?:\s*(.*)").expect("2019 affiliations pattern"));

/// 2019 proceedings: `PgmNr N:` titles, `Authors:` and `Affiliations:`
/// labels, unlabeled body text separated from the affiliations by a gap.
#[derive(Debug, Clone)]
pub struct Labeled2019 {
    markers: Markers,
    rules: LabelRules,
}

impl Labeled2019 {
    pub fn new() -> Self {
        Self {
            markers: Markers::default()
                .with(Marker::Skip, &SKIP_2019)
                .with(Marker::Title, &TITLE_2019)
                .with(Marker::Authors, &AUTHORS_2019)
                .with(Marker::Affiliations, &AFFILIATIONS_2019),
            rules: LabelRules {
                topic: TopicAction::SetHeader,
                title: TitleAction::OpenRecord {
                    discard_incomplete: false,
                },
                gap: Some(ContentGap {
                    threshold: AFFILIATION_CONTENT_GAP,
                    anchor_on_affiliations: true,
                    requires_authors: false,
                    reset_per_page: true,
                }),
            },
        }
    }

    /// Override the affiliations-to-body gap.
    pub fn with_content_gap(mut self, threshold: f32) -> Self {
        if let Some(gap) = self.rules.gap.as_mut() {
            gap.threshold = threshold;
        }
        self
    }

    /// Override one marker pattern.
    pub fn with_marker(mut self, kind: Marker, pattern: &str) -> Result<Self> {
        self.markers.set(kind, pattern)?;
        Ok(self)
    }
}

impl Default for Labeled2019 {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutVariant for Labeled2019 {
    fn name(&self) -> &'static str {
        "2019"
    }

    fn fields(&self) -> &'static [Field] {
        &[
            Field::Id,
            Field::Title,
            Field::Authors,
            Field::Affiliations,
            Field::Content,
        ]
    }

    fn line_text(&self, line: &Line) -> String {
        expand_ligatures(&line.text())
    }

    fn skip_line(&self, _line: &Line, text: &str) -> bool {
        self.markers.is_match(Marker::Skip, text)
    }

    fn match_title(&self, text: &str) -> Option<TitleMatch> {
        self.markers.title(text, Some(1), 2)
    }

    fn match_authors(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Authors, text, 1)
    }

    fn match_affiliations(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Affiliations, text, 1)
    }

    fn extract_page(&self, lines: &[Line], _topic: &str, ctx: &mut ExtractionContext) {
        walk_page(self, &self.rules, lines, ctx);
    }
}

// 2021

static SKIP_2021: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"View session detail").expect("2021 skip pattern"));
static TITLE_2021: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PrgmNr\s*(\d+)\s*-\s*(.*)").expect("2021 title pattern"));
static AUTHORS_2021: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Author Block:\s*(.*)").expect("2021 authors pattern"));
static CONTENT_2021: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Disclosure Block:\s*(.*)").expect("2021 content pattern"));

/// Default page sections of the 2021 proceedings (0-based, half-open).
pub fn sections_2021() -> Vec<PageSection> {
    vec![
        PageSection::new("Plenary", 73, 89),
        PageSection::new("Platform", 90, 295),
        PageSection::new("Talks", 296, 379),
        PageSection::new("Presentations", 380, 2224),
    ]
}

/// 2021 proceedings: `PrgmNr N -` titles, `Author Block:` and
/// `Disclosure Block:` labels, split into four independent page sections.
#[derive(Debug, Clone)]
pub struct Sectioned2021 {
    markers: Markers,
    rules: LabelRules,
    sections: Vec<PageSection>,
    link_size: f32,
}

impl Sectioned2021 {
    pub fn new() -> Self {
        Self {
            markers: Markers::default()
                .with(Marker::Skip, &SKIP_2021)
                .with(Marker::Title, &TITLE_2021)
                .with(Marker::Authors, &AUTHORS_2021)
                .with(Marker::Content, &CONTENT_2021),
            rules: LabelRules {
                topic: TopicAction::SetHeader,
                title: TitleAction::OpenRecord {
                    discard_incomplete: false,
                },
                gap: None,
            },
            sections: sections_2021(),
            link_size: SESSION_LINK_SIZE,
        }
    }

    /// Replace the page sections.
    pub fn with_sections(mut self, sections: Vec<PageSection>) -> Self {
        self.sections = sections;
        self
    }

    /// Override the font size of navigation lines.
    pub fn with_link_size(mut self, size: f32) -> Self {
        self.link_size = size;
        self
    }

    /// Override one marker pattern.
    pub fn with_marker(mut self, kind: Marker, pattern: &str) -> Result<Self> {
        self.markers.set(kind, pattern)?;
        Ok(self)
    }
}

impl Default for Sectioned2021 {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutVariant for Sectioned2021 {
    fn name(&self) -> &'static str {
        "2021"
    }

    fn fields(&self) -> &'static [Field] {
        &[Field::Id, Field::Title, Field::Authors, Field::Content]
    }

    fn sections(&self) -> &[PageSection] {
        &self.sections
    }

    fn skip_line(&self, line: &Line, text: &str) -> bool {
        line.first_size()
            .is_some_and(|size| same_size(size, self.link_size))
            || self.markers.is_match(Marker::Skip, text)
    }

    fn match_title(&self, text: &str) -> Option<TitleMatch> {
        self.markers.title(text, Some(1), 2)
    }

    fn match_authors(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Authors, text, 1)
    }

    fn match_content(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Content, text, 1)
    }

    fn extract_page(&self, lines: &[Line], _topic: &str, ctx: &mut ExtractionContext) {
        walk_page(self, &self.rules, lines, ctx);
    }
}

// 2022

static SKIP_2022: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ASHG 2022 Annual Meeting .+ Abstracts|Page\s+(\d+)\s+of\s+(\d+)|^(Location|Session Time)")
        .expect("2022 skip pattern")
});
static TOPIC_2022: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"S\d{2}\.\s*(.+)|(.+) Posters\s*-\s*(?:Wednesday|Thursday)").expect("2022 topic pattern")
});
static TITLE_2022: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:ProgNbr|PB)\s*(\d+)\*?[:.]\s*(.+)").expect("2022 title pattern")
});
static AUTHORS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Authors:\s*(.*)").expect("authors pattern"));
static ABSTRACT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Abstract(?: Body)?:\s*(.*)").expect("abstract pattern"));

/// 2022 proceedings: each session header (`S01.` or `… Posters - Day`)
/// opens a record that the following `ProgNbr`/`PB` title fills.
#[derive(Debug, Clone)]
pub struct Session2022 {
    markers: Markers,
    rules: LabelRules,
}

impl Session2022 {
    pub fn new() -> Self {
        Self {
            markers: Markers::default()
                .with(Marker::Skip, &SKIP_2022)
                .with(Marker::Topic, &TOPIC_2022)
                .with(Marker::Title, &TITLE_2022)
                .with(Marker::Authors, &AUTHORS_LABEL)
                .with(Marker::Content, &ABSTRACT_LABEL),
            rules: LabelRules {
                topic: TopicAction::OpenRecord,
                title: TitleAction::FillCurrent,
                gap: None,
            },
        }
    }

    /// Override one marker pattern.
    pub fn with_marker(mut self, kind: Marker, pattern: &str) -> Result<Self> {
        self.markers.set(kind, pattern)?;
        Ok(self)
    }
}

impl Default for Session2022 {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutVariant for Session2022 {
    fn name(&self) -> &'static str {
        "2022"
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

    fn skip_line(&self, _line: &Line, text: &str) -> bool {
        self.markers.is_match(Marker::Skip, text)
    }

    fn match_topic(&self, text: &str) -> Option<String> {
        let caps = self.markers.get(Marker::Topic)?.captures(text)?;
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    fn match_title(&self, text: &str) -> Option<TitleMatch> {
        self.markers.title(text, Some(1), 2)
    }

    fn match_authors(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Authors, text, 1)
    }

    fn match_content(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Content, text, 1)
    }

    fn extract_page(&self, lines: &[Line], _topic: &str, ctx: &mut ExtractionContext) {
        walk_page(self, &self.rules, lines, ctx);
    }
}

// 2023 platform and plenary

static SKIP_2023: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ASHG 2023 Annual Meeting .+ Abstracts|^(Location|Session Time)").expect("2023 skip pattern")
});
static TOPIC_2023: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Session \d{3}:\s*(.+)").expect("2023 topic pattern"));
static TITLE_2023: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Title:\s*(.+)").expect("2023 title pattern"));

/// 2023 platform and plenary sessions: `Session NNN:` headers carry over
/// to every following `Title:` record; records missing authors or body
/// are dropped when the next title arrives.
#[derive(Debug, Clone)]
pub struct Platform2023 {
    markers: Markers,
    rules: LabelRules,
}

impl Platform2023 {
    pub fn new() -> Self {
        Self {
            markers: Markers::default()
                .with(Marker::Skip, &SKIP_2023)
                .with(Marker::Topic, &TOPIC_2023)
                .with(Marker::Title, &TITLE_2023)
                .with(Marker::Authors, &AUTHORS_LABEL)
                .with(Marker::Content, &ABSTRACT_LABEL),
            rules: LabelRules {
                topic: TopicAction::SetHeader,
                title: TitleAction::OpenRecord {
                    discard_incomplete: true,
                },
                gap: None,
            },
        }
    }

    /// Override one marker pattern.
    pub fn with_marker(mut self, kind: Marker, pattern: &str) -> Result<Self> {
        self.markers.set(kind, pattern)?;
        Ok(self)
    }
}

impl Default for Platform2023 {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutVariant for Platform2023 {
    fn name(&self) -> &'static str {
        "2023"
    }

    fn fields(&self) -> &'static [Field] {
        &[Field::Title, Field::Authors, Field::Content, Field::Header]
    }

    fn skip_line(&self, _line: &Line, text: &str) -> bool {
        self.markers.is_match(Marker::Skip, text)
    }

    fn match_topic(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Topic, text, 1)
    }

    fn match_title(&self, text: &str) -> Option<TitleMatch> {
        self.markers.title(text, None, 1)
    }

    fn match_authors(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Authors, text, 1)
    }

    fn match_content(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Content, text, 1)
    }

    fn extract_page(&self, lines: &[Line], _topic: &str, ctx: &mut ExtractionContext) {
        walk_page(self, &self.rules, lines, ctx);
    }
}

// 2023 posters

static SKIP_2023_POSTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ASHG 2023 Annual Meeting .+ Abstracts|Page\s+(\d+)\s+of\s+(\d+)")
        .expect("2023 poster skip pattern")
});
static TOPIC_2023_POSTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Session Title:\s*(.+)\s*Poster Session\.*").expect("2023 poster topic pattern")
});
static TITLE_2023_POSTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PB\s*(\d{4})\s*†?\s*(.+)").expect("2023 poster title pattern")
});

/// 2023 posters: session titles open records, `PB NNNN` lines fill them,
/// and the body starts after a vertical gap below the author list.
#[derive(Debug, Clone)]
pub struct Poster2023 {
    markers: Markers,
    rules: LabelRules,
}

impl Poster2023 {
    pub fn new() -> Self {
        Self {
            markers: Markers::default()
                .with(Marker::Skip, &SKIP_2023_POSTER)
                .with(Marker::Topic, &TOPIC_2023_POSTER)
                .with(Marker::Title, &TITLE_2023_POSTER)
                .with(Marker::Authors, &AUTHORS_LABEL),
            rules: LabelRules {
                topic: TopicAction::OpenRecord,
                title: TitleAction::FillCurrent,
                gap: Some(ContentGap {
                    threshold: POSTER_CONTENT_GAP,
                    anchor_on_affiliations: false,
                    requires_authors: true,
                    reset_per_page: false,
                }),
            },
        }
    }

    /// Override the author-to-body gap.
    pub fn with_content_gap(mut self, threshold: f32) -> Self {
        if let Some(gap) = self.rules.gap.as_mut() {
            gap.threshold = threshold;
        }
        self
    }

    /// Override one marker pattern.
    pub fn with_marker(mut self, kind: Marker, pattern: &str) -> Result<Self> {
        self.markers.set(kind, pattern)?;
        Ok(self)
    }
}

impl Default for Poster2023 {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutVariant for Poster2023 {
    fn name(&self) -> &'static str {
        "2023-poster"
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

    fn skip_line(&self, _line: &Line, text: &str) -> bool {
        self.markers.is_match(Marker::Skip, text)
    }

    fn match_topic(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Topic, text, 1)
    }

    fn match_title(&self, text: &str) -> Option<TitleMatch> {
        self.markers.title(text, Some(1), 2)
    }

    fn match_authors(&self, text: &str) -> Option<String> {
        self.markers.group(Marker::Authors, text, 1)
    }

    fn extract_page(&self, lines: &[Line], _topic: &str, ctx: &mut ExtractionContext) {
        walk_page(self, &self.rules, lines, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Span};

    fn line_at(text: &str, y: f32) -> Line {
        Line::new(vec![Span::new(
            text,
            "Arial",
            9.5,
            BBox::new(50.0, y, 500.0, y + 10.0),
        )])
    }

    fn stacked(texts: &[&str]) -> Vec<Line> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| line_at(t, 100.0 + i as f32 * 12.0))
            .collect()
    }

    fn run(variant: &dyn LayoutVariant, pages: &[Vec<Line>]) -> Vec<Record> {
        let mut ctx = ExtractionContext::new();
        for lines in pages {
            ctx.begin_page();
            variant.extract_page(lines, "", &mut ctx);
        }
        ctx.finish()
    }

    #[test]
    fn test_2019_end_to_end() {
        let lines = vec![
            line_at("PgmNr 42: A Study of X ", 100.0),
            line_at("Authors: A. Smith, B. Jones. ", 112.0),
            line_at("Affiliation: Dept. of Y. ", 124.0),
            line_at("We show that gene-", 180.0),
            line_at("tics matter.", 192.0),
        ];

        let records = run(&Labeled2019::new(), &[lines]);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "42");
        assert_eq!(r.title, "A Study of X");
        assert_eq!(r.authors, "A. Smith, B. Jones.");
        assert_eq!(r.affiliations, "Dept. of Y.");
        assert_eq!(r.content, "We show that genetics matter.");
        assert_eq!(r.header, "");
    }

    #[test]
    fn test_2019_affiliations_continue_within_gap() {
        let lines = vec![
            line_at("PgmNr 7: Title", 100.0),
            line_at("Authors: A. Smith", 112.0),
            line_at("Affiliations: 1) Univ A,", 124.0),
            line_at("2) Univ B.", 136.0),
            line_at("Body text.", 200.0),
        ];

        let records = run(&Labeled2019::new(), &[lines]);
        assert_eq!(records[0].affiliations, "1) Univ A, 2) Univ B.");
        assert_eq!(records[0].content, "Body text.");
    }

    #[test]
    fn test_2019_gap_override() {
        let lines = vec![
            line_at("PgmNr 7: Title", 100.0),
            line_at("Affiliations: Univ A", 124.0),
            line_at("Body text.", 160.0),
        ];

        let records = run(&Labeled2019::new().with_content_gap(30.0), &[lines.clone()]);
        assert_eq!(records[0].content, "Body text.");

        let records = run(&Labeled2019::new(), &[lines]);
        assert_eq!(records[0].affiliations, "Univ A Body text.");
    }

    #[test]
    fn test_2019_skip_and_ligatures() {
        let lines = stacked(&[
            "PgmNr 1: Eﬃcient imputation",
            "View Session  Add to Schedule",
            "Authors: A. Smith",
        ]);

        let records = run(&Labeled2019::new(), &[lines]);
        assert_eq!(records[0].title, "Efficient imputation");
        assert_eq!(records[0].authors, "A. Smith");
    }

    #[test]
    fn test_page_without_stage_starts_in_content() {
        let first = stacked(&[
            "PrgmNr 1001 - Title one",
            "Author Block: A. Smith",
            "Disclosure Block: None.",
        ]);
        let second = stacked(&["continued body", "PrgmNr 1002 - Title two"]);

        let records = run(&Sectioned2021::new(), &[first, second]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content, "None. continued body");
        assert_eq!(records[1].id, "1002");
    }

    #[test]
    fn test_marker_lines_are_consumed() {
        let lines = stacked(&["PrgmNr 1001 - Title", "Author Block: A. Smith"]);
        let records = run(&Sectioned2021::new(), &[lines]);
        assert_eq!(records[0].title, "Title");
        assert_eq!(records[0].content, "");
        assert!(!records[0].authors.contains("Author Block"));
    }

    #[test]
    fn test_2021_skips_navigation() {
        let mut lines = stacked(&["PrgmNr 1001 - Title", "Author Block: A. Smith"]);
        lines.push(Line::new(vec![Span::new(
            "Session 12: Cancer",
            "Arial",
            8.0,
            BBox::new(50.0, 200.0, 200.0, 208.0),
        )]));
        lines.push(line_at("View session detail", 220.0));

        let records = run(&Sectioned2021::new(), &[lines]);
        assert_eq!(records[0].authors, "A. Smith");
    }

    #[test]
    fn test_2022_topic_opens_record_title_fills_it() {
        let lines = stacked(&[
            "ASHG 2022 Annual Meeting Platform Abstracts",
            "S01. Statistical genetics",
            "ProgNbr 101: Fine-mapping at scale",
            "Authors: A. Smith",
            "Abstract Body: First line",
            "second line",
            "Page 3 of 200",
        ]);

        let records = run(&Session2022::new(), &[lines]);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.header, "Statistical genetics");
        assert_eq!(r.id, "101");
        assert_eq!(r.title, "Fine-mapping at scale");
        assert_eq!(r.content, "First line second line");
    }

    #[test]
    fn test_2022_poster_day_header() {
        let lines = stacked(&["Cancer Genetics Posters - Wednesday", "PB1234*. Title"]);
        let records = run(&Session2022::new(), &[lines]);
        assert_eq!(records[0].header, "Cancer Genetics");
        assert_eq!(records[0].id, "1234");
    }

    #[test]
    fn test_2022_title_without_record_ignored() {
        let lines = stacked(&["ProgNbr 101: Orphan title", "Authors: A. Smith"]);
        assert!(run(&Session2022::new(), &[lines]).is_empty());
    }

    #[test]
    fn test_2023_discards_incomplete_predecessor() {
        let lines = stacked(&[
            "Session 101: Plenary",
            "Title: Half parsed",
            "Abstract: body without authors",
            "Title: Complete",
            "Authors: A. Smith",
            "Abstract: body",
            "Title: Also complete",
            "Authors: B. Jones",
            "Abstract: more",
        ]);

        let records = run(&Platform2023::new(), &[lines]);
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Complete", "Also complete"]);
        assert!(records.iter().all(|r| r.header == "Plenary" && r.id.is_empty()));
    }

    #[test]
    fn test_2023_header_carries_across_pages() {
        let first = stacked(&["Session 205: Functional genomics", "Title: One"]);
        let second = stacked(&["Location: Hall A", "Authors: A. Smith", "Abstract: x"]);

        let records = run(&Platform2023::new(), &[first, second]);
        assert_eq!(records[0].header, "Functional genomics");
        assert_eq!(records[0].authors, "A. Smith");
    }

    #[test]
    fn test_2023_poster_gap_starts_body() {
        let lines = vec![
            line_at("Session Title: Cancer Poster Session", 90.0),
            line_at("PB2001 † Somatic variation", 100.0),
            line_at("in tumors", 110.0),
            line_at("Authors: A. Smith,", 120.0),
            line_at("B. Jones", 130.0),
            line_at("Tumors vary.", 180.0),
            line_at("A lot.", 190.0),
        ];

        let records = run(&Poster2023::new(), &[lines]);
        let r = &records[0];
        assert_eq!(r.header, "Cancer");
        assert_eq!(r.id, "2001");
        assert_eq!(r.title, "Somatic variation in tumors");
        assert_eq!(r.authors, "A. Smith, B. Jones");
        assert_eq!(r.content, "Tumors vary. A lot.");
    }

    #[test]
    fn test_2023_poster_gap_waits_for_authors() {
        let lines = vec![
            line_at("Session Title: Cancer Poster Session", 90.0),
            line_at("PB2002 Clonal expansion", 100.0),
            line_at("in blood", 110.0),
            line_at("and bone marrow", 150.0),
            line_at("Authors: A. Smith", 160.0),
        ];

        let records = run(&Poster2023::new(), &[lines]);
        let r = &records[0];
        assert_eq!(r.title, "Clonal expansion in blood and bone marrow");
        assert_eq!(r.authors, "A. Smith");
        assert_eq!(r.content, "");
    }

    #[test]
    fn test_custom_marker_pattern() {
        let variant = Platform2023::new()
            .with_marker(Marker::Title, r"Titel:\s*(.+)")
            .unwrap();
        let lines = stacked(&["Titel: Eine Studie", "Authors: A. Smith"]);
        assert_eq!(run(&variant, &[lines])[0].title, "Eine Studie");

        assert!(Platform2023::new().with_marker(Marker::Title, "(").is_err());
    }

    #[test]
    fn test_expand_ligatures() {
        assert_eq!(expand_ligatures("eﬀect ﬁle"), "effect file");
        assert_eq!(expand_ligatures("plain"), "plain");
    }
}
