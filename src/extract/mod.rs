//! Record extraction: the field-state machine and its layout variants.
//!
//! An [`Extractor`] pairs a [`LayoutVariant`] with [`ExtractOptions`]. Each
//! extraction unit (the whole document, or one page section) gets a fresh
//! [`ExtractionContext`]; pages are walked strictly in order inside a unit,
//! while independent units may run in parallel.

mod assembler;
mod context;
mod labeled;
mod typeset;
mod variant;

pub use assembler::{is_authors_end, is_title_end, repair_continuation, RecordAssembler};
pub use context::ExtractionContext;
pub use labeled::{
    expand_ligatures, sections_2021, ContentGap, LabelRules, Labeled2019, Marker, Markers,
    Platform2023, Poster2023, Sectioned2021, Session2022, TitleAction, TopicAction,
    AFFILIATION_CONTENT_GAP, POSTER_CONTENT_GAP, SESSION_LINK_SIZE,
};
pub use typeset::{
    Typeset, IDENTIFIER_OVERRIDES, IDENTIFIER_SIZE, LEFT_EDGE_TOLERANCE, RIGHT_EDGE_TOLERANCE,
};
pub use variant::{Layout, LayoutVariant, TitleMatch};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{Document, Page, Record, RecordSet};
use crate::parser::{segment_page, single_column, ExtractOptions, PageLines, PageSection};

/// Records extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Name of the layout used
    pub layout: String,
    /// One set per extraction unit, in section order
    pub sets: Vec<RecordSet>,
}

impl Extraction {
    /// All records across sets, in order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.sets.iter().flat_map(|s| s.iter())
    }

    /// Total number of records.
    pub fn record_count(&self) -> usize {
        self.sets.iter().map(RecordSet::len).sum()
    }

    /// Flatten into a single record list.
    pub fn into_records(self) -> Vec<Record> {
        self.sets.into_iter().flat_map(|s| s.records).collect()
    }
}

/// Extracts records from documents with one layout.
///
/// # Example
///
/// ```
/// use unabstract::{Document, ExtractOptions, Extractor, Layout};
///
/// let extractor = Extractor::new(Layout::Labeled2019)
///     .with_options(ExtractOptions::new().sequential());
/// let extraction = extractor.extract(&Document::new());
/// assert_eq!(extraction.record_count(), 0);
/// ```
#[derive(Debug)]
pub struct Extractor {
    variant: Box<dyn LayoutVariant>,
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor for a built-in layout.
    pub fn new(layout: Layout) -> Self {
        Self {
            variant: layout.variant(),
            options: ExtractOptions::default(),
        }
    }

    /// Create an extractor around a custom or reconfigured variant.
    pub fn with_variant<V: LayoutVariant + 'static>(variant: V) -> Self {
        Self {
            variant: Box::new(variant),
            options: ExtractOptions::default(),
        }
    }

    /// Set extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// The layout strategy in use.
    pub fn variant(&self) -> &dyn LayoutVariant {
        self.variant.as_ref()
    }

    /// The extraction options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Read one page into ordered lines as the layout expects them.
    pub fn page_lines(&self, page: &Page) -> PageLines {
        if self.variant.is_two_column() {
            segment_page(page, &self.options.noise)
        } else {
            single_column(page, &self.options.noise)
        }
    }

    /// Extract records from a run of pages treated as one unit.
    pub fn extract_pages(&self, pages: &[Page]) -> Vec<Record> {
        let mut ctx = ExtractionContext::new();
        for page in pages {
            let PageLines { lines, topic } = self.page_lines(page);
            ctx.begin_page();
            self.variant.extract_page(&lines, &topic, &mut ctx);
        }
        ctx.finish()
    }

    /// Extract all records from a document.
    ///
    /// Layouts with page sections (or options overriding them) produce one
    /// labeled set per section; everything else produces a single set.
    pub fn extract(&self, document: &Document) -> Extraction {
        let sections = self
            .options
            .sections
            .as_deref()
            .unwrap_or_else(|| self.variant.sections());

        let sets = if sections.is_empty() {
            vec![RecordSet::new(self.extract_pages(&document.pages))]
        } else {
            let run = |section: &PageSection| self.extract_section(document, section);
            if self.options.parallel {
                sections.par_iter().map(run).collect()
            } else {
                sections.iter().map(run).collect()
            }
        };

        let extraction = Extraction {
            layout: self.variant.name().to_string(),
            sets,
        };
        log::debug!(
            "Extracted {} records from {} pages with layout {}",
            extraction.record_count(),
            document.page_count(),
            extraction.layout
        );
        extraction
    }

    fn extract_section(&self, document: &Document, section: &PageSection) -> RecordSet {
        let range = section.clamped(document.page_count());
        if range != (section.start..section.end) {
            log::warn!(
                "Section {} clamped to pages {}..{} of {}",
                section,
                range.start,
                range.end,
                document.page_count()
            );
        }
        RecordSet::labeled(
            section.label.clone(),
            self.extract_pages(&document.pages[range]),
        )
    }

    /// Extract several independent documents.
    pub fn extract_all(&self, documents: &[Document]) -> Vec<Extraction> {
        if self.options.parallel {
            documents.par_iter().map(|d| self.extract(d)).collect()
        } else {
            documents.iter().map(|d| self.extract(d)).collect()
        }
    }
}
