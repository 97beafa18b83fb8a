//! Extraction options and configuration.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::RawLine;

/// Font size printed page numbers use in every known layout.
pub const PAGE_NUMBER_SIZE: f32 = 9.0;

/// Banner printed next to award-finalist abstracts; never part of a record.
pub const TRAINEE_AWARD_MARKER: &str = "Trainee Award Finalist";

/// Raw lines whose tops are within this distance belong to one visual line.
pub const LINE_MERGE_TOLERANCE: f32 = 5.0;

/// Options for extracting records from a document.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Whether independent extraction units may run in parallel
    pub parallel: bool,

    /// Noise filtering and line merging parameters
    pub noise: NoiseFilter,

    /// Page sections overriding the layout's own split
    pub sections: Option<Vec<PageSection>>,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the noise filter.
    pub fn with_noise_filter(mut self, noise: NoiseFilter) -> Self {
        self.noise = noise;
        self
    }

    /// Split the document into explicit page sections.
    pub fn with_sections(mut self, sections: Vec<PageSection>) -> Self {
        self.sections = Some(sections);
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            noise: NoiseFilter::default(),
            sections: None,
        }
    }
}

/// Rules for dropping raw lines that never carry record text.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseFilter {
    /// First-span font size of printed page numbers
    pub page_number_size: f32,

    /// Phrases marking badge lines
    pub marker_phrases: Vec<String>,

    /// Maximum top-edge distance for merging raw lines
    pub merge_tolerance: f32,
}

impl NoiseFilter {
    /// Create the default filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page-number font size.
    pub fn with_page_number_size(mut self, size: f32) -> Self {
        self.page_number_size = size;
        self
    }

    /// Add a marker phrase.
    pub fn with_marker(mut self, phrase: impl Into<String>) -> Self {
        self.marker_phrases.push(phrase.into());
        self
    }

    /// Set the merge tolerance.
    pub fn with_merge_tolerance(mut self, tolerance: f32) -> Self {
        self.merge_tolerance = tolerance;
        self
    }

    /// Check whether a raw line should be dropped.
    ///
    /// Lines without any non-blank span are always dropped, so they can
    /// neither open nor extend a merged line.
    pub fn is_noise(&self, line: &RawLine) -> bool {
        if line.is_blank() {
            return true;
        }
        let text = line.text();
        self.is_page_number(line, &text) || self.is_marker(&text)
    }

    fn is_page_number(&self, line: &RawLine, text: &str) -> bool {
        let digits = text.trim();
        line.first_size()
            .is_some_and(|size| same_size(size, self.page_number_size))
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
    }

    fn is_marker(&self, text: &str) -> bool {
        self.marker_phrases.iter().any(|p| text.contains(p.as_str()))
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self {
            page_number_size: PAGE_NUMBER_SIZE,
            marker_phrases: vec![TRAINEE_AWARD_MARKER.to_string()],
            merge_tolerance: LINE_MERGE_TOLERANCE,
        }
    }
}

/// Compare font sizes as reported by the extraction facility.
pub(crate) fn same_size(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

/// A labeled, 0-based, half-open range of pages extracted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSection {
    /// Section name carried onto the record set
    pub label: String,
    /// First page index
    pub start: usize,
    /// One past the last page index
    pub end: usize,
}

impl PageSection {
    /// Create a new section.
    pub fn new(label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    /// Page indices covered by this section, clamped to `page_count`.
    pub fn clamped(&self, page_count: usize) -> Range<usize> {
        let end = self.end.min(page_count);
        self.start.min(end)..end
    }
}

impl fmt::Display for PageSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}..{}", self.label, self.start, self.end)
    }
}

impl FromStr for PageSection {
    type Err = Error;

    /// Parse `LABEL=START..END`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPageRange(s.to_string());

        let (label, range) = s.split_once('=').ok_or_else(invalid)?;
        let (start, end) = range.split_once("..").ok_or_else(invalid)?;
        let start: usize = start.trim().parse().map_err(|_| invalid())?;
        let end: usize = end.trim().parse().map_err(|_| invalid())?;

        if label.trim().is_empty() || start > end {
            return Err(invalid());
        }
        Ok(Self::new(label.trim(), start, end))
    }
}
