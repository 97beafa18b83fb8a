//! Per-unit extraction state carried from page to page.

use crate::model::{BBox, Record, Stage};

use super::assembler::RecordAssembler;

/// Mutable state for one extraction unit (a document or a page section).
///
/// Records and the session header survive page breaks; the stage cursor and
/// the reference left edge do not. When a page starts with no stage, the
/// layout decides how to pick one up again, either from
/// [`RecordAssembler::resume_stage`] or by defaulting to body text.
#[derive(Debug, Default)]
pub struct ExtractionContext {
    /// Records assembled so far
    pub assembler: RecordAssembler,
    /// Field currently accumulating on this page
    pub stage: Option<Stage>,
    /// Session header applied to records opened from now on
    pub header: String,
    /// Left edge of the current record's identifier line
    pub left_edge: Option<f32>,
    /// Box of the last line that fed the vertical-gap rule
    pub gap_anchor: Option<BBox>,
    /// Pages processed so far
    pub pages_seen: usize,
}

impl ExtractionContext {
    /// Create a fresh context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-page cursor before walking a new page.
    pub fn begin_page(&mut self) {
        self.stage = None;
        self.left_edge = None;
        self.pages_seen += 1;
    }

    /// Open a record and make `stage` current.
    pub fn open(&mut self, record: Record, stage: Stage) {
        self.assembler.open(record);
        self.stage = Some(stage);
    }

    /// Finish the unit and return its records.
    pub fn finish(self) -> Vec<Record> {
        log::debug!(
            "Assembled {} records over {} pages",
            self.assembler.len(),
            self.pages_seen
        );
        self.assembler.finish()
    }
}
