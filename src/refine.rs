//! Post-extraction corrections.
//!
//! Some abstracts come out of every layout slightly wrong (a title split by
//! a figure, a header the page never prints). These helpers apply a small
//! correction table to an extracted [`RecordSet`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Field, Record, RecordSet};

/// Replacement values for one record, matched by identifier.
///
/// Only the fields that are present replace the extracted text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    /// Identifier of the record to patch
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl RecordPatch {
    /// Create an empty patch for `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set a replacement value. Setting [`Field::Id`] is ignored.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            Field::Id => {}
            Field::Title => self.title = value,
            Field::Authors => self.authors = value,
            Field::Affiliations => self.affiliations = value,
            Field::Content => self.content = value,
            Field::Header => self.header = value,
        }
        self
    }

    /// Load a JSON array of patches.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        load_json(path)
    }

    fn apply(&self, record: &mut Record) {
        let replacements = [
            (Field::Title, &self.title),
            (Field::Authors, &self.authors),
            (Field::Affiliations, &self.affiliations),
            (Field::Content, &self.content),
            (Field::Header, &self.header),
        ];
        for (field, value) in replacements {
            if let Some(value) = value {
                *record.field_mut(field) = value.clone();
            }
        }
    }
}

/// Apply patches to every record with a matching identifier.
///
/// Returns the number of records changed. Patches without a matching
/// record are logged and skipped.
pub fn apply_patches(set: &mut RecordSet, patches: &[RecordPatch]) -> usize {
    let mut patched = 0;
    for patch in patches {
        let mut matched = false;
        for record in set.records.iter_mut().filter(|r| r.id == patch.id) {
            patch.apply(record);
            matched = true;
            patched += 1;
        }
        if !matched {
            log::warn!("No record with id {:?} to patch", patch.id);
        }
    }
    patched
}

/// A header covering an inclusive range of numeric identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRange {
    /// Header to assign
    pub header: String,
    /// First identifier in the range
    pub start: u32,
    /// Last identifier in the range
    pub end: u32,
}

impl HeaderRange {
    /// Create a new header range.
    pub fn new(header: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            header: header.into(),
            start,
            end,
        }
    }

    /// Whether `id` falls inside the range.
    pub fn contains(&self, id: u32) -> bool {
        (self.start..=self.end).contains(&id)
    }

    /// Load a JSON array of header ranges.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        load_json(path)
    }
}

/// Assign headers to records by identifier range.
///
/// The first range containing a record's numeric identifier wins. Records
/// with non-numeric identifiers or outside every range keep their header.
/// Returns the number of records assigned.
pub fn assign_headers(set: &mut RecordSet, ranges: &[HeaderRange]) -> usize {
    let mut assigned = 0;
    for record in &mut set.records {
        let Ok(id) = record.id.trim().parse::<u32>() else {
            continue;
        };
        if let Some(range) = ranges.iter().find(|r| r.contains(id)) {
            record.header = range.header.clone();
            assigned += 1;
        }
    }
    assigned
}

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
