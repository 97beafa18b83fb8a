//! Extracted abstract records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One extracted abstract.
///
/// Every field is always present; fields a layout does not track stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Program/poster number, empty for layouts without identifiers
    pub id: String,
    /// Abstract title
    pub title: String,
    /// Author list as printed
    pub authors: String,
    /// Author affiliations
    pub affiliations: String,
    /// Abstract body
    pub content: String,
    /// Session or topic label
    pub header: String,
}

impl Record {
    /// Create an empty record under the given header.
    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Default::default()
        }
    }

    /// Create an empty record with an identifier and header.
    pub fn with_id(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            ..Default::default()
        }
    }

    /// Borrow a field by name.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Title => &self.title,
            Field::Authors => &self.authors,
            Field::Affiliations => &self.affiliations,
            Field::Content => &self.content,
            Field::Header => &self.header,
        }
    }

    /// Mutably borrow a field by name.
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::Authors => &mut self.authors,
            Field::Affiliations => &mut self.affiliations,
            Field::Content => &mut self.content,
            Field::Header => &mut self.header,
        }
    }

    /// Whether both authors and content were captured.
    pub fn is_complete(&self) -> bool {
        !self.authors.is_empty() && !self.content.is_empty()
    }

    /// Trim trailing whitespace from every field.
    pub fn trim_end(&mut self) {
        for field in Field::ALL {
            let value = self.field_mut(field);
            let len = value.trim_end().len();
            value.truncate(len);
        }
    }
}

/// Named record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Title,
    Authors,
    Affiliations,
    Content,
    Header,
}

impl Field {
    /// All fields in output column order.
    pub const ALL: [Field; 6] = [
        Field::Id,
        Field::Title,
        Field::Authors,
        Field::Affiliations,
        Field::Content,
        Field::Header,
    ];

    /// Column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Authors => "authors",
            Field::Affiliations => "affiliations",
            Field::Content => "content",
            Field::Header => "header",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The field currently being accumulated while walking a page's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Title,
    Authors,
    Affiliations,
    Content,
}

impl Stage {
    /// The record field this stage appends to.
    pub fn field(self) -> Field {
        match self {
            Stage::Title => Field::Title,
            Stage::Authors => Field::Authors,
            Stage::Affiliations => Field::Affiliations,
            Stage::Content => Field::Content,
        }
    }
}

/// An ordered sequence of records from one extraction unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Section label for layouts split into page ranges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Records in reading order
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Create an unlabeled record set.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            label: None,
            records,
        }
    }

    /// Create a labeled record set.
    pub fn labeled(label: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            label: Some(label.into()),
            records,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Find a record by identifier.
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_end_all_fields() {
        let mut record = Record::with_id("42 ", "Genomics  ");
        record.title.push_str("A Study of X  ");
        record.content.push_str("  body\n");
        record.trim_end();

        assert_eq!(record.id, "42");
        assert_eq!(record.header, "Genomics");
        assert_eq!(record.title, "A Study of X");
        assert_eq!(record.content, "  body");
        assert_eq!(record.affiliations, "");
    }

    #[test]
    fn test_stage_fields() {
        assert_eq!(Stage::Title.field(), Field::Title);
        assert_eq!(Stage::Affiliations.field(), Field::Affiliations);
    }

    #[test]
    fn test_record_serializes_every_field() {
        let json = serde_json::to_string(&Record::default()).unwrap();
        for field in Field::ALL {
            assert!(json.contains(&format!("\"{}\":\"\"", field)));
        }
    }

    #[test]
    fn test_completeness() {
        let mut record = Record::default();
        record.content.push_str("x");
        assert!(!record.is_complete());
        record.authors.push_str("A. Smith");
        assert!(record.is_complete());
    }
}
