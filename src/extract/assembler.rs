//! Record assembly and continuation repair.

use crate::model::{Field, Record, Stage};

/// Remove a line-break hyphen from the end of `field`.
///
/// When the field (ignoring trailing whitespace) ends with `-`, the
/// whitespace and the hyphen are dropped so the next fragment joins the
/// broken word. Any other field is left untouched.
pub fn repair_continuation(field: &mut String) {
    let trimmed = field.trim_end();
    if let Some(stem) = trimmed.strip_suffix('-') {
        let len = stem.len();
        field.truncate(len);
    }
}

/// Whether a title reads as finished.
pub fn is_title_end(title: &str) -> bool {
    title.trim_end().ends_with(['.', '!', '?'])
}

/// Whether an author list reads as finished.
pub fn is_authors_end(authors: &str) -> bool {
    authors.trim_end().ends_with('.')
}

/// Ordered, append-only list of records for one extraction unit.
#[derive(Debug, Clone, Default)]
pub struct RecordAssembler {
    records: Vec<Record>,
}

impl RecordAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new record.
    pub fn open(&mut self, record: Record) {
        self.records.push(record);
    }

    /// The record currently being filled.
    pub fn current(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Mutable access to the record currently being filled.
    pub fn current_mut(&mut self) -> Option<&mut Record> {
        self.records.last_mut()
    }

    /// Append `text` and a separating space to a field of the current record.
    ///
    /// Returns `false` when there is no record yet.
    pub fn append(&mut self, field: Field, text: &str) -> bool {
        self.push(field, text, true)
    }

    /// Append `text` without a trailing separator.
    pub fn append_bare(&mut self, field: Field, text: &str) -> bool {
        self.push(field, text, false)
    }

    fn push(&mut self, field: Field, text: &str, separate: bool) -> bool {
        let Some(record) = self.records.last_mut() else {
            return false;
        };
        let value = record.field_mut(field);
        repair_continuation(value);
        value.push_str(text);
        if separate {
            value.push(' ');
        }
        true
    }

    /// Replace the identifier of the current record.
    pub fn set_id(&mut self, id: &str) -> bool {
        match self.records.last_mut() {
            Some(record) => {
                record.id = id.to_string();
                true
            }
            None => false,
        }
    }

    /// Drop the current record if it lacks authors or content.
    pub fn discard_incomplete(&mut self) -> Option<Record> {
        if self.current().is_some_and(|r| !r.is_complete()) {
            let dropped = self.records.pop();
            if let Some(ref r) = dropped {
                log::debug!("Discarding incomplete record {:?}", r.title.trim_end());
            }
            dropped
        } else {
            None
        }
    }

    /// Stage to resume in when a page opens mid-record.
    ///
    /// An unfinished title resumes the title, an author list without a
    /// closing period resumes the authors, anything else is body text.
    pub fn resume_stage(&self) -> Option<Stage> {
        let record = self.current()?;
        Some(if !is_title_end(&record.title) {
            Stage::Title
        } else if !is_authors_end(&record.authors) {
            Stage::Authors
        } else {
            Stage::Content
        })
    }

    /// Number of records so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no record was opened.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finish assembly, trimming trailing whitespace from every field.
    pub fn finish(self) -> Vec<Record> {
        let mut records = self.records;
        records.iter_mut().for_each(Record::trim_end);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_joins_hyphenated_word() {
        let mut field = String::from("We show that gene- ");
        repair_continuation(&mut field);
        field.push_str("tics matter.");
        assert_eq!(field, "We show that genetics matter.");
    }

    #[test]
    fn test_repair_leaves_other_text() {
        let mut field = String::from("ends with period. ");
        repair_continuation(&mut field);
        assert_eq!(field, "ends with period. ");

        let mut empty = String::new();
        repair_continuation(&mut empty);
        assert_eq!(empty, "");
    }

    #[test]
    fn test_repair_is_idempotent() {
        let mut field = String::from("gene-");
        repair_continuation(&mut field);
        repair_continuation(&mut field);
        assert_eq!(field, "gene");
    }

    #[test]
    fn test_append_without_record_is_noop() {
        let mut assembler = RecordAssembler::new();
        assert!(!assembler.append(Field::Content, "orphan"));
        assert!(!assembler.set_id("1"));
        assert!(assembler.is_empty());
    }

    #[test]
    fn test_append_repairs_and_separates() {
        let mut assembler = RecordAssembler::new();
        assembler.open(Record::with_header("Session A"));
        assembler.append(Field::Content, "We show that gene-");
        assembler.append(Field::Content, "tics matter.");

        let records = assembler.finish();
        assert_eq!(records[0].content, "We show that genetics matter.");
        assert_eq!(records[0].header, "Session A");
    }

    #[test]
    fn test_fields_only_grow() {
        let appends = [
            (Field::Title, "Rare variants in"),
            (Field::Title, "cardiomyo-"),
            (Field::Title, "pathy."),
            (Field::Authors, "A. Smith,"),
            (Field::Authors, "B. Jones."),
            (Field::Content, "We sequenced"),
            (Field::Content, "1,200 exomes and found vari-"),
            (Field::Content, "ants in known genes."),
        ];

        let mut assembler = RecordAssembler::new();
        assembler.open(Record::with_header("Cardiovascular"));
        for (field, text) in appends {
            let snapshot = assembler.current().unwrap().clone();
            let before = snapshot.field(field).to_string();
            assembler.append(field, text);
            let record = assembler.current().unwrap();
            let after = record.field(field);

            // only a line-break hyphen and the whitespace after it may go
            let kept = match before.trim_end().strip_suffix('-') {
                Some(stem) => stem,
                None => before.as_str(),
            };
            assert!(after.starts_with(kept), "{field} shrank: {before:?} -> {after:?}");
            assert!(after.len() > kept.len());
            for other in Field::ALL.into_iter().filter(|f| *f != field) {
                assert_eq!(record.field(other), snapshot.field(other));
            }
        }

        let records = assembler.finish();
        assert_eq!(records[0].title, "Rare variants in cardiomyopathy.");
        assert_eq!(
            records[0].content,
            "We sequenced 1,200 exomes and found variants in known genes."
        );
    }

    #[test]
    fn test_discard_incomplete() {
        let mut assembler = RecordAssembler::new();
        assembler.open(Record::default());
        assembler.append(Field::Content, "body only");
        assert!(assembler.discard_incomplete().is_some());
        assert!(assembler.is_empty());

        assembler.open(Record::default());
        assembler.append(Field::Authors, "A. Smith");
        assembler.append(Field::Content, "body");
        assert!(assembler.discard_incomplete().is_none());
        assert_eq!(assembler.len(), 1);
    }

    #[test]
    fn test_resume_stage() {
        let mut assembler = RecordAssembler::new();
        assert_eq!(assembler.resume_stage(), None);

        assembler.open(Record::with_id("1234", ""));
        assembler.append(Field::Title, "An unfinished");
        assert_eq!(assembler.resume_stage(), Some(Stage::Title));

        assembler.append(Field::Title, "title.");
        assembler.append(Field::Authors, "A. Smith, B. Jones");
        assert_eq!(assembler.resume_stage(), Some(Stage::Authors));

        assembler.append(Field::Authors, "Univ of Y.");
        assert_eq!(assembler.resume_stage(), Some(Stage::Content));
    }
}
