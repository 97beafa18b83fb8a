//! JSON rendering for extraction results.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::Extraction;
use crate::model::Record;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an extraction to a single JSON document.
pub fn to_json(extraction: &Extraction, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(extraction),
        JsonFormat::Compact => serde_json::to_string(extraction),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// One JSON Lines row: a record tagged with its layout and section.
#[derive(Serialize)]
struct Row<'a> {
    layout: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<&'a str>,
    #[serde(flatten)]
    record: &'a Record,
}

/// Convert an extraction to JSON Lines, one record per line.
pub fn to_json_lines(extraction: &Extraction) -> Result<String> {
    let mut out = String::new();
    for set in &extraction.sets {
        for record in set {
            let row = Row {
                layout: &extraction.layout,
                section: set.label.as_deref(),
                record,
            };
            let line = serde_json::to_string(&row)
                .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;
            out.push_str(&line);
            out.push('\n');
        }
    }
    Ok(out)
}
