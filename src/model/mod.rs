//! Data model for positioned text input and extracted records.
//!
//! The input side (`Document` → `Page` → `Block` → `RawLine` → `Span`)
//! mirrors the "dict" dump of a text-extraction facility. The output side
//! is the flat `Record` shared by every layout.

mod document;
mod geometry;
mod page;
mod record;

pub use document::Document;
pub use geometry::BBox;
pub(crate) use page::join_span_text;
pub use page::{Block, Page, RawLine, Span};
pub use record::{Field, Record, RecordSet, Stage};
