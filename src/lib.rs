//! # unabstract
//!
//! Layout-aware record extraction from conference abstract books.
//!
//! This library reads the positioned text of a PDF page dump (pages,
//! blocks, lines, spans with font and bounding box) and turns it into flat
//! abstract records: identifier, title, authors, affiliations, body text,
//! and session header.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unabstract::{extract_file, render, Layout};
//!
//! fn main() -> unabstract::Result<()> {
//!     // Extract abstracts from a page dump
//!     let extraction = extract_file("abstracts-2019.json", Layout::Labeled2019)?;
//!
//!     // Render as JSON
//!     let json = render::to_json(&extraction, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Six layouts**: from two-column typeset volumes to labeled exports
//! - **Line reconstruction**: noise filtering and same-band merging
//! - **Column segmentation**: column-major reading order with topic banners
//! - **Continuation repair**: hyphen-broken words rejoined across lines
//! - **Parallel processing**: uses Rayon for page sections and batches
//! - **Corrections**: record patches and header assignment by id range

pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod refine;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{Extraction, Extractor, Layout, LayoutVariant};
pub use model::{BBox, Block, Document, Field, Page, RawLine, Record, RecordSet, Span};
pub use parser::{ExtractOptions, NoiseFilter, PageSection};
pub use refine::{apply_patches, assign_headers, HeaderRange, RecordPatch};
pub use render::JsonFormat;

use std::path::Path;

/// Extract records from a loaded document with default options.
///
/// # Example
///
/// ```
/// use unabstract::{extract_document, Document, Layout};
///
/// let extraction = extract_document(&Document::new(), Layout::Typeset);
/// assert_eq!(extraction.layout, "2013-2018");
/// ```
pub fn extract_document(document: &Document, layout: Layout) -> Extraction {
    Extractor::new(layout).extract(document)
}

/// Load a page dump from a JSON file and extract its records.
///
/// # Arguments
///
/// * `path` - Path to the JSON page dump
/// * `layout` - Layout of the proceedings volume
///
/// # Example
///
/// ```no_run
/// use unabstract::{extract_file, Layout};
///
/// let extraction = extract_file("abstracts-2022.json", Layout::Session2022).unwrap();
/// println!("Records: {}", extraction.record_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P, layout: Layout) -> Result<Extraction> {
    let document = Document::from_path(path)?;
    Ok(extract_document(&document, layout))
}

/// Load a page dump and extract its records with custom options.
///
/// # Example
///
/// ```no_run
/// use unabstract::{extract_file_with_options, ExtractOptions, Layout};
///
/// let options = ExtractOptions::new().sequential();
/// let extraction =
///     extract_file_with_options("abstracts-2021.json", Layout::Sectioned2021, options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    layout: Layout,
    options: ExtractOptions,
) -> Result<Extraction> {
    let document = Document::from_path(path)?;
    Ok(Extractor::new(layout).with_options(options).extract(&document))
}

/// Load a page dump, extract it, and render the result as JSON.
///
/// # Example
///
/// ```no_run
/// use unabstract::{to_json, JsonFormat, Layout};
///
/// let json = to_json("abstracts-2023.json", Layout::Platform2023, JsonFormat::Compact).unwrap();
/// std::fs::write("abstracts-2023.records.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, layout: Layout, format: JsonFormat) -> Result<String> {
    let extraction = extract_file(path, layout)?;
    render::to_json(&extraction, format)
}
