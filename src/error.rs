//! Error types for unabstract library.

use std::io;
use thiserror::Error;

/// Result type alias for unabstract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, extracting, or rendering.
///
/// The extraction engine itself degrades malformed lines to no-ops, so these
/// errors come from the edges: reading page dumps, compiling user-supplied
/// patterns, and serializing output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The page dump or patch file is not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field marker pattern failed to compile.
    #[error("Invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The layout name does not match any known variant.
    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}
