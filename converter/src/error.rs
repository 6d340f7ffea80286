//! Error types for the TSV conversion pipeline.
//!
//! Errors are split by the scope they abort:
//!
//! - [`ParseError`] - the input file cannot be read or decoded (fatal)
//! - [`RowError`] - one data row cannot be converted (row is skipped)
//! - [`SerializeError`] - an XML document could not be produced
//! - [`WriteError`] - one output file could not be written (file is skipped)
//! - [`ConvertError`] - top-level errors returned by the pipeline
//!
//! Conversion into [`ConvertError`] is automatic via `From`, so `?` works
//! across module boundaries.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while reading or decoding the TSV input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input file could not be opened or read.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The input bytes could not be decoded.
    #[error("Failed to decode input: {0}")]
    Encoding(String),

    /// The input has no content at all.
    #[error("TSV file is empty")]
    EmptyFile,

    /// The header line has no column names.
    #[error("No headers found in TSV")]
    NoHeaders,

    /// The tabular reader rejected a line.
    #[error("Line {line}: {message}")]
    Csv { line: usize, message: String },
}

impl ParseError {
    /// OS error code of the underlying I/O failure, if any.
    pub fn os_error(&self) -> Option<i32> {
        match self {
            ParseError::Io(e) => e.raw_os_error(),
            _ => None,
        }
    }
}

// =============================================================================
// Row Errors
// =============================================================================

/// Reasons a single data row is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The `dc:identifier` column is absent, empty or whitespace-only.
    #[error("Line {line}: missing dc:identifier, cannot name output files")]
    MissingIdentifier { line: usize },

    /// The identifier cannot be used as a file base name.
    #[error("Line {line}: identifier '{identifier}' is not a usable file name")]
    InvalidIdentifier { line: usize, identifier: String },

    /// The identifier was already used by an earlier row.
    #[error("Line {line}: identifier '{identifier}' already used on line {first_line}")]
    DuplicateIdentifier {
        line: usize,
        identifier: String,
        first_line: usize,
    },

    /// Cell count differs from the header.
    #[error("Line {line}: expected {expected} columns, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl RowError {
    /// Input line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            RowError::MissingIdentifier { line }
            | RowError::InvalidIdentifier { line, .. }
            | RowError::DuplicateIdentifier { line, .. }
            | RowError::MalformedRow { line, .. } => *line,
        }
    }
}

// =============================================================================
// Serialization Errors
// =============================================================================

/// Errors while rendering an XML document.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The XML writer failed.
    #[error("XML writer error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The writer produced bytes that are not UTF-8.
    #[error("Rendered document is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Output Errors
// =============================================================================

/// An output file could not be written.
#[derive(Debug, Error)]
#[error("Failed to write {}: {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Fatal errors that abort a conversion run.
///
/// Row and write failures are not in here: they are collected in the
/// [`crate::pipeline::ConversionReport`] and the run continues.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input could not be read or decoded.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// A document could not be rendered.
    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),

    /// The output directory could not be prepared.
    #[error("Output directory error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured root tag is not a valid XML element name.
    #[error("Invalid root tag '{0}': not an XML element name")]
    InvalidRootTag(String),

    /// The JSON report could not be produced.
    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for row mapping.
pub type RowResult<T> = Result<T, RowError>;

/// Result type for rendering.
pub type SerializeResult<T> = Result<T, SerializeError>;

/// Result type for pipeline operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
