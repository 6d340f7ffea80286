//! # tsv-convert - TSV to Dublin Core and macrepo XML
//!
//! Turns each row of a tab-separated metadata export into two XML records
//! named after the row's `dc:identifier`: a Dublin Core document and a
//! macrepo bookkeeping document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  TSV File   │────▶│   Parser    │────▶│   Mapper    │────▶│ Serializer  │──▶ <ID>-DC.xml
//! │ (UTF8/ISO)  │     │ (auto-enc)  │     │ (row→record)│     │ (XML / RDF) │──▶ <ID>-macrepo.xml
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tsv_convert::{convert_file, ConvertOptions};
//!
//! let report = convert_file(Path::new("input.tsv"), &ConvertOptions::default()).unwrap();
//! println!("Converted {} rows", report.rows_converted);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per failure scope
//! - [`models`] - Records, element names, namespaces
//! - [`parser`] - TSV decoding
//! - [`mapper`] - Row to record mapping
//! - [`serializer`] - XML and RDF/XML rendering
//! - [`pipeline`] - File-level conversion driver

// Core modules
pub mod error;
pub mod models;

// Input
pub mod parser;
pub mod mapper;

// Output
pub mod serializer;
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConvertError, ParseError, RowError, SerializeError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    DcElement,
    MacrepoRecord,
    MetadataRecord,
    OutputKind,
    RenderedDocument,
    DC_NS,
    MACREPO_NS,
    XSI_NS,
};

// =============================================================================
// Re-exports - Parsing and mapping
// =============================================================================

pub use parser::{parse_bytes, parse_tsv, parse_tsv_file, ParsedTsv, RawRow, Row};

pub use mapper::{map_row_to_macrepo, map_row_to_metadata, row_identifier, split_relation};

// =============================================================================
// Re-exports - Serializer
// =============================================================================

pub use serializer::{escape_xml, render_as_rdf, render_as_xml, render_macrepo};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    convert_bytes,
    convert_file,
    convert_rows,
    ConversionReport,
    ConvertOptions,
    DcFormat,
};
