//! Row mapping: one TSV row into a Dublin Core record and a macrepo record.
//!
//! Columns are looked up by their prefixed name (`dc:title`,
//! `macrepo:oldNid`), case-sensitively. A missing column reads as empty.

use crate::error::{RowError, RowResult};
use crate::models::{DcElement, MacrepoRecord, MetadataRecord};
use crate::parser::Row;

/// Column that names the output files.
pub const IDENTIFIER_COLUMN: &str = "dc:identifier";

/// Column supplying the RDF description subject.
pub const ABOUT_COLUMN: &str = "rdf:about";

/// Separator between values of the multi-valued `dc:relation` column.
pub const RELATION_SEPARATOR: char = '|';

fn cell<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// Split a raw relation cell. An empty cell gives no values.
pub fn split_relation(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(RELATION_SEPARATOR).map(str::to_string).collect()
}

/// Build the Dublin Core record for a row.
pub fn map_row_to_metadata(row: &Row) -> MetadataRecord {
    let mut record = MetadataRecord {
        about: cell(row, ABOUT_COLUMN).to_string(),
        ..Default::default()
    };

    for element in DcElement::ALL {
        let value = cell(row, &element.qualified_name());
        match record.field_mut(element) {
            Some(field) => *field = value.to_string(),
            None => record.relation = split_relation(value),
        }
    }

    record
}

/// Build the macrepo record for a row.
pub fn map_row_to_macrepo(row: &Row) -> MacrepoRecord {
    let [old_nid, notes, scale] = MacrepoRecord::COLUMNS;
    MacrepoRecord {
        old_nid: cell(row, old_nid).to_string(),
        notes: cell(row, notes).to_string(),
        scale: cell(row, scale).to_string(),
    }
}

/// The row's identifier, checked for use as an output file base name.
///
/// A whitespace-only value counts as missing.
///
/// `line` is only used for error reporting.
pub fn row_identifier(row: &Row, line: usize) -> RowResult<&str> {
    let identifier = match row.get(IDENTIFIER_COLUMN) {
        Some(id) if !id.trim().is_empty() => id.as_str(),
        _ => return Err(RowError::MissingIdentifier { line }),
    };

    let unusable = identifier == "."
        || identifier == ".."
        || identifier.contains(['/', '\\', '\0']);
    if unusable {
        return Err(RowError::InvalidIdentifier {
            line,
            identifier: identifier.to_string(),
        });
    }

    Ok(identifier)
}
