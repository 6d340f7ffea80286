//! TSV reader with encoding auto-detection.
//!
//! Turns raw bytes into a header plus data rows. Cells are kept verbatim:
//! no quoting, no trimming. Column-count checks happen per row in
//! [`ParsedTsv::row`] so one bad line never aborts the whole file.

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{ParseError, ParseResult, RowError, RowResult};

/// A data row keyed by header column name.
pub type Row = HashMap<String, String>;

/// One data line as split from the input, before header matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based record number as counted by the reader (the header is 1).
    pub line: usize,
    pub cells: Vec<String>,
}

/// A decoded TSV document.
#[derive(Debug, Clone)]
pub struct ParsedTsv {
    /// Column names from the first line.
    pub headers: Vec<String>,
    /// Data lines, empty lines removed.
    pub rows: Vec<RawRow>,
    /// Detected or used encoding.
    pub encoding: String,
}

impl ParsedTsv {
    /// Match a raw row against the header.
    ///
    /// A row whose cell count differs from the header is rejected with
    /// [`RowError::MalformedRow`].
    pub fn row(&self, raw: &RawRow) -> RowResult<Row> {
        if raw.cells.len() != self.headers.len() {
            return Err(RowError::MalformedRow {
                line: raw.line,
                expected: self.headers.len(),
                found: raw.cells.len(),
            });
        }

        Ok(self
            .headers
            .iter()
            .cloned()
            .zip(raw.cells.iter().cloned())
            .collect())
    }
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 wins outright; anything else goes through chardet. Charsets
/// chardet reports but encoding_rs cannot decode fall back to lossy UTF-8.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other if encoding_rs::Encoding::for_label(other.as_bytes()).is_some() => charset,
        _ => "utf-8".to_string(),
    }
}

/// Decode bytes to a string using the given encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ParseResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned()),
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::mem::decode_latin1(bytes).into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => {
                return Err(ParseError::Encoding(format!(
                    "unsupported encoding '{}'",
                    encoding
                )))
            }
        },
    };

    Ok(decoded)
}

/// Parse decoded TSV content.
///
/// # Example
/// ```
/// use tsv_convert::parser::parse_tsv;
///
/// let tsv = parse_tsv("dc:identifier\tdc:title\nrec1\tHello World\n").unwrap();
/// assert_eq!(tsv.headers, vec!["dc:identifier", "dc:title"]);
/// assert_eq!(tsv.rows[0].cells, vec!["rec1", "Hello World"]);
/// ```
pub fn parse_tsv(content: &str) -> ParseResult<ParsedTsv> {
    parse_tsv_with_encoding(content, "utf-8".to_string())
}

fn parse_tsv_with_encoding(content: &str, encoding: String) -> ParseResult<ParsedTsv> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .has_headers(false)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(csv_error)?,
        None => return Err(ParseError::EmptyFile),
    };
    let headers: Vec<String> = header.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ParseError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(csv_error)?;
        if is_empty_line(&record) {
            continue;
        }
        rows.push(RawRow {
            line: record.position().map_or(0, |p| p.line() as usize),
            cells: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(ParsedTsv {
        headers,
        rows,
        encoding,
    })
}

/// Parse raw TSV bytes with encoding auto-detection.
pub fn parse_bytes(bytes: &[u8]) -> ParseResult<ParsedTsv> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    parse_tsv_with_encoding(&content, encoding)
}

/// Read and parse a TSV file.
///
/// Open failures surface as [`ParseError::Io`] with the OS error intact.
pub fn parse_tsv_file<P: AsRef<Path>>(path: P) -> ParseResult<ParsedTsv> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes)
}

/// A line with no bytes at all. Whitespace-only lines are kept so the
/// mapper reports them.
fn is_empty_line(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

fn csv_error(err: csv::Error) -> ParseError {
    ParseError::Csv {
        line: err.position().map_or(0, |p| p.line() as usize),
        message: err.to_string(),
    }
}
