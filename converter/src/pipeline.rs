//! Conversion driver: TSV file in, XML files out.
//!
//! Rows are handled one at a time, in input order. Each accepted row is
//! mapped, rendered and written before the next one is looked at. Bad rows
//! and failed writes are logged, collected in the [`ConversionReport`] and
//! skipped; only an unreadable input aborts the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tsv_convert::pipeline::{convert_file, ConvertOptions};
//!
//! let report = convert_file(Path::new("records.tsv"), &ConvertOptions::default())?;
//! println!("{}", report.summary());
//! # Ok::<(), tsv_convert::error::ConvertError>(())
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ConvertError, ConvertResult, RowError, SerializeResult, WriteError};
use crate::mapper::{map_row_to_macrepo, map_row_to_metadata, row_identifier};
use crate::models::{OutputKind, RenderedDocument, DC_NS};
use crate::parser::{parse_bytes, parse_tsv_file, ParsedTsv, Row};
use crate::serializer::{
    is_url, is_xml_name, render_as_rdf, render_as_xml, render_macrepo, DEFAULT_ROOT_TAG,
};

/// Which Dublin Core serializations to write for each row.
///
/// The macrepo document is always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DcFormat {
    /// Plain XML (`<ID>-DC.xml`).
    #[default]
    Xml,
    /// RDF/XML (`<ID>-RDF.xml`).
    Rdf,
    /// Both of the above.
    Both,
}

impl DcFormat {
    fn kinds(&self) -> &'static [OutputKind] {
        match self {
            Self::Xml => &[OutputKind::DublinCore],
            Self::Rdf => &[OutputKind::DublinCoreRdf],
            Self::Both => &[OutputKind::DublinCore, OutputKind::DublinCoreRdf],
        }
    }
}

/// Options for a conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertOptions {
    /// Directory receiving the output files
    pub output_dir: PathBuf,

    /// `xsi:schemaLocation` of the plain Dublin Core documents
    pub schema_location: String,

    /// Root element of the plain Dublin Core documents
    pub root_tag: String,

    /// Dublin Core serializations to write
    pub format: DcFormat,
}

impl ConvertOptions {
    /// Reject options that would produce ill-formed documents.
    pub fn validate(&self) -> ConvertResult<()> {
        if !is_xml_name(&self.root_tag) {
            return Err(ConvertError::InvalidRootTag(self.root_tag.clone()));
        }
        Ok(())
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            schema_location: DC_NS.to_string(),
            root_tag: DEFAULT_ROOT_TAG.to_string(),
            format: DcFormat::default(),
        }
    }
}

/// A row left out of the output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

/// An output file that could not be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Options the run used
    pub options: ConvertOptions,
    /// Encoding the input was decoded with
    pub encoding: String,
    /// Non-empty data rows in the input
    pub rows_read: usize,
    /// Rows whose files were all written
    pub rows_converted: usize,
    /// Files written, in order
    pub files_written: Vec<PathBuf>,
    /// Rows skipped before any file was written
    pub skipped: Vec<SkippedRow>,
    /// Files that failed to write
    pub write_failures: Vec<WriteFailure>,
}

impl ConversionReport {
    /// True when every row produced all of its files.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.write_failures.is_empty()
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "Converted {}/{} rows: {} files written, {} rows skipped, {} write failures",
            self.rows_converted,
            self.rows_read,
            self.files_written.len(),
            self.skipped.len(),
            self.write_failures.len()
        )
    }

    fn skip(&mut self, err: RowError) {
        warn!(line = err.line(), "Skipping row: {}", err);
        self.skipped.push(SkippedRow {
            line: err.line(),
            reason: err.to_string(),
        });
    }
}

/// Convert a TSV file.
///
/// Fails only if the input cannot be read or decoded, the options are
/// invalid, or the output directory cannot be created. Files written before a failure stay.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> ConvertResult<ConversionReport> {
    info!(input = %path.display(), "Reading TSV file");
    let tsv = parse_tsv_file(path)?;
    convert_rows(&tsv, options)
}

/// Convert TSV bytes, same as [`convert_file`] without the file read.
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> ConvertResult<ConversionReport> {
    let tsv = parse_bytes(bytes)?;
    convert_rows(&tsv, options)
}

/// Convert already parsed rows.
pub fn convert_rows(tsv: &ParsedTsv, options: &ConvertOptions) -> ConvertResult<ConversionReport> {
    info!(
        encoding = %tsv.encoding,
        columns = tsv.headers.len(),
        rows = tsv.rows.len(),
        "Converting rows"
    );
    options.validate()?;
    fs::create_dir_all(&options.output_dir)?;

    let mut report = ConversionReport {
        options: options.clone(),
        encoding: tsv.encoding.clone(),
        rows_read: tsv.rows.len(),
        ..Default::default()
    };
    // identifier -> line that claimed it
    let mut seen: HashMap<String, usize> = HashMap::new();

    for raw in &tsv.rows {
        let row = match tsv.row(raw) {
            Ok(row) => row,
            Err(err) => {
                report.skip(err);
                continue;
            }
        };

        let identifier = match row_identifier(&row, raw.line) {
            Ok(id) => id,
            Err(err) => {
                report.skip(err);
                continue;
            }
        };

        if let Some(&first_line) = seen.get(identifier) {
            report.skip(RowError::DuplicateIdentifier {
                line: raw.line,
                identifier: identifier.to_string(),
                first_line,
            });
            continue;
        }
        seen.insert(identifier.to_string(), raw.line);

        let documents = render_documents(&row, identifier, options)?;

        let mut all_written = true;
        for doc in &documents {
            match write_document(&options.output_dir, doc) {
                Ok(path) => {
                    debug!(path = %path.display(), "Wrote document");
                    report.files_written.push(path);
                }
                Err(err) => {
                    warn!("{}", err);
                    all_written = false;
                    report.write_failures.push(WriteFailure {
                        message: err.source.to_string(),
                        path: err.path,
                    });
                }
            }
        }
        if all_written {
            report.rows_converted += 1;
        }
    }

    info!("{}", report.summary());
    Ok(report)
}

/// Render every document for one row, Dublin Core first, macrepo last.
pub fn render_documents(
    row: &Row,
    identifier: &str,
    options: &ConvertOptions,
) -> SerializeResult<Vec<RenderedDocument>> {
    let metadata = map_row_to_metadata(row);
    let macrepo = map_row_to_macrepo(row);

    let mut documents = Vec::with_capacity(3);
    for kind in options.format.kinds() {
        let contents = match kind {
            OutputKind::DublinCoreRdf => {
                if !metadata.about.is_empty() && !is_url(&metadata.about) {
                    warn!(identifier, about = %metadata.about, "rdf:about is not an http:// URL, leaving description anonymous");
                }
                render_as_rdf(&metadata)
            }
            _ => render_as_xml(&metadata, &options.schema_location, Some(&options.root_tag)),
        };
        documents.push(RenderedDocument::new(*kind, identifier, contents));
    }
    documents.push(RenderedDocument::new(
        OutputKind::Macrepo,
        identifier,
        render_macrepo(&macrepo)?,
    ));

    Ok(documents)
}

/// Write one document into `dir`, replacing any existing file.
pub fn write_document(dir: &Path, doc: &RenderedDocument) -> Result<PathBuf, WriteError> {
    let path = dir.join(doc.file_name());
    match fs::write(&path, doc.contents.as_bytes()) {
        Ok(()) => Ok(path),
        Err(source) => Err(WriteError { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options_in(dir: &TempDir) -> ConvertOptions {
        ConvertOptions {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    fn read(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.output_dir, PathBuf::from("."));
        assert_eq!(opts.schema_location, DC_NS);
        assert_eq!(opts.root_tag, "metadata");
        assert_eq!(opts.format, DcFormat::Xml);
    }

    #[test]
    fn test_end_to_end_two_columns() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.tsv");
        fs::write(&input, "dc:identifier\tdc:title\nrec1\tHello World\n").unwrap();

        let out = dir.path().join("out");
        let options = ConvertOptions {
            output_dir: out.clone(),
            ..Default::default()
        };
        let report = convert_file(&input, &options).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.rows_converted, 1);
        assert_eq!(report.files_written.len(), 2);

        let dc = fs::read_to_string(out.join("rec1-DC.xml")).unwrap();
        assert!(dc.contains("<dc:title>Hello World</dc:title>"));
        assert!(dc.contains("<dc:identifier>rec1</dc:identifier>"));

        let macrepo = fs::read_to_string(out.join("rec1-macrepo.xml")).unwrap();
        assert!(macrepo.contains("<macrepo:oldNid></macrepo:oldNid>"));
        assert!(macrepo.contains("<macrepo:notes></macrepo:notes>"));
        assert!(macrepo.contains("<macrepo:scale></macrepo:scale>"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let options = options_in(&dir);
        let input = "dc:identifier\tdc:title\tdc:relation\tmacrepo:notes\n\
                     rec1\tFirst\ta|b\tnote\n\
                     rec2\tSecond\t\t\n";

        convert_bytes(input.as_bytes(), &options).unwrap();
        let first: Vec<String> = ["rec1-DC.xml", "rec1-macrepo.xml", "rec2-DC.xml", "rec2-macrepo.xml"]
            .iter()
            .map(|n| read(&dir, n))
            .collect();

        convert_bytes(input.as_bytes(), &options).unwrap();
        let second: Vec<String> = ["rec1-DC.xml", "rec1-macrepo.xml", "rec2-DC.xml", "rec2-macrepo.xml"]
            .iter()
            .map(|n| read(&dir, n))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_identifier_column_does_not_stop_run() {
        let dir = TempDir::new().unwrap();
        let report = convert_bytes(b"dc:title\nNo id here\n", &options_in(&dir)).unwrap();

        assert_eq!(report.rows_read, 1);
        assert_eq!(report.rows_converted, 0);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert!(report.skipped[0].reason.contains("missing dc:identifier"));
        assert!(report.files_written.is_empty());
    }

    #[test]
    fn test_bad_rows_skipped_rest_processed() {
        let dir = TempDir::new().unwrap();
        let input = "dc:identifier\tdc:title\n\
                     \tEmpty id\n\
                     rec1\tGood\n\
                     short\n\
                     rec1\tDuplicate\n\
                     ../escape\tBad id\n\
                     rec2\tAlso good\n";
        let report = convert_bytes(input.as_bytes(), &options_in(&dir)).unwrap();

        assert_eq!(report.rows_read, 6);
        assert_eq!(report.rows_converted, 2);
        assert_eq!(report.skipped.len(), 4);
        assert!(report.skipped[0].reason.contains("missing dc:identifier"));
        assert!(report.skipped[1].reason.contains("expected 2 columns, found 1"));
        assert!(report.skipped[2].reason.contains("already used"));
        assert!(report.skipped[3].reason.contains("not a usable file name"));

        assert!(read(&dir, "rec1-DC.xml").contains("<dc:title>Good</dc:title>"));
        assert!(read(&dir, "rec2-DC.xml").contains("<dc:title>Also good</dc:title>"));
    }

    #[test]
    fn test_existing_files_overwritten() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rec1-DC.xml"), "stale").unwrap();

        convert_bytes(b"dc:identifier\tdc:title\nrec1\tFresh\n", &options_in(&dir)).unwrap();

        let dc = read(&dir, "rec1-DC.xml");
        assert!(!dc.contains("stale"));
        assert!(dc.contains("<dc:title>Fresh</dc:title>"));
    }

    #[test]
    fn test_rdf_and_both_formats() {
        let dir = TempDir::new().unwrap();
        let input = b"dc:identifier\tdc:source\trdf:about\nrec1\thttp://example.org/res\thttp://example.org/rec1\n";

        let options = ConvertOptions {
            format: DcFormat::Rdf,
            ..options_in(&dir)
        };
        let report = convert_bytes(input, &options).unwrap();
        assert_eq!(report.files_written.len(), 2);
        assert!(!dir.path().join("rec1-DC.xml").exists());
        let rdf = read(&dir, "rec1-RDF.xml");
        assert!(rdf.contains("<rdf:Description rdf:about=\"http://example.org/rec1\">"));
        assert!(rdf.contains("<dc:source rdf:resource=\"http://example.org/res\"/>"));

        let options = ConvertOptions {
            format: DcFormat::Both,
            ..options_in(&dir)
        };
        let report = convert_bytes(input, &options).unwrap();
        assert_eq!(report.files_written.len(), 3);
        assert!(dir.path().join("rec1-DC.xml").exists());
    }

    #[test]
    fn test_root_tag_and_schema_location_options() {
        let dir = TempDir::new().unwrap();
        let options = ConvertOptions {
            schema_location: "http://schema.example/dc.xsd".into(),
            root_tag: "record".into(),
            ..options_in(&dir)
        };
        convert_bytes(b"dc:identifier\nrec1\n", &options).unwrap();

        let dc = read(&dir, "rec1-DC.xml");
        assert!(dc.contains("<record\n"));
        assert!(dc.contains("xsi:schemaLocation=\"http://schema.example/dc.xsd\""));
        assert!(dc.ends_with("</record>\n"));
    }

    #[test]
    fn test_whitespace_only_row_reported() {
        let dir = TempDir::new().unwrap();
        let input = b"dc:identifier\tdc:title\n \t \nrec2\tx\n";
        let report = convert_bytes(input, &options_in(&dir)).unwrap();

        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_converted, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert!(report.skipped[0].reason.contains("missing dc:identifier"));
    }

    #[test]
    fn test_blank_identifier_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let report = convert_bytes(b"dc:identifier\tdc:title\n \tHas title\n", &options_in(&dir)).unwrap();

        assert!(report.files_written.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert!(!dir.path().join(" -DC.xml").exists());
        assert!(!dir.path().join(" -macrepo.xml").exists());
    }

    #[test]
    fn test_latin1_input_decoded_exactly() {
        let dir = TempDir::new().unwrap();
        let mut input = b"dc:identifier\tmacrepo:scale\tdc:title\nrec1\t".to_vec();
        input.extend_from_slice(b"\xBD inch\tCarte de la r\xE9gion de Qu\xE9bec \xA4\n");
        let report = convert_bytes(&input, &options_in(&dir)).unwrap();

        assert_eq!(report.rows_converted, 1);
        assert!(read(&dir, "rec1-macrepo.xml").contains("<macrepo:scale>½ inch</macrepo:scale>"));
        assert!(read(&dir, "rec1-DC.xml")
            .contains("<dc:title>Carte de la région de Québec ¤</dc:title>"));
    }

    #[test]
    fn test_invalid_root_tag_rejected_before_writing() {
        let dir = TempDir::new().unwrap();
        let options = ConvertOptions {
            root_tag: "a b".into(),
            ..options_in(&dir)
        };
        let err = convert_bytes(b"dc:identifier\nrec1\n", &options).unwrap_err();

        assert!(matches!(err, ConvertError::InvalidRootTag(ref tag) if tag == "a b"));
        assert!(!dir.path().join("rec1-DC.xml").exists());
    }

    #[test]
    fn test_write_failure_reported_and_run_continues() {
        let dir = TempDir::new().unwrap();
        // A directory in the way of rec1's Dublin Core file.
        fs::create_dir(dir.path().join("rec1-DC.xml")).unwrap();

        let input = b"dc:identifier\nrec1\nrec2\n";
        let report = convert_bytes(input, &options_in(&dir)).unwrap();

        assert_eq!(report.write_failures.len(), 1);
        assert!(report.write_failures[0].path.ends_with("rec1-DC.xml"));
        assert_eq!(report.rows_converted, 1);
        assert!(dir.path().join("rec1-macrepo.xml").exists());
        assert!(dir.path().join("rec2-DC.xml").exists());
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = convert_file(&dir.path().join("absent.tsv"), &options_in(&dir)).unwrap_err();

        match err {
            crate::error::ConvertError::Parse(e) => assert_eq!(e.os_error(), Some(2)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_render_documents_tags_kinds() {
        let row: Row = [("dc:identifier".to_string(), "rec1".to_string())]
            .into_iter()
            .collect();
        let options = ConvertOptions {
            format: DcFormat::Both,
            ..Default::default()
        };
        let docs = render_documents(&row, "rec1", &options).unwrap();

        let kinds: Vec<OutputKind> = docs.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![OutputKind::DublinCore, OutputKind::DublinCoreRdf, OutputKind::Macrepo]
        );
        assert_eq!(docs[2].file_name(), "rec1-macrepo.xml");
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = ConversionReport {
            options: ConvertOptions {
                format: DcFormat::Both,
                ..Default::default()
            },
            encoding: "utf-8".into(),
            rows_read: 2,
            rows_converted: 1,
            files_written: vec![PathBuf::from("rec1-DC.xml")],
            skipped: vec![SkippedRow {
                line: 3,
                reason: "missing".into(),
            }],
            write_failures: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows_converted"], 1);
        assert_eq!(json["skipped"][0]["line"], 3);
        assert_eq!(json["options"]["format"], "both");
        assert_eq!(json["options"]["root_tag"], "metadata");
        assert!(report.summary().contains("Converted 1/2 rows"));
    }
}
