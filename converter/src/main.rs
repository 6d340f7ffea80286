//! tsv-convert CLI - write Dublin Core and macrepo XML for every TSV row
//!
//! ```bash
//! tsv-convert records.tsv                      # <ID>-DC.xml + <ID>-macrepo.xml in .
//! tsv-convert -o out/ --format both records.tsv
//! tsv-convert --report report.json records.tsv
//! ```
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `tsv_convert=info`).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tsv_convert::serializer::is_xml_name;
use tsv_convert::{convert_file, ConvertError, ConvertOptions, DcFormat, ParseError, DC_NS};

#[derive(Parser)]
#[command(name = "tsv-convert")]
#[command(about = "Convert TSV metadata into Dublin Core and macrepo XML records", long_about = None)]
struct Cli {
    /// Input TSV file (header row of dc:/macrepo: column names)
    input: Option<PathBuf>,

    /// Directory for the generated XML files
    #[arg(short, long, env = "TSV_CONVERT_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// xsi:schemaLocation of the Dublin Core documents
    #[arg(long, default_value = DC_NS)]
    schema_location: String,

    /// Root element of the Dublin Core documents
    #[arg(long, default_value = "metadata", value_parser = parse_root_tag)]
    root_tag: String,

    /// Dublin Core serialization(s) to write
    #[arg(short, long, value_enum, default_value_t = DcFormat::Xml)]
    format: DcFormat,

    /// Write a JSON conversion report to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tsv_convert=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(input) = cli.input else {
        usage();
        return ExitCode::SUCCESS;
    };

    let options = ConvertOptions {
        output_dir: cli.output_dir,
        schema_location: cli.schema_location,
        root_tag: cli.root_tag,
        format: cli.format,
    };

    match run(&input, &options, cli.report.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ConvertError::Parse(ParseError::Io(e))) => {
            println!("{}", open_error_line(&e));
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(input: &Path, options: &ConvertOptions, report_path: Option<&Path>) -> Result<(), ConvertError> {
    let report = convert_file(input, options)?;

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Report written");
    }

    Ok(())
}

fn parse_root_tag(value: &str) -> Result<String, String> {
    if is_xml_name(value) {
        Ok(value.to_string())
    } else {
        Err(format!("'{}' is not an XML element name", value))
    }
}

fn usage() {
    println!("Usage: tsv-convert <filename>.tsv");
}

/// `Error (<errno>): <message>` for a failed input open.
fn open_error_line(err: &std::io::Error) -> String {
    let code = err.raw_os_error().unwrap_or(-1);
    let message = err.to_string();
    let suffix = format!(" (os error {})", code);
    let message = message.strip_suffix(&suffix).unwrap_or(&message);
    format!("Error ({}): {}", code, message)
}
