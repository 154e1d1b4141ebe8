//! Inspect command - classify and extract files without writing tables.
//!
//! Shows every platform whose rule matches, so a document that is close to
//! being misrouted stands out, followed by the raw extracted records.

use std::path::PathBuf;

use clap::Args;
use console::style;
use glob::glob;
use serde::Serialize;
use tracing::warn;

use fundconf_core::classify;
use fundconf_core::extract;
use fundconf_core::models::config::OcrConfig;
use fundconf_core::{DocType, Document, LineSource, OcrLineSource, PdfLineSource, Platform};

use super::{load_config, Kind};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Document type the files are read as
    #[arg(short, long, value_enum)]
    kind: Kind,

    /// Also print the numbered text lines
    #[arg(long)]
    lines: bool,

    /// Print one JSON object per file instead of text
    #[arg(long)]
    json: bool,
}

/// What inspect reports for one file.
#[derive(Serialize)]
struct Inspection {
    file: PathBuf,
    /// Matching platforms in priority order; the first one is used.
    platforms: Vec<Platform>,
    records: serde_json::Value,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let doc_type = DocType::from(args.kind);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let documents = tokio::task::spawn_blocking(move || read_all(doc_type, &config.ocr, files))
        .await??;

    for (path, doc) in documents {
        let doc = match doc {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                println!("{} {}: {}", style("✗").red(), path.display(), e);
                continue;
            }
        };

        let inspection = inspect(doc_type, &path, &doc)?;
        if args.json {
            println!("{}", serde_json::to_string(&inspection)?);
            continue;
        }

        println!("{}", style(path.display()).bold());
        if args.lines {
            for (i, line) in doc.lines.iter().enumerate() {
                println!("  {:>3} | {}", i, line);
            }
        }
        print_platforms(doc_type, &inspection.platforms);
        println!("{}", serde_json::to_string_pretty(&inspection.records)?);
        println!();
    }

    Ok(())
}

/// Reads every file with the line source of `doc_type`, keeping read errors
/// per file.
fn read_all(
    doc_type: DocType,
    ocr: &OcrConfig,
    files: Vec<PathBuf>,
) -> anyhow::Result<Vec<(PathBuf, fundconf_core::Result<Document>)>> {
    let source: Box<dyn LineSource> = match doc_type {
        DocType::ManualDividend => Box::new(OcrLineSource::new(ocr)?),
        _ => Box::new(PdfLineSource::new()),
    };
    Ok(files
        .into_iter()
        .map(|path| {
            let doc = source.read(&path);
            (path, doc)
        })
        .collect())
}

fn inspect(doc_type: DocType, path: &std::path::Path, doc: &Document) -> anyhow::Result<Inspection> {
    let platforms = classify::matching(doc_type, doc);
    let records = match (doc_type, platforms.first()) {
        (DocType::ManualDividend, _) => serde_json::to_value(extract::manual_dividend::extract(doc))?,
        (_, None) => serde_json::Value::Array(Vec::new()),
        (DocType::Dividend, Some(p)) => serde_json::to_value(extract::dividend::extract(*p, doc))?,
        (DocType::PurchaseApplication, Some(p)) => {
            serde_json::to_value(extract::purchase::extract(*p, doc))?
        }
        (DocType::PurchaseConfirmation, Some(p)) => {
            serde_json::to_value(extract::purchase_confirm::extract(*p, doc))?
        }
        (DocType::Redemption, Some(p)) => {
            serde_json::to_value(extract::redemption::extract(*p, doc))?
        }
        (DocType::Conversion, Some(p)) => {
            serde_json::to_value(extract::conversion::extract(*p, doc))?
        }
    };
    Ok(Inspection {
        file: path.to_path_buf(),
        platforms,
        records,
    })
}

fn print_platforms(doc_type: DocType, platforms: &[Platform]) {
    if doc_type == DocType::ManualDividend {
        return;
    }
    match platforms {
        [] => println!("  {} no platform rule matches", style("ℹ").blue()),
        [only] => println!("  {} {}", style("✓").green(), only.label(doc_type)),
        [first, rest @ ..] => {
            let others: Vec<&str> = rest.iter().map(|p| p.label(doc_type)).collect();
            println!(
                "  {} {} (also matches: {})",
                style("⚠").yellow(),
                first.label(doc_type),
                others.join(", ")
            );
        }
    }
}
