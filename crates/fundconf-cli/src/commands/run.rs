//! Run command - execute extraction pipelines for one day.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use chrono::NaiveDate;
use fundconf_core::models::config::OcrConfig;
use fundconf_core::{
    DocType, FundconfConfig, FundconfError, LineSource, Observer, OcrLineSource, PdfLineSource,
    Pipeline, PipelineReport,
};

use super::{load_config, run_date, Kind};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Document type to process
    #[arg(value_enum, required_unless_present = "all", conflicts_with = "all")]
    kind: Option<Kind>,

    /// Run every pipeline in order
    #[arg(long)]
    all: bool,

    /// Run date (YYYYMMDD), defaults to today
    #[arg(short, long)]
    date: Option<String>,

    /// Root folder holding `{year}/{yyyymmdd}`, overrides the config
    #[arg(short, long)]
    root: Option<PathBuf>,
}

/// Per-file progress bar, recreated for each pipeline.
struct Progress {
    style: ProgressStyle,
    bar: Option<ProgressBar>,
}

impl Progress {
    fn new() -> anyhow::Result<Self> {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-");
        Ok(Self { style, bar: None })
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Observer for Progress {
    fn discovered(&mut self, doc_type: DocType, total: usize) {
        self.finish();
        let bar = ProgressBar::new(total as u64);
        bar.set_style(self.style.clone());
        bar.set_message(doc_type.display_name());
        self.bar = Some(bar);
    }

    fn file_done(&mut self, _path: &Path) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }
}

pub async fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(root) = args.root {
        config.paths.root = root;
    }
    let date = run_date(args.date.as_deref())?;

    println!(
        "{} Input folder: {}",
        style("ℹ").blue(),
        Pipeline::new(&config, date).input_dir().display()
    );

    let only = args.kind.filter(|_| !args.all).map(DocType::from);
    let results = tokio::task::spawn_blocking(move || execute(&config, date, only)).await??;

    let mut succeeded = 0;
    for (doc_type, result) in &results {
        match result {
            Ok(report) => {
                succeeded += 1;
                print_report(report);
            }
            Err(e) => print_failure(*doc_type, e),
        }
    }

    println!();
    println!(
        "{} {}/{} pipelines succeeded in {:?}",
        style("✓").green(),
        succeeded,
        results.len(),
        start.elapsed()
    );

    if succeeded == 0 {
        anyhow::bail!("No pipeline produced a table");
    }
    Ok(())
}

type Outcome = Vec<(DocType, fundconf_core::Result<PipelineReport>)>;

/// Runs `only`, or every pipeline, on the blocking pool's thread.
fn execute(
    config: &FundconfConfig,
    date: NaiveDate,
    only: Option<DocType>,
) -> anyhow::Result<Outcome> {
    let pipeline = Pipeline::new(config, date);
    let mut progress = Progress::new()?;
    let results = match only {
        Some(doc_type) => {
            let result = source_for(doc_type, &config.ocr)
                .and_then(|source| pipeline.run_observed(doc_type, source.as_ref(), &mut progress));
            vec![(doc_type, result)]
        }
        None => pipeline.run_all(|doc_type| source_for(doc_type, &config.ocr), &mut progress),
    };
    progress.finish();
    Ok(results)
}

/// Text layer for every type except the scanned ex-dividend slips.
fn source_for(doc_type: DocType, ocr: &OcrConfig) -> fundconf_core::Result<Box<dyn LineSource>> {
    match doc_type {
        DocType::ManualDividend => Ok(Box::new(OcrLineSource::new(ocr)?)),
        _ => Ok(Box::new(PdfLineSource::new())),
    }
}

fn print_report(report: &PipelineReport) {
    println!();
    println!(
        "{} {}: {}/{} files, {} rows",
        style("✓").green(),
        report.doc_type.display_name(),
        report.processed,
        report.total_files,
        report.rows
    );
    for output in &report.outputs {
        println!("  → {}", output.display());
    }
    if !report.failed.is_empty() {
        println!(
            "  {} {} files failed:",
            style("⚠").yellow(),
            report.failed.len()
        );
        for failed in &report.failed {
            println!("    - {}: {}", failed.path.display(), failed.error);
        }
    }
    if !report.unrecognised.is_empty() {
        println!(
            "  {} {} files not recognised:",
            style("ℹ").blue(),
            report.unrecognised.len()
        );
        for path in &report.unrecognised {
            println!("    - {}", path.display());
        }
    }
}

fn print_failure(doc_type: DocType, error: &FundconfError) {
    println!();
    println!(
        "{} {}: {}",
        style("✗").red(),
        doc_type.display_name(),
        error
    );
}
