//! Per-document-type pipelines.
//!
//! A run walks the day's input folder, reads every qualifying file through
//! a [`LineSource`], classifies and extracts it, normalizes the records and
//! writes one table. Failures reading a single file are logged and the file
//! is skipped; a missing input folder, an unreadable code file, an empty
//! result or a failed write aborts that pipeline only.

pub mod discover;
pub mod merge;
mod stages;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::codes::ProductCodes;
use crate::document::{Document, LineSource};
use crate::error::{FundconfError, Result};
use crate::models::config::FundconfConfig;
use crate::models::row::TableRow;
use crate::normalize::Normalizer;
use crate::output::write_table;
use crate::platform::DocType;

pub use merge::merge_dividends;

/// Suffix of the merged dividend table.
pub const MERGED_SUFFIX: &str = "_合并后";

/// Title (file stem) of the table written for `doc_type`.
pub fn table_title(doc_type: DocType) -> &'static str {
    match doc_type {
        DocType::Dividend => "【境内基金业务】红利再投",
        DocType::PurchaseApplication => "【境内基金业务】申购申请",
        DocType::PurchaseConfirmation => "【境内基金业务】申购确认",
        DocType::Redemption => "【境内基金业务】赎回确认",
        DocType::Conversion => "【境内基金业务】超级转换确认",
        DocType::ManualDividend => "【境内理财产品】红利除权",
    }
}

/// A file that could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub doc_type: DocType,
    /// `{root}/{year}/{yyyymmdd}`, where the tables were written.
    pub output_dir: PathBuf,
    /// Written tables; the dividend pipeline writes two.
    pub outputs: Vec<PathBuf>,
    /// Files that passed the folder and name filters.
    pub total_files: usize,
    /// Files read and recognised.
    pub processed: usize,
    /// Rows written to the main table.
    pub rows: usize,
    pub failed: Vec<FailedFile>,
    /// Files no platform rule recognised.
    pub unrecognised: Vec<PathBuf>,
}

/// Hooks for progress display.
pub trait Observer {
    /// Called once with the number of files about to be read.
    fn discovered(&mut self, _doc_type: DocType, _total: usize) {}

    /// Called after each file, whatever its outcome.
    fn file_done(&mut self, _path: &Path) {}
}

impl Observer for () {}

/// Runs pipelines for one run date.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    config: &'a FundconfConfig,
    run_date: NaiveDate,
}

struct Collected<R> {
    rows: Vec<R>,
    total_files: usize,
    processed: usize,
    failed: Vec<FailedFile>,
    unrecognised: Vec<PathBuf>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a FundconfConfig, run_date: NaiveDate) -> Self {
        Self { config, run_date }
    }

    pub fn run_date(&self) -> NaiveDate {
        self.run_date
    }

    /// Folder the tables are written to.
    pub fn output_dir(&self) -> PathBuf {
        discover::day_dir(&self.config.paths.root, self.run_date)
    }

    /// Folder searched for input documents.
    pub fn input_dir(&self) -> PathBuf {
        self.output_dir().join(&self.config.paths.section_dir)
    }

    /// Product-code file used by `doc_type`.
    pub fn codes_path(&self, doc_type: DocType) -> PathBuf {
        match doc_type {
            DocType::Conversion => self.config.paths.conversion_codes_path(),
            _ => self.config.paths.product_codes_path(),
        }
    }

    /// Run the pipeline of `doc_type`.
    pub fn run(&self, doc_type: DocType, source: &dyn LineSource) -> Result<PipelineReport> {
        self.run_observed(doc_type, source, &mut ())
    }

    /// Run the pipeline of `doc_type`, reporting progress to `observer`.
    pub fn run_observed(
        &self,
        doc_type: DocType,
        source: &dyn LineSource,
        observer: &mut dyn Observer,
    ) -> Result<PipelineReport> {
        let input = self.input_dir();
        info!("Scanning {} for {}", input.display(), doc_type.display_name());
        if !input.is_dir() {
            return Err(FundconfError::MissingInput(input));
        }

        let codes = ProductCodes::load(&self.codes_path(doc_type))?;
        let n = Normalizer::new(&codes, self.run_date);

        match doc_type {
            DocType::Dividend => {
                let collected = self.collect(doc_type, source, observer, |d| stages::dividend(d, &n));
                let merged = merge_dividends(&collected.rows);
                let mut report = self.emit(doc_type, collected)?;
                let title = format!("{}{}", table_title(doc_type), MERGED_SUFFIX);
                report.outputs.push(write_table(
                    &report.output_dir,
                    &title,
                    &merged,
                    self.config.output.format,
                )?);
                Ok(report)
            }
            DocType::PurchaseApplication => {
                let c = self.collect(doc_type, source, observer, |d| stages::purchase(d, &n));
                self.emit(doc_type, c)
            }
            DocType::PurchaseConfirmation => {
                let c = self.collect(doc_type, source, observer, |d| {
                    stages::purchase_confirmation(d, &n)
                });
                self.emit(doc_type, c)
            }
            DocType::Redemption => {
                let c = self.collect(doc_type, source, observer, |d| stages::redemption(d, &n));
                self.emit(doc_type, c)
            }
            DocType::Conversion => {
                let c = self.collect(doc_type, source, observer, |d| stages::conversion(d, &n));
                self.emit(doc_type, c)
            }
            DocType::ManualDividend => {
                let c = self.collect(doc_type, source, observer, |d| {
                    stages::manual_dividend(d, &n)
                });
                self.emit(doc_type, c)
            }
        }
    }

    /// Run every pipeline in [`DocType::ALL`] order, continuing after
    /// failures. `source_for` picks the line source of each type.
    pub fn run_all<F>(
        &self,
        mut source_for: F,
        observer: &mut dyn Observer,
    ) -> Vec<(DocType, Result<PipelineReport>)>
    where
        F: FnMut(DocType) -> Result<Box<dyn LineSource>>,
    {
        DocType::ALL
            .into_iter()
            .map(|doc_type| {
                let result = source_for(doc_type)
                    .and_then(|source| self.run_observed(doc_type, source.as_ref(), observer));
                if let Err(e) = &result {
                    warn!("{} pipeline failed: {}", doc_type.display_name(), e);
                }
                (doc_type, result)
            })
            .collect()
    }

    fn collect<R>(
        &self,
        doc_type: DocType,
        source: &dyn LineSource,
        observer: &mut dyn Observer,
        rows_of: impl Fn(&Document) -> Option<Vec<R>>,
    ) -> Collected<R> {
        let files = discover::discover(&self.input_dir(), doc_type);
        observer.discovered(doc_type, files.len());

        let mut collected = Collected {
            rows: Vec::new(),
            total_files: files.len(),
            processed: 0,
            failed: Vec::new(),
            unrecognised: Vec::new(),
        };

        for path in files {
            match source.read(&path) {
                Ok(doc) => match rows_of(&doc) {
                    Some(rows) => {
                        collected.processed += 1;
                        collected.rows.extend(rows);
                    }
                    None => {
                        warn!("Unrecognised document: {}", path.display());
                        collected.unrecognised.push(path.clone());
                    }
                },
                Err(e) => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    collected.failed.push(FailedFile {
                        path: path.clone(),
                        error: e.to_string(),
                    });
                }
            }
            observer.file_done(&path);
        }

        if collected.failed.is_empty() {
            info!("All {} files processed", collected.total_files);
        } else {
            warn!("{} files failed", collected.failed.len());
        }
        collected
    }

    fn emit<R: TableRow>(&self, doc_type: DocType, c: Collected<R>) -> Result<PipelineReport> {
        if c.rows.is_empty() {
            warn!("No records extracted for {}", doc_type.display_name());
            return Err(FundconfError::NoRecords);
        }

        let output_dir = self.output_dir();
        let path = write_table(
            &output_dir,
            table_title(doc_type),
            &c.rows,
            self.config.output.format,
        )?;

        Ok(PipelineReport {
            doc_type,
            output_dir,
            outputs: vec![path],
            total_files: c.total_files,
            processed: c.processed,
            rows: c.rows.len(),
            failed: c.failed,
            unrecognised: c.unrecognised,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_titles_are_distinct() {
        let mut titles: Vec<_> = DocType::ALL.iter().map(|t| table_title(*t)).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), DocType::ALL.len());
    }

    #[test]
    fn test_conversion_uses_its_own_code_file() {
        let config = FundconfConfig::default();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let pipeline = Pipeline::new(&config, date);
        assert_eq!(
            pipeline.codes_path(DocType::Conversion),
            PathBuf::from("./product_codes_conversion.json")
        );
        assert_eq!(
            pipeline.input_dir(),
            PathBuf::from("./2025/20250115/1场外开基")
        );
    }
}
