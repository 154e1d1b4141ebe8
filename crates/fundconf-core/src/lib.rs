//! Core library for fund confirmation slips.
//!
//! This crate provides:
//! - line sources over PDF text layers and scanned pages (OCR)
//! - platform classification per document type
//! - per-platform field extraction and normalization into table rows
//! - the product-code directory
//! - pipelines that turn a day's input folder into bookkeeping tables

pub mod classify;
pub mod codes;
pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod ocr;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod platform;

pub use codes::{BookCode, ProductCodes};
pub use document::{Document, LineSource};
pub use error::{FundconfError, Result};
pub use models::config::{FundconfConfig, OutputFormat};
pub use normalize::Normalizer;
pub use ocr::OcrLineSource;
pub use pdf::PdfLineSource;
pub use pipeline::{Observer, Pipeline, PipelineReport};
pub use platform::{DocType, Platform};
