//! Error types for the fundconf-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the fundconf library.
#[derive(Error, Debug)]
pub enum FundconfError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Product-code directory error.
    #[error("product code error: {0}")]
    CodeBook(#[from] CodeBookError),

    /// Table output error.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dated input directory does not exist.
    #[error("input directory not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The run finished without a single usable record.
    #[error("no records extracted")]
    NoRecords,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to extract page images from PDF.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// OCR support was compiled out.
    #[error("OCR support is not enabled in this build")]
    Disabled,
}

/// Errors related to the product-code JSON file.
#[derive(Error, Debug)]
pub enum CodeBookError {
    /// The file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON object of name -> code.
    #[error("invalid product code file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

/// Errors raised while writing an output table.
#[derive(Error, Debug)]
pub enum OutputError {
    /// CSV serialization failed.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// XML serialization failed.
    #[error("XML write failed: {0}")]
    Xml(String),

    /// Underlying file error.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the fundconf library.
pub type Result<T> = std::result::Result<T, FundconfError>;
