//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use std::path::Path;

use tracing::debug;

use crate::document::{Document, LineSource};
use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Line source backed by the embedded text layer of a PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLineSource;

impl PdfLineSource {
    pub fn new() -> Self {
        Self
    }
}

impl LineSource for PdfLineSource {
    fn read(&self, path: &Path) -> crate::error::Result<Document> {
        let data = std::fs::read(path)?;
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;
        let text = extractor.extract_text()?;
        debug!(
            "Extracted {} chars from {} ({} pages)",
            text.chars().count(),
            path.display(),
            extractor.page_count()
        );
        Ok(Document::from_text(path, text))
    }
}
