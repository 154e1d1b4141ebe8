//! OCR line source for scanned slips.
//!
//! Scanned PDFs carry one raster image per page and no text layer. Each
//! image goes through the `pure-onnx-ocr` engine; recognised regions are
//! filtered by confidence and read top-to-bottom, left-to-right, one
//! region per line.

#[cfg(feature = "ocr")]
mod engine;

#[cfg(feature = "ocr")]
pub use engine::PureOcrEngine;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{Document, LineSource};
use crate::error::{OcrError, Result};
use crate::models::config::OcrConfig;
use crate::pdf::PdfExtractor;

/// Regions whose top edges are closer than this share a row.
const ROW_HEIGHT: f32 = 20.0;

/// A recognised text region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Quadrilateral corners (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],

    /// Recognised text.
    pub text: String,

    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Axis-aligned bounding rectangle (min_x, min_y, max_x, max_y).
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Sort boxes by reading order (top-to-bottom, left-to-right).
pub fn sort_by_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();
        let row_a = (ay / ROW_HEIGHT) as i32;
        let row_b = (by / ROW_HEIGHT) as i32;
        row_a
            .cmp(&row_b)
            .then(ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal))
    });
}

/// Text of every box above `min_confidence`, in reading order.
pub fn lines_from_boxes(mut boxes: Vec<TextBox>, min_confidence: f32) -> Vec<String> {
    boxes.retain(|b| b.confidence > min_confidence);
    sort_by_reading_order(&mut boxes);
    boxes.into_iter().map(|b| b.text).collect()
}

/// [`LineSource`] that renders scanned pages through OCR.
pub struct OcrLineSource {
    #[cfg(feature = "ocr")]
    engine: PureOcrEngine,
    min_confidence: f32,
}

impl OcrLineSource {
    /// Load the models named by `config`.
    ///
    /// Fails with [`OcrError::Disabled`] when built without the `ocr` feature.
    pub fn new(config: &OcrConfig) -> std::result::Result<Self, OcrError> {
        #[cfg(feature = "ocr")]
        {
            Ok(Self {
                engine: PureOcrEngine::from_config(config)?,
                min_confidence: config.min_confidence,
            })
        }
        #[cfg(not(feature = "ocr"))]
        {
            let _ = config;
            Err(OcrError::Disabled)
        }
    }

    #[cfg(feature = "ocr")]
    fn recognize(&self, image: &image::DynamicImage) -> std::result::Result<Vec<TextBox>, OcrError> {
        self.engine.process(image)
    }

    #[cfg(not(feature = "ocr"))]
    fn recognize(&self, _image: &image::DynamicImage) -> std::result::Result<Vec<TextBox>, OcrError> {
        Err(OcrError::Disabled)
    }
}

impl LineSource for OcrLineSource {
    fn read(&self, path: &Path) -> Result<Document> {
        let data = std::fs::read(path)?;
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;

        let mut lines = Vec::new();
        for page in 1..=extractor.page_count() {
            for image in extractor.page_images(page)? {
                let boxes = self.recognize(&image)?;
                lines.extend(lines_from_boxes(boxes, self.min_confidence));
            }
        }
        debug!("OCR read {} lines from {}", lines.len(), path.display());
        Ok(Document::from_lines(path, lines))
    }
}
