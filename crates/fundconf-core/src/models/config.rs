//! Configuration structures for extraction runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for fundconf.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FundconfConfig {
    /// Input folders and lookup files.
    pub paths: PathsConfig,

    /// OCR configuration for scanned slips.
    pub ocr: OcrConfig,

    /// Output table configuration.
    pub output: OutputConfig,
}

/// Where documents and product-code files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root folder holding `{year}/{yyyymmdd}/...`.
    pub root: PathBuf,

    /// Product name -> book code lookup.
    pub product_codes: PathBuf,

    /// Lookup used by the conversion pipeline.
    pub conversion_codes: PathBuf,

    /// Per-day sub-folder searched by every pipeline.
    pub section_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            product_codes: PathBuf::from("product_codes.json"),
            conversion_codes: PathBuf::from("product_codes_conversion.json"),
            section_dir: "1场外开基".to_string(),
        }
    }
}

impl PathsConfig {
    /// Product-code file, resolved against the root folder when relative.
    pub fn product_codes_path(&self) -> PathBuf {
        resolve(&self.root, &self.product_codes)
    }

    /// Conversion product-code file, resolved against the root folder when relative.
    pub fn conversion_codes_path(&self) -> PathBuf {
        resolve(&self.root, &self.conversion_codes)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Recognised regions at or below this confidence are dropped.
    pub min_confidence: f32,

    /// Keep `[UNK]` tokens in recognized text instead of replacing with space.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "ch_rec.onnx".to_string(),
            dictionary: "ch_dict.txt".to_string(),
            min_confidence: 0.3,
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, file_name: &str) -> PathBuf {
        self.model_dir.join(file_name)
    }
}

/// Format of the written tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// XML Spreadsheet 2003 workbook with a single `Sheet1`.
    #[default]
    Xml,
    /// UTF-8 CSV with byte-order mark.
    Csv,
}

/// Output table configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl FundconfConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
