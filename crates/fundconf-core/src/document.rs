//! Line-sequence view of a confirmation document.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// One document as seen by classifiers and extractors.
///
/// Line order is significant: most platform rules look at fixed line
/// offsets, so empty lines produced by text extraction are kept.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// File name without directory.
    pub file_name: String,
    /// Directory that contained the file.
    pub root_path: PathBuf,
    /// Text split on `'\n'`.
    pub lines: Vec<String>,
    /// Concatenated page text, used for cross-line patterns.
    pub raw_text: String,
}

impl Document {
    /// Build a document from concatenated page text.
    pub fn from_text(path: &Path, text: impl Into<String>) -> Self {
        let raw_text = text.into();
        let lines = raw_text.split('\n').map(str::to_string).collect();
        Self {
            file_name: file_name_of(path),
            root_path: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            lines,
            raw_text,
        }
    }

    /// Build a document from already separated lines (OCR output).
    pub fn from_lines(path: &Path, lines: Vec<String>) -> Self {
        let raw_text = lines.join("\n");
        Self {
            file_name: file_name_of(path),
            root_path: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            lines,
            raw_text,
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when extraction produced no text at all.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Turns a file on disk into a [`Document`].
pub trait LineSource {
    /// Read the file and return its line sequence.
    fn read(&self, path: &Path) -> Result<Document>;
}

impl<T: LineSource + ?Sized> LineSource for &T {
    fn read(&self, path: &Path) -> Result<Document> {
        (**self).read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_keeps_empty_lines() {
        let doc = Document::from_text(Path::new("/a/b/好买.pdf"), "x\n\ny");
        assert_eq!(doc.lines, vec!["x", "", "y"]);
        assert_eq!(doc.file_name, "好买.pdf");
        assert_eq!(doc.root_path, PathBuf::from("/a/b"));
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let doc = Document::from_text(Path::new("a.pdf"), "");
        assert_eq!(doc.len(), 1);
        assert!(doc.is_empty());
    }
}
