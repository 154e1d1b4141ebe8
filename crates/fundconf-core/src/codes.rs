//! Product name -> book code directory.
//!
//! The directory is a flat JSON object. Codes are usually integers but
//! some books use alphanumeric codes, so both are accepted and written back
//! unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodeBookError;

/// Book (account set) code of a product.
///
/// Integer codes order before text codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookCode {
    Number(i64),
    Text(String),
}

impl BookCode {
    /// Integer when the text is all digits, text otherwise.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(n) if s.chars().all(|c| c.is_ascii_digit()) => BookCode::Number(n),
            _ => BookCode::Text(s.to_string()),
        }
    }
}

impl fmt::Display for BookCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookCode::Number(n) => write!(f, "{n}"),
            BookCode::Text(s) => f.write_str(s),
        }
    }
}

/// Loaded product-code file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCodes {
    codes: BTreeMap<String, BookCode>,
}

impl ProductCodes {
    /// Load the JSON object at `path`.
    pub fn load(path: &Path) -> Result<Self, CodeBookError> {
        let content = std::fs::read_to_string(path).map_err(|source| CodeBookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let codes = serde_json::from_str(&content).map_err(|e| CodeBookError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), "loaded product codes");
        Ok(Self { codes })
    }

    /// Load `path`, or start empty when it does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self, CodeBookError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the directory back as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), CodeBookError> {
        let content = serde_json::to_string_pretty(&self.codes).map_err(|e| {
            CodeBookError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        std::fs::write(path, content).map_err(|source| CodeBookError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Book code of `product_name`, matched exactly.
    pub fn get(&self, product_name: &str) -> Option<&BookCode> {
        self.codes.get(product_name)
    }

    /// Insert or replace a mapping; returns the previous code.
    pub fn set(&mut self, product_name: impl Into<String>, code: BookCode) -> Option<BookCode> {
        self.codes.insert(product_name.into(), code)
    }

    pub fn remove(&mut self, product_name: &str) -> Option<BookCode> {
        self.codes.remove(product_name)
    }

    /// Merge every mapping of `other`, overwriting existing names.
    /// Returns how many names were added or changed.
    pub fn merge(&mut self, other: ProductCodes) -> usize {
        let mut changed = 0;
        for (name, code) in other.codes {
            if self.codes.get(&name) != Some(&code) {
                self.codes.insert(name, code);
                changed += 1;
            }
        }
        changed
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries ordered by code: integer codes ascending, then text codes.
    pub fn sorted(&self) -> Vec<(&str, &BookCode)> {
        let mut entries: Vec<_> = self.codes.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|(an, a), (bn, b)| a.cmp(b).then(an.cmp(bn)));
        entries
    }
}

impl FromIterator<(String, BookCode)> for ProductCodes {
    fn from_iter<T: IntoIterator<Item = (String, BookCode)>>(iter: T) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_integer_and_text_codes_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codes.json");
        std::fs::write(&path, r#"{"万联资管1号": 3012, "万联资管2号": "A17"}"#).unwrap();

        let codes = ProductCodes::load(&path).unwrap();
        assert_eq!(codes.get("万联资管1号"), Some(&BookCode::Number(3012)));
        assert_eq!(codes.get("万联资管2号"), Some(&BookCode::Text("A17".into())));
        assert_eq!(codes.get("万联资管3号"), None);

        codes.save(&path).unwrap();
        assert_eq!(ProductCodes::load(&path).unwrap(), codes);
    }

    #[test]
    fn test_parse_errors_name_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        let err = ProductCodes::load(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
        assert!(matches!(
            ProductCodes::load(&dir.path().join("missing.json")),
            Err(CodeBookError::Io { .. })
        ));
    }

    #[test]
    fn test_sorted_puts_numbers_first() {
        let codes: ProductCodes = [
            ("c".to_string(), BookCode::Text("B1".into())),
            ("a".to_string(), BookCode::Number(20)),
            ("b".to_string(), BookCode::Number(3)),
        ]
        .into_iter()
        .collect();
        let order: Vec<&str> = codes.sorted().into_iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_book_code_parse() {
        assert_eq!(BookCode::parse(" 3012 "), BookCode::Number(3012));
        assert_eq!(BookCode::parse("A17"), BookCode::Text("A17".into()));
        assert_eq!(BookCode::parse("-5"), BookCode::Text("-5".into()));
    }

    #[test]
    fn test_merge_counts_changes() {
        let mut codes: ProductCodes = [("a".to_string(), BookCode::Number(1))].into_iter().collect();
        let other: ProductCodes = [
            ("a".to_string(), BookCode::Number(1)),
            ("b".to_string(), BookCode::Number(2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(codes.merge(other), 1);
        assert_eq!(codes.len(), 2);
    }
}
