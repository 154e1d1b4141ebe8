//! Table writers.
//!
//! Every pipeline emits one table with a fixed column order; the format is
//! chosen by configuration. Writers see rows only through [`TableRow`].

mod delimited;
mod spreadsheet;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::OutputError;
use crate::models::config::OutputFormat;
use crate::models::row::TableRow;

/// Worksheet name used by the spreadsheet writer.
pub const SHEET_NAME: &str = "Sheet1";

impl OutputFormat {
    /// File extension of the written table.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xml => "xml",
        }
    }
}

/// Write `rows` to `{dir}/{title}.{ext}` and return the path.
///
/// The directory is created when missing and an existing file is replaced.
pub fn write_table<R: TableRow>(
    dir: &Path,
    title: &str,
    rows: &[R],
    format: OutputFormat,
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(format!("{title}.{}", format.extension()));
    let file = fs::File::create(&path).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;

    match format {
        OutputFormat::Csv => delimited::write(file, rows)?,
        OutputFormat::Xml => spreadsheet::write(file, rows)?,
    }
    tracing::info!(path = %path.display(), rows = rows.len(), "table written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::row::Cell;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tempfile::tempdir;

    struct Pair(&'static str, Option<Decimal>);

    impl TableRow for Pair {
        const COLUMNS: &'static [&'static str] = &["名称", "金额"];

        fn cells(&self) -> Vec<Cell> {
            vec![Cell::text(self.0), Cell::number(self.1)]
        }
    }

    fn rows() -> Vec<Pair> {
        vec![
            Pair("万联资管1号", Decimal::from_str("1234.5").ok()),
            Pair("A&B <计划>", None),
        ]
    }

    #[test]
    fn test_csv_has_bom_and_two_decimals() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), "表", &rows(), OutputFormat::Csv).unwrap();
        assert_eq!(path.file_name().unwrap(), "表.csv");

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with("\u{feff}".as_bytes()));
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text.trim_start_matches('\u{feff}'),
            "名称,金额\n万联资管1号,1234.50\nA&B <计划>,\n"
        );
    }

    #[test]
    fn test_xml_spreadsheet() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), "表", &rows(), OutputFormat::Xml).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(r#"<Worksheet ss:Name="Sheet1">"#));
        assert!(text.contains(r#"<Data ss:Type="Number">1234.50</Data>"#));
        assert!(text.contains("A&amp;B &lt;计划&gt;"));
        assert!(text.contains("<Cell/>"));
    }

    #[test]
    fn test_rewrite_is_identical() {
        let dir = tempdir().unwrap();
        let first = write_table(dir.path(), "t", &rows(), OutputFormat::Xml).unwrap();
        let a = fs::read(&first).unwrap();
        write_table(dir.path(), "t", &rows(), OutputFormat::Xml).unwrap();
        assert_eq!(a, fs::read(&first).unwrap());
    }
}
