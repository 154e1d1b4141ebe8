//! Input folder discovery and per-type file filters.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use walkdir::WalkDir;

use crate::normalize::dates;
use crate::platform::DocType;

/// Exceptions to the 赎回/申购 exclusions: these banks deliver both kinds of
/// confirmation under one file name.
const SHARED_CONFIRMATION_SENDERS: &[&str] = &["江苏银行", "融联创"];

/// `{root}/{year}/{yyyymmdd}`, where the day's tables are written.
pub fn day_dir(root: &Path, run_date: NaiveDate) -> PathBuf {
    root.join(run_date.year().to_string())
        .join(dates::compact(run_date))
}

/// A directory qualifies for `doc_type` when its path contains one of these.
pub fn markers(doc_type: DocType) -> &'static [&'static str] {
    match doc_type {
        DocType::Dividend | DocType::ManualDividend => &["分红"],
        DocType::PurchaseApplication => &["受理", "申请"],
        DocType::PurchaseConfirmation | DocType::Redemption | DocType::Conversion => &["确认"],
    }
}

/// File-name filter of `doc_type`, applied to `.pdf` files only.
pub fn accepts(doc_type: DocType, file_name: &str) -> bool {
    if !file_name.to_lowercase().ends_with(".pdf") {
        return false;
    }
    let has = |needle: &str| file_name.contains(needle);
    let shared_sender = SHARED_CONFIRMATION_SENDERS.iter().any(|s| has(s));

    match doc_type {
        DocType::Dividend => true,
        DocType::PurchaseApplication => !["赎回", "超级", "转换", "分红方式", "分红设置", "失效"]
            .iter()
            .any(|n| has(n)),
        DocType::PurchaseConfirmation => {
            !["强行调", "调增", "超级转换", "转换", "分红方式"]
                .iter()
                .any(|n| has(n))
                && (!has("赎回") || shared_sender)
        }
        DocType::Redemption => {
            !["强行调", "调增", "分红方式"].iter().any(|n| has(n)) && (!has("申购") || shared_sender)
        }
        DocType::Conversion => has("超级") || has("转换"),
        DocType::ManualDividend => has("万事如意"),
    }
}

/// PDF files of `doc_type` under `section`, in path order.
///
/// Directories are walked recursively; a file is collected when the path
/// of its directory contains a marker of the type and its name passes the
/// type's filter. Unreadable entries are skipped.
pub fn discover(section: &Path, doc_type: DocType) -> Vec<PathBuf> {
    let markers = markers(doc_type);
    let mut files = Vec::new();

    let walker = WalkDir::new(section)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok());
    for entry in walker {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(dir) = path.parent() else {
            continue;
        };
        let dir = dir.to_string_lossy();
        if !markers.iter().any(|m| dir.contains(m)) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if accepts(doc_type, &name) {
            files.push(path.to_path_buf());
        }
    }
    tracing::debug!(%doc_type, section = %section.display(), count = files.len(), "discovered files");
    files
}
