//! Subcommands and the helpers they share.

pub mod codes;
pub mod config;
pub mod inspect;
pub mod run;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::ValueEnum;

use fundconf_core::{DocType, FundconfConfig};

/// Document type selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    /// Dividend reinvestment confirmations
    Dividend,
    /// Purchase applications
    Purchase,
    /// Purchase confirmations
    PurchaseConfirm,
    /// Redemption confirmations
    Redemption,
    /// Conversion confirmations
    Conversion,
    /// Scanned ex-dividend slips (OCR)
    ManualDividend,
}

impl From<Kind> for DocType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Dividend => DocType::Dividend,
            Kind::Purchase => DocType::PurchaseApplication,
            Kind::PurchaseConfirm => DocType::PurchaseConfirmation,
            Kind::Redemption => DocType::Redemption,
            Kind::Conversion => DocType::Conversion,
            Kind::ManualDividend => DocType::ManualDividend,
        }
    }
}

/// `{config_dir}/fundconf/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fundconf")
        .join("config.json")
}

/// The file named by `--config`, or the default location.
pub fn config_path(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the selected config file. Only the default location may be
/// missing, in which case defaults apply.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FundconfConfig> {
    match config_path {
        Some(path) => Ok(FundconfConfig::from_file(Path::new(path))?),
        None => {
            let path = default_config_path();
            if path.exists() {
                Ok(FundconfConfig::from_file(&path)?)
            } else {
                Ok(FundconfConfig::default())
            }
        }
    }
}

/// Parse `--date YYYYMMDD`, defaulting to today.
pub fn run_date(date: Option<&str>) -> anyhow::Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y%m%d")
            .map_err(|e| anyhow::anyhow!("Invalid date '{}' (expected YYYYMMDD): {}", s, e)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_date() {
        assert_eq!(
            run_date(Some("20250115")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert!(run_date(Some("2025-01-15")).is_err());
    }

    #[test]
    fn test_kind_maps_to_doc_type() {
        for kind in Kind::value_variants() {
            let name = kind.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(DocType::from(*kind).to_string(), name);
        }
    }
}
