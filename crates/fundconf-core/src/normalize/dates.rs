//! Run date and the dates derived from it.

use chrono::{Days, Duration, NaiveDate};

use crate::models::record::Settlement;

/// `YYYYMMDD`.
pub fn compact(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// The day before `date`, as `YYYYMMDD`.
pub fn day_before(date: NaiveDate) -> String {
    compact(date.checked_sub_days(Days::new(1)).unwrap_or(date))
}

/// 赎回到账日期 for a redemption confirmed on `run_date`.
///
/// Printed dates lose their dashes, `T+N` counts `N - 1` days from the run
/// date and an unstated date falls back to the day before the run date.
pub fn settlement_date(settlement: &Settlement, run_date: NaiveDate) -> String {
    match settlement {
        Settlement::Unstated => day_before(run_date),
        Settlement::Date(raw) => raw.replace('-', ""),
        Settlement::TPlus(n) => {
            let offset = Duration::days(i64::from(*n) - 1);
            compact(run_date.checked_add_signed(offset).unwrap_or(run_date))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_unstated_is_yesterday() {
        assert_eq!(settlement_date(&Settlement::Unstated, run()), "20250228");
    }

    #[test]
    fn test_printed_dates_are_compacted() {
        let iso = Settlement::Date("2025-03-04".into());
        assert_eq!(settlement_date(&iso, run()), "20250304");
        let compact = Settlement::Date("20250305".into());
        assert_eq!(settlement_date(&compact, run()), "20250305");
    }

    #[test]
    fn test_t_plus_counts_from_run_date() {
        assert_eq!(settlement_date(&Settlement::TPlus(1), run()), "20250301");
        assert_eq!(settlement_date(&Settlement::TPlus(3), run()), "20250303");
        assert_eq!(settlement_date(&Settlement::TPlus(0), run()), "20250228");
    }
}
