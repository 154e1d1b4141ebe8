//! Aggregation of the dividend table.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::codes::BookCode;
use crate::models::row::DividendRow;

/// Separator between platform names of a merged row.
pub const PLATFORM_SEPARATOR: &str = "、";

/// Group rows by (book code, fund code).
///
/// Rows without a book code cannot be booked and are left out. Shares and
/// amounts are summed with missing values counted as zero, platform names
/// are joined without repeats, and every other column keeps the value of
/// the group's first row. Groups come out ordered by book code, then fund
/// code.
pub fn merge_dividends(rows: &[DividendRow]) -> Vec<DividendRow> {
    let mut groups: BTreeMap<(BookCode, String), (DividendRow, Vec<String>)> = BTreeMap::new();

    for row in rows {
        let Some(code) = row.account_code.clone() else {
            tracing::debug!(product = %row.product_name, "no book code, left out of merge");
            continue;
        };
        match groups.get_mut(&(code.clone(), row.fund_code.clone())) {
            Some((group, platforms)) => {
                group.shares = Some(sum(group.shares, row.shares));
                group.amount = Some(sum(group.amount, row.amount));
                if !row.platform.is_empty() && !platforms.contains(&row.platform) {
                    platforms.push(row.platform.clone());
                }
            }
            None => {
                let mut first = row.clone();
                first.shares = Some(first.shares.unwrap_or(Decimal::ZERO));
                first.amount = Some(first.amount.unwrap_or(Decimal::ZERO));
                let platforms = if row.platform.is_empty() {
                    Vec::new()
                } else {
                    vec![row.platform.clone()]
                };
                groups.insert((code, row.fund_code.clone()), (first, platforms));
            }
        }
    }

    groups
        .into_values()
        .map(|(mut row, platforms)| {
            row.platform = platforms.join(PLATFORM_SEPARATOR);
            row
        })
        .collect()
}

fn sum(a: Option<Decimal>, b: Option<Decimal>) -> Decimal {
    a.unwrap_or(Decimal::ZERO) + b.unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn row(code: Option<i64>, fund: &str, amount: Option<&str>, platform: &str) -> DividendRow {
        let amount = amount.and_then(|a| Decimal::from_str(a).ok());
        DividendRow {
            account_code: code.map(BookCode::Number),
            fund_code: fund.into(),
            date: "20250115".into(),
            shares: amount,
            amount,
            end_date: "20250114".into(),
            product_name: format!("产品{}", code.unwrap_or_default()),
            platform: platform.into(),
        }
    }

    fn keys(rows: &[DividendRow]) -> Vec<(Option<BookCode>, &str)> {
        rows.iter()
            .map(|r| (r.account_code.clone(), r.fund_code.as_str()))
            .collect()
    }

    #[test]
    fn test_groups_sum_and_join_platforms() {
        let rows = vec![
            row(Some(1), "000001", Some("10.10"), "好买基金"),
            row(Some(2), "000001", Some("5"), "好买基金"),
            row(Some(1), "000001", Some("0.90"), "天天基金"),
            row(Some(1), "000001", None, "好买基金"),
        ];
        let merged = merge_dividends(&rows);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].account_code, Some(BookCode::Number(1)));
        assert_eq!(merged[0].amount, Decimal::from_str("11.00").ok());
        assert_eq!(merged[0].platform, "好买基金、天天基金");
        assert_eq!(merged[1].amount, Decimal::from_str("5").ok());
    }

    #[test]
    fn test_unmapped_rows_are_dropped_and_groups_sorted() {
        let rows = vec![
            row(Some(9), "000002", Some("1"), "好买基金"),
            row(None, "000003", Some("2"), "利得基金"),
            row(Some(1), "000001", None, "利得基金"),
        ];
        let merged = merge_dividends(&rows);
        assert_eq!(
            keys(&merged),
            vec![
                (Some(BookCode::Number(1)), "000001"),
                (Some(BookCode::Number(9)), "000002"),
            ]
        );
        assert_eq!(merged[0].amount, Some(Decimal::ZERO));
    }

    #[test]
    fn test_text_codes_follow_integer_codes() {
        let mut text = row(None, "000001", Some("3"), "好买基金");
        text.account_code = Some(BookCode::Text("A17".into()));
        let rows = vec![text, row(Some(500), "000009", Some("1"), "好买基金")];
        let merged = merge_dividends(&rows);
        assert_eq!(
            keys(&merged),
            vec![
                (Some(BookCode::Number(500)), "000009"),
                (Some(BookCode::Text("A17".into())), "000001"),
            ]
        );
    }
}
