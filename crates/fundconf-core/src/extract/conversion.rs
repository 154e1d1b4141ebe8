//! Super-conversion confirmations (超级转换确认).

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::DECIMAL;
use super::{digits, first_decimal, last_capture, line_at, line_before, number};
use crate::document::Document;
use crate::models::record::ConversionRecord;
use crate::platform::Platform;

lazy_static! {
    static ref JD_NAME: Regex = Regex::new(r"客户名称\s+(.*)").unwrap();
    static ref OUT_CODE: Regex = Regex::new(r"转出基金代码\s+(\d{6})").unwrap();
    static ref OUT_AMOUNT: Regex = Regex::new(r"转出基金确认金额\s+([\d,]+\.\d+)").unwrap();
    static ref OUT_SHARES: Regex = Regex::new(r"转出基金确认份额\s+([\d,]+\.\d+)").unwrap();
    static ref IN_CODE: Regex = Regex::new(r"转入基金代码\s+(\d{6})").unwrap();
    static ref IN_AMOUNT: Regex = Regex::new(r"转入基金确认金额\s+([\d,]+\.\d+)").unwrap();
    static ref IN_SHARES: Regex = Regex::new(r"转入基金确认份额\s+([\d,]+\.\d+)").unwrap();
    static ref CONVERSION_FEE: Regex = Regex::new(r"转换手续费\s+([\d,]+\.\d+)").unwrap();

    // `719.97(转换费：0,补差费…` when the fee label wrapped below its value
    static ref FEE_BEFORE_PAREN: Regex = Regex::new(r"([\d,.]+)\s*[\(（]").unwrap();
}

/// Extract the conversion record of a document attributed to `platform`.
///
/// Only the jd and tiantian layouts carry conversions; other platforms
/// yield nothing.
pub fn extract(platform: Platform, doc: &Document) -> Vec<ConversionRecord> {
    match platform {
        Platform::Jd => vec![jd(&doc.lines)],
        Platform::Tiantian => vec![tiantian(&doc.lines)],
        _ => Vec::new(),
    }
}

fn labelled(lines: &[String], label: &str, re: &Regex) -> String {
    lines
        .iter()
        .filter(|l| l.contains(label))
        .find_map(|l| re.captures(l).map(|c| c[1].trim().to_string()))
        .unwrap_or_default()
}

fn jd(lines: &[String]) -> ConversionRecord {
    ConversionRecord {
        product_name: labelled(lines, "客户名称", &JD_NAME),
        out_fund_code: labelled(lines, "转出基金代码", &OUT_CODE),
        out_amount: number(lines, &OUT_AMOUNT),
        out_shares: number(lines, &OUT_SHARES),
        in_fund_code: labelled(lines, "转入基金代码", &IN_CODE),
        in_amount: number(lines, &IN_AMOUNT),
        in_shares: number(lines, &IN_SHARES),
        in_fee: number(lines, &CONVERSION_FEE),
        platform: Platform::Jd,
    }
}

/// tiantian prints values on the line under their labels and omits the
/// incoming amount, which is derived as outgoing amount minus fee.
fn tiantian(lines: &[String]) -> ConversionRecord {
    let mut record = ConversionRecord {
        product_name: tiantian_name(lines),
        out_fund_code: last_capture(lines, &OUT_CODE).unwrap_or_default(),
        in_fund_code: last_capture(lines, &IN_CODE).unwrap_or_default(),
        out_amount: "0".to_string(),
        in_fee: "0".to_string(),
        ..ConversionRecord::new(Platform::Tiantian)
    };

    for (i, line) in lines.iter().enumerate() {
        if line.contains("转出基金确认") && !line.contains("金额") {
            let values: Vec<String> = DECIMAL
                .find_iter(line_at(lines, i + 1))
                .map(|m| digits(m.as_str()))
                .collect();
            if let [shares, amount, ..] = values.as_slice() {
                record.out_shares = shares.clone();
                record.out_amount = amount.clone();
            }
        }
        if line.contains("手续费") {
            if let Some(fee) = first_decimal(line) {
                record.in_fee = fee;
            } else if let Some(c) = FEE_BEFORE_PAREN.captures(line_before(lines, i)) {
                record.in_fee = digits(&c[1]);
            }
        }
        if line.contains("转入基金确认") && !line.contains("份额") {
            if let Some(shares) = first_decimal(line_at(lines, i + 1)) {
                record.in_shares = shares;
            }
        }
    }

    record.in_amount = net_amount(&record.out_amount, &record.in_fee);
    record
}

/// The first `万联` line among the first ten, joined with the wrapped
/// `…计划` tail found within the next three lines. Inner spacing is kept
/// as printed.
fn tiantian_name(lines: &[String]) -> String {
    let Some(i) = lines.iter().take(10).position(|l| l.contains("万联")) else {
        return String::new();
    };
    let mut product = lines[i].trim().to_string();
    if let Some(tail) = lines
        .iter()
        .skip(i + 1)
        .take(3)
        .find(|l| l.contains("计划") || l.starts_with("合资产"))
    {
        product.push_str(tail.trim());
    }
    product
}

/// `amount - fee` to two places, or the raw amount when either side is not
/// a number.
fn net_amount(amount: &str, fee: &str) -> String {
    let fee = if fee.is_empty() { "0" } else { fee };
    match (Decimal::from_str(amount), Decimal::from_str(fee)) {
        (Ok(amount), Ok(fee)) => format!("{:.2}", (amount - fee).round_dp(2)),
        _ => amount.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::lines;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_jd_conversion() {
        let ls = lines(
            "京东肯特瑞 超级转换确认\n客户名称 万联资管1号\n转出基金代码 000001\n\
             转出基金确认金额 1,000.00\n转出基金确认份额 990.00\n转入基金代码 000002\n\
             转入基金确认金额 999.00\n转入基金确认份额 500.00\n转换手续费 1.00",
        );
        let record = jd(&ls);
        assert_eq!(
            record,
            ConversionRecord {
                platform: Platform::Jd,
                product_name: "万联资管1号".into(),
                out_fund_code: "000001".into(),
                out_amount: "1000.00".into(),
                out_shares: "990.00".into(),
                in_fund_code: "000002".into(),
                in_amount: "999.00".into(),
                in_shares: "500.00".into(),
                in_fee: "1.00".into(),
            }
        );
    }

    #[test]
    fn test_tiantian_fee_from_previous_line() {
        let ls = lines(
            "天天基金\n万联资管稳盈1号集\n合资产管理计划\n转出基金代码 000001\n转出基金确认份额\n\
             1,200.00 1,500.00\n转入基金代码 000002\n719.97(转换费：0,补差费\n手续费\n\
             转入基金确认\n800.00",
        );
        let record = tiantian(&ls);
        assert_eq!(record.product_name, "万联资管稳盈1号集合资产管理计划");
        assert_eq!(record.out_shares, "1200.00");
        assert_eq!(record.out_amount, "1500.00");
        assert_eq!(record.in_fee, "719.97");
        assert_eq!(record.in_shares, "800.00");
        assert_eq!(record.in_amount, "780.03");
    }

    #[test]
    fn test_tiantian_name_keeps_inner_spaces() {
        let ls = lines("天天基金\n  万联资管 稳盈1号集  \n-\n合资产管理计划 \n转出基金代码 000001");
        assert_eq!(tiantian(&ls).product_name, "万联资管 稳盈1号集合资产管理计划");
    }

    #[test]
    fn test_tiantian_defaults() {
        let record = tiantian(&lines("天天基金"));
        assert_eq!(record.out_amount, "0");
        assert_eq!(record.in_fee, "0");
        assert_eq!(record.in_amount, "0.00");
    }

    #[test]
    fn test_net_amount_falls_back_to_raw() {
        assert_eq!(net_amount("100.50", "0.25"), "100.25");
        assert_eq!(net_amount("abc", "1"), "abc");
        assert_eq!(net_amount("10", ""), "10.00");
    }
}
