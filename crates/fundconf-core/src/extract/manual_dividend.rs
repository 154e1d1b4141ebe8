//! Ex-dividend slips of the 万事如意 product, read through OCR.
//!
//! Recognised text is noisy: the fund code starts with a letter that is
//! often read as `8`, and `1` is sometimes read as `l`. Amounts may be
//! split by stray spaces.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::document::Document;
use crate::models::record::ManualDividendRecord;

lazy_static! {
    static ref FUND_CODE_STRICT: Regex = Regex::new(r"基金代码[：:\s]*([B8]\d{5})").unwrap();
    static ref FUND_CODE_LOOSE: Regex = Regex::new(r"基金代码[：:\s]*([B8][0-9l]{5})").unwrap();
    static ref AMOUNT: Regex = Regex::new(r"确认金额[：:\s]*([\d, ]+\.?\d*)").unwrap();
    static ref PLAIN_NUMBER: Regex = Regex::new(r"^\d+(\.\d+)?$").unwrap();
}

/// Extract the fund code and the largest confirmed amount.
///
/// Returns `None` when either is missing; such slips are skipped.
pub fn extract(doc: &Document) -> Option<ManualDividendRecord> {
    let text = doc.lines.join(" ");

    let raw_code = [&*FUND_CODE_STRICT, &*FUND_CODE_LOOSE]
        .into_iter()
        .find_map(|re| re.captures(&text).map(|c| c[1].trim().to_string()))?;
    let fund_code = correct_fund_code(&raw_code);

    let amount = AMOUNT
        .captures_iter(&text)
        .map(|c| c[1].replace([',', ' '], ""))
        .filter(|v| PLAIN_NUMBER.is_match(v))
        .filter_map(|v| Decimal::from_str(&v).ok())
        .max()?;

    tracing::debug!(raw = %raw_code, code = %fund_code, %amount, "manual dividend fields");
    Some(ManualDividendRecord {
        fund_code,
        amount: format!("{:.2}", amount.round_dp(2)),
    })
}

/// Undo the two misreadings OCR makes on these codes: a leading `8` for
/// `B`, and `l` for `1` anywhere after the first character.
pub fn correct_fund_code(raw: &str) -> String {
    if raw.chars().count() < 6 {
        return raw.to_string();
    }
    raw.chars()
        .enumerate()
        .map(|(i, c)| match (i, c) {
            (0, '8') => 'B',
            (i, 'l') if i > 0 => '1',
            _ => c,
        })
        .collect()
}
