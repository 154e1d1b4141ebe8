//! Raw record -> output row.
//!
//! Normalization never fails: unparseable numbers become empty cells and
//! unmapped product names an empty book code. Rows whose name, code and
//! amount are all missing are dropped by the pipeline before they get here.

pub mod amounts;
pub mod dates;

use chrono::NaiveDate;

pub use amounts::parse_amount;

use crate::codes::ProductCodes;
use crate::models::record::{
    ConfirmationRecord, ConversionRecord, DividendRecord, ManualDividendRecord, PurchaseRecord,
    RedemptionRecord,
};
use crate::models::row::{ConversionRow, DividendRow, ManualDividendRow, TradeRow};
use crate::platform::DocType;

/// 业务类别 of the purchase application table.
pub const PURCHASE_APPLICATION: &str = "基金申购申请";
/// 业务类别 of the purchase confirmation table.
pub const PURCHASE_CONFIRMATION: &str = "基金申购确认";
/// 业务类别 of the redemption table.
pub const REDEMPTION_CONFIRMATION: &str = "基金赎回确认";

/// The single product whose ex-dividend slips are scanned.
pub const MANUAL_DIVIDEND_PRODUCT: &str = "万联资管万事如意FOF1号单一资产管理计划";

/// Applies the code directory and the run date to raw records.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    codes: &'a ProductCodes,
    run_date: NaiveDate,
}

impl<'a> Normalizer<'a> {
    pub fn new(codes: &'a ProductCodes, run_date: NaiveDate) -> Self {
        Self { codes, run_date }
    }

    fn today(&self) -> String {
        dates::compact(self.run_date)
    }

    fn yesterday(&self) -> String {
        dates::day_before(self.run_date)
    }

    pub fn dividend(&self, r: &DividendRecord) -> DividendRow {
        DividendRow {
            account_code: self.codes.get(&r.product_name).cloned(),
            fund_code: r.fund_code.clone(),
            date: self.today(),
            shares: parse_amount(&r.shares),
            amount: parse_amount(&r.amount),
            end_date: r.end_date.clone().unwrap_or_else(|| self.yesterday()),
            product_name: r.product_name.clone(),
            platform: r.platform.label(DocType::Dividend).to_string(),
        }
    }

    /// Applications state an amount only; quantity and fee stay blank.
    pub fn purchase(&self, r: &PurchaseRecord) -> TradeRow {
        TradeRow {
            account_code: self.codes.get(&r.product_name).cloned(),
            fund_code: r.fund_code.clone(),
            date: self.today(),
            business: PURCHASE_APPLICATION,
            shares: None,
            amount: parse_amount(&r.amount),
            fee: None,
            settlement_date: None,
            product_name: r.product_name.clone(),
            platform: r.platform.label(DocType::PurchaseApplication).to_string(),
        }
    }

    pub fn confirmation(&self, r: &ConfirmationRecord) -> TradeRow {
        TradeRow {
            account_code: self.codes.get(&r.product_name).cloned(),
            fund_code: r.fund_code.clone(),
            date: self.today(),
            business: PURCHASE_CONFIRMATION,
            shares: parse_amount(&r.shares),
            amount: parse_amount(&r.amount),
            fee: parse_amount(&r.fee),
            settlement_date: None,
            product_name: r.product_name.clone(),
            platform: r.platform.label(DocType::PurchaseConfirmation).to_string(),
        }
    }

    pub fn redemption(&self, r: &RedemptionRecord) -> TradeRow {
        TradeRow {
            account_code: self.codes.get(&r.product_name).cloned(),
            fund_code: r.fund_code.clone(),
            date: self.today(),
            business: REDEMPTION_CONFIRMATION,
            shares: parse_amount(&r.shares),
            amount: parse_amount(&r.amount),
            fee: parse_amount(&r.fee),
            settlement_date: Some(dates::settlement_date(&r.settlement, self.run_date)),
            product_name: r.product_name.clone(),
            platform: r.platform.label(DocType::Redemption).to_string(),
        }
    }

    /// `codes` here is the separate conversion directory.
    pub fn conversion(&self, r: &ConversionRecord) -> ConversionRow {
        ConversionRow {
            product_code: self.codes.get(&r.product_name).cloned(),
            out_fund_code: r.out_fund_code.clone(),
            out_date: self.today(),
            out_shares: parse_amount(&r.out_shares),
            out_amount: parse_amount(&r.out_amount),
            in_fund_code: r.in_fund_code.clone(),
            in_shares: parse_amount(&r.in_shares),
            in_amount: parse_amount(&r.in_amount),
            in_fee: parse_amount(&r.in_fee),
            product_name: r.product_name.clone(),
            platform: r.platform.label(DocType::Conversion).to_string(),
        }
    }

    pub fn manual_dividend(&self, r: &ManualDividendRecord) -> ManualDividendRow {
        ManualDividendRow {
            account_code: self.codes.get(MANUAL_DIVIDEND_PRODUCT).cloned(),
            fund_code: r.fund_code.clone(),
            voucher_date: self.yesterday(),
            register_date: self.yesterday(),
            amount: parse_amount(&r.amount),
            product_name: MANUAL_DIVIDEND_PRODUCT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::BookCode;
    use crate::models::record::Settlement;
    use crate::platform::Platform;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn codes() -> ProductCodes {
        [("万联资管X号集合资产管理计划".to_string(), BookCode::Number(3012))]
            .into_iter()
            .collect()
    }

    fn run() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_confirmation_row() {
        let codes = codes();
        let n = Normalizer::new(&codes, run());
        let record = ConfirmationRecord {
            product_name: "万联资管X号集合资产管理计划".into(),
            fund_code: "000912".into(),
            amount: "10000.00".into(),
            shares: "1234.50".into(),
            fee: String::new(),
            ..ConfirmationRecord::new(Platform::Hexun)
        };
        assert_eq!(
            n.confirmation(&record),
            TradeRow {
                account_code: Some(BookCode::Number(3012)),
                fund_code: "000912".into(),
                date: "20250115".into(),
                business: PURCHASE_CONFIRMATION,
                shares: Decimal::from_str("1234.50").ok(),
                amount: Decimal::from_str("10000.00").ok(),
                fee: None,
                settlement_date: None,
                product_name: "万联资管X号集合资产管理计划".into(),
                platform: "和讯基金".into(),
            }
        );
    }

    #[test]
    fn test_unmapped_product_keeps_row() {
        let codes = codes();
        let n = Normalizer::new(&codes, run());
        let record = PurchaseRecord {
            product_name: "未知产品".into(),
            amount: "1,000".into(),
            ..PurchaseRecord::new(Platform::Haomai)
        };
        let row = n.purchase(&record);
        assert_eq!(row.account_code, None);
        assert_eq!(row.amount, Decimal::from_str("1000").ok());
    }

    #[test]
    fn test_redemption_without_date_settles_yesterday() {
        let codes = codes();
        let n = Normalizer::new(&codes, run());
        let row = n.redemption(&RedemptionRecord::new(Platform::Wangjin));
        assert_eq!(row.settlement_date.as_deref(), Some("20250114"));

        let record = RedemptionRecord {
            settlement: Settlement::TPlus(2),
            ..RedemptionRecord::new(Platform::Pingan)
        };
        assert_eq!(n.redemption(&record).settlement_date.as_deref(), Some("20250116"));
    }

    #[test]
    fn test_dividend_end_date() {
        let codes = codes();
        let n = Normalizer::new(&codes, run());
        let mut record = DividendRecord::new(Platform::Haomai);
        assert_eq!(n.dividend(&record).end_date, "20250114");
        record.end_date = Some(String::new());
        assert_eq!(n.dividend(&record).end_date, "");
    }

    #[test]
    fn test_manual_dividend_uses_fixed_product() {
        let codes: ProductCodes = [(MANUAL_DIVIDEND_PRODUCT.to_string(), BookCode::Number(77))]
            .into_iter()
            .collect();
        let n = Normalizer::new(&codes, run());
        let row = n.manual_dividend(&ManualDividendRecord {
            fund_code: "B12345".into(),
            amount: "88.10".into(),
        });
        assert_eq!(row.account_code, Some(BookCode::Number(77)));
        assert_eq!(row.voucher_date, "20250114");
        assert_eq!(row.register_date, "20250114");
    }
}
