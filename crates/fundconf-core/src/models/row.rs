//! Normalized output rows, one type per table layout.
//!
//! Rows are built once by [`crate::normalize`] and never mutated; the
//! writers in [`crate::output`] only see them through [`TableRow`].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::codes::BookCode;

/// Market column value for every table.
pub const DOMESTIC_INTERBANK: &str = "国内银行间";

/// One cell of an output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Blank column, or a value that failed to parse.
    Empty,
    Text(String),
    /// Monetary value, rendered with two decimals.
    Number(Decimal),
    /// Integer book code.
    Integer(i64),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Cell::Empty } else { Cell::Text(s) }
    }

    pub fn number(value: Option<Decimal>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }

    pub fn code(code: Option<&BookCode>) -> Self {
        match code {
            Some(BookCode::Number(n)) => Cell::Integer(*n),
            Some(BookCode::Text(s)) => Cell::text(s.clone()),
            None => Cell::Empty,
        }
    }

    /// Text as written to CSV.
    pub fn render(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(d) => format!("{:.2}", d.round_dp(2)),
            Cell::Integer(n) => n.to_string(),
        }
    }
}

/// A row that can be written by the table writers.
pub trait TableRow {
    /// Column headers, in output order.
    const COLUMNS: &'static [&'static str];

    /// Cells in the order of [`Self::COLUMNS`].
    fn cells(&self) -> Vec<Cell>;
}

/// 红利再投 row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendRow {
    pub account_code: Option<BookCode>,
    pub fund_code: String,
    pub date: String,
    pub shares: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub end_date: String,
    pub product_name: String,
    pub platform: String,
}

impl TableRow for DividendRow {
    const COLUMNS: &'static [&'static str] = &[
        "账套编号",
        "产品代码",
        "基金市场代码",
        "交易市场",
        "日期",
        "派送份额",
        "派送金额",
        "红利截止日期",
        "持仓分类",
        "产品名称",
        "基金平台",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::code(self.account_code.as_ref()),
            Cell::Empty,
            Cell::text(self.fund_code.clone()),
            Cell::text(DOMESTIC_INTERBANK),
            Cell::text(self.date.clone()),
            Cell::number(self.shares),
            Cell::number(self.amount),
            Cell::text(self.end_date.clone()),
            Cell::Empty,
            Cell::text(self.product_name.clone()),
            Cell::text(self.platform.clone()),
        ]
    }
}

/// Row of the three trade tables: purchase application, purchase
/// confirmation and redemption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub account_code: Option<BookCode>,
    pub fund_code: String,
    pub date: String,
    /// 业务类别, e.g. `基金赎回确认`.
    pub business: &'static str,
    pub shares: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub fee: Option<Decimal>,
    /// Redemption only.
    pub settlement_date: Option<String>,
    pub product_name: String,
    pub platform: String,
}

impl TableRow for TradeRow {
    const COLUMNS: &'static [&'static str] = &[
        "账套编号",
        "基金市场代码",
        "交易市场",
        "日期",
        "业务类别",
        "数量",
        "金额",
        "手续费",
        "佣金",
        "交易对手",
        "资金账户",
        "赎回到账日期",
        "股东账户",
        "席位号",
        "产品名称",
        "基金平台",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::code(self.account_code.as_ref()),
            Cell::text(self.fund_code.clone()),
            Cell::text(DOMESTIC_INTERBANK),
            Cell::text(self.date.clone()),
            Cell::text(self.business),
            Cell::number(self.shares),
            Cell::number(self.amount),
            Cell::number(self.fee),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::text(self.settlement_date.clone().unwrap_or_default()),
            Cell::Empty,
            Cell::Empty,
            Cell::text(self.product_name.clone()),
            Cell::text(self.platform.clone()),
        ]
    }
}

/// 超级转换确认 row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionRow {
    pub product_code: Option<BookCode>,
    pub out_fund_code: String,
    pub out_date: String,
    pub out_shares: Option<Decimal>,
    pub out_amount: Option<Decimal>,
    pub in_fund_code: String,
    pub in_shares: Option<Decimal>,
    pub in_amount: Option<Decimal>,
    pub in_fee: Option<Decimal>,
    pub product_name: String,
    pub platform: String,
}

impl TableRow for ConversionRow {
    const COLUMNS: &'static [&'static str] = &[
        "产品代码",
        "转出基金市场代码",
        "转出基金交易市场",
        "转出确认日期",
        "转出份额",
        "转出金额",
        "转出费用",
        "转入基金市场代码",
        "转入基金交易市场",
        "转入份额",
        "转入金额",
        "资金账户",
        "股东代码",
        "席位代码",
        "转入费用",
        "退补款交收日",
        "转入确认日期",
        "产品名称",
        "平台",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::code(self.product_code.as_ref()),
            Cell::text(self.out_fund_code.clone()),
            Cell::text(DOMESTIC_INTERBANK),
            Cell::text(self.out_date.clone()),
            Cell::number(self.out_shares),
            Cell::number(self.out_amount),
            Cell::Empty,
            Cell::text(self.in_fund_code.clone()),
            Cell::text(DOMESTIC_INTERBANK),
            Cell::number(self.in_shares),
            Cell::number(self.in_amount),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::number(self.in_fee),
            Cell::Empty,
            Cell::Empty,
            Cell::text(self.product_name.clone()),
            Cell::text(self.platform.clone()),
        ]
    }
}

/// 红利除权 row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualDividendRow {
    pub account_code: Option<BookCode>,
    pub fund_code: String,
    pub voucher_date: String,
    pub register_date: String,
    pub amount: Option<Decimal>,
    pub product_name: String,
}

impl TableRow for ManualDividendRow {
    const COLUMNS: &'static [&'static str] = &[
        "账套编号",
        "产品代码",
        "市场代码",
        "凭证日期",
        "登记日期",
        "派送金额",
        "产品名称",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::code(self.account_code.as_ref()),
            Cell::Empty,
            Cell::text(self.fund_code.clone()),
            Cell::text(self.voucher_date.clone()),
            Cell::text(self.register_date.clone()),
            Cell::number(self.amount),
            Cell::text(self.product_name.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn check_width<R: TableRow>(row: &R) {
        assert_eq!(row.cells().len(), R::COLUMNS.len());
    }

    #[test]
    fn test_cell_rendering() {
        assert_eq!(Cell::number(Decimal::from_str("12.5").ok()).render(), "12.50");
        assert_eq!(Cell::number(None).render(), "");
        assert_eq!(Cell::code(Some(&BookCode::Number(3012))).render(), "3012");
        assert_eq!(Cell::text(""), Cell::Empty);
    }

    #[test]
    fn test_rows_match_their_headers() {
        check_width(&DividendRow {
            account_code: None,
            fund_code: "000001".into(),
            date: "20250115".into(),
            shares: None,
            amount: None,
            end_date: "20250114".into(),
            product_name: String::new(),
            platform: "好买基金".into(),
        });
        check_width(&TradeRow {
            account_code: None,
            fund_code: String::new(),
            date: String::new(),
            business: "基金申购确认",
            shares: None,
            amount: None,
            fee: None,
            settlement_date: None,
            product_name: String::new(),
            platform: String::new(),
        });
        check_width(&ConversionRow {
            product_code: None,
            out_fund_code: String::new(),
            out_date: String::new(),
            out_shares: None,
            out_amount: None,
            in_fund_code: String::new(),
            in_shares: None,
            in_amount: None,
            in_fee: None,
            product_name: String::new(),
            platform: String::new(),
        });
        check_width(&ManualDividendRow {
            account_code: None,
            fund_code: String::new(),
            voucher_date: String::new(),
            register_date: String::new(),
            amount: None,
            product_name: String::new(),
        });
    }
}
