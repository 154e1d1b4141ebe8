//! Subscription confirmations (申购确认).

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{
    CHANGLIANG_CONFIRMED_AMOUNT, CHANGLIANG_CONFIRMED_FEE, CHANGLIANG_CONFIRMED_SHARES,
    CONFIRMED_AMOUNT, CONFIRMED_FEE, CONFIRMED_SHARES, FIRST_NUMBER, FUND_CODE, INVESTOR_NAME,
    LIANTAI_ACCOUNT, LIANTAI_FUND_CODE, LIDE_CONFIRMED_AMOUNT, LIDE_CONFIRMED_SHARES, LIDE_FEE,
    LIDE_NAME, MINSHENG_AMOUNT, MINSHENG_CODE, MINSHENG_FEE, MINSHENG_NAME, MINSHENG_SHARES,
    PRODUCT_CODE, RONGLIANCHUANG_AMOUNT, RONGLIANCHUANG_CODE, RONGLIANCHUANG_FEE,
    RONGLIANCHUANG_SHARES, SPACED_AMOUNT, SPACED_CUSTOMER_NAME, SPACED_FUND_CODE, SPACED_SHARES,
    TEXT_AMOUNT, TEXT_CONFIRM_FEE, TEXT_FEE, TEXT_FUND_CODE, TEXT_PRODUCT_CODE, TEXT_SHARES,
    YINGMI_AMOUNT, YINGMI_CODE, YINGMI_FEE, YINGMI_SHARES,
};
use super::purchase::lower_case_amount;
use super::{
    capture_where, code, contains_any, digits, name, names, number, squeeze, text_capture,
    text_number, trade_blocks, trade_info_windows,
};
use crate::document::Document;
use crate::models::record::ConfirmationRecord;
use crate::platform::Platform;

lazy_static! {
    static ref JIAOHANG_FEE: Regex = Regex::new(r"认申购手续费\s*([\d,]+\.?\d*)").unwrap();
    static ref NET_AMOUNT_NUMBER: Regex = Regex::new(r"[0-9,]+\.?[0-9]*").unwrap();
    static ref WANGJIN_FEE: Regex = Regex::new(r"费开户\s*([\d,]+\.?\d*)").unwrap();

    static ref SIX_DIGIT_GROUP: Regex = Regex::new(r"(\d{6})").unwrap();

    static ref LIANTAI_AMOUNT: Regex = Regex::new(r"确认金额\(元\)\s*([\d,]+\.?\d*)").unwrap();
    static ref LIANTAI_SHARES: Regex = Regex::new(r"确认份额\(份\)\s*([\d,]+\.?\d*)").unwrap();
    static ref LIANTAI_FEE: Regex = Regex::new(r"手续费\(元\)\s*([\d,]+\.?\d*)").unwrap();

    static ref HEXUN_CODE: Regex = Regex::new(r"基金代码\s+([0-9]{6})").unwrap();
    static ref HEXUN_AMOUNT: Regex = Regex::new(r"确认金额\s+([\d,]+\.?\d*)").unwrap();
    static ref HEXUN_SHARES: Regex = Regex::new(r"确认份额\s+([\d,]+\.?\d*)").unwrap();
    static ref HEXUN_FEE: Regex = Regex::new(r"确认费用\s+([\d,]+\.?\d*)").unwrap();

    static ref ZHAOYINGTONG_CODE: Regex = Regex::new(r"产品代码\s+([0-9]{6})").unwrap();
    static ref ZHAOYINGTONG_AMOUNT: Regex =
        Regex::new(r"确认金额\s+CNY\s+([\d,]+\.?\d*)").unwrap();
    static ref ZHAOYINGTONG_FEE: Regex = Regex::new(r"交易费用\s+CNY\s+([\d,]+\.?\d*)").unwrap();

    static ref XINGZHENG_NAME: Regex = Regex::new(r"账\s*号\s*名\s*称\s*[：:]\s*(.*)").unwrap();
    static ref XINGZHENG_AMOUNT: Regex =
        Regex::new(r"确\s*认\s*金\s*额\s*[：:]\s*([\d,]+\.?\d*)").unwrap();
    static ref XINGZHENG_SHARES: Regex =
        Regex::new(r"确\s*认\s*份\s*额\s*[：:]\s*([\d,]+\.?\d*)").unwrap();
    static ref XINGZHENG_FEE: Regex = Regex::new(r"手\s*续\s*费\s*[：:]\s*([\d,]+\.?\d*)").unwrap();

    static ref YOUCHU_CODE: Regex = Regex::new(r"产品代码:\s*([0-9]{6})").unwrap();
    static ref YOUCHU_AMOUNT: Regex = Regex::new(r"确认金额（元）:\s*([\d,]+\.?\d*)").unwrap();
    static ref YOUCHU_SHARES: Regex = Regex::new(r"确认份额（份）:\s*([\d,]+\.?\d*)").unwrap();
    static ref YOUCHU_FEE: Regex = Regex::new(r"手续费（元）:\s*([\d,]+\.?\d*)").unwrap();

    static ref NINGBO_AMOUNT: Regex = Regex::new(r"确认金额（元）\s*([\d,]+\.?\d*)").unwrap();
    static ref NINGBO_SHARES: Regex = Regex::new(r"确认份额（份）\s*([\d,]+\.?\d*)").unwrap();
    static ref NINGBO_FEE: Regex = Regex::new(r"申购费用（元）\s*([\d,]+\.?\d*)").unwrap();

    static ref ZDT_NAME: Regex = Regex::new(r"投资者名称[：:]\s*(.+?)(?:\s+投资者类型|$)").unwrap();
    static ref ZDT_CODE: Regex = Regex::new(r"基金代码[：:]\s*([0-9]{6})").unwrap();
    static ref ZDT_AMOUNT: Regex = Regex::new(r"确认金额[：:]\s*([\d,]+\.?\d*)").unwrap();
    static ref ZDT_SHARES: Regex = Regex::new(r"确认份额[：:]\s*([\d,]+\.?\d*)").unwrap();
    static ref ZDT_FEE: Regex = Regex::new(r"手续费[：:]\s*([\d,]+\.?\d*)").unwrap();
}

const HEXUN_NAME_STOP: &[&str] =
    &["交易账号", "基金账号", "确认工作日", "业务类型", "确认单号", "基金代码", "基金名称"];
const ZHAOYINGTONG_NAME_STOP: &[&str] = &[
    "证件类型",
    "证件号码",
    "基金账号",
    "基金交易账号",
    "产品信息",
    "产品类型",
    "产品管理人",
    "产品代码",
];
const YOUCHU_NAME_STOP: &[&str] = &[
    "基金账号:",
    "证件号码:",
    "交易账号:",
    "产品信息",
    "基金公司:",
    "产品代码:",
    "产品名称:",
    "交易信息",
];

/// Extract the subscription confirmations of a document attributed to
/// `platform`.
pub fn extract(platform: Platform, doc: &Document) -> Vec<ConfirmationRecord> {
    let lines = &doc.lines;
    let text = &doc.raw_text;
    let record = match platform {
        Platform::Yingmi => return yingmi(lines),
        Platform::Liantai => return liantai(lines),
        Platform::Haomai => ConfirmationRecord {
            product_name: names::haomai(lines),
            fund_code: text_capture(text, &TEXT_PRODUCT_CODE).unwrap_or_default(),
            amount: text_number(text, &TEXT_AMOUNT),
            shares: text_number(text, &TEXT_SHARES),
            fee: text_number(text, &TEXT_FEE),
            ..ConfirmationRecord::new(platform)
        },
        Platform::Tiantian => ConfirmationRecord {
            product_name: names::tiantian(lines),
            fund_code: text_capture(text, &TEXT_FUND_CODE).unwrap_or_default(),
            amount: text_number(text, &TEXT_AMOUNT),
            shares: text_number(text, &TEXT_SHARES),
            fee: text_number(text, &TEXT_CONFIRM_FEE),
            ..ConfirmationRecord::new(platform)
        },
        Platform::Lide => ConfirmationRecord {
            product_name: name(lines, &LIDE_NAME),
            fund_code: text_capture(text, &TEXT_FUND_CODE).unwrap_or_default(),
            amount: text_number(text, &LIDE_CONFIRMED_AMOUNT),
            shares: text_number(text, &LIDE_CONFIRMED_SHARES),
            fee: text_number(text, &LIDE_FEE),
            ..ConfirmationRecord::new(platform)
        },
        Platform::Changliang => ConfirmationRecord {
            product_name: name(lines, &INVESTOR_NAME),
            fund_code: text_capture(text, &TEXT_FUND_CODE).unwrap_or_default(),
            amount: text_number(text, &CHANGLIANG_CONFIRMED_AMOUNT),
            shares: text_number(text, &CHANGLIANG_CONFIRMED_SHARES),
            fee: text_number(text, &CHANGLIANG_CONFIRMED_FEE),
            ..ConfirmationRecord::new(platform)
        },
        Platform::Jiaohang => labelled_values(
            platform,
            lines,
            names::inline(lines, "投资者信息"),
            &PRODUCT_CODE,
            &CONFIRMED_AMOUNT,
            &CONFIRMED_SHARES,
            &JIAOHANG_FEE,
        ),
        Platform::Jd => labelled_values(
            platform,
            lines,
            names::inline(lines, "客户名称"),
            &FUND_CODE,
            &CONFIRMED_AMOUNT,
            &CONFIRMED_SHARES,
            &CONFIRMED_FEE,
        ),
        Platform::Wangjin => wangjin(lines),
        Platform::Pingan => labelled_values(
            platform,
            lines,
            names::pingan(lines),
            &FUND_CODE,
            &CONFIRMED_AMOUNT,
            &CONFIRMED_SHARES,
            &CONFIRMED_FEE,
        ),
        Platform::Jianhang => jianhang(lines),
        Platform::Tengyuan => tengyuan(lines),
        Platform::Ronglianchuang => labelled_values(
            platform,
            lines,
            names::remitter(lines),
            &RONGLIANCHUANG_CODE,
            &RONGLIANCHUANG_AMOUNT,
            &RONGLIANCHUANG_SHARES,
            &RONGLIANCHUANG_FEE,
        ),
        Platform::Minsheng => labelled_values(
            platform,
            lines,
            name(lines, &MINSHENG_NAME),
            &MINSHENG_CODE,
            &MINSHENG_AMOUNT,
            &MINSHENG_SHARES,
            &MINSHENG_FEE,
        ),
        Platform::Hexun => labelled_values(
            platform,
            lines,
            names::labelled(lines, "账户名称", Some("账户类型"), 4, |l| {
                contains_any(l, HEXUN_NAME_STOP) || l.chars().all(|c| c.is_ascii_digit())
            }),
            &HEXUN_CODE,
            &HEXUN_AMOUNT,
            &HEXUN_SHARES,
            &HEXUN_FEE,
        ),
        Platform::Zhaoyingtong => labelled_values(
            platform,
            lines,
            names::labelled(lines, "投资者名称", None, 4, |l| {
                contains_any(l, ZHAOYINGTONG_NAME_STOP)
            }),
            &ZHAOYINGTONG_CODE,
            &ZHAOYINGTONG_AMOUNT,
            &HEXUN_SHARES,
            &ZHAOYINGTONG_FEE,
        ),
        Platform::Xingzheng => xingzheng(lines),
        Platform::Youchu => labelled_values(
            platform,
            lines,
            names::labelled(lines, "客户名称:", Some("证件类型:"), 4, |l| {
                contains_any(l, YOUCHU_NAME_STOP)
            }),
            &YOUCHU_CODE,
            &YOUCHU_AMOUNT,
            &YOUCHU_SHARES,
            &YOUCHU_FEE,
        ),
        Platform::Jiyu => labelled_values(
            platform,
            lines,
            names::inline(lines, "账户名称"),
            &PRODUCT_CODE,
            &CONFIRMED_AMOUNT,
            &CONFIRMED_SHARES,
            &CONFIRMED_FEE,
        ),
        Platform::Ningbo => labelled_values(
            platform,
            lines,
            names::inline_until(lines, "客户名称", "基金账号"),
            &PRODUCT_CODE,
            &NINGBO_AMOUNT,
            &NINGBO_SHARES,
            &NINGBO_FEE,
        ),
        Platform::Guoxinjiali => {
            let mut record = labelled_values(
                platform,
                lines,
                names::inline(lines, "账户名称"),
                &PRODUCT_CODE,
                &CONFIRMED_AMOUNT,
                &CONFIRMED_SHARES,
                &CONFIRMED_FEE,
            );
            // A `手续费（元）` column header belongs to another table.
            record.fee = lines
                .iter()
                .filter(|l| !l.contains("手续费（元）"))
                .find_map(|l| CONFIRMED_FEE.captures(l).map(|c| digits(&c[1])))
                .unwrap_or_default();
            record
        }
        Platform::Panying => labelled_values(
            platform,
            lines,
            names::inline(lines, "客户名称"),
            &PRODUCT_CODE,
            &CONFIRMED_AMOUNT,
            &CONFIRMED_SHARES,
            &CONFIRMED_FEE,
        ),
        Platform::Zdt => zdt(lines),
        Platform::JdForcedRedemption => return Vec::new(),
    };
    vec![record]
}

/// Record whose code and values each come from the first line matching
/// their label pattern.
fn labelled_values(
    platform: Platform,
    lines: &[String],
    product_name: String,
    code_re: &Regex,
    amount: &Regex,
    shares: &Regex,
    fee: &Regex,
) -> ConfirmationRecord {
    ConfirmationRecord {
        platform,
        product_name,
        fund_code: code(lines, code_re),
        amount: number(lines, amount),
        shares: number(lines, shares),
        fee: number(lines, fee),
    }
}

/// Shares are the first figure of the `确认净额` row; the amount is the
/// applied one.
fn wangjin(lines: &[String]) -> ConfirmationRecord {
    let mut record = ConfirmationRecord::new(Platform::Wangjin);
    record.product_name = names::inline(lines, "投资者名称");
    record.fund_code = code(lines, &FUND_CODE);
    record.amount = lower_case_amount(lines).unwrap_or_default();
    record.shares = lines
        .iter()
        .filter(|l| l.contains("确认净额"))
        .find_map(|l| NET_AMOUNT_NUMBER.find(l).map(|m| digits(m.as_str())))
        .unwrap_or_default();
    record.fee = number(lines, &WANGJIN_FEE);
    record
}

/// Labels are letter-spaced (`确 认 金 额`); the fee is the first figure
/// on any line reading `手续费` once spaces are removed.
fn jianhang(lines: &[String]) -> ConfirmationRecord {
    let mut record = ConfirmationRecord::new(Platform::Jianhang);
    record.product_name = capture_where(lines, "客 户 名 称", &SPACED_CUSTOMER_NAME)
        .map(|v| squeeze(&v.trim().replace('┃', "")))
        .unwrap_or_default();
    record.fund_code = capture_where(lines, "基 金 代 码", &SPACED_FUND_CODE).unwrap_or_default();
    record.amount = capture_where(lines, "确 认 金 额", &SPACED_AMOUNT)
        .map(|v| digits(&v))
        .unwrap_or_default();
    record.shares = capture_where(lines, "确 认 份 额", &SPACED_SHARES)
        .map(|v| digits(&v))
        .unwrap_or_default();
    record.fee = lines
        .iter()
        .filter(|l| l.replace(' ', "").contains("手续费"))
        .find_map(|l| FIRST_NUMBER.captures(l).map(|c| digits(&c[1])))
        .unwrap_or_default();
    record
}

fn xingzheng(lines: &[String]) -> ConfirmationRecord {
    ConfirmationRecord {
        product_name: capture_where(lines, "账 号 名 称", &XINGZHENG_NAME)
            .map(|v| squeeze(v.trim()))
            .unwrap_or_default(),
        fund_code: capture_where(lines, "基 金 代 码", &SPACED_FUND_CODE).unwrap_or_default(),
        amount: spaced_number(lines, "确 认 金 额", &XINGZHENG_AMOUNT),
        shares: spaced_number(lines, "确 认 份 额", &XINGZHENG_SHARES),
        fee: spaced_number(lines, "手 续 费", &XINGZHENG_FEE),
        platform: Platform::Xingzheng,
    }
}

fn spaced_number(lines: &[String], anchor: &str, re: &Regex) -> String {
    capture_where(lines, anchor, re)
        .map(|v| digits(&v))
        .unwrap_or_default()
}

/// Boxed table: values sit in the cells after their `│`-separated labels.
fn tengyuan(lines: &[String]) -> ConfirmationRecord {
    let mut record = ConfirmationRecord::new(Platform::Tengyuan);
    record.product_name = names::boxed_customer(lines);

    record.fund_code = lines
        .iter()
        .filter(|l| l.contains("基金代码"))
        .find_map(|l| {
            l.split('│')
                .find_map(|cell| SIX_DIGIT_GROUP.captures(cell).map(|c| c[1].to_string()))
        })
        .unwrap_or_default();

    let cell_number = |cell: &str| {
        FIRST_NUMBER
            .captures(cell)
            .map(|c| digits(&c[1]))
            .unwrap_or_default()
    };

    if let Some(line) = lines
        .iter()
        .find(|l| l.contains("确认金额") && l.contains("确认份额") && l.contains('│'))
    {
        let cells: Vec<&str> = line.split('│').collect();
        if cells.len() >= 4 {
            record.amount = cell_number(cells[1]);
            record.shares = cell_number(cells[3]);
        }
    }

    record.fee = lines
        .iter()
        .filter(|l| l.contains('│') && ["手", "续", "费"].iter().all(|k| l.contains(k)))
        .find_map(|l| {
            l.split('│')
                .nth(3)
                .and_then(|cell| FIRST_NUMBER.captures(cell).map(|c| digits(&c[1])))
        })
        .unwrap_or_default();
    record
}

/// One record per itemised trade whose code and an amount or share count
/// were found.
fn yingmi(lines: &[String]) -> Vec<ConfirmationRecord> {
    let product = names::yingmi(lines);
    trade_blocks(lines, "申购")
        .iter()
        .filter_map(|block| {
            let fund_code = text_capture(block, &YINGMI_CODE)?;
            let amount = text_number(block, &YINGMI_AMOUNT);
            let shares = text_number(block, &YINGMI_SHARES);
            if amount.is_empty() && shares.is_empty() {
                return None;
            }
            Some(ConfirmationRecord {
                product_name: product.clone(),
                fund_code,
                amount,
                shares,
                fee: text_number(block, &YINGMI_FEE),
                platform: Platform::Yingmi,
            })
        })
        .collect()
}

/// One record per `交易信息` block.
fn liantai(lines: &[String]) -> Vec<ConfirmationRecord> {
    let product = name(lines, &LIANTAI_ACCOUNT);
    let mut records = Vec::new();

    for window in trade_info_windows(lines) {
        let mut record = ConfirmationRecord {
            product_name: product.clone(),
            ..ConfirmationRecord::new(Platform::Liantai)
        };
        for sub in window {
            if let Some(c) = LIANTAI_FUND_CODE.captures(sub) {
                record.fund_code = c[1].to_string();
            }
            if let Some(c) = LIANTAI_AMOUNT.captures(sub) {
                record.amount = digits(&c[1]);
            }
            if let Some(c) = LIANTAI_SHARES.captures(sub) {
                record.shares = digits(&c[1]);
            }
            if let Some(c) = LIANTAI_FEE.captures(sub) {
                record.fee = digits(&c[1]);
            }
        }
        if !record.fund_code.is_empty() && !record.amount.is_empty() {
            records.push(record);
        }
    }
    records
}

/// Labelled fields with colons; the last occurrence of each wins.
fn zdt(lines: &[String]) -> ConfirmationRecord {
    let mut record = ConfirmationRecord::new(Platform::Zdt);
    for line in lines {
        let line = line.trim();
        if let Some(c) = ZDT_NAME.captures(line) {
            record.product_name = squeeze(c[1].trim());
        }
        if let Some(c) = ZDT_CODE.captures(line) {
            record.fund_code = c[1].to_string();
        }
        if let Some(c) = ZDT_AMOUNT.captures(line) {
            record.amount = digits(&c[1]);
        }
        if let Some(c) = ZDT_SHARES.captures(line) {
            record.shares = digits(&c[1]);
        }
        if let Some(c) = ZDT_FEE.captures(line) {
            record.fee = digits(&c[1]);
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::lines;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn doc(text: &str) -> Document {
        Document::from_text(Path::new("/tmp/申购确认.pdf"), text)
    }

    #[test]
    fn test_jd_confirmation() {
        let d = doc("客户名称 万联资管 1号\n基金代码 000001\n确认金额 1,000.00\n确认份额 990.10\n手续费 1.50");
        let records = extract(Platform::Jd, &d);
        assert_eq!(
            records,
            vec![ConfirmationRecord {
                platform: Platform::Jd,
                product_name: "万联资管1号".into(),
                fund_code: "000001".into(),
                amount: "1000.00".into(),
                shares: "990.10".into(),
                fee: "1.50".into(),
            }]
        );
    }

    #[test]
    fn test_changliang_requires_unit_suffix() {
        let d = doc("投资者名称 万联资管\n基金代码 000001\n确认金额 100.00 (元)\n确认份额 98.00 (份)\n手续费 0.00 (元)");
        let record = &extract(Platform::Changliang, &d)[0];
        assert_eq!(record.amount, "100.00");
        assert_eq!(record.shares, "98.00");
        assert_eq!(record.fee, "0.00");
    }

    #[test]
    fn test_tengyuan_boxed_cells() {
        let ls = lines(
            "┃客户名称│万联资管腾1号┃│\n┃基金代码│000001 ┃\n\
             ┃确认金额 │8,000,000.00 │确认份额 │6,932,743.98 ┃\n\
             ┃单位净值 │1.15380 │手 续 费 │1,000.00 ┃",
        );
        let record = tengyuan(&ls);
        assert_eq!(record.product_name, "万联资管腾1号");
        assert_eq!(record.fund_code, "000001");
        assert_eq!(record.amount, "8000000.00");
        assert_eq!(record.shares, "6932743.98");
        assert_eq!(record.fee, "1000.00");
    }

    #[test]
    fn test_jianhang_spaced_labels() {
        let ls = lines(
            "客 户 名 称：┃万联资管 建1号\n基 金 代 码：000001\n确 认 金 额：500.00\n\
             确 认 份 额：480.00\n手   续  费： 2.50",
        );
        let record = jianhang(&ls);
        assert_eq!(record.product_name, "万联资管建1号");
        assert_eq!(record.fund_code, "000001");
        assert_eq!(record.amount, "500.00");
        assert_eq!(record.fee, "2.50");
    }

    #[test]
    fn test_yingmi_blocks_need_code_and_value() {
        let d = doc(
            "投资者名称 投资者类型\n万联资管1号\n\
             交易序号1 交易类型：申购\n基金代码：000001\n确认金额：100.00\n确认份额：99.00\n\
             交易序号2 交易类型：申购\n基金代码：000002\n",
        );
        let records = extract(Platform::Yingmi, &d);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].shares, "99.00");
    }

    #[test]
    fn test_hexun_name_stops_at_digit_row() {
        let ls = lines("账户名称 万联资管和1号 账户类型 机构\n集合资产管理计划\n12345678\n基金代码 000001");
        let d = Document::from_text(Path::new("/tmp/a.pdf"), ls.join("\n"));
        let record = &extract(Platform::Hexun, &d)[0];
        assert_eq!(record.product_name, "万联资管和1号集合资产管理计划");
        assert_eq!(record.fund_code, "000001");
    }

    #[test]
    fn test_zdt_last_occurrence_wins() {
        let ls = lines("投资者名称：万联资管1号 投资者类型 机构\n确认金额：1.00\n确认金额：2,000.00\n手续费：0.00");
        let record = zdt(&ls);
        assert_eq!(record.product_name, "万联资管1号");
        assert_eq!(record.amount, "2000.00");
        assert_eq!(record.fee, "0.00");
    }

    #[test]
    fn test_guoxinjiali_skips_unit_fee_header() {
        let d = doc("账户名称 万联资管\n手续费 9.99 手续费（元）\n手续费 1.00");
        let record = &extract(Platform::Guoxinjiali, &d)[0];
        assert_eq!(record.fee, "1.00");
    }
}
