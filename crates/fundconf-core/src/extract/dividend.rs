//! Dividend reinvestment confirmations (红利再投).
//!
//! Several platforms print a single reinvested figure; for those the same
//! value fills both amount and shares.

use chrono::{Duration, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{
    CUSTOMER_NAME, FUND_CODE, FUND_CODE_COLON, INVESTOR_NAME, LIANTAI_ACCOUNT, LIANTAI_FUND_CODE,
    LIDE_NAME, PRODUCT_CODE_ALNUM, SIX_DIGITS, SPACED_CUSTOMER_NAME, SPACED_FUND_CODE,
    TEXT_AMOUNT, TEXT_PRODUCT_CODE, TEXT_SHARES, ZDT_INVESTOR_NAME, ZDT_INVESTOR_TOKEN,
};
use super::{
    after, capture_where, code, contains_any, digits, first_capture, last_decimal,
    leading_number, line_at, name, names, number, squeeze, text_capture, text_number,
    trade_info_windows,
};
use crate::document::Document;
use crate::models::record::DividendRecord;
use crate::platform::Platform;

lazy_static! {
    static ref LIDE_AMOUNT: Regex = Regex::new(r"红利总金额（元）\s*([\d,]+\.\d+)").unwrap();
    static ref LIDE_SHARES: Regex = Regex::new(r"红利再投份额（份）\s*([\d,]+\.\d+)").unwrap();
    static ref CHANGLIANG_SHARES: Regex = Regex::new(r"红利转投份额\s*([\d,]+\.\d+)").unwrap();
    static ref XINGZHENG_NAME: Regex = Regex::new(r"账\s*号\s*名\s*称\s*[:：]\s*(.*)").unwrap();
    static ref XINGZHENG_SHARES: Regex =
        Regex::new(r"再投资份额\s*[:：]?\s*([\d,]+\.\d+)").unwrap();
    static ref YINGMI_CODE: Regex = Regex::new(r"基金代码[:：]\s*([0-9A-Za-z]+)").unwrap();
    static ref YINGMI_AMOUNT: Regex = Regex::new(r"分红金额[:：]?\s*([\d,\.]+)").unwrap();
    static ref YINGMI_SHARES: Regex = Regex::new(r"红利再投份额[:：]?\s*([\d,\.]+)").unwrap();
    static ref ZHAOYINGTONG_AMOUNT: Regex = Regex::new(r"CNY\s*([\d,\.]+)").unwrap();
    static ref ZHAOYINGTONG_SHARES: Regex = Regex::new(r"转投份额\(份\)\s*([\d,\.]+)").unwrap();
    static ref YOUCHU_NAME: Regex = Regex::new(r"客户名称[:：]?\s*(\S+)").unwrap();
    static ref YOUCHU_CODE: Regex = Regex::new(r"产品代码[:：]?\s*([0-9A-Za-z]+)").unwrap();
    static ref YOUCHU_AMOUNT: Regex = Regex::new(r"再投资金额[:：]?\s*([\d,\.]+)").unwrap();
    static ref YOUCHU_SHARES: Regex = Regex::new(r"红股[:：]?\s*([\d,\.]+)").unwrap();
    static ref PINGAN_SHARES: Regex = Regex::new(r"确认份额\(份\)\s*([\d,]+\.?\d*)").unwrap();
    static ref JIAOHANG_NAME: Regex = Regex::new(r"投资者信息\s*(.*)").unwrap();
    static ref JIAOHANG_SHARES: Regex = Regex::new(r"转投份额\s*([\d,\.]+)").unwrap();
    static ref JIAOHANG_CONFIRM_DATE: Regex = Regex::new(r"确认日期\s*(\d{8})").unwrap();
    static ref HEXUN_AMOUNT: Regex = Regex::new(r"红利资金\(元\)\s*([\d,]+\.?\d*)").unwrap();
    static ref HEXUN_SHARES: Regex =
        Regex::new(r"红利再投资确认份[额]?\s*([\d,]+\.?\d*)").unwrap();
    static ref JIANHANG_SHARES: Regex = Regex::new(r"红\s*股\s*[：:]?\s*([\d,]+\.?\d*)").unwrap();
    static ref REINVEST_SHARES: Regex = Regex::new(r"红利再投份额\s*([\d,]+\.?\d*)").unwrap();
    static ref WANGJIN_BOXED_NAME: Regex = Regex::new(r"客户名称\s*([^网点名称]+)").unwrap();
    static ref JD_AMOUNT: Regex = Regex::new(r"红利再投金额\s*([\d,]+\.?\d*)").unwrap();
    static ref RONGLIANCHUANG_SHARES: Regex =
        Regex::new(r"再投资份额（份）\s*([\d,]+\.?\d*)").unwrap();
    static ref LIANTAI_SHARES: Regex = Regex::new(r"红利再投份额\(份\)\s*([\d,]+\.?\d*)").unwrap();
    static ref MINSHENG_NAME: Regex = Regex::new(r"客户名称[：:]\s*(.*)").unwrap();
    static ref MINSHENG_CODE: Regex = Regex::new(r"产品代码[：:]\s*([0-9A-Za-z]+)").unwrap();
    static ref MINSHENG_SHARES: Regex =
        Regex::new(r"确认份额（份）[：:]?\s*([\d,]+\.?\d*)").unwrap();
    // 序号 账号 代码 红利再投资 金额 份额, fund name lost to a line wrap
    static ref ZDT_COMPACT_ROW: Regex = Regex::new(
        r"^\s*(\d+)\s+(\d{10,})\s+([0-9]{6})\s+红利再投资\s+([\d,]+\.?\d*)\s+([\d,]+\.?\d*)"
    )
    .unwrap();
    // 序号 账号 基金名称 代码 红利再投资 金额 份额
    static ref ZDT_STANDARD_ROW: Regex = Regex::new(
        r"^\s*(\d+)\s+(\d{10,})\s+(.+?)\s+([0-9]{6})\s+红利再投资\s+([\d,]+\.?\d*)\s+([\d,]+\.?\d*)"
    )
    .unwrap();
    static ref ZDT_SHARES: Regex = Regex::new(r"分红份额[：:]\s*([\d,]+\.?\d*)").unwrap();
    static ref REINVEST_AMOUNT: Regex = Regex::new(r"再投资金额\s*([\d,]+\.?\d*)").unwrap();
    static ref REINVEST_SHARES_PLAIN: Regex = Regex::new(r"再投资份额\s*([\d,]+\.?\d*)").unwrap();
    static ref NINGBO_SHARES: Regex = Regex::new(r"红利份额（份）\s*([\d,]+\.?\d*)").unwrap();
    static ref PANYING_NAME: Regex = Regex::new(r"客户名称\s*[:：]?\s*(.*)").unwrap();
    static ref PANYING_CODE: Regex = Regex::new(r"产品代码\s*[:：]?\s*([0-9]{6})").unwrap();
    static ref PANYING_CASH: Regex =
        Regex::new(r"所得现金[（(]元[）)]\s*[:：]?\s*([\d,]+\.?\d*)").unwrap();
    static ref PANYING_SHARES: Regex =
        Regex::new(r"所得份额[（(]份[）)]\s*[:：]?\s*([\d,]+\.?\d*)").unwrap();
}

const HEXUN_NAME_STOP: &[&str] = &["交易账号", "确认工作日", "基金代码", "红利基数", "重要提示"];
const WANGJIN_NAME_STOP: &[&str] = &["基金账号", "交易账号", "交易类别", "基金代码", "─────"];
const RONGLIANCHUANG_NAME_STOP: &[&str] =
    &["银行账号", "基金账号", "平台交易账号", "产品信息", "基金代码", "基金名称"];

/// Repairs for plan names cut short by a page wrap, checked in order.
const PLAN_SUFFIXES: &[(&str, &str)] = &[
    ("集", "合资产管理计划"),
    ("集合", "资产管理计划"),
    ("集合资", "产管理计划"),
    ("集合资产", "管理计划"),
    ("单", "一资产管理计划"),
    ("单一", "资产管理计划"),
    ("单一资", "产管理计划"),
    ("单一资产", "管理计划"),
    ("资产管理计", "划"),
    ("资产管理", "计划"),
];

/// Extract the dividend records of a document already attributed to `platform`.
pub fn extract(platform: Platform, doc: &Document) -> Vec<DividendRecord> {
    let lines = &doc.lines;
    let record = match platform {
        Platform::Yingmi => return yingmi(lines),
        Platform::Liantai => return liantai(lines),
        Platform::Zdt => return zdt(lines),
        Platform::Haomai => haomai(doc),
        Platform::Tiantian => tiantian(lines),
        Platform::Lide => lide(lines),
        Platform::Changliang => changliang(lines),
        Platform::Xingzheng => xingzheng(lines),
        Platform::Zhaoyingtong => zhaoyingtong(lines),
        Platform::Youchu => youchu(lines),
        Platform::Pingan => pingan(lines),
        Platform::Jiaohang => jiaohang(lines),
        Platform::Hexun => hexun(lines),
        Platform::Jianhang => jianhang(lines),
        Platform::Tengyuan => tengyuan(lines),
        Platform::Wangjin => wangjin(lines),
        Platform::Jd => jd(lines),
        Platform::Ronglianchuang => ronglianchuang(lines),
        Platform::Minsheng => minsheng(lines),
        Platform::Jiyu => jiyu(lines),
        Platform::Ningbo => ningbo(lines),
        Platform::Guoxinjiali => guoxinjiali(lines, &doc.file_name),
        Platform::Panying => panying(lines),
        Platform::JdForcedRedemption => return Vec::new(),
    };
    vec![record]
}

fn haomai(doc: &Document) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Haomai);
    record.product_name = names::haomai(&doc.lines);
    record.fund_code = text_capture(&doc.raw_text, &TEXT_PRODUCT_CODE).unwrap_or_default();
    record.amount = text_number(&doc.raw_text, &TEXT_AMOUNT);
    record.shares = text_number(&doc.raw_text, &TEXT_SHARES);
    record
}

fn tiantian(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Tiantian);
    record.product_name = names::tiantian(lines);
    record.fund_code = code(lines, &FUND_CODE);

    // Values sit on the line below their column headers.
    if let Some(i) = lines.iter().position(|l| l.contains("红利资金（元")) {
        record.amount = last_decimal(line_at(lines, i + 1)).unwrap_or_default();
    }
    for (i, line) in lines.iter().enumerate() {
        if !line.contains("红利再投资基") {
            continue;
        }
        if let Some(v) = (1..3).find_map(|off| last_decimal(line_at(lines, i + off))) {
            record.shares = v;
            break;
        }
    }
    record
}

fn lide(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Lide);
    record.product_name = name(lines, &LIDE_NAME);
    record.fund_code = code(lines, &FUND_CODE);
    record.amount = number(lines, &LIDE_AMOUNT);
    record.shares = number(lines, &LIDE_SHARES);
    record
}

fn changliang(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Changliang)
        .with_equal_amount_and_shares(number(lines, &CHANGLIANG_SHARES));
    record.product_name = name(lines, &INVESTOR_NAME);
    record.fund_code = code(lines, &FUND_CODE);
    record
}

fn xingzheng(lines: &[String]) -> DividendRecord {
    let shares = capture_where(lines, "再投资份额", &XINGZHENG_SHARES)
        .map(|v| digits(&v))
        .unwrap_or_default();
    let mut record =
        DividendRecord::new(Platform::Xingzheng).with_equal_amount_and_shares(shares);
    record.product_name = capture_where(lines, "账 号 名 称", &XINGZHENG_NAME)
        .map(|v| squeeze(&v))
        .unwrap_or_default();
    record.fund_code = capture_where(lines, "基 金 代 码", &SPACED_FUND_CODE).unwrap_or_default();
    record
}

/// One record per `序号:` row; the investor name is shared.
fn yingmi(lines: &[String]) -> Vec<DividendRecord> {
    let product = names::yingmi(lines);

    let mut records = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if !(line.contains("序号:") && line.contains("基金代码:")) {
            continue;
        }
        let fund_code = YINGMI_CODE
            .captures(line)
            .map(|c| c[1].to_string())
            .unwrap_or_default();
        let mut amount = String::new();
        let mut shares = String::new();
        for sub in lines.iter().skip(i + 1).take(4) {
            if let Some(c) = YINGMI_AMOUNT.captures(sub) {
                amount = digits(&c[1]);
            }
            if let Some(c) = YINGMI_SHARES.captures(sub) {
                shares = digits(&c[1]);
            }
        }
        if !fund_code.is_empty() && !amount.is_empty() && !shares.is_empty() {
            records.push(DividendRecord {
                product_name: product.clone(),
                fund_code,
                amount,
                shares,
                ..DividendRecord::new(Platform::Yingmi)
            });
        }
    }
    records
}

fn zhaoyingtong(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Zhaoyingtong);
    record.product_name = name(lines, &INVESTOR_NAME);
    record.fund_code = code(lines, &PRODUCT_CODE_ALNUM);
    record.amount = lines
        .iter()
        .filter(|l| l.contains("分红金额"))
        .find_map(|l| ZHAOYINGTONG_AMOUNT.captures(l).map(|c| digits(&c[1])))
        .unwrap_or_default();
    record.shares = number(lines, &ZHAOYINGTONG_SHARES);
    record
}

fn youchu(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Youchu);

    if let Some(i) = lines.iter().position(|l| l.contains("客户名称")) {
        let mut product = YOUCHU_NAME
            .captures(&lines[i])
            .map(|c| c[1].to_string())
            .unwrap_or_default();
        for j in 1..4 {
            let ext = line_at(lines, i + j);
            if !ext.is_empty() && contains_any(ext, &["集合资产管", "理计划"]) {
                product.push_str(ext);
            }
        }
        record.product_name = squeeze(&product);
    }

    record.fund_code = code(lines, &YOUCHU_CODE);
    record.amount = number(lines, &YOUCHU_AMOUNT);
    record.shares = number(lines, &YOUCHU_SHARES);
    record
}

fn pingan(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Pingan)
        .with_equal_amount_and_shares(number(lines, &PINGAN_SHARES));
    record.product_name = names::pingan(lines);
    record.fund_code = code(lines, &FUND_CODE);
    record
}

fn jiaohang(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Jiaohang)
        .with_equal_amount_and_shares(number(lines, &JIAOHANG_SHARES));
    record.product_name = name(lines, &JIAOHANG_NAME);
    record.fund_code = code(lines, &PRODUCT_CODE_ALNUM);
    // An unreadable confirmation date leaves the cut-off blank rather than
    // defaulting it.
    record.end_date = Some(
        first_capture(lines, &JIAOHANG_CONFIRM_DATE)
            .and_then(|confirmed| day_before(&confirmed))
            .unwrap_or_default(),
    );
    record
}

/// `YYYYMMDD` of the day preceding a compact date, `None` when invalid.
fn day_before(compact: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(compact, "%Y%m%d").ok()?;
    let prev = date.checked_sub_signed(Duration::days(1))?;
    Some(prev.format("%Y%m%d").to_string())
}

fn hexun(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Hexun);

    record.product_name = names::labelled(lines, "账户名称", Some("账户类型"), 4, |l| {
        contains_any(l, HEXUN_NAME_STOP)
    });

    record.fund_code = code(lines, &FUND_CODE);
    record.amount = number(lines, &HEXUN_AMOUNT);

    for (i, line) in lines.iter().enumerate() {
        if !line.contains("红利再投资确认份") {
            continue;
        }
        if let Some(c) = HEXUN_SHARES.captures(line) {
            record.shares = digits(&c[1]);
            break;
        }
        if let Some(v) = leading_number(line_at(lines, i + 1)) {
            record.shares = v;
            break;
        }
    }
    record
}

fn jianhang(lines: &[String]) -> DividendRecord {
    let shares = capture_where(lines, "红 股", &JIANHANG_SHARES)
        .map(|v| digits(&v))
        .unwrap_or_default();
    let mut record = DividendRecord::new(Platform::Jianhang).with_equal_amount_and_shares(shares);
    record.product_name = capture_where(lines, "客 户 名 称", &SPACED_CUSTOMER_NAME)
        .map(|v| squeeze(&v.replace('┃', "")))
        .unwrap_or_default();
    record.fund_code = capture_where(lines, "基 金 代 码", &SPACED_FUND_CODE).unwrap_or_default();
    record
}

fn tengyuan(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Tengyuan)
        .with_equal_amount_and_shares(number(lines, &REINVEST_SHARES));
    record.product_name = names::inline(lines, "客户名称");
    record.fund_code = code(lines, &FUND_CODE);
    record
}

/// Two layouts: a boxed one drawn with `─────` rules, and a plain one where
/// the name wraps over the following lines.
fn wangjin(lines: &[String]) -> DividendRecord {
    let boxed = lines.iter().any(|l| l.contains("─────"));
    let mut product = String::new();

    if boxed {
        // The boxed header puts the customer name within the first 3 lines.
        for (i, line) in lines.iter().enumerate().take(3) {
            if !line.contains("客户名称") {
                continue;
            }
            let Some(c) = WANGJIN_BOXED_NAME.captures(line) else {
                continue;
            };
            product = c[1].trim().to_string();
            if !product.ends_with("计划") {
                let next = line_at(lines, i + 1);
                if contains_any(next, &["理计划", "管理计划"]) {
                    product.push_str(next);
                }
            }
            break;
        }
    } else if let Some(i) = lines.iter().position(|l| l.contains("客户名称")) {
        product.push_str(after(&lines[i], "客户名称").map(str::trim).unwrap_or_default());
        for j in i + 1..(i + 5).min(lines.len()) {
            let next = line_at(lines, j);
            if contains_any(next, &["理计划", "管理计划"]) {
                product.push_str(next);
                break;
            }
            if next.is_empty()
                || contains_any(next, WANGJIN_NAME_STOP)
                || next.chars().count() <= 3
            {
                break;
            }
            product.push_str(next);
        }
    }

    let mut shares = String::new();
    for (i, line) in lines.iter().enumerate() {
        if !line.contains("红利再投份额") {
            continue;
        }
        if let Some(c) = REINVEST_SHARES.captures(line) {
            shares = digits(&c[1]);
            break;
        }
        if !boxed {
            if let Some(v) = leading_number(line_at(lines, i + 1)) {
                shares = v;
                break;
            }
        }
    }

    let mut record = DividendRecord::new(Platform::Wangjin).with_equal_amount_and_shares(shares);
    record.product_name = squeeze(&product);
    record.fund_code = code(lines, &FUND_CODE);
    record
}

fn jd(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Jd);
    record.product_name = names::inline(lines, "客户名称");
    record.fund_code = code(lines, &FUND_CODE);
    record.amount = number(lines, &JD_AMOUNT);
    record.shares = number(lines, &REINVEST_SHARES);
    record
}

fn ronglianchuang(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Ronglianchuang)
        .with_equal_amount_and_shares(number(lines, &RONGLIANCHUANG_SHARES));

    record.product_name =
        names::labelled(lines, "投资主体产品名称", Some("银行账号"), 2, |l| {
            contains_any(l, RONGLIANCHUANG_NAME_STOP)
        });

    record.fund_code = code(lines, &FUND_CODE);
    record
}

/// One record per `交易信息` block.
fn liantai(lines: &[String]) -> Vec<DividendRecord> {
    let product = name(lines, &LIANTAI_ACCOUNT);
    let mut records = Vec::new();

    for window in trade_info_windows(lines) {
        let mut fund_code = String::new();
        let mut shares = String::new();
        for sub in window {
            if let Some(c) = LIANTAI_FUND_CODE.captures(sub) {
                fund_code = c[1].to_string();
            }
            if let Some(c) = LIANTAI_SHARES.captures(sub) {
                shares = digits(&c[1]);
            }
        }
        if !fund_code.is_empty() && !shares.is_empty() {
            records.push(DividendRecord {
                product_name: product.clone(),
                fund_code,
                ..DividendRecord::new(Platform::Liantai).with_equal_amount_and_shares(shares)
            });
        }
    }
    records
}

fn minsheng(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Minsheng)
        .with_equal_amount_and_shares(number(lines, &MINSHENG_SHARES));
    record.product_name = name(lines, &MINSHENG_NAME);
    record.fund_code = code(lines, &MINSHENG_CODE);
    record
}

/// Summary lists carry one row per fund; single slips fall back to the
/// labelled fields, where the last occurrence wins.
fn zdt(lines: &[String]) -> Vec<DividendRecord> {
    let product = lines
        .iter()
        .find(|l| l.contains("投资者名称"))
        .and_then(|l| {
            ZDT_INVESTOR_NAME
                .captures(l)
                .or_else(|| ZDT_INVESTOR_TOKEN.captures(l))
                .map(|c| squeeze(c[1].trim()))
        })
        .unwrap_or_default();

    let row = |fund_code: &str, amount: &str, shares: &str| DividendRecord {
        product_name: product.clone(),
        fund_code: fund_code.to_string(),
        amount: digits(amount),
        shares: digits(shares),
        end_date: None,
        platform: Platform::Zdt,
    };

    let mut records = Vec::new();
    for line in lines {
        let line = line.trim();
        if let Some(c) = ZDT_COMPACT_ROW.captures(line) {
            records.push(row(&c[3], &c[4], &c[5]));
        } else if let Some(c) = ZDT_STANDARD_ROW.captures(line) {
            records.push(row(&c[4], &c[5], &c[6]));
        }
    }
    if !records.is_empty() {
        return records;
    }

    let mut fund_code = String::new();
    let mut shares = String::new();
    for line in lines {
        if let Some(c) = FUND_CODE_COLON.captures(line) {
            fund_code = c[1].to_string();
        }
        if let Some(c) = ZDT_SHARES.captures(line) {
            shares = c[1].to_string();
        }
    }
    if !fund_code.is_empty() && !shares.is_empty() {
        records.push(row(&fund_code, &shares, &shares));
    }
    records
}

fn jiyu(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Jiyu);
    record.product_name = name(lines, &CUSTOMER_NAME);
    record.fund_code = code(lines, &PRODUCT_CODE_ALNUM);
    record.amount = number(lines, &REINVEST_AMOUNT);
    record.shares = number(lines, &REINVEST_SHARES_PLAIN);
    record
}

fn ningbo(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Ningbo)
        .with_equal_amount_and_shares(number(lines, &NINGBO_SHARES));
    record.product_name = name(lines, &CUSTOMER_NAME);
    record.fund_code = code(lines, &PRODUCT_CODE_ALNUM);
    record
}

/// The table row reads `… 代码 … 分红 - - - - 确认金额 确认份额 …`; the product
/// name comes from the file name, or from the two wrapped cells of the row.
fn guoxinjiali(lines: &[String], file_name: &str) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Guoxinjiali);
    record.product_name = name_from_file(file_name).unwrap_or_default();

    for (i, line) in lines.iter().enumerate() {
        if !line.contains("分红") {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(div_idx) = parts.iter().position(|p| *p == "分红") else {
            continue;
        };

        if let Some(found) = parts[..div_idx].iter().rev().find(|p| SIX_DIGITS.is_match(p)) {
            record.fund_code = found.to_string();
        }
        // Confirmed shares, six cells after the business type.
        if let Some(value) = parts.get(div_idx + 6) {
            let value = digits(value);
            record.shares = value.clone();
            record.amount = value;
        }

        if record.product_name.is_empty() && i > 0 {
            let prev_first = lines[i - 1].split_whitespace().next();
            if let (Some(head), Some(tail)) = (prev_first, parts.first()) {
                record.product_name = complete_plan_name(&format!("{head}{tail}"));
            }
        }
        break;
    }
    record
}

/// Product name from `名称_交易确认单_日期.pdf`, dropping any `【…】` prefix.
fn name_from_file(file_name: &str) -> Option<String> {
    let end = file_name.find("_交易确认单")?;
    let stem = &file_name[..end];
    let stem = stem.rsplit('】').next().unwrap_or(stem);
    Some(stem.to_string())
}

fn complete_plan_name(raw: &str) -> String {
    PLAN_SUFFIXES
        .iter()
        .find(|(cut, _)| raw.ends_with(cut))
        .map(|(_, rest)| format!("{raw}{rest}"))
        .unwrap_or_else(|| raw.to_string())
}

fn panying(lines: &[String]) -> DividendRecord {
    let mut record = DividendRecord::new(Platform::Panying);

    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();
        if line.contains("客户名称") {
            if let Some(c) = PANYING_NAME.captures(line) {
                record.product_name = squeeze(c[1].trim());
            }
        }
        if let Some(c) = PANYING_CODE.captures(line) {
            record.fund_code = c[1].to_string();
        }
        if let Some(c) = PANYING_CASH.captures(line) {
            record.amount = digits(&c[1]);
        }
        if line.contains("所得份额") {
            // The value is either inline or starts the next line.
            if let Some(c) = PANYING_SHARES.captures(line) {
                record.shares = digits(&c[1]);
            } else if let Some(v) = leading_number(line_at(lines, i + 1)) {
                record.shares = v;
            }
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

    fn doc(name: &str, text: &str) -> Document {
        Document::from_text(Path::new(name), text)
    }

    #[test]
    fn test_minsheng_labelled_fields() {
        let d = doc(
            "民生同业e+.pdf",
            "客户名称：万联资管X号集合资产管理计划\n产品代码：000912\n确认份额（份）：1,234.50",
        );
        let records = extract(Platform::Minsheng, &d);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_name, "万联资管X号集合资产管理计划");
        assert_eq!(records[0].fund_code, "000912");
        assert_eq!(records[0].shares, "1234.50");
        assert_eq!(records[0].amount, "1234.50");
    }

    #[test]
    fn test_changliang_amount_equals_shares() {
        let d = doc(
            "a.pdf",
            "长量基金\n投资者名称 万联资管 稳健1号\n基金代码 000001\n红利转投份额 2,001.37",
        );
        let r = &extract(Platform::Changliang, &d)[0];
        assert_eq!(r.product_name, "万联资管稳健1号");
        assert_eq!(r.amount, "2001.37");
        assert_eq!(r.amount, r.shares);
    }

    #[test]
    fn test_liantai_one_record_per_block() {
        let text = "联泰基金\n投资账户 万联资管3号\n\
                    交易信息\n基金代码 000001\n红利再投份额(份) 10.00\n\
                    交易信息\n基金代码 000002\n红利再投份额(份) 20.00\n\
                    交易信息\n基金代码 000003\n红利再投份额(份) 1,030.00";
        let records = extract(Platform::Liantai, &doc("b.pdf", text));
        let codes: Vec<_> = records.iter().map(|r| r.fund_code.as_str()).collect();
        assert_eq!(codes, vec!["000001", "000002", "000003"]);
        assert_eq!(records[2].amount, "1030.00");
        assert!(records.iter().all(|r| r.product_name == "万联资管3号"));
    }

    #[test]
    fn test_yingmi_rows_need_all_fields() {
        let text = "投资者名称 万联资管盈1号 投资者类型 机构\n\
                    序号: 1 基金代码: 000011\n分红金额: 100.00\n红利再投份额: 99.50\n\
                    序号: 2 基金代码: 000012\n分红金额: 5.00";
        let records = yingmi(&lines(text));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fund_code, "000011");
        assert_eq!(records[0].shares, "99.50");
    }

    #[test]
    fn test_zdt_summary_rows() {
        let text = "证达通\n投资者名称：万联资管A计划 生成时间 2025-01-01\n\
                    1 1234567890 某某货币A 000198 红利再投资 1,200.00 1,200.00\n\
                    2 1234567890 000199 红利再投资 3.10 3.10";
        let records = zdt(&lines(text));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_name, "万联资管A计划");
        assert_eq!(records[0].fund_code, "000198");
        assert_eq!(records[0].amount, "1200.00");
        assert_eq!(records[1].fund_code, "000199");
    }

    #[test]
    fn test_zdt_single_slip_fallback() {
        let text = "投资者名称：万联B\n基金代码：000300\n分红份额：12.34";
        let records = zdt(&lines(text));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, "12.34");
    }

    #[test]
    fn test_jiaohang_end_date_is_day_before_confirmation() {
        let text = "投资者信息 万联资管甲\n产品代码 A00001\n转投份额 1.00\n确认日期 20250301";
        let r = jiaohang(&lines(text));
        assert_eq!(r.end_date.as_deref(), Some("20250228"));

        let r = jiaohang(&lines("确认日期 20251399"));
        assert_eq!(r.end_date.as_deref(), Some(""));
    }

    #[test]
    fn test_guoxinjiali_name_from_file() {
        let text = "万联资管臻 2025122 富安达现金通货\n选3号FOF集 3 710501 币A 分红 - - - - 0.00 87.09 0.00";
        let d = doc("【确认】万联资管臻选3号FOF集合资产管理计划_交易确认单_2025-12-23.pdf", text);
        let r = &extract(Platform::Guoxinjiali, &d)[0];
        assert_eq!(r.product_name, "万联资管臻选3号FOF集合资产管理计划");
        assert_eq!(r.fund_code, "710501");
        assert_eq!(r.shares, "87.09");
    }

    #[test]
    fn test_guoxinjiali_repairs_wrapped_name() {
        let text = "万联资管臻 2025122 富安达现金通货\n选3号FOF集 3 710501 币A 分红 - - - - 0.00 87.09 0.00";
        let r = &extract(Platform::Guoxinjiali, &doc("scan.pdf", text))[0];
        assert_eq!(r.product_name, "万联资管臻选3号FOF集合资产管理计划");
        assert_eq!(complete_plan_name("某单一资产"), "某单一资产管理计划");
        assert_eq!(complete_plan_name("某计划"), "某计划");
    }

    #[test]
    fn test_hexun_shares_on_next_line() {
        let text = "账户名称 万联资管和1号 账户类型 机构\n集合资产管理计划\n基金代码 000500\n\
                    红利资金(元) 10.00\n红利再投资确认份\n9.87";
        let r = hexun(&lines(text));
        assert_eq!(r.product_name, "万联资管和1号集合资产管理计划");
        assert_eq!(r.shares, "9.87");
        assert_eq!(r.amount, "10.00");
    }

    #[test]
    fn test_wangjin_plain_layout_wrapped_name() {
        let text = "网金基金\n客户名称 万联资管网1号集合资产\n管理计划\n基金代码 000777\n红利再投份额\n55.00";
        let r = wangjin(&lines(text));
        assert_eq!(r.product_name, "万联资管网1号集合资产管理计划");
        assert_eq!(r.fund_code, "000777");
        assert_eq!(r.shares, "55.00");
    }

    #[test]
    fn test_panying_shares_on_next_line() {
        let text = "攀赢\n客户名称 万联资管民利2号集合资产管理计划\n产品代码 004179 产品名称\n\
                    所得现金（元） 1,154.93\n所得份额（份）\n1,154.93";
        let r = panying(&lines(text));
        assert_eq!(r.fund_code, "004179");
        assert_eq!(r.amount, "1154.93");
        assert_eq!(r.shares, "1154.93");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let r = &extract(Platform::Jd, &doc("x.pdf", ""))[0];
        assert!(r.product_name.is_empty() && r.fund_code.is_empty() && r.amount.is_empty());
    }
}
