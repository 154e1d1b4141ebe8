//! Redemption confirmations (赎回确认), including the forced-redemption block
//! printed on the second page of JD conversion slips.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{
    CHANGLIANG_CONFIRMED_AMOUNT, CHANGLIANG_CONFIRMED_FEE, CHANGLIANG_CONFIRMED_SHARES,
    CONFIRMED_AMOUNT, CONFIRMED_FEE, CONFIRMED_SHARES, CUSTOMER_NAME, FUND_CODE, INVESTOR_NAME,
    LEADING_COMPACT_DATE, LIANTAI_ACCOUNT, LIANTAI_FUND_CODE, LIDE_CONFIRMED_AMOUNT,
    LIDE_CONFIRMED_SHARES, LIDE_FEE, LIDE_NAME, MINSHENG_AMOUNT, MINSHENG_CODE, MINSHENG_FEE,
    MINSHENG_NAME, MINSHENG_SHARES, PRODUCT_CODE, RONGLIANCHUANG_AMOUNT, RONGLIANCHUANG_CODE,
    RONGLIANCHUANG_FEE, RONGLIANCHUANG_SHARES, SPACED_AMOUNT, SPACED_CUSTOMER_NAME,
    SPACED_FUND_CODE, SPACED_SHARES, TEXT_AMOUNT, TEXT_CONFIRM_FEE, TEXT_FEE, TEXT_FUND_CODE,
    TEXT_PRODUCT_CODE, TEXT_SHARES, YINGMI_AMOUNT, YINGMI_CODE, YINGMI_FEE, YINGMI_SHARES,
    ZDT_INVESTOR_NAME, ZDT_INVESTOR_TOKEN,
};
use super::{
    block_ranges, block_starts, capture_where, code, digits, first_capture, leading_number,
    line_at, name, names, number, squeeze, text_capture, text_number, trade_blocks,
    trade_info_windows,
};
use crate::document::Document;
use crate::models::record::{RedemptionRecord, Settlement};
use crate::platform::Platform;

lazy_static! {
    static ref HAOMAI_SETTLEMENT: Regex = Regex::new(r"预计到账日[：: ]*(\d{4}-\d{2}-\d{2})").unwrap();
    static ref LIDE_SETTLEMENT: Regex =
        Regex::new(r"预计到账日期[：: ]*(\d{4}-\d{2}-\d{2})").unwrap();
    static ref CHANGLIANG_SETTLEMENT: Regex = Regex::new(r"预计赎回款到账日[：: ]*(\d{8})").unwrap();

    static ref YINGMI_SETTLEMENT: Regex = Regex::new(r"到账日期[:：]?\s*(\d{4}-\d{2}-\d{2})").unwrap();

    static ref JIAOHANG_FEE: Regex = Regex::new(r"赎回手续费\s*([\d,]+\.?\d*)").unwrap();
    static ref JIAOHANG_CONFIRM_DATE: Regex = Regex::new(r"确认日期\s*(\d{8})").unwrap();
    static ref JD_SETTLEMENT: Regex = Regex::new(r"预计到账日\s*(\d{4}-\d{2}-\d{2})").unwrap();

    static ref WANGJIN_SHARES: Regex = Regex::new(r"赎回份额\s*([\d,]+\.?\d*)").unwrap();
    static ref WANGJIN_FEE: Regex = Regex::new(r"(?:手续费|费开户)\s*([\d,]+\.?\d*)").unwrap();

    static ref PINGAN_T_PLUS: Regex = Regex::new(r"赎回最快到账日\s*T\+(\d+)").unwrap();
    static ref PINGAN_DATE: Regex = Regex::new(r"赎回最快到账日\s*(\d{4}-\d{2}-\d{2})").unwrap();

    static ref SPACED_FEE: Regex = Regex::new(r"手\s*续\s*费\s*[：:]?\s*([\d,]+\.?\d*)").unwrap();

    static ref TENGYUAN_CODE: Regex = Regex::new(r"基金代码[^│]*│(\d{6})").unwrap();
    static ref TENGYUAN_AMOUNT: Regex = Regex::new(r"确认金额[^│]*│([\d,]+\.?\d*)").unwrap();
    static ref TENGYUAN_SHARES: Regex = Regex::new(r"确认份额[^│]*│([\d,]+\.?\d*)").unwrap();
    static ref TENGYUAN_FEE: Regex = Regex::new(r"手[^│]*费[^│]*│([\d,]+\.?\d*)").unwrap();

    static ref LIANTAI_AMOUNT: Regex = Regex::new(r"确认金额[（(]元[）)]\s*([\d,]+\.?\d*)").unwrap();
    static ref LIANTAI_SHARES: Regex = Regex::new(r"确认份额[（(]份[）)]\s*([\d,]+\.?\d*)").unwrap();
    static ref LIANTAI_FEE: Regex = Regex::new(r"手续费[（(]元[）)]\s*([\d,]+\.?\d*)").unwrap();
    static ref LIANTAI_SETTLEMENT: Regex =
        Regex::new(r"预计到账日期[:：]?\s*(\d{4}-\d{2}-\d{2})").unwrap();

    // 序号 账号 代码 赎回份额 确认份额 确认金额 手续费, fund name lost to a line wrap
    static ref ZDT_COMPACT_ROW: Regex = Regex::new(
        r"^\s*(\d+)\s+(\d{10,})\s+([0-9]{6})\s+[\d,]+\.?\d*\s+([\d,]+\.?\d*)\s+([\d,]+\.?\d*)\s+([\d,]+\.?\d*)"
    )
    .unwrap();
    // 序号 账号 基金名称 代码 赎回份额 确认份额 确认金额 手续费
    static ref ZDT_STANDARD_ROW: Regex = Regex::new(
        r"^\s*(\d+)\s+(\d{10,})\s+(.+?)\s+([0-9]{6})\s+[\d,]+\.?\d*\s+([\d,]+\.?\d*)\s+([\d,]+\.?\d*)\s+([\d,]+\.?\d*)"
    )
    .unwrap();

    static ref FORCED_NAME: Regex = Regex::new(r"客户名称\s+(.*?)(?:\s+证件类型|$)").unwrap();
    static ref FORCED_CODE: Regex = Regex::new(r"基金代码\s+(\d{6})").unwrap();
    static ref FORCED_AMOUNT: Regex = Regex::new(r"确认金额\s+([\d,]+\.\d+)").unwrap();
    static ref FORCED_SHARES: Regex = Regex::new(r"确认份额\s+([\d,]+\.\d+)").unwrap();
    static ref FORCED_FEE: Regex = Regex::new(r"手续费\s+([\d,]+\.\d+)").unwrap();
    static ref FORCED_SETTLEMENT: Regex = Regex::new(r"预计到账日\s+(\d{4}-\d{2}-\d{2})").unwrap();
}

/// Fee written when the slip prints none.
const ZERO_FEE: &str = "0.00";

/// Extract the redemption confirmations of a document attributed to
/// `platform`.
pub fn extract(platform: Platform, doc: &Document) -> Vec<RedemptionRecord> {
    let lines = &doc.lines;
    let text = &doc.raw_text;
    let record = match platform {
        Platform::Yingmi => return yingmi(lines),
        Platform::Liantai => return liantai(lines),
        Platform::Tengyuan => return tengyuan(lines),
        Platform::Zdt => return zdt(lines),
        Platform::JdForcedRedemption => return forced_redemption(lines).into_iter().collect(),
        Platform::Haomai => RedemptionRecord {
            product_name: names::haomai(lines),
            fund_code: text_capture(text, &TEXT_PRODUCT_CODE).unwrap_or_default(),
            amount: text_number(text, &TEXT_AMOUNT),
            shares: text_number(text, &TEXT_SHARES),
            fee: text_number(text, &TEXT_FEE),
            settlement: stated(text_capture(text, &HAOMAI_SETTLEMENT)),
            ..RedemptionRecord::new(platform)
        },
        Platform::Tiantian => RedemptionRecord {
            product_name: names::tiantian(lines),
            fund_code: text_capture(text, &TEXT_FUND_CODE).unwrap_or_default(),
            amount: text_number(text, &TEXT_AMOUNT),
            shares: text_number(text, &TEXT_SHARES),
            fee: text_number(text, &TEXT_CONFIRM_FEE),
            settlement: tiantian_settlement(lines),
            ..RedemptionRecord::new(platform)
        },
        Platform::Lide => RedemptionRecord {
            product_name: name(lines, &LIDE_NAME),
            fund_code: text_capture(text, &TEXT_FUND_CODE).unwrap_or_default(),
            amount: text_number(text, &LIDE_CONFIRMED_AMOUNT),
            shares: text_number(text, &LIDE_CONFIRMED_SHARES),
            fee: text_number(text, &LIDE_FEE),
            settlement: stated(text_capture(text, &LIDE_SETTLEMENT)),
            ..RedemptionRecord::new(platform)
        },
        Platform::Changliang => RedemptionRecord {
            product_name: name(lines, &INVESTOR_NAME),
            fund_code: text_capture(text, &TEXT_FUND_CODE).unwrap_or_default(),
            amount: text_number(text, &CHANGLIANG_CONFIRMED_AMOUNT),
            shares: text_number(text, &CHANGLIANG_CONFIRMED_SHARES),
            fee: text_number(text, &CHANGLIANG_CONFIRMED_FEE),
            settlement: stated(text_capture(text, &CHANGLIANG_SETTLEMENT)),
            ..RedemptionRecord::new(platform)
        },
        Platform::Jiaohang => RedemptionRecord {
            product_name: names::inline(lines, "投资者信息"),
            fund_code: code(lines, &PRODUCT_CODE),
            amount: number(lines, &CONFIRMED_AMOUNT),
            shares: number(lines, &CONFIRMED_SHARES),
            fee: number(lines, &JIAOHANG_FEE),
            settlement: stated(first_capture(lines, &JIAOHANG_CONFIRM_DATE)),
            ..RedemptionRecord::new(platform)
        },
        Platform::Jd => RedemptionRecord {
            product_name: names::inline(lines, "客户名称"),
            fund_code: code(lines, &FUND_CODE),
            amount: number(lines, &CONFIRMED_AMOUNT),
            shares: number(lines, &CONFIRMED_SHARES),
            fee: number(lines, &CONFIRMED_FEE),
            settlement: stated(first_capture(lines, &JD_SETTLEMENT)),
            ..RedemptionRecord::new(platform)
        },
        Platform::Wangjin => RedemptionRecord {
            product_name: names::inline(lines, "投资者名称"),
            fund_code: code(lines, &FUND_CODE),
            amount: number(lines, &CONFIRMED_AMOUNT),
            shares: number(lines, &WANGJIN_SHARES),
            fee: first_capture(lines, &WANGJIN_FEE)
                .map(|v| digits(&v))
                .unwrap_or_else(|| ZERO_FEE.to_string()),
            ..RedemptionRecord::new(platform)
        },
        Platform::Pingan => RedemptionRecord {
            product_name: names::pingan(lines),
            fund_code: code(lines, &FUND_CODE),
            amount: number(lines, &CONFIRMED_AMOUNT),
            shares: number(lines, &CONFIRMED_SHARES),
            fee: number(lines, &CONFIRMED_FEE),
            settlement: pingan_settlement(lines),
            ..RedemptionRecord::new(platform)
        },
        Platform::Jianhang => RedemptionRecord {
            product_name: capture_where(lines, "客 户 名 称", &SPACED_CUSTOMER_NAME)
                .map(|v| squeeze(&v.trim().replace('┃', "")))
                .unwrap_or_default(),
            fund_code: capture_where(lines, "基 金 代 码", &SPACED_FUND_CODE).unwrap_or_default(),
            amount: spaced_number(lines, "确 认 金 额", &SPACED_AMOUNT),
            shares: spaced_number(lines, "确 认 份 额", &SPACED_SHARES),
            fee: spaced_number(lines, "手   续  费", &SPACED_FEE),
            ..RedemptionRecord::new(platform)
        },
        Platform::Ronglianchuang => RedemptionRecord {
            product_name: names::remitter(lines),
            fund_code: code(lines, &RONGLIANCHUANG_CODE),
            amount: number(lines, &RONGLIANCHUANG_AMOUNT),
            shares: number(lines, &RONGLIANCHUANG_SHARES),
            fee: number(lines, &RONGLIANCHUANG_FEE),
            ..RedemptionRecord::new(platform)
        },
        Platform::Minsheng => RedemptionRecord {
            product_name: name(lines, &MINSHENG_NAME),
            fund_code: code(lines, &MINSHENG_CODE),
            amount: number(lines, &MINSHENG_AMOUNT),
            shares: number(lines, &MINSHENG_SHARES),
            fee: number(lines, &MINSHENG_FEE),
            ..RedemptionRecord::new(platform)
        },
        Platform::Panying => panying(lines),
        Platform::Xingzheng
        | Platform::Zhaoyingtong
        | Platform::Youchu
        | Platform::Hexun
        | Platform::Jiyu
        | Platform::Ningbo
        | Platform::Guoxinjiali => return Vec::new(),
    };
    vec![record]
}

/// A printed date, or [`Settlement::Unstated`] when none was found.
fn stated(date: Option<String>) -> Settlement {
    date.map_or(Settlement::Unstated, Settlement::Date)
}

fn spaced_number(lines: &[String], anchor: &str, re: &Regex) -> String {
    capture_where(lines, anchor, re)
        .map(|v| digits(&v))
        .unwrap_or_default()
}

/// The compact date printed on the line below `预计赎回到账`.
fn tiantian_settlement(lines: &[String]) -> Settlement {
    let found = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains("预计赎回到账"))
        .find_map(|(i, _)| {
            LEADING_COMPACT_DATE
                .captures(line_at(lines, i + 1))
                .map(|c| c[1].to_string())
        });
    stated(found)
}

/// `赎回最快到账日` reads either `T+N` or a calendar date.
fn pingan_settlement(lines: &[String]) -> Settlement {
    for line in lines.iter().filter(|l| l.contains("赎回最快到账日")) {
        if let Some(days) = PINGAN_T_PLUS
            .captures(line)
            .and_then(|c| c[1].parse::<u32>().ok())
        {
            return Settlement::TPlus(days);
        }
        if let Some(c) = PINGAN_DATE.captures(line) {
            return Settlement::Date(c[1].to_string());
        }
    }
    Settlement::Unstated
}

/// Labelled fields where the last occurrence wins; a fee printed alone on
/// the next line is accepted.
fn panying(lines: &[String]) -> RedemptionRecord {
    let mut record = RedemptionRecord::new(Platform::Panying);
    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();
        if let Some(c) = CUSTOMER_NAME.captures(line) {
            record.product_name = squeeze(c[1].trim());
        }
        if let Some(c) = PRODUCT_CODE.captures(line) {
            record.fund_code = c[1].to_string();
        }
        if let Some(c) = CONFIRMED_AMOUNT.captures(line) {
            record.amount = digits(&c[1]);
        }
        if let Some(c) = CONFIRMED_SHARES.captures(line) {
            record.shares = digits(&c[1]);
        }
        if line.contains("手续费") {
            if let Some(c) = CONFIRMED_FEE.captures(line) {
                record.fee = digits(&c[1]);
            } else if let Some(v) = leading_number(line_at(lines, i + 1)) {
                record.fee = v;
            }
        }
    }
    if record.fee.is_empty() {
        record.fee = ZERO_FEE.to_string();
    }
    record
}

fn yingmi(lines: &[String]) -> Vec<RedemptionRecord> {
    let product = names::yingmi(lines);
    trade_blocks(lines, "赎回")
        .iter()
        .filter_map(|block| {
            let fund_code = text_capture(block, &YINGMI_CODE)?;
            let amount = text_number(block, &YINGMI_AMOUNT);
            let shares = text_number(block, &YINGMI_SHARES);
            if amount.is_empty() && shares.is_empty() {
                return None;
            }
            Some(RedemptionRecord {
                product_name: product.clone(),
                fund_code,
                amount,
                shares,
                fee: text_number(block, &YINGMI_FEE),
                settlement: stated(text_capture(block, &YINGMI_SETTLEMENT)),
                platform: Platform::Yingmi,
            })
        })
        .collect()
}

/// One record per `交易信息` block; the fee defaults to zero.
fn liantai(lines: &[String]) -> Vec<RedemptionRecord> {
    let product = name(lines, &LIANTAI_ACCOUNT);
    let mut records = Vec::new();

    for window in trade_info_windows(lines) {
        let mut record = RedemptionRecord {
            product_name: product.clone(),
            fee: ZERO_FEE.to_string(),
            ..RedemptionRecord::new(Platform::Liantai)
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
            if let Some(c) = LIANTAI_SETTLEMENT.captures(sub) {
                record.settlement = Settlement::Date(c[1].to_string());
            }
        }
        if !record.fund_code.is_empty() && !record.amount.is_empty() {
            records.push(record);
        }
    }
    records
}

/// Boxed slip with one `业务类型 … 赎回确认` section per trade.
fn tengyuan(lines: &[String]) -> Vec<RedemptionRecord> {
    let product = names::boxed_customer(lines);
    let starts = block_starts(lines, |l| l.contains("业务类型") && l.contains("赎回确认"));

    let mut records = Vec::new();
    for (start, end) in block_ranges(&starts, lines.len()) {
        let mut record = RedemptionRecord {
            product_name: product.clone(),
            ..RedemptionRecord::new(Platform::Tengyuan)
        };
        for line in &lines[start..end] {
            if let Some(c) = TENGYUAN_CODE.captures(line) {
                record.fund_code = c[1].to_string();
            }
            if !(line.contains("确认金额") && line.contains("确认份额")) {
                continue;
            }
            if let Some(c) = TENGYUAN_AMOUNT.captures(line) {
                record.amount = digits(&c[1]);
            }
            if let Some(c) = TENGYUAN_SHARES.captures(line) {
                record.shares = digits(&c[1]);
            }
            if let Some(c) = TENGYUAN_FEE.captures(line) {
                record.fee = digits(&c[1]);
            }
        }
        if !record.fund_code.is_empty() {
            records.push(record);
        }
    }
    records
}

/// Summary table rows; the compact form lost the fund name to a wrap.
fn zdt(lines: &[String]) -> Vec<RedemptionRecord> {
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

    let row = |fund_code: &str, shares: &str, amount: &str, fee: &str| RedemptionRecord {
        product_name: product.clone(),
        fund_code: fund_code.to_string(),
        amount: digits(amount),
        shares: digits(shares),
        fee: digits(fee),
        ..RedemptionRecord::new(Platform::Zdt)
    };

    lines
        .iter()
        .filter_map(|line| {
            let line = line.trim();
            if let Some(c) = ZDT_COMPACT_ROW.captures(line) {
                Some(row(&c[3], &c[4], &c[5], &c[6]))
            } else {
                ZDT_STANDARD_ROW
                    .captures(line)
                    .map(|c| row(&c[4], &c[5], &c[6], &c[7]))
            }
        })
        .collect()
}

/// The `强行赎回确认 … 确认成功` section of a JD conversion slip.
///
/// Returns `None` when the slip has no such section or no customer name
/// could be read from it.
fn forced_redemption(lines: &[String]) -> Option<RedemptionRecord> {
    let start = lines
        .iter()
        .position(|l| l.contains("强行赎回确认") && l.contains("确认成功"))?;
    let section = &lines[start..];

    let product_name = section
        .iter()
        .filter(|l| l.contains("客户名称") && !l.contains("强行赎回"))
        .find_map(|l| FORCED_NAME.captures(l).map(|c| c[1].trim().to_string()))
        .unwrap_or_default();
    if product_name.is_empty() {
        return None;
    }

    Some(RedemptionRecord {
        product_name,
        fund_code: code(section, &FORCED_CODE),
        amount: section
            .iter()
            .filter(|l| l.contains("确认份额"))
            .find_map(|l| FORCED_AMOUNT.captures(l).map(|c| digits(&c[1])))
            .unwrap_or_default(),
        shares: number(section, &FORCED_SHARES),
        fee: number(section, &FORCED_FEE),
        settlement: stated(first_capture(section, &FORCED_SETTLEMENT)),
        platform: Platform::JdForcedRedemption,
    })
}
