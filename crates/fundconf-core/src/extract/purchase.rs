//! Subscription applications (申购申请 / 受理单).
//!
//! Only the applied amount is known at this stage; shares and fees come with
//! the confirmation.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{
    BARE_NUMBER, DECIMAL, FUND_CODE, FUND_CODE_COLON, INVESTOR_NAME, LEADING_DECIMAL,
    LIANTAI_ACCOUNT, LIANTAI_FUND_CODE, PRODUCT_CODE, PRODUCT_CODE_ALNUM, PURCHASE_AMOUNT_LOWER,
    LIDE_NAME, PURCHASE_AMOUNT_LOWER_LOOSE, SIX_DIGITS, SIX_DIGIT_RUN, TEXT_PRODUCT_CODE,
    ZDT_INVESTOR_NAME,
};
use super::{
    after, anchored_capture, code, contains_any, digits, line_at, line_before, name, names,
    number, squeeze, text_capture, text_number, trade_info_windows,
};
use crate::document::Document;
use crate::models::record::PurchaseRecord;
use crate::platform::Platform;

lazy_static! {
    static ref HAOMAI_AMOUNT: Regex = Regex::new(r"申请金额小写[：: ]*([\d,]+\.\d+)").unwrap();
    static ref APPLIED_DECIMAL: Regex = Regex::new(r"申请金额\s*([\d,]+\.\d+)").unwrap();
    static ref APPLIED: Regex = Regex::new(r"申请金额\s*([\d,]+\.?\d*)").unwrap();
    static ref APPLIED_YUAN: Regex = Regex::new(r"申请金额\s*([\d,]+\.?\d*)元?").unwrap();
    static ref LIDE_AMOUNT: Regex = Regex::new(r"申请金额（元）\s*([\d,]+\.\d+)").unwrap();
    static ref YINGMI_CODE_COLON: Regex = Regex::new(r"基金代码[:：]\s*([0-9]{6})").unwrap();
    static ref YINGMI_AMOUNT_COLON: Regex = Regex::new(r"申请金额[:：]\s*([\d,\.]+)").unwrap();
    static ref YINGMI_AMOUNT: Regex = Regex::new(r"申请金额[:：]?\s*([\d,]+\.\d+)").unwrap();
    static ref JIAOHANG_AMOUNT: Regex = Regex::new(r"申请金额/份额\s*([\d,]+\.?\d*)").unwrap();
    static ref TENGYUAN_AMOUNT: Regex = Regex::new(r"申购金额（小写）\s*([\d,]+\.?\d*)").unwrap();
    static ref JD_AMOUNT: Regex = Regex::new(r"申请金额\(元\)\s*([\d,]+\.?\d*)").unwrap();
    static ref MINSHENG_CODE: Regex = Regex::new(r"产品代码：\s*([0-9]{6})").unwrap();
    static ref MINSHENG_AMOUNT: Regex =
        Regex::new(r"委托金额/委托份额：\s*([\d,]+\.?\d*)").unwrap();
    static ref CNY_AMOUNT: Regex = Regex::new(r"CNY\s*([\d,\.]+)").unwrap();
    static ref JIYU_NAME: Regex = Regex::new(r"账户名称：\s*(.*)").unwrap();
    static ref JIYU_AMOUNT: Regex =
        Regex::new(r"申购金额[（(]小写[）)]：\s*([\d,]+\.?\d*)元?").unwrap();
    static ref NINGBO_AMOUNT: Regex = Regex::new(r"申请金额（元）\s*([\d,]+\.?\d*)").unwrap();
    static ref PANYING_AMOUNT: Regex =
        Regex::new(r"申购金额[（(]小写[）)]\s*([\d,]+\.?\d*)元?").unwrap();
    static ref ZDT_AMOUNT: Regex =
        Regex::new(r"申购金额[（(]小写[）)][：:]\s*([\d,]+\.?\d*)").unwrap();
}

const HEXUN_NAME_STOP: &[&str] = &["交易账号", "申请工作日", "基金代码", "申请金额", "重要提示"];
const RONGLIANCHUANG_NAME_STOP: &[&str] =
    &["银行账号", "开户行名称", "基金代码", "基金名称", "申请日期", "申请金额"];

/// Extract the subscription applications of a document attributed to
/// `platform`.
pub fn extract(platform: Platform, doc: &Document) -> Vec<PurchaseRecord> {
    let lines = &doc.lines;
    let record = match platform {
        Platform::Yingmi => return yingmi(lines),
        Platform::Liantai => return liantai(lines),
        Platform::Zdt => return zdt(lines),
        Platform::Haomai => haomai(doc),
        Platform::Tiantian => simple(
            Platform::Tiantian,
            names::tiantian(lines),
            code(lines, &FUND_CODE),
            number(lines, &APPLIED_DECIMAL),
        ),
        Platform::Lide => simple(
            Platform::Lide,
            name(lines, &LIDE_NAME),
            code(lines, &FUND_CODE),
            number(lines, &LIDE_AMOUNT),
        ),
        Platform::Changliang => simple(
            Platform::Changliang,
            name(lines, &INVESTOR_NAME),
            code(lines, &FUND_CODE),
            number(lines, &APPLIED_DECIMAL),
        ),
        Platform::Pingan => simple(
            Platform::Pingan,
            names::pingan(lines),
            code(lines, &FUND_CODE),
            number(lines, &APPLIED_YUAN),
        ),
        Platform::Jiaohang => simple(
            Platform::Jiaohang,
            jiaohang_name(lines),
            code(lines, &PRODUCT_CODE),
            number(lines, &JIAOHANG_AMOUNT),
        ),
        Platform::Wangjin => wangjin(lines),
        Platform::Tengyuan => simple(
            Platform::Tengyuan,
            names::inline(lines, "投资者名称"),
            code(lines, &FUND_CODE),
            number(lines, &TENGYUAN_AMOUNT),
        ),
        Platform::Hexun => simple(
            Platform::Hexun,
            names::labelled(lines, "账户名称", Some("账户类型"), 4, |l| {
                contains_any(l, HEXUN_NAME_STOP)
            }),
            code(lines, &FUND_CODE),
            number(lines, &APPLIED),
        ),
        Platform::Jd => simple(
            Platform::Jd,
            names::inline(lines, "客户名称"),
            code(lines, &FUND_CODE),
            number(lines, &JD_AMOUNT),
        ),
        Platform::Minsheng => simple(
            Platform::Minsheng,
            names::inline_until(lines, "客户名称：", "交易类型："),
            code(lines, &MINSHENG_CODE),
            number(lines, &MINSHENG_AMOUNT),
        ),
        Platform::Zhaoyingtong => simple(
            Platform::Zhaoyingtong,
            name(lines, &INVESTOR_NAME),
            code(lines, &PRODUCT_CODE_ALNUM),
            lines
                .iter()
                .filter(|l| l.contains("申请金额") && l.contains("CNY"))
                .find_map(|l| CNY_AMOUNT.captures(l).map(|c| digits(&c[1])))
                .unwrap_or_default(),
        ),
        Platform::Ronglianchuang => simple(
            Platform::Ronglianchuang,
            ronglianchuang_name(lines),
            code(lines, &FUND_CODE),
            number(lines, &APPLIED_YUAN),
        ),
        Platform::Jiyu => simple(
            Platform::Jiyu,
            jiyu_name(lines),
            code(lines, &MINSHENG_CODE),
            number(lines, &JIYU_AMOUNT),
        ),
        Platform::Ningbo => simple(
            Platform::Ningbo,
            names::inline_until(lines, "客户名称", "交易账号"),
            code(lines, &PRODUCT_CODE),
            number(lines, &NINGBO_AMOUNT),
        ),
        Platform::Guoxinjiali => simple(
            Platform::Guoxinjiali,
            names::inline(lines, "账户名称"),
            code(lines, &PRODUCT_CODE),
            number(lines, &APPLIED_YUAN),
        ),
        Platform::Panying => simple(
            Platform::Panying,
            names::inline(lines, "客户名称"),
            code(lines, &PRODUCT_CODE),
            number(lines, &PANYING_AMOUNT),
        ),
        Platform::Xingzheng | Platform::Youchu | Platform::Jianhang | Platform::JdForcedRedemption => {
            return Vec::new()
        }
    };
    vec![record]
}

fn simple(
    platform: Platform,
    product_name: String,
    fund_code: String,
    amount: String,
) -> PurchaseRecord {
    PurchaseRecord {
        platform,
        product_name,
        fund_code,
        amount,
    }
}

fn haomai(doc: &Document) -> PurchaseRecord {
    simple(
        Platform::Haomai,
        names::haomai(&doc.lines),
        text_capture(&doc.raw_text, &TEXT_PRODUCT_CODE).unwrap_or_default(),
        text_number(&doc.raw_text, &HAOMAI_AMOUNT),
    )
}

/// The line below an `投资者信息` header, when it looks like a name.
fn jiaohang_name(lines: &[String]) -> String {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains("投资者信息"))
        .map(|(i, _)| line_at(lines, i + 1))
        .find(|next| {
            !contains_any(next, &["基金账户", "产品信息", "客户信息"]) && next.chars().count() > 5
        })
        .map(squeeze)
        .unwrap_or_default()
}

/// Wrapped names may put `管理计划` first; it is moved back to the end.
fn ronglianchuang_name(lines: &[String]) -> String {
    let product = names::labelled(lines, "投资者名称", None, 2, |l| {
        contains_any(l, RONGLIANCHUANG_NAME_STOP)
    });
    match product.strip_prefix("管理计划") {
        Some(rest) => format!("{}管理计划", rest.split("管理计划").next().unwrap_or_default()),
        None => product,
    }
}

/// `账户名称：` outside the payer block.
fn jiyu_name(lines: &[String]) -> String {
    lines
        .iter()
        .filter(|l| l.contains("账户名称：") && !l.contains("付款账户"))
        .find_map(|l| JIYU_NAME.captures(l).map(|c| squeeze(c[1].trim())))
        .unwrap_or_default()
}

/// Name, code and amount each fall back to an adjacent line when the
/// labelled line carries no value.
fn wangjin(lines: &[String]) -> PurchaseRecord {
    let mut record = PurchaseRecord::new(Platform::Wangjin);

    if let Some(i) = lines.iter().position(|l| l.contains("投资者名称")) {
        let inline = after(&lines[i], "投资者名称").map(str::trim).unwrap_or_default();
        let prev = line_before(lines, i);
        if !inline.is_empty() {
            record.product_name = squeeze(inline);
        } else if !prev.is_empty()
            && !contains_any(prev, &["机构名称", "网点名称", "基金", "─"])
            && prev.chars().count() > 10
        {
            record.product_name = squeeze(prev);
        }
    }

    if let Some(i) = lines.iter().position(|l| l.contains("基金代码")) {
        record.fund_code = match FUND_CODE.captures(&lines[i]) {
            Some(c) => c[1].to_string(),
            None => {
                let next = line_at(lines, i + 1);
                if SIX_DIGITS.is_match(next) {
                    next.to_string()
                } else {
                    String::new()
                }
            }
        };
    }

    record.amount = lower_case_amount(lines).unwrap_or_default();
    record
}

/// `申购金额（小写）` amount, possibly printed alone on the next line.
pub(crate) fn lower_case_amount(lines: &[String]) -> Option<String> {
    let i = lines
        .iter()
        .position(|l| l.contains("申购金额") && l.contains("小写"))?;
    let line = &lines[i];
    if let Some(c) = PURCHASE_AMOUNT_LOWER
        .captures(line)
        .or_else(|| PURCHASE_AMOUNT_LOWER_LOOSE.captures(line))
    {
        return Some(digits(&c[1]));
    }
    BARE_NUMBER
        .captures(line_at(lines, i + 1))
        .map(|c| digits(&c[1]))
}

/// Every `交易类型 … 申购` row starts a record; code and amount are looked
/// up in the five lines from the row on.
fn yingmi(lines: &[String]) -> Vec<PurchaseRecord> {
    let product = names::yingmi(lines);
    let mut records = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !(line.contains("交易类型") && line.contains("申购")) {
            continue;
        }
        let window = &lines[i..(i + 5).min(lines.len())];
        let fund_code = window
            .iter()
            .find(|l| l.contains("基金代码"))
            .and_then(|l| {
                YINGMI_CODE_COLON
                    .captures(l)
                    .or_else(|| FUND_CODE.captures(l))
                    .map(|c| c[1].to_string())
            });
        let amount = window
            .iter()
            .find(|l| l.contains("申请金额"))
            .and_then(|l| {
                YINGMI_AMOUNT_COLON
                    .captures(l)
                    .or_else(|| YINGMI_AMOUNT.captures(l))
                    .map(|c| digits(&c[1]))
            });
        if let (Some(fund_code), Some(amount)) = (fund_code, amount) {
            if !amount.is_empty() {
                records.push(PurchaseRecord {
                    product_name: product.clone(),
                    fund_code,
                    amount,
                    platform: Platform::Yingmi,
                });
            }
        }
    }
    records
}

/// One record per `交易信息` block.
fn liantai(lines: &[String]) -> Vec<PurchaseRecord> {
    let product = name(lines, &LIANTAI_ACCOUNT);
    let mut records = Vec::new();

    for window in trade_info_windows(lines) {
        let mut fund_code = String::new();
        let mut amount = String::new();
        for sub in window {
            if let Some(c) = LIANTAI_FUND_CODE.captures(sub) {
                fund_code = c[1].to_string();
            }
            if let Some(c) = JD_AMOUNT.captures(sub) {
                amount = digits(&c[1]);
            }
        }
        if !fund_code.is_empty() && !amount.is_empty() {
            records.push(PurchaseRecord {
                product_name: product.clone(),
                fund_code,
                amount,
                platform: Platform::Liantai,
            });
        }
    }
    records
}

/// Single receipts (`申购受理单` in the title, no `汇总`) carry labelled
/// fields; summary lists are read by anchoring on every six-digit run.
fn zdt(lines: &[String]) -> Vec<PurchaseRecord> {
    let product = anchored_capture(lines, "投资者名称", &ZDT_INVESTOR_NAME)
        .map(|v| squeeze(v.trim()))
        .unwrap_or_default();
    let row = |fund_code: String, amount: String| PurchaseRecord {
        product_name: product.clone(),
        fund_code,
        amount,
        platform: Platform::Zdt,
    };

    let head = &lines[..lines.len().min(2)];
    let single = head.iter().any(|l| l.contains("申购受理单"))
        && !head.iter().any(|l| l.contains("汇总"));

    let mut records = Vec::new();
    if single {
        let mut fund_code = String::new();
        let mut amount = String::new();
        for line in lines {
            if let Some(c) = FUND_CODE_COLON.captures(line) {
                fund_code = c[1].to_string();
            }
            if let Some(c) = ZDT_AMOUNT.captures(line) {
                amount = digits(&c[1]);
            }
        }
        if !fund_code.is_empty() && !amount.is_empty() {
            records.push(row(fund_code, amount));
        }
        return records;
    }

    for (i, line) in lines.iter().enumerate() {
        for m in SIX_DIGIT_RUN.find_iter(line) {
            let amount = DECIMAL
                .find(&line[m.end()..])
                .map(|a| digits(a.as_str()))
                .or_else(|| {
                    LEADING_DECIMAL
                        .captures(line_at(lines, i + 1))
                        .map(|c| digits(&c[1]))
                });
            if let Some(amount) = amount {
                records.push(row(m.as_str().to_string(), amount));
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::lines;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn doc(text: &str) -> Document {
        Document::from_text(Path::new("/tmp/申购申请.pdf"), text)
    }

    #[test]
    fn test_tiantian_application() {
        let d = doc("万联资管账户户名\n账户类型 机构\n基金代码 000001\n申请金额 1,000,000.00");
        let records = extract(Platform::Tiantian, &d);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_name, "万联资管");
        assert_eq!(records[0].fund_code, "000001");
        assert_eq!(records[0].amount, "1000000.00");
    }

    #[test]
    fn test_haomai_reads_raw_text() {
        let d = doc("好买基金\n万联资管\n账户名称\n稳盈1号\n证件类型\n产品代码：000912\n申请金额小写：500.00");
        let records = extract(Platform::Haomai, &d);
        assert_eq!(records[0].product_name, "万联资管稳盈1号");
        assert_eq!(records[0].fund_code, "000912");
        assert_eq!(records[0].amount, "500.00");
    }

    #[test]
    fn test_yingmi_one_record_per_trade() {
        let d = doc(
            "投资者名称 投资者类型\n万联资管1号\n\
             交易类型：申购\n基金代码：000001\n申请金额：100.00\n\
             交易类型：申购\n基金代码：000002\n申请金额：200.00",
        );
        let records = extract(Platform::Yingmi, &d);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].fund_code, "000002");
        assert_eq!(records[1].amount, "200.00");
        assert_eq!(records[0].product_name, "万联资管1号");
    }

    #[test]
    fn test_wangjin_fallbacks() {
        let ls = lines("万联资管稳健增利集合资产管理计划\n投资者名称\n基金代码\n005151\n申购金额小写\n38,000,000.00");
        let record = wangjin(&ls);
        assert_eq!(record.product_name, "万联资管稳健增利集合资产管理计划");
        assert_eq!(record.fund_code, "005151");
        assert_eq!(record.amount, "38000000.00");
    }

    #[test]
    fn test_ronglianchuang_moves_plan_suffix() {
        let ls = lines("投资者名称 管理计划万联资管\n基金代码 000001");
        assert_eq!(ronglianchuang_name(&ls), "万联资管管理计划");
    }

    #[test]
    fn test_jiaohang_skips_header_lines() {
        let ls = lines("投资者信息\n基金账户 123\n投资者信息\n万联资管稳健1号");
        assert_eq!(jiaohang_name(&ls), "万联资管稳健1号");
    }

    #[test]
    fn test_liantai_blocks() {
        let d = doc(
            "投资账户 万联资管1号\n交易信息（1/2）\n基金代码 000001\n申请金额(元) 1,000.00\n\
             交易信息（2/2）\n基金代码 000002\n申请金额(元) 2,000.00",
        );
        let records = extract(Platform::Liantai, &d);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, "1000.00");
        assert_eq!(records[1].fund_code, "000002");
    }

    #[test]
    fn test_zdt_single_receipt() {
        let d = doc("证达通\n申购受理单\n投资者名称：万联资管1号 生成时间 2024\n基金代码：583101\n申购金额（小写）：60,000,000.00元");
        let records = extract(Platform::Zdt, &d);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_name, "万联资管1号");
        assert_eq!(records[0].amount, "60000000.00");
    }

    #[test]
    fn test_zdt_summary_rows() {
        let d = doc("申购汇总\n投资者名称：万联资管1号\n1 000001 货币A 1,000.00\n2 000002 货币B\n2,000.00");
        let records = extract(Platform::Zdt, &d);
        let codes: Vec<&str> = records.iter().map(|r| r.fund_code.as_str()).collect();
        assert_eq!(codes, vec!["000001", "000002"]);
        assert_eq!(records[1].amount, "2000.00");
    }

    #[test]
    fn test_missing_fields_stay_empty() {
        let d = doc("无关内容");
        let records = extract(Platform::Jd, &d);
        assert_eq!(records, vec![PurchaseRecord::new(Platform::Jd)]);
    }
}
