//! Product-name assembly shared by several document types of one platform.
//!
//! Platforms print the account name the same way on every slip they issue,
//! so the reassembly of wrapped names lives here rather than per type.

use super::patterns::YINGMI_INVESTOR_TOKEN;
use super::{after, before, contains_any, continue_name, line_at, line_before, name, squeeze};

/// haomai: the name straddles the `账户名称` label, one part above and one
/// below.
pub(crate) fn haomai(lines: &[String]) -> String {
    let Some(i) = lines.iter().position(|l| l.contains("账户名称")) else {
        return String::new();
    };
    let prev = line_before(lines, i);
    let next = line_at(lines, i + 1);
    let mut product = String::new();
    if !prev.is_empty() && !contains_any(prev, &["制单人", "好买基金"]) {
        product.push_str(prev);
    }
    if !next.is_empty() && !contains_any(next, &["证件类型", "产品代码"]) {
        product.push_str(next);
    }
    squeeze(&product)
}

/// tiantian: previous line, the text before `账户户名`, and the next line
/// unless it is the account-type row.
pub(crate) fn tiantian(lines: &[String]) -> String {
    let Some(i) = lines.iter().position(|l| l.contains("账户户名")) else {
        return String::new();
    };
    let prev = line_before(lines, i);
    let here = before(&lines[i], "账户户名").trim();
    let next = line_at(lines, i + 1);
    let mut product = String::new();
    if !prev.is_empty() && !prev.contains("确认单") {
        product.push_str(prev);
    }
    product.push_str(here);
    if next.contains("产管理计划") || (!next.is_empty() && !next.contains("账户类型")) {
        product.push_str(next);
    }
    squeeze(&product)
}

/// yingmi: lines around the `投资者名称 … 投资者类型` header, falling back to
/// the token after `投资者名称`.
pub(crate) fn yingmi(lines: &[String]) -> String {
    for (i, line) in lines.iter().enumerate() {
        if !(line.contains("投资者名称") && line.contains("投资者类型")) {
            continue;
        }
        let mut parts = Vec::new();
        let prev = line_before(lines, i);
        if !prev.is_empty() && !contains_any(prev, &["公司", "信息"]) {
            parts.push(prev);
        }
        // Longer lines below the header are table rows, not the name.
        let next = line_at(lines, i + 1);
        if !next.is_empty() && next.chars().count() < 25 {
            parts.push(next);
        }
        if !parts.is_empty() {
            return parts.concat();
        }
    }
    name(lines, &YINGMI_INVESTOR_TOKEN)
}

/// Text after the first `label`, up to `cut` when given, followed by up to
/// `span` continuation lines that `stop` does not reject.
pub(crate) fn labelled(
    lines: &[String],
    label: &str,
    cut: Option<&str>,
    span: usize,
    stop: impl Fn(&str) -> bool,
) -> String {
    let Some(i) = lines.iter().position(|l| l.contains(label)) else {
        return String::new();
    };
    let mut head = after(&lines[i], label).map(str::trim).unwrap_or_default();
    if let Some(cut) = cut {
        head = before(head, cut).trim();
    }
    let mut product = head.to_string();
    product.push_str(&continue_name(lines, i, span, stop));
    squeeze(&product)
}

/// Text after the first `label` on its own line.
pub(crate) fn inline(lines: &[String], label: &str) -> String {
    lines
        .iter()
        .find_map(|l| after(l, label))
        .map(|v| squeeze(v.trim()))
        .unwrap_or_default()
}

/// Like [`inline`], truncated before `cut` when present.
pub(crate) fn inline_until(lines: &[String], label: &str, cut: &str) -> String {
    lines
        .iter()
        .find_map(|l| after(l, label))
        .map(|v| squeeze(before(v.trim(), cut).trim()))
        .unwrap_or_default()
}

/// pingan: name after `账户名称`, continued over at most 4 lines.
pub(crate) fn pingan(lines: &[String]) -> String {
    const STOP: &[&str] = &[
        "开户行名称",
        "投资主体产品名称",
        "基金代码",
        "申请日期",
        "确认金额",
        "手续费",
        "交易状态",
        "经办人",
        "特别说明",
    ];
    labelled(lines, "账户名称", None, 4, |l| contains_any(l, STOP))
}

/// ronglianchuang confirmations: `来款账号名称` plus the next line.
pub(crate) fn remitter(lines: &[String]) -> String {
    let Some(i) = lines.iter().position(|l| l.contains("来款账号名称")) else {
        return String::new();
    };
    let mut product = after(&lines[i], "来款账号名称")
        .map(|v| v.trim().trim_start_matches([':', '：']))
        .unwrap_or_default()
        .to_string();
    let next = line_at(lines, i + 1);
    if !next.is_empty() && !contains_any(next, &["大额支付行号", "产品代码"]) {
        product.push_str(next);
    }
    squeeze(&product)
}

/// tengyuan: second cell of the boxed `客户名称` row.
pub(crate) fn boxed_customer(lines: &[String]) -> String {
    lines
        .iter()
        .filter(|l| l.contains("客户名称"))
        .find_map(|l| l.split('│').nth(1))
        .map(|cell| squeeze(cell.trim().replace('┃', "").trim()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::lines;

    #[test]
    fn test_haomai_name_around_label() {
        let ls = lines("好买基金\n万联资管 稳盈\n账户名称\n1号集合资产管理计划\n证件类型");
        assert_eq!(haomai(&ls), "万联资管稳盈1号集合资产管理计划");
    }

    #[test]
    fn test_tiantian_skips_account_type_row() {
        let ls = lines("交易确认单\n万联资管账户户名\n账户类型 机构");
        assert_eq!(tiantian(&ls), "万联资管");
    }

    #[test]
    fn test_labelled_with_cut_and_continuation() {
        let ls = lines("账户名称 万联资管和1号 账户类型 机构\n集合资产管理计划\n交易账号 1");
        let got = labelled(&ls, "账户名称", Some("账户类型"), 4, |l| l.contains("交易账号"));
        assert_eq!(got, "万联资管和1号集合资产管理计划");
    }

    #[test]
    fn test_remitter_strips_colon() {
        let ls = lines("来款账号名称：万联资管A\n集合资产管理计划\n产品代码 000001");
        assert_eq!(remitter(&ls), "万联资管A集合资产管理计划");
    }

    #[test]
    fn test_boxed_customer_cell() {
        let ls = lines("┃客户名称│万联资管 腾1号┃│证件│x");
        assert_eq!(boxed_customer(&ls), "万联资管腾1号");
    }
}
