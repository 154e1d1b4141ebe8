//! Platform classification.
//!
//! Documents never name the platform that issued them. Each document type
//! has an ordered table of [`Rule`]s; the first rule whose predicate holds
//! decides the platform. Order matters: several platforms share brand names
//! and the earlier rule wins on ambiguous documents, so tables are never
//! reordered to look tidier.
//!
//! Predicates combine three kinds of evidence:
//! - a substring of the file name,
//! - a substring on some line inside a positional window,
//! - the absence of a conflicting marker.
//!
//! Window offsets encode how many boilerplate lines text extraction puts
//! before or after a platform's letterhead. They are kept per platform in
//! [`signals`] so layout drift can be traced to one place.

mod conversion;
mod dividend;
mod purchase;
mod purchase_confirm;
mod redemption;
pub(crate) mod signals;

use crate::document::Document;
use crate::platform::{DocType, Platform};

/// One entry of a classification table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub platform: Platform,
    pub matches: fn(&Document) -> bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("platform", &self.platform).finish()
    }
}

/// Classification table for a document type, in priority order.
///
/// Manual dividend slips come from a single product and have no table.
pub fn rules(doc_type: DocType) -> &'static [Rule] {
    match doc_type {
        DocType::Dividend => dividend::RULES,
        DocType::PurchaseApplication => purchase::RULES,
        DocType::PurchaseConfirmation => purchase_confirm::RULES,
        DocType::Redemption => redemption::RULES,
        DocType::Conversion => conversion::RULES,
        DocType::ManualDividend => &[],
    }
}

/// Platform of the first rule that matches, or `None` when the document is
/// not recognised.
pub fn classify(doc_type: DocType, doc: &Document) -> Option<Platform> {
    let platform = rules(doc_type)
        .iter()
        .find(|rule| (rule.matches)(doc))
        .map(|rule| rule.platform);
    tracing::debug!(file = %doc.file_name, %doc_type, ?platform, "classified");
    platform
}

/// Every platform whose rule matches, in priority order.
///
/// Used by `inspect` to show how close a document is to being
/// misrouted.
pub fn matching(doc_type: DocType, doc: &Document) -> Vec<Platform> {
    rules(doc_type)
        .iter()
        .filter(|rule| (rule.matches)(doc))
        .map(|rule| rule.platform)
        .collect()
}

/// Some line among the first `n` contains `needle`.
pub(crate) fn head(doc: &Document, n: usize, needle: &str) -> bool {
    doc.lines.iter().take(n).any(|l| l.contains(needle))
}

/// Some line from index `n` onwards contains `needle`.
pub(crate) fn from(doc: &Document, n: usize, needle: &str) -> bool {
    doc.lines.iter().skip(n).any(|l| l.contains(needle))
}

/// Some line contains `needle`.
pub(crate) fn all(doc: &Document, needle: &str) -> bool {
    doc.lines.iter().any(|l| l.contains(needle))
}

/// The file name contains `needle`.
pub(crate) fn file(doc: &Document, needle: &str) -> bool {
    doc.file_name.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn doc(name: &str, text: &str) -> Document {
        Document::from_text(Path::new(name), text)
    }

    #[test]
    fn test_windows_clamp_on_short_documents() {
        let d = doc("a.pdf", "");
        assert!(!head(&d, 2, "好买基金"));
        assert!(!from(&d, 5, "行E通"));
        assert!(!all(&d, "证达通"));
        for doc_type in DocType::ALL {
            assert_eq!(classify(doc_type, &d), None);
        }
    }

    /// Business wording each document type carries next to the letterhead.
    fn business_word(doc_type: DocType) -> &'static str {
        match doc_type {
            DocType::Dividend => "分红确认",
            DocType::PurchaseApplication => "申购受理单",
            DocType::PurchaseConfirmation => "申购确认单",
            DocType::Redemption => "赎回确认",
            DocType::Conversion => "超级转换确认",
            DocType::ManualDividend => "红利除权",
        }
    }

    /// A representative slip of `platform` for `doc_type`.
    fn sample(doc_type: DocType, platform: Platform) -> Document {
        let word = business_word(doc_type);
        let (name, text) = match platform {
            Platform::Haomai => ("a.pdf", format!("好买基金\n{word}")),
            Platform::Tiantian => ("天天基金.pdf", word.to_string()),
            Platform::Xingzheng => ("a.pdf", format!("兴证全球基金\n{word}")),
            Platform::Lide => ("a.pdf", format!("{word}\n-\n-\n利得基金")),
            Platform::Changliang => ("a.pdf", format!("长量基金\n{word}")),
            Platform::Yingmi => ("a.pdf", format!("盈米基金\n{word}")),
            Platform::Zhaoyingtong => ("a.pdf", format!("招赢通\n{word}")),
            Platform::Youchu => ("邮储银行.pdf", word.to_string()),
            Platform::Pingan => ("a.pdf", format!("{word}\n-\n-\n-\n-\n行E通")),
            Platform::Jiaohang => ("a.pdf", format!("交通银行\n{word}")),
            Platform::Hexun => ("a.pdf", format!("{word}\n-\n-\n和讯信息科技有限公司")),
            Platform::Jianhang => ("a.pdf", format!("{word}\n客 户 名 称 万联资管1号")),
            Platform::Tengyuan => ("a.pdf", format!("{word}\n-\n-\n-\n-\n腾元基金")),
            Platform::Wangjin => ("a.pdf", format!("{word}\n-\n-\n-\n-\n网金基金")),
            Platform::Jd => ("a.pdf", format!("京东肯特瑞\n{word}")),
            Platform::JdForcedRedemption => ("a.pdf", "京东肯特瑞\n超级转换确认".to_string()),
            Platform::Ronglianchuang if doc_type == DocType::PurchaseApplication => {
                ("a.pdf", format!("{word}{}\n融联创", "\n-".repeat(7)))
            }
            Platform::Ronglianchuang => ("a.pdf", format!("融联创\n{word}")),
            Platform::Minsheng => ("a.pdf", format!("{word}\n-\n同业e+")),
            Platform::Zdt => ("a.pdf", format!("证达通\n{word}")),
            Platform::Liantai => ("a.pdf", format!("联泰基金\n{word}")),
            Platform::Jiyu => ("a.pdf", format!("基煜基金\n{word}")),
            Platform::Ningbo => ("宁波银行.pdf", word.to_string()),
            Platform::Guoxinjiali => ("a.pdf", format!("国信嘉利基金\n{word}")),
            Platform::Panying => ("a.pdf", format!("攀赢基金\n{word}")),
        };
        doc(name, &text)
    }

    #[test]
    fn test_each_platform_sample_matches_one_rule() {
        for doc_type in DocType::ALL {
            for rule in rules(doc_type) {
                let d = sample(doc_type, rule.platform);
                assert_eq!(
                    matching(doc_type, &d),
                    vec![rule.platform],
                    "{doc_type}: sample {:?} ({}) {:?}",
                    rule.platform,
                    d.file_name,
                    d.lines
                );
            }
        }
    }

    #[test]
    fn test_first_rule_wins() {
        // Both the haomai letterhead and a 天天基金 file name: haomai is earlier.
        let d = doc("天天基金.pdf", "好买基金\n分红确认");
        assert_eq!(classify(DocType::Dividend, &d), Some(Platform::Haomai));
        assert_eq!(
            matching(DocType::Dividend, &d),
            vec![Platform::Haomai, Platform::Tiantian]
        );
    }

    #[test]
    fn test_every_table_covers_distinct_platforms() {
        for doc_type in DocType::ALL {
            let table = rules(doc_type);
            for (i, rule) in table.iter().enumerate() {
                assert!(
                    table[i + 1..].iter().all(|r| r.platform != rule.platform),
                    "{doc_type}: {:?} listed twice",
                    rule.platform
                );
            }
        }
    }

    #[test]
    fn test_conversion_marker_excludes_haomai_confirmation() {
        let d = doc("x.pdf", "好买基金\n基金转换确认");
        assert_eq!(classify(DocType::PurchaseConfirmation, &d), None);
        assert_eq!(classify(DocType::Redemption, &d), None);
        assert_eq!(classify(DocType::Dividend, &d), Some(Platform::Haomai));
    }

    #[test]
    fn test_jd_forced_redemption_is_last_resort() {
        let d = doc("肯特瑞超级转换.pdf", "超级转换确认\n强行赎回确认 确认成功");
        assert_eq!(
            classify(DocType::Redemption, &d),
            Some(Platform::JdForcedRedemption)
        );
        let d = doc("x.pdf", "京东肯特瑞\n赎回确认书");
        assert_eq!(classify(DocType::Redemption, &d), Some(Platform::Jd));
    }

    #[test]
    fn test_purchase_zdt_needs_empty_redemption_summary() {
        let text = "证达通\n赎回交易（合计0笔，共计0.00份）";
        assert_eq!(
            classify(DocType::PurchaseApplication, &doc("a.pdf", text)),
            Some(Platform::Zdt)
        );
        let text = "证达通\n赎回交易（合计0笔，共计0.00份）\n超级转换";
        assert_eq!(classify(DocType::PurchaseApplication, &doc("a.pdf", text)), None);
        assert_eq!(
            classify(DocType::PurchaseApplication, &doc("a.pdf", "证达通\n申购受理单")),
            Some(Platform::Zdt)
        );
    }

    #[test]
    fn test_ningbo_purchase_excludes_liantai() {
        assert_eq!(
            classify(DocType::PurchaseApplication, &doc("宁波银行申请.pdf", "x")),
            Some(Platform::Ningbo)
        );
        assert_eq!(
            classify(DocType::PurchaseApplication, &doc("宁波北极星.pdf", "x")),
            Some(Platform::Liantai)
        );
    }

    #[test]
    fn test_liantai_confirmation_requires_business_word() {
        let mut text = String::from("联泰基金\n");
        text.push_str(&"-\n".repeat(20));
        text.push_str("申购");
        assert_eq!(classify(DocType::PurchaseConfirmation, &doc("a.pdf", &text)), None);
        assert_eq!(
            classify(DocType::PurchaseConfirmation, &doc("a.pdf", "联泰基金\n申购确认")),
            Some(Platform::Liantai)
        );
    }
}
