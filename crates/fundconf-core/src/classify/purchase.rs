use super::signals::*;
use super::{all, from, Rule};
use crate::document::Document;
use crate::platform::Platform;

/// Lines skipped before the ronglianchuang brand on application forms.
const RONGLIANCHUANG_ORDER_BLOCK: usize = 8;

pub(super) static RULES: &[Rule] = &[
    Rule { platform: Platform::Haomai, matches: haomai },
    Rule { platform: Platform::Tiantian, matches: tiantian },
    Rule { platform: Platform::Lide, matches: lide },
    Rule { platform: Platform::Changliang, matches: changliang },
    Rule { platform: Platform::Pingan, matches: pingan },
    Rule { platform: Platform::Jiaohang, matches: jiaohang },
    Rule { platform: Platform::Wangjin, matches: wangjin },
    Rule { platform: Platform::Tengyuan, matches: tengyuan },
    Rule { platform: Platform::Hexun, matches: hexun },
    Rule { platform: Platform::Jd, matches: jd },
    Rule { platform: Platform::Minsheng, matches: minsheng },
    Rule { platform: Platform::Zhaoyingtong, matches: zhaoyingtong },
    Rule { platform: Platform::Ronglianchuang, matches: ronglianchuang_application },
    Rule { platform: Platform::Jiyu, matches: jiyu },
    Rule { platform: Platform::Ningbo, matches: ningbo_excluding_liantai },
    Rule { platform: Platform::Guoxinjiali, matches: guoxinjiali },
    Rule { platform: Platform::Panying, matches: panying },
    Rule { platform: Platform::Yingmi, matches: yingmi },
    Rule { platform: Platform::Liantai, matches: liantai },
    Rule { platform: Platform::Zdt, matches: zdt_application },
];

/// Application forms put the brand below the order block.
fn ronglianchuang_application(d: &Document) -> bool {
    from(d, RONGLIANCHUANG_ORDER_BLOCK, "融联创")
}

/// Either the daily summary with no redemptions, or a single-order receipt.
fn zdt_application(d: &Document) -> bool {
    let summary = all(d, "赎回交易（合计0笔，共计0.00份）") && !all(d, "超级");
    zdt(d) && (summary || all(d, "申购受理单"))
}
