use super::signals::*;
use super::{all, file, head, Rule};
use crate::document::Document;
use crate::platform::Platform;

/// Lines searched for 赎回 on liantai slips.
const LIANTAI_BUSINESS_WINDOW: usize = 15;

pub(super) static RULES: &[Rule] = &[
    Rule { platform: Platform::Haomai, matches: haomai_redemption },
    Rule { platform: Platform::Tiantian, matches: tiantian_redemption },
    Rule { platform: Platform::Lide, matches: lide },
    Rule { platform: Platform::Changliang, matches: changliang },
    Rule { platform: Platform::Jiaohang, matches: jiaohang },
    Rule { platform: Platform::Jd, matches: jd_redemption },
    Rule { platform: Platform::Wangjin, matches: wangjin },
    Rule { platform: Platform::Pingan, matches: pingan },
    Rule { platform: Platform::Jianhang, matches: jianhang },
    Rule { platform: Platform::Ronglianchuang, matches: ronglianchuang_redemption },
    Rule { platform: Platform::Minsheng, matches: minsheng },
    Rule { platform: Platform::Panying, matches: panying },
    Rule { platform: Platform::Yingmi, matches: yingmi },
    Rule { platform: Platform::Liantai, matches: liantai_redemption },
    Rule { platform: Platform::Tengyuan, matches: tengyuan },
    Rule { platform: Platform::Zdt, matches: zdt_redemption },
    Rule { platform: Platform::JdForcedRedemption, matches: jd_conversion },
];

fn haomai_redemption(d: &Document) -> bool {
    haomai(d) && !mentions_conversion(d)
}

fn tiantian_redemption(d: &Document) -> bool {
    tiantian(d) && !mentions_conversion(d)
}

fn jd_redemption(d: &Document) -> bool {
    head(d, JD_LETTERHEAD, "肯特瑞") && head(d, JD_LETTERHEAD, "赎回确认")
}

fn ronglianchuang_redemption(d: &Document) -> bool {
    ronglianchuang_or_jiangsu(d) && head(d, RONGLIANCHUANG_BUSINESS_WINDOW, "赎回")
}

fn liantai_redemption(d: &Document) -> bool {
    liantai(d) && head(d, LIANTAI_BUSINESS_WINDOW, "赎回")
}

fn zdt_redemption(d: &Document) -> bool {
    zdt(d) && all(d, "赎回确认")
}

/// A JD conversion slip; its forced-redemption page is read by a
/// dedicated extractor.
fn jd_conversion(d: &Document) -> bool {
    (file(d, "肯特瑞") && file(d, "转换")) || (head(d, JD_LETTERHEAD, "肯特瑞") && head(d, JD_LETTERHEAD, "转换"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_tiantian_conversion_is_not_a_redemption() {
        let d = Document::from_text(Path::new("天天基金.pdf"), "基金转换确认");
        assert!(!tiantian_redemption(&d));
        let d = Document::from_text(Path::new("天天基金.pdf"), "赎回确认");
        assert!(tiantian_redemption(&d));
    }

    #[test]
    fn test_liantai_business_word_window() {
        let slip = |fillers: usize| {
            let text = format!("联泰基金\n{}赎回确认", "-\n".repeat(fillers));
            Document::from_text(Path::new("a.pdf"), text)
        };
        assert!(liantai_redemption(&slip(LIANTAI_BUSINESS_WINDOW - 2)));
        assert!(!liantai_redemption(&slip(LIANTAI_BUSINESS_WINDOW - 1)));
    }
}
