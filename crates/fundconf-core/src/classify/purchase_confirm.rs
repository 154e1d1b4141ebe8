use super::signals::*;
use super::{all, file, from, head, Rule};
use crate::document::Document;
use crate::platform::Platform;

/// Lines searched for 申购 on liantai slips.
const LIANTAI_BUSINESS_WINDOW: usize = 20;

pub(super) static RULES: &[Rule] = &[
    Rule { platform: Platform::Haomai, matches: haomai_confirmation },
    Rule { platform: Platform::Tiantian, matches: tiantian_confirmation },
    Rule { platform: Platform::Lide, matches: lide },
    Rule { platform: Platform::Changliang, matches: changliang },
    Rule { platform: Platform::Jiaohang, matches: jiaohang },
    Rule { platform: Platform::Jd, matches: jd_subscription },
    Rule { platform: Platform::Wangjin, matches: wangjin },
    Rule { platform: Platform::Pingan, matches: pingan },
    Rule { platform: Platform::Jianhang, matches: jianhang },
    Rule { platform: Platform::Tengyuan, matches: tengyuan },
    Rule { platform: Platform::Ronglianchuang, matches: ronglianchuang_subscription },
    Rule { platform: Platform::Minsheng, matches: minsheng },
    Rule { platform: Platform::Hexun, matches: hexun_confirmation },
    Rule { platform: Platform::Zhaoyingtong, matches: zhaoyingtong_confirmation },
    Rule { platform: Platform::Xingzheng, matches: xingzheng_confirmation },
    Rule { platform: Platform::Youchu, matches: youchu },
    Rule { platform: Platform::Jiyu, matches: jiyu },
    Rule { platform: Platform::Ningbo, matches: ningbo_excluding_liantai },
    Rule { platform: Platform::Guoxinjiali, matches: guoxinjiali },
    Rule { platform: Platform::Panying, matches: panying },
    Rule { platform: Platform::Zdt, matches: zdt_confirmation },
    Rule { platform: Platform::Yingmi, matches: yingmi },
    Rule { platform: Platform::Liantai, matches: liantai_subscription },
];

fn haomai_confirmation(d: &Document) -> bool {
    haomai(d) && !mentions_conversion(d)
}

/// A 天天基金 file name wins even on conversion slips.
fn tiantian_confirmation(d: &Document) -> bool {
    file(d, "天天基金") || (from(d, TIANTIAN_HEADER, "天天基金") && !mentions_conversion(d))
}

fn jd_subscription(d: &Document) -> bool {
    head(d, JD_LETTERHEAD, "肯特瑞") && head(d, JD_LETTERHEAD, "申购确认")
}

fn ronglianchuang_subscription(d: &Document) -> bool {
    ronglianchuang_or_jiangsu(d) && head(d, RONGLIANCHUANG_BUSINESS_WINDOW, "申购")
}

fn hexun_confirmation(d: &Document) -> bool {
    file(d, "和讯") || hexun(d)
}

fn zhaoyingtong_confirmation(d: &Document) -> bool {
    file(d, "招赢通") || zhaoyingtong(d)
}

fn xingzheng_confirmation(d: &Document) -> bool {
    file(d, "兴证") || xingzheng(d)
}

fn zdt_confirmation(d: &Document) -> bool {
    zdt(d) && all(d, "申购确认单")
}

fn liantai_subscription(d: &Document) -> bool {
    liantai(d) && head(d, LIANTAI_BUSINESS_WINDOW, "申购")
}
