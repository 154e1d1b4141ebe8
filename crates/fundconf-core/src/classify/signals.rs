//! Platform signals shared by several classification tables.
//!
//! Each function is the predicate the dividend table uses; the other
//! tables reuse it unless the platform prints a different letterhead on
//! that document type.

use super::{all, file, from, head};
use crate::document::Document;

// Window sizes, in extracted lines. `head` windows count lines from the top,
// `from` windows count the lines skipped before the search starts.
pub const HAOMAI_LETTERHEAD: usize = 2;
pub const TIANTIAN_HEADER: usize = 3;
pub const XINGZHENG_LETTERHEAD: usize = 2;
pub const LIDE_HEADER: usize = 3;
pub const CHANGLIANG_LETTERHEAD: usize = 2;
pub const YINGMI_LOGO: usize = 3;
pub const ZHAOYINGTONG_LETTERHEAD: usize = 2;
pub const PINGAN_HEADER: usize = 5;
pub const JIAOHANG_LETTERHEAD: usize = 2;
pub const HEXUN_HEADER: usize = 3;
pub const TENGYUAN_HEADER: usize = 5;
pub const WANGJIN_HEADER: usize = 5;
pub const JD_LETTERHEAD: usize = 2;
pub const RONGLIANCHUANG_LETTERHEAD: usize = 2;
pub const MINSHENG_TITLE: usize = 2;
pub const LIANTAI_LETTERHEAD: usize = 2;
pub const JIYU_LETTERHEAD: usize = 2;
pub const NINGBO_HEADER: usize = 5;
pub const GUOXINJIALI_LETTERHEAD: usize = 2;
pub const PANYING_LETTERHEAD: usize = 2;
/// Lines before the payer bank name on ningbo applications.
pub const NINGBO_PAYER_OFFSET: usize = 15;
/// Lines searched for the liantai letterhead on ningbo-paid slips.
pub const LIANTAI_PAYER_LETTERHEAD: usize = 5;
/// Lines searched for 申购/赎回 on ronglianchuang confirmations.
pub const RONGLIANCHUANG_BUSINESS_WINDOW: usize = 5;

/// Letterhead occupies the first two lines.
pub fn haomai(d: &Document) -> bool {
    head(d, HAOMAI_LETTERHEAD, "好买基金")
}

/// The brand sits in the footer, below a three-line header.
pub fn tiantian(d: &Document) -> bool {
    file(d, "天天基金") || from(d, TIANTIAN_HEADER, "天天基金")
}

pub fn xingzheng(d: &Document) -> bool {
    head(d, XINGZHENG_LETTERHEAD, "兴证全球基金")
}

/// Footer brand, below a three-line header.
pub fn lide(d: &Document) -> bool {
    from(d, LIDE_HEADER, "利得基金")
}

pub fn changliang(d: &Document) -> bool {
    head(d, CHANGLIANG_LETTERHEAD, "长量基金")
}

/// Logo text lands on one of the first three lines.
pub fn yingmi(d: &Document) -> bool {
    file(d, "盈米") || head(d, YINGMI_LOGO, "盈米")
}

pub fn zhaoyingtong(d: &Document) -> bool {
    head(d, ZHAOYINGTONG_LETTERHEAD, "招赢通")
}

/// The slips carry no brand text at all.
pub fn youchu(d: &Document) -> bool {
    file(d, "邮储")
}

/// Brand printed after a five-line header block.
pub fn pingan(d: &Document) -> bool {
    from(d, PINGAN_HEADER, "行E通")
}

pub fn jiaohang(d: &Document) -> bool {
    file(d, "交e通") || head(d, JIAOHANG_LETTERHEAD, "交通银行")
}

/// Issuer name in the footer, below a three-line header.
pub fn hexun(d: &Document) -> bool {
    from(d, HEXUN_HEADER, "和讯信息科技有限公司")
}

/// Letter-spaced labels are unique to these slips, though bonus-share
/// slips of other issuers have been seen to use them too.
pub fn jianhang(d: &Document) -> bool {
    file(d, "建行") || all(d, "客 户 名 称")
}

/// Footer brand, below a five-line header.
pub fn tengyuan(d: &Document) -> bool {
    file(d, "腾元") || from(d, TENGYUAN_HEADER, "腾元基金")
}

/// Footer brand, below a five-line header.
pub fn wangjin(d: &Document) -> bool {
    file(d, "网金") || from(d, WANGJIN_HEADER, "网金基金")
}

pub fn jd(d: &Document) -> bool {
    file(d, "肯特瑞基金") || head(d, JD_LETTERHEAD, "肯特瑞")
}

pub fn ronglianchuang(d: &Document) -> bool {
    head(d, RONGLIANCHUANG_LETTERHEAD, "融联创")
}

/// Brand follows a two-line title.
pub fn minsheng(d: &Document) -> bool {
    file(d, "民生同业e+") || from(d, MINSHENG_TITLE, "同业e+")
}

/// The brand can appear anywhere in the summary tables.
pub fn zdt(d: &Document) -> bool {
    all(d, "证达通")
}

/// Files from the 北极星 system are liantai slips.
pub fn liantai(d: &Document) -> bool {
    file(d, "北极星") || head(d, LIANTAI_LETTERHEAD, "联泰")
}

pub fn jiyu(d: &Document) -> bool {
    head(d, JIYU_LETTERHEAD, "基煜基金")
}

/// The payer-account box follows a five-line header.
pub fn ningbo(d: &Document) -> bool {
    file(d, "宁波") || from(d, NINGBO_HEADER, "同业客户付款账户信息")
}

pub fn guoxinjiali(d: &Document) -> bool {
    head(d, GUOXINJIALI_LETTERHEAD, "国信嘉利基金")
}

pub fn panying(d: &Document) -> bool {
    file(d, "攀赢") || head(d, PANYING_LETTERHEAD, "攀赢")
}

/// Conversion slips reuse the letterheads of ordinary confirmations.
pub fn mentions_conversion(d: &Document) -> bool {
    all(d, "转换")
}

/// ronglianchuang confirmations are also delivered by 江苏银行.
pub fn ronglianchuang_or_jiangsu(d: &Document) -> bool {
    file(d, "江苏银行") || head(d, RONGLIANCHUANG_LETTERHEAD, "融联创")
}

/// Application and confirmation slips: 北极星 files and pages carrying the
/// liantai letterhead belong to liantai even when 宁波银行 is the payer.
pub fn ningbo_excluding_liantai(d: &Document) -> bool {
    (file(d, "宁波") && !file(d, "北极星")) || (from(d, NINGBO_PAYER_OFFSET, "宁波银行") && !head(d, LIANTAI_PAYER_LETTERHEAD, "联泰"))
}
