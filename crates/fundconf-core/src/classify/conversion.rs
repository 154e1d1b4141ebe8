use super::signals::jd;
use super::{file, Rule};
use crate::document::Document;
use crate::platform::Platform;

pub(super) static RULES: &[Rule] = &[
    Rule { platform: Platform::Jd, matches: jd },
    Rule { platform: Platform::Tiantian, matches: tiantian_conversion },
];

/// Conversion slips from 天天基金 are only recognisable by file name.
fn tiantian_conversion(d: &Document) -> bool {
    file(d, "天天基金")
}
