use super::signals::*;
use super::Rule;
use crate::platform::Platform;

pub(super) static RULES: &[Rule] = &[
    Rule { platform: Platform::Haomai, matches: haomai },
    Rule { platform: Platform::Tiantian, matches: tiantian },
    Rule { platform: Platform::Xingzheng, matches: xingzheng },
    Rule { platform: Platform::Lide, matches: lide },
    Rule { platform: Platform::Changliang, matches: changliang },
    Rule { platform: Platform::Yingmi, matches: yingmi },
    Rule { platform: Platform::Zhaoyingtong, matches: zhaoyingtong },
    Rule { platform: Platform::Youchu, matches: youchu },
    Rule { platform: Platform::Pingan, matches: pingan },
    Rule { platform: Platform::Jiaohang, matches: jiaohang },
    Rule { platform: Platform::Hexun, matches: hexun },
    Rule { platform: Platform::Jianhang, matches: jianhang },
    Rule { platform: Platform::Tengyuan, matches: tengyuan },
    Rule { platform: Platform::Wangjin, matches: wangjin },
    Rule { platform: Platform::Jd, matches: jd },
    Rule { platform: Platform::Ronglianchuang, matches: ronglianchuang },
    Rule { platform: Platform::Minsheng, matches: minsheng },
    Rule { platform: Platform::Zdt, matches: zdt },
    Rule { platform: Platform::Liantai, matches: liantai },
    Rule { platform: Platform::Jiyu, matches: jiyu },
    Rule { platform: Platform::Ningbo, matches: ningbo },
    Rule { platform: Platform::Guoxinjiali, matches: guoxinjiali },
    Rule { platform: Platform::Panying, matches: panying },
];
