//! Fund distribution platforms and the document types they issue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of confirmation document handled by a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    /// Dividend reinvestment confirmation (红利再投).
    Dividend,
    /// Subscription application receipt (申购申请).
    PurchaseApplication,
    /// Subscription confirmation (申购确认).
    PurchaseConfirmation,
    /// Redemption confirmation (赎回确认).
    Redemption,
    /// Fund conversion confirmation (超级转换确认).
    Conversion,
    /// Scanned ex-dividend slip read through OCR (红利除权).
    ManualDividend,
}

impl DocType {
    /// All document types, in the order a full run processes them.
    pub const ALL: [DocType; 6] = [
        DocType::Dividend,
        DocType::PurchaseApplication,
        DocType::PurchaseConfirmation,
        DocType::Redemption,
        DocType::Conversion,
        DocType::ManualDividend,
    ];

    /// Human readable name used in logs and summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocType::Dividend => "分红单",
            DocType::PurchaseApplication => "申购申请单",
            DocType::PurchaseConfirmation => "申购确认单",
            DocType::Redemption => "赎回确认单",
            DocType::Conversion => "超级转换确认单",
            DocType::ManualDividend => "万事如意红利除权单",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            DocType::Dividend => "dividend",
            DocType::PurchaseApplication => "purchase",
            DocType::PurchaseConfirmation => "purchase-confirm",
            DocType::Redemption => "redemption",
            DocType::Conversion => "conversion",
            DocType::ManualDividend => "manual-dividend",
        };
        f.write_str(id)
    }
}

/// A fund distribution channel whose document layout we recognise.
///
/// Platform identity is never declared by a document; it is inferred by the
/// classifiers in [`crate::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Haomai,
    Tiantian,
    Xingzheng,
    Lide,
    Changliang,
    Yingmi,
    Zhaoyingtong,
    Youchu,
    Pingan,
    Jiaohang,
    Hexun,
    Jianhang,
    Tengyuan,
    Wangjin,
    Jd,
    /// Forced-redemption block embedded in a JD conversion document.
    JdForcedRedemption,
    Ronglianchuang,
    Minsheng,
    Zdt,
    Liantai,
    Jiyu,
    Ningbo,
    Guoxinjiali,
    Panying,
}

impl Platform {
    /// Label written to the platform column of the output table.
    pub fn label(&self, doc_type: DocType) -> &'static str {
        match (self, doc_type) {
            (Platform::Zhaoyingtong, DocType::PurchaseConfirmation) => "招赢通",
            (Platform::Hexun, DocType::PurchaseConfirmation) => "和讯基金",
            _ => self.default_label(),
        }
    }

    fn default_label(&self) -> &'static str {
        match self {
            Platform::Haomai => "好买基金",
            Platform::Tiantian => "天天基金",
            Platform::Xingzheng => "兴证全球基金",
            Platform::Lide => "利得基金",
            Platform::Changliang => "长量基金",
            Platform::Yingmi => "盈米基金",
            Platform::Zhaoyingtong => "招赢通基金",
            Platform::Youchu => "邮储银行",
            Platform::Pingan => "平安行E通",
            Platform::Jiaohang => "交e通",
            Platform::Hexun => "和讯科技",
            Platform::Jianhang => "建行直销",
            Platform::Tengyuan => "腾元基金",
            Platform::Wangjin => "网金基金",
            Platform::Jd => "京东肯特瑞",
            Platform::JdForcedRedemption => "京东超级转换强行赎回",
            Platform::Ronglianchuang => "融联创同业交易平台",
            Platform::Minsheng => "民生同业e+",
            Platform::Zdt => "证达通基金",
            Platform::Liantai => "联泰基金",
            Platform::Jiyu => "基煜基金",
            Platform::Ningbo => "宁波银行",
            Platform::Guoxinjiali => "国信嘉利基金",
            Platform::Panying => "攀赢基金",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_label())
    }
}
