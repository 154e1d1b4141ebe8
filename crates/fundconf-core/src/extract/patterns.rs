//! Regex patterns shared by several platform layouts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Numbers as printed on slips: thousands separators, optional decimals
    pub static ref DECIMAL: Regex = Regex::new(r"[\d,]+\.\d+").unwrap();
    pub static ref LEADING_NUMBER: Regex = Regex::new(r"^([\d,]+\.?\d*)").unwrap();
    pub static ref LEADING_DECIMAL: Regex = Regex::new(r"^([\d,]+\.\d+)").unwrap();
    pub static ref BARE_NUMBER: Regex = Regex::new(r"^([0-9,]+\.?[0-9]*)$").unwrap();
    pub static ref SIX_DIGITS: Regex = Regex::new(r"^\d{6}$").unwrap();
    pub static ref SIX_DIGIT_RUN: Regex = Regex::new(r"\d{6}").unwrap();

    // Fund code labels
    pub static ref FUND_CODE: Regex = Regex::new(r"基金代码\s*([0-9]{6})").unwrap();
    pub static ref FUND_CODE_COLON: Regex = Regex::new(r"基金代码[：:]\s*([0-9]{6})").unwrap();
    pub static ref PRODUCT_CODE: Regex = Regex::new(r"产品代码\s*([0-9]{6})").unwrap();
    pub static ref PRODUCT_CODE_ALNUM: Regex = Regex::new(r"产品代码\s*([0-9A-Za-z]+)").unwrap();
    pub static ref SPACED_FUND_CODE: Regex =
        Regex::new(r"基\s*金\s*代\s*码\s*[:：]\s*([0-9]{6})").unwrap();

    // Names
    pub static ref CUSTOMER_NAME: Regex = Regex::new(r"客户名称\s*(.*)").unwrap();
    pub static ref INVESTOR_NAME: Regex = Regex::new(r"投资者名称\s*(.*)").unwrap();
    pub static ref ACCOUNT_NAME_SPACED: Regex =
        Regex::new(r"账\s*号\s*名\s*称\s*[:：]\s*(.*)").unwrap();
    pub static ref ZDT_INVESTOR_NAME: Regex =
        Regex::new(r"投资者名称[：:]\s*(.+?)(?:\s+生成时间|$)").unwrap();
    pub static ref ZDT_INVESTOR_TOKEN: Regex = Regex::new(r"投资者名称[：:]\s*(\S+)").unwrap();
    pub static ref YINGMI_INVESTOR_TOKEN: Regex = Regex::new(r"投资者名称\s*([^\s]+)").unwrap();

    // Multi-record block labels
    pub static ref LIANTAI_ACCOUNT: Regex = Regex::new(r"投资账户\s*([^\s]+)").unwrap();
    pub static ref LIANTAI_FUND_CODE: Regex = Regex::new(r"基金代码\s+([0-9]{6})").unwrap();

    // Amounts written next to 申购金额(小写)
    pub static ref PURCHASE_AMOUNT_LOWER: Regex =
        Regex::new(r"申购金额[（(]?小写[）)]?\s*([0-9,]+\.?[0-9]*)").unwrap();
    pub static ref PURCHASE_AMOUNT_LOWER_LOOSE: Regex =
        Regex::new(r"申购金额小写[^0-9]*([0-9,]+\.?[0-9]*)").unwrap();

    // Confirmation values read from the concatenated text
    pub static ref TEXT_PRODUCT_CODE: Regex = Regex::new(r"产品代码[：: ]*([0-9]{6})").unwrap();
    pub static ref TEXT_FUND_CODE: Regex = Regex::new(r"基金代码[：: ]*([0-9]{6})").unwrap();
    pub static ref TEXT_AMOUNT: Regex = Regex::new(r"确认金额[：: ]*([\d,]+\.\d+)").unwrap();
    pub static ref TEXT_SHARES: Regex = Regex::new(r"确认份额[：: ]*([\d,]+\.\d+)").unwrap();
    pub static ref TEXT_FEE: Regex = Regex::new(r"手续费[：: ]*([\d,]+\.\d+)").unwrap();
    pub static ref TEXT_CONFIRM_FEE: Regex = Regex::new(r"确认费用[：: ]*([\d,]+\.\d+)").unwrap();
    pub static ref LIDE_NAME: Regex = Regex::new(r"投资者姓名/名称[:：]\s*(.*)").unwrap();
    pub static ref LIDE_CONFIRMED_AMOUNT: Regex =
        Regex::new(r"确认金额（元）[：: ]*([\d,]+\.\d+)").unwrap();
    pub static ref LIDE_CONFIRMED_SHARES: Regex =
        Regex::new(r"确认份额（份）[：: ]*([\d,]+\.\d+)").unwrap();
    pub static ref LIDE_FEE: Regex = Regex::new(r"交易费用（元）[：: ]*([\d,]+\.\d+)").unwrap();
    pub static ref CHANGLIANG_CONFIRMED_AMOUNT: Regex =
        Regex::new(r"确认金额[：: ]*([\d,]+\.\d+).*?\(元\)").unwrap();
    pub static ref CHANGLIANG_CONFIRMED_SHARES: Regex =
        Regex::new(r"确认份额[：: ]*([\d,]+\.\d+).*?\(份\)").unwrap();
    pub static ref CHANGLIANG_CONFIRMED_FEE: Regex =
        Regex::new(r"手续费[：: ]*([\d,]+\.\d+).*?\(元\)").unwrap();

    // Confirmation values as `label value` rows
    pub static ref CONFIRMED_AMOUNT: Regex = Regex::new(r"确认金额\s*([\d,]+\.?\d*)").unwrap();
    pub static ref CONFIRMED_SHARES: Regex = Regex::new(r"确认份额\s*([\d,]+\.?\d*)").unwrap();
    pub static ref CONFIRMED_FEE: Regex = Regex::new(r"手续费\s*([\d,]+\.?\d*)").unwrap();
    pub static ref FIRST_NUMBER: Regex = Regex::new(r"([\d,]+\.?\d*)").unwrap();

    // Letter-spaced labels (`确 认 金 额`)
    pub static ref SPACED_CUSTOMER_NAME: Regex =
        Regex::new(r"客\s*户\s*名\s*称\s*[：:]\s*(.*)").unwrap();
    pub static ref SPACED_AMOUNT: Regex =
        Regex::new(r"确\s*认\s*金\s*额\s*[：:]?\s*([\d,]+\.?\d*)").unwrap();
    pub static ref SPACED_SHARES: Regex =
        Regex::new(r"确\s*认\s*份\s*额\s*[：:]?\s*([\d,]+\.?\d*)").unwrap();

    // Itemised (yingmi) blocks
    pub static ref YINGMI_CODE: Regex = Regex::new(r"基金代码[:：]\s*(\d{6})").unwrap();
    pub static ref YINGMI_AMOUNT: Regex = Regex::new(r"确认金额[:：]?\s*([\d,]+\.\d+)").unwrap();
    pub static ref YINGMI_SHARES: Regex = Regex::new(r"确认份额[:：]?\s*([\d,]+\.\d+)").unwrap();
    pub static ref YINGMI_FEE: Regex = Regex::new(r"手续费[:：]?\s*([\d,]+\.\d+)").unwrap();

    // ronglianchuang
    pub static ref RONGLIANCHUANG_CODE: Regex = Regex::new(r"产品代码\s*[:：]?\s*([0-9]{6})").unwrap();
    pub static ref RONGLIANCHUANG_AMOUNT: Regex =
        Regex::new(r"确认金额\s*[:：]?\s*([\d,]+\.\d+)").unwrap();
    pub static ref RONGLIANCHUANG_SHARES: Regex =
        Regex::new(r"确认份额\s*[:：]?\s*([\d,]+\.\d+)").unwrap();
    pub static ref RONGLIANCHUANG_FEE: Regex = Regex::new(r"手续费\s*[:：]?\s*([\d,]+\.\d+)").unwrap();

    // minsheng full-width labels
    pub static ref MINSHENG_NAME: Regex = Regex::new(r"客户名称[：:]\s*(.*)").unwrap();
    pub static ref MINSHENG_CODE: Regex = Regex::new(r"产品代码[：:]\s*([0-9]{6})").unwrap();
    pub static ref MINSHENG_AMOUNT: Regex = Regex::new(r"确认金额（元）[：:]\s*([\d,]+\.?\d*)").unwrap();
    pub static ref MINSHENG_SHARES: Regex = Regex::new(r"确认份额（份）[：:]\s*([\d,]+\.?\d*)").unwrap();
    pub static ref MINSHENG_FEE: Regex = Regex::new(r"手续费（元）[：:]\s*([\d,]+\.?\d*)").unwrap();

    // Dates
    pub static ref ISO_DATE: Regex = Regex::new(r"(\d{4}-\d{2}-\d{2})").unwrap();
    pub static ref LEADING_COMPACT_DATE: Regex = Regex::new(r"^(\d{8})").unwrap();
}
