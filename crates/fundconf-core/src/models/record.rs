//! Raw records produced by the field extractors.
//!
//! Every captured value is kept as the string found in the document, with
//! thousands separators removed. A field the extractor could not locate is
//! an empty string; numeric coercion happens later in [`crate::normalize`].

use serde::Serialize;

use crate::platform::Platform;

/// Fields shared by every record type, used to drop empty captures.
pub trait RawRecord {
    /// Platform the record was extracted for.
    fn platform(&self) -> Platform;

    /// Product (account) name, `""` when missing.
    fn product_name(&self) -> &str;

    /// Fund market code, `""` when missing.
    fn fund_code(&self) -> &str;

    /// Primary monetary value, `""` when missing.
    fn amount(&self) -> &str;

    /// True when name, code and amount are all missing.
    fn is_blank(&self) -> bool {
        self.product_name().is_empty() && self.fund_code().is_empty() && self.amount().is_empty()
    }
}

/// Dividend reinvestment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DividendRecord {
    pub platform: Platform,
    pub product_name: String,
    pub fund_code: String,
    pub amount: String,
    pub shares: String,
    /// Dividend cut-off date computed from the document (`YYYYMMDD`), or
    /// `Some("")` when the document's date was unreadable. `None` means the
    /// normalizer applies the default.
    pub end_date: Option<String>,
}

impl DividendRecord {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            product_name: String::new(),
            fund_code: String::new(),
            amount: String::new(),
            shares: String::new(),
            end_date: None,
        }
    }

    /// Use one captured figure for both amount and shares.
    pub fn with_equal_amount_and_shares(mut self, value: String) -> Self {
        self.shares = value.clone();
        self.amount = value;
        self
    }
}

/// Subscription application record; only the applied amount is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseRecord {
    pub platform: Platform,
    pub product_name: String,
    pub fund_code: String,
    pub amount: String,
}

impl PurchaseRecord {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            product_name: String::new(),
            fund_code: String::new(),
            amount: String::new(),
        }
    }
}

/// Subscription confirmation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationRecord {
    pub platform: Platform,
    pub product_name: String,
    pub fund_code: String,
    pub amount: String,
    pub shares: String,
    pub fee: String,
}

impl ConfirmationRecord {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            product_name: String::new(),
            fund_code: String::new(),
            amount: String::new(),
            shares: String::new(),
            fee: String::new(),
        }
    }
}

/// When redeemed cash reaches the account, as stated by the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub enum Settlement {
    /// The document states no date; the normalizer applies the default.
    #[default]
    Unstated,
    /// A calendar date as printed (`YYYYMMDD` or `YYYY-MM-DD`).
    Date(String),
    /// A `T+N` offset counted from the run date.
    TPlus(u32),
}

/// Redemption confirmation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedemptionRecord {
    pub platform: Platform,
    pub product_name: String,
    pub fund_code: String,
    pub amount: String,
    pub shares: String,
    pub fee: String,
    pub settlement: Settlement,
}

impl RedemptionRecord {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            product_name: String::new(),
            fund_code: String::new(),
            amount: String::new(),
            shares: String::new(),
            fee: String::new(),
            settlement: Settlement::Unstated,
        }
    }
}

/// Fund conversion record with an outgoing and an incoming leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRecord {
    pub platform: Platform,
    pub product_name: String,
    pub out_fund_code: String,
    pub out_amount: String,
    pub out_shares: String,
    pub in_fund_code: String,
    pub in_amount: String,
    pub in_shares: String,
    pub in_fee: String,
}

impl ConversionRecord {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            product_name: String::new(),
            out_fund_code: String::new(),
            out_amount: String::new(),
            out_shares: String::new(),
            in_fund_code: String::new(),
            in_amount: String::new(),
            in_shares: String::new(),
            in_fee: String::new(),
        }
    }
}

/// Ex-dividend slip read through OCR. The product is fixed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManualDividendRecord {
    pub fund_code: String,
    pub amount: String,
}

macro_rules! raw_record {
    ($ty:ty, $code:ident) => {
        impl RawRecord for $ty {
            fn platform(&self) -> Platform {
                self.platform
            }
            fn product_name(&self) -> &str {
                &self.product_name
            }
            fn fund_code(&self) -> &str {
                &self.$code
            }
            fn amount(&self) -> &str {
                &self.amount
            }
        }
    };
}

raw_record!(DividendRecord, fund_code);
raw_record!(PurchaseRecord, fund_code);
raw_record!(ConfirmationRecord, fund_code);
raw_record!(RedemptionRecord, fund_code);

impl RawRecord for ConversionRecord {
    fn platform(&self) -> Platform {
        self.platform
    }
    fn product_name(&self) -> &str {
        &self.product_name
    }
    fn fund_code(&self) -> &str {
        &self.out_fund_code
    }
    fn amount(&self) -> &str {
        &self.out_amount
    }
}
