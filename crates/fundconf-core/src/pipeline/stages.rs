//! Classify, extract and normalize one document.
//!
//! Each function returns `None` when no platform rule recognises the
//! document, and otherwise the rows of every non-blank record.

use crate::classify::classify;
use crate::document::Document;
use crate::extract;
use crate::models::record::RawRecord;
use crate::models::row::{ConversionRow, DividendRow, ManualDividendRow, TradeRow};
use crate::normalize::Normalizer;
use crate::platform::DocType;

fn rows_of<T: RawRecord + std::fmt::Debug, R>(
    records: Vec<T>,
    normalize: impl Fn(&T) -> R,
) -> Vec<R> {
    records
        .into_iter()
        .filter(|r| {
            let blank = r.is_blank();
            if blank {
                tracing::trace!(record = ?r, "dropped blank record");
            }
            !blank
        })
        .map(|r| normalize(&r))
        .collect()
}

pub(crate) fn dividend(doc: &Document, n: &Normalizer) -> Option<Vec<DividendRow>> {
    let platform = classify(DocType::Dividend, doc)?;
    let records = extract::dividend::extract(platform, doc);
    Some(rows_of(records, |r| n.dividend(r)))
}

pub(crate) fn purchase(doc: &Document, n: &Normalizer) -> Option<Vec<TradeRow>> {
    let platform = classify(DocType::PurchaseApplication, doc)?;
    let records = extract::purchase::extract(platform, doc);
    Some(rows_of(records, |r| n.purchase(r)))
}

pub(crate) fn purchase_confirmation(doc: &Document, n: &Normalizer) -> Option<Vec<TradeRow>> {
    let platform = classify(DocType::PurchaseConfirmation, doc)?;
    let records = extract::purchase_confirm::extract(platform, doc);
    Some(rows_of(records, |r| n.confirmation(r)))
}

pub(crate) fn redemption(doc: &Document, n: &Normalizer) -> Option<Vec<TradeRow>> {
    let platform = classify(DocType::Redemption, doc)?;
    let records = extract::redemption::extract(platform, doc);
    Some(rows_of(records, |r| n.redemption(r)))
}

pub(crate) fn conversion(doc: &Document, n: &Normalizer) -> Option<Vec<ConversionRow>> {
    let platform = classify(DocType::Conversion, doc)?;
    let records = extract::conversion::extract(platform, doc);
    Some(rows_of(records, |r| n.conversion(r)))
}

/// Slips come from one product only, so there is nothing to classify; a
/// slip without both code and amount yields no row.
pub(crate) fn manual_dividend(doc: &Document, n: &Normalizer) -> Option<Vec<ManualDividendRow>> {
    Some(
        extract::manual_dividend::extract(doc)
            .map(|r| n.manual_dividend(&r))
            .into_iter()
            .collect(),
    )
}
