//! Per-platform field extractors.
//!
//! Each document type has one module; inside it every supported platform
//! has its own routine, selected by a `match` on the [`Platform`] tag that
//! the classifier produced. Extractors are pure functions of the document
//! and never fail: a value that cannot be found is left as `""`.
//!
//! [`Platform`]: crate::platform::Platform

pub mod conversion;
pub mod dividend;
pub mod manual_dividend;
pub(crate) mod names;
pub mod patterns;
pub mod purchase;
pub mod purchase_confirm;
pub mod redemption;

use regex::Regex;

use patterns::{DECIMAL, LEADING_NUMBER};

/// Remove ASCII and ideographic spaces, the way names are compared in the
/// product-code lookup.
pub(crate) fn squeeze(s: &str) -> String {
    s.chars().filter(|c| *c != ' ' && *c != '\u{3000}').collect()
}

/// Strip thousands separators from a captured number.
pub(crate) fn digits(s: &str) -> String {
    s.replace(',', "")
}

/// Line `i`, trimmed, or `""` when out of range.
pub(crate) fn line_at(lines: &[String], i: usize) -> &str {
    lines.get(i).map(|l| l.trim()).unwrap_or("")
}

/// Line `i - 1`, trimmed, or `""` for the first line.
pub(crate) fn line_before(lines: &[String], i: usize) -> &str {
    i.checked_sub(1).map_or("", |p| line_at(lines, p))
}

/// Group 1 of `re` on the first line that contains `anchor` and matches.
///
/// Used where the regex tolerates spacing the literal anchor does not, so
/// lines are only considered when the anchor is printed exactly.
pub(crate) fn capture_where(lines: &[String], anchor: &str, re: &Regex) -> Option<String> {
    lines
        .iter()
        .filter(|l| l.contains(anchor))
        .find_map(|line| re.captures(line).map(|c| c[1].to_string()))
}

/// Group 1 of `re` on the first line where it matches.
pub(crate) fn first_capture(lines: &[String], re: &Regex) -> Option<String> {
    lines
        .iter()
        .find_map(|line| re.captures(line).map(|c| c[1].to_string()))
}

/// Group 1 of `re` on the last line where it matches.
pub(crate) fn last_capture(lines: &[String], re: &Regex) -> Option<String> {
    lines
        .iter()
        .rev()
        .find_map(|line| re.captures(line).map(|c| c[1].to_string()))
}

/// Group 1 of `re` on the first line containing `anchor`, without looking
/// at later anchor lines when that one does not match.
pub(crate) fn anchored_capture(lines: &[String], anchor: &str, re: &Regex) -> Option<String> {
    let line = lines.iter().find(|l| l.contains(anchor))?;
    re.captures(line).map(|c| c[1].to_string())
}

/// Group 1 of `re` against the concatenated text.
pub(crate) fn text_capture(text: &str, re: &Regex) -> Option<String> {
    re.captures(text).map(|c| c[1].to_string())
}

/// Captured number from the concatenated text, or `""`.
pub(crate) fn text_number(text: &str, re: &Regex) -> String {
    text_capture(text, re).map(|v| digits(&v)).unwrap_or_default()
}

/// First captured number with separators removed, or `""`.
pub(crate) fn number(lines: &[String], re: &Regex) -> String {
    first_capture(lines, re).map(|v| digits(&v)).unwrap_or_default()
}

/// First captured name with spaces squeezed out, or `""`.
pub(crate) fn name(lines: &[String], re: &Regex) -> String {
    first_capture(lines, re)
        .map(|v| squeeze(v.trim()))
        .unwrap_or_default()
}

/// First captured code, or `""`.
pub(crate) fn code(lines: &[String], re: &Regex) -> String {
    first_capture(lines, re)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Text following the first occurrence of `anchor` on the line, up to the
/// next occurrence.
pub(crate) fn after<'a>(line: &'a str, anchor: &str) -> Option<&'a str> {
    line.split(anchor).nth(1)
}

/// Text before the first occurrence of `anchor` (the whole line if absent).
pub(crate) fn before<'a>(line: &'a str, anchor: &str) -> &'a str {
    line.split(anchor).next().unwrap_or(line)
}

/// The number a line starts with (after trimming).
pub(crate) fn leading_number(line: &str) -> Option<String> {
    LEADING_NUMBER
        .captures(line.trim())
        .map(|c| digits(&c[1]))
}

/// The last decimal number on a line.
pub(crate) fn last_decimal(line: &str) -> Option<String> {
    DECIMAL.find_iter(line).last().map(|m| digits(m.as_str()))
}

/// The first decimal number on a line.
pub(crate) fn first_decimal(line: &str) -> Option<String> {
    DECIMAL.find(line).map(|m| digits(m.as_str()))
}

/// Join the lines following `i` that continue a wrapped name.
///
/// At most `span` lines are looked at; an empty line or a line for which
/// `stop` returns true ends the name.
pub(crate) fn continue_name(
    lines: &[String],
    i: usize,
    span: usize,
    stop: impl Fn(&str) -> bool,
) -> String {
    let mut name = String::new();
    for line in lines.iter().skip(i + 1).take(span) {
        let line = line.trim();
        if line.is_empty() || stop(line) {
            break;
        }
        name.push_str(line);
    }
    name
}

/// True when `line` contains any of `keywords`.
pub(crate) fn contains_any(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| line.contains(k))
}

/// Indices of the lines satisfying `pred`; used to cut multi-record
/// documents into blocks.
pub(crate) fn block_starts(lines: &[String], pred: impl Fn(&str) -> bool) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| pred(l))
        .map(|(i, _)| i)
        .collect()
}

/// Line ranges `[start, next_start)` for each block start.
pub(crate) fn block_ranges(starts: &[usize], len: usize) -> Vec<(usize, usize)> {
    starts
        .iter()
        .enumerate()
        .map(|(k, &s)| (s, starts.get(k + 1).copied().unwrap_or(len)))
        .collect()
}

/// Lines read for each `交易信息` block: at most 8 after the header, ending
/// early at (and including) the next header.
pub(crate) fn trade_info_windows(lines: &[String]) -> Vec<&[String]> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains("交易信息"))
        .map(|(i, _)| {
            let start = i + 1;
            let limit = (i + 9).min(lines.len());
            let end = (i + 2..limit)
                .find(|&k| lines[k].contains("交易信息"))
                .map_or(limit, |k| k + 1);
            &lines[start.min(end)..end]
        })
        .collect()
}

/// Text of each transaction block of an itemised slip.
///
/// Blocks start at `交易序号 … 交易类型` rows naming `business`; when there
/// are none, any `交易类型` row naming it starts a block.
pub(crate) fn trade_blocks(lines: &[String], business: &str) -> Vec<String> {
    let mut starts = block_starts(lines, |l| {
        l.contains("交易序号") && l.contains("交易类型") && l.contains(business)
    });
    if starts.is_empty() {
        starts = block_starts(lines, |l| l.contains("交易类型") && l.contains(business));
    }
    block_ranges(&starts, lines.len())
        .into_iter()
        .map(|(s, e)| lines[s..e].join("\n"))
        .collect()
}

#[cfg(test)]
pub(crate) fn lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use patterns::FUND_CODE;

    #[test]
    fn test_squeeze_and_digits() {
        assert_eq!(squeeze(" 万联 资管\u{3000}1号 "), "万联资管1号");
        assert_eq!(digits("12,345.67"), "12345.67");
    }

    #[test]
    fn test_first_and_last_capture() {
        let ls = lines("基金代码 000001\n基金代码 000002");
        assert_eq!(first_capture(&ls, &FUND_CODE).as_deref(), Some("000001"));
        assert_eq!(last_capture(&ls, &FUND_CODE).as_deref(), Some("000002"));
    }

    #[test]
    fn test_anchored_capture_stops_at_first_anchor() {
        let ls = lines("基金代码 见附件\n基金代码 000002");
        assert_eq!(anchored_capture(&ls, "基金代码", &FUND_CODE), None);
    }

    #[test]
    fn test_number_helpers() {
        assert_eq!(leading_number("  1,234.50 份").as_deref(), Some("1234.50"));
        assert_eq!(leading_number("份额 1"), None);
        assert_eq!(last_decimal("1.00 2,000.50 x").as_deref(), Some("2000.50"));
        assert_eq!(first_decimal("a 3.10 b 4.20").as_deref(), Some("3.10"));
    }

    #[test]
    fn test_after_before() {
        assert_eq!(after("客户名称 A 客户名称 B", "客户名称"), Some(" A "));
        assert_eq!(after("无", "客户名称"), None);
        assert_eq!(before("A计划 交易账号 1", "交易账号"), "A计划 ");
    }

    #[test]
    fn test_continue_name() {
        let ls = lines("账户名称 万联资管\n集合资产\n管理计划\n\n基金代码");
        let tail = continue_name(&ls, 0, 4, |l| l.contains("基金代码"));
        assert_eq!(tail, "集合资产管理计划");
    }

    #[test]
    fn test_trade_info_windows_stop_at_next_header() {
        let ls = lines("交易信息\n交易信息\na\n交易信息\nb");
        let windows = trade_info_windows(&ls);
        assert_eq!(windows.len(), 3);
        // The line right after a header never ends the window.
        assert_eq!(windows[0], &ls[1..4]);
        assert_eq!(windows[1], &ls[2..4]);
        assert_eq!(windows[2], &ls[4..5]);
    }

    #[test]
    fn test_trade_blocks_fallback() {
        let ls = lines("交易类型：赎回\n基金代码：000001\n交易类型：赎回\n基金代码：000002");
        let blocks = trade_blocks(&ls, "赎回");
        assert_eq!(blocks, vec!["交易类型：赎回\n基金代码：000001", "交易类型：赎回\n基金代码：000002"]);
    }

    #[test]
    fn test_block_ranges() {
        let ls = lines("a\n交易信息\nb\n交易信息\nc");
        let starts = block_starts(&ls, |l| l.contains("交易信息"));
        assert_eq!(block_ranges(&starts, ls.len()), vec![(1, 3), (3, 5)]);
    }
}
