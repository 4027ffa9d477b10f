// Permissive birth-date normalization to `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::row::RawValue;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// Month-first before day-first, so ambiguous dates read as US style.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%d/%m/%y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a date from free-form text, trying the common layouts in turn.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if !year_width_fits(s, fmt) {
            continue;
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if !year_width_fits(s, fmt) {
            continue;
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    // A bare year reads as January 1st.
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        return s.parse().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    }
    None
}

/// chrono's `%Y` also accepts one or two digits, which would turn `03/15/01`
/// into year 1. A layout whose year sits at either end of the text only applies
/// when the digit run there has the width the layout expects.
fn year_width_fits(text: &str, fmt: &str) -> bool {
    let leading = text.chars().take_while(char::is_ascii_digit).count();
    let trailing = text.chars().rev().take_while(char::is_ascii_digit).count();
    if fmt.starts_with("%Y") && leading < 4 {
        return false;
    }
    if fmt.ends_with("%Y") && trailing < 4 {
        return false;
    }
    if fmt.ends_with("%y") && trailing != 2 {
        return false;
    }
    true
}

/// Render a birth-date cell as `YYYY-MM-DD`. Unparseable values are kept
/// verbatim; missing values become the empty string.
pub fn normalize_birth_date(value: &RawValue) -> String {
    match value {
        RawValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        RawValue::Text(s) => parse_date(s)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| s.clone()),
        RawValue::Number(n) if n.is_finite() => {
            let text = n.to_string();
            parse_date(&text)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or(text)
        }
        _ => String::new(),
    }
}
