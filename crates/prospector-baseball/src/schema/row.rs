// Raw, untyped table contents as read from an input file.

use chrono::NaiveDate;
use prospector_core::Scalar;
use std::collections::HashMap;

/// Cell tokens treated as missing, in addition to the empty string.
const MISSING_TOKENS: &[&str] = &["na", "n/a", "nan", "null", "none", "-", "#n/a"];

/// A single raw cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Missing,
}

impl RawValue {
    /// Classify a textual cell: blanks and NA markers are missing, numeric
    /// text becomes a number, anything else stays text.
    pub fn from_text(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed.to_lowercase().as_str()) {
            return RawValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => RawValue::Number(n),
            Ok(_) => RawValue::Missing,
            Err(_) => RawValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Number(n) => !n.is_finite(),
            _ => false,
        }
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Text view of the cell for identity fields.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(n.to_string()),
            RawValue::Text(s) => Some(s.clone()),
            RawValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            _ => None,
        }
    }

    pub fn to_scalar(&self) -> Option<Scalar> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(Scalar::Number(*n)),
            RawValue::Text(s) => Some(Scalar::Text(s.clone())),
            RawValue::Date(d) => Some(Scalar::Text(d.format("%Y-%m-%d").to_string())),
            _ => None,
        }
    }
}

/// One input record keyed by normalized header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, RawValue>,
}

static MISSING: RawValue = RawValue::Missing;

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell. The first occurrence of a duplicated header is kept.
    pub fn insert(&mut self, header: impl Into<String>, value: RawValue) {
        self.cells.entry(header.into()).or_insert(value);
    }

    /// Look up a cell by an optional resolved column; unresolved columns and
    /// absent cells read as missing.
    pub fn get(&self, column: Option<&str>) -> &RawValue {
        column
            .and_then(|c| self.cells.get(c))
            .unwrap_or(&MISSING)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A decoded table: normalized headers plus rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_text_cells() {
        assert_eq!(RawValue::from_text(" 42 "), RawValue::Number(42.0));
        assert_eq!(RawValue::from_text(".305"), RawValue::Number(0.305));
        assert_eq!(RawValue::from_text(""), RawValue::Missing);
        assert_eq!(RawValue::from_text("NaN"), RawValue::Missing);
        assert_eq!(RawValue::from_text("N/A"), RawValue::Missing);
        assert_eq!(RawValue::from_text("inf"), RawValue::Missing);
        assert_eq!(
            RawValue::from_text("José Pérez"),
            RawValue::Text("José Pérez".into())
        );
    }

    #[test]
    fn numeric_view_of_text() {
        assert_eq!(RawValue::Text("12".into()).as_number(), Some(12.0));
        assert_eq!(RawValue::Text("twelve".into()).as_number(), None);
        assert_eq!(RawValue::Missing.as_number(), None);
        assert_eq!(RawValue::Number(f64::NAN).as_number(), None);
        assert!(RawValue::Number(f64::NAN).is_missing());
    }

    #[test]
    fn row_lookup_defaults_to_missing() {
        let mut row = RawRow::new();
        row.insert("ab", RawValue::Number(400.0));
        assert_eq!(row.get(Some("ab")), &RawValue::Number(400.0));
        assert_eq!(row.get(Some("ip")), &RawValue::Missing);
        assert_eq!(row.get(None), &RawValue::Missing);
    }

    #[test]
    fn duplicate_header_keeps_first() {
        let mut row = RawRow::new();
        row.insert("h", RawValue::Number(1.0));
        row.insert("h", RawValue::Number(2.0));
        assert_eq!(row.len(), 1);
        assert_eq!(row.get(Some("h")), &RawValue::Number(1.0));
    }
}
