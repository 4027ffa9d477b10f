// Alias resolution and dataset position classification.

use prospector_core::Position;
use std::collections::BTreeMap;

use super::aliases::{keys, ColumnAliasTable};
use super::header::normalize_header;

/// Caller-supplied hints for resolving a dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Used only when a dataset exposes both the batting and the pitching
    /// signature; otherwise such datasets are classified `unknown`.
    pub position_hint: Option<Position>,
}

/// Per-dataset decision of which input column backs each canonical key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMapping {
    columns: BTreeMap<&'static str, String>,
}

impl SchemaMapping {
    /// For every canonical key, pick the first alias (in declared order)
    /// whose normalized form is one of the normalized `headers`.
    pub fn resolve(table: &ColumnAliasTable, headers: &[String]) -> Self {
        let mut columns = BTreeMap::new();
        for entry in table.entries() {
            let found = entry
                .aliases
                .iter()
                .map(|alias| normalize_header(alias))
                .find(|alias| headers.iter().any(|h| h == alias));
            if let Some(column) = found {
                columns.insert(entry.key, column);
            }
        }
        SchemaMapping { columns }
    }

    pub fn column(&self, key: &str) -> Option<&str> {
        self.columns.get(key).map(String::as_str)
    }

    pub fn is_resolved(&self, key: &str) -> bool {
        self.columns.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.columns.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Batting if AB resolves without IP, pitching if IP resolves without AB.
    /// A dataset with both signatures takes the caller's hint when it names
    /// a concrete position; every other case is `unknown`.
    pub fn classify(&self, hint: Option<Position>) -> Position {
        let batting = self.is_resolved(keys::AB);
        let pitching = self.is_resolved(keys::IP);
        match (batting, pitching) {
            (true, false) => Position::Batter,
            (false, true) => Position::Pitcher,
            (true, true) => match hint {
                Some(p @ (Position::Batter | Position::Pitcher)) => p,
                _ => Position::Unknown,
            },
            (false, false) => Position::Unknown,
        }
    }
}
