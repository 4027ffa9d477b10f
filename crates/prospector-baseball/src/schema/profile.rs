// Row -> PlayerProfile: identity fields plus derived metrics.

use prospector_core::{PlayerProfile, Position};

use super::aliases::keys;
use super::dates::normalize_birth_date;
use super::derive::derive_row;
use super::resolve::SchemaMapping;
use super::row::RawRow;

/// Build one canonical profile. Unresolved identity columns degrade to
/// empty/absent fields rather than failing the row.
pub fn profile_from_row(row: &RawRow, mapping: &SchemaMapping, position: Position) -> PlayerProfile {
    let first = row
        .get(mapping.column(keys::FIRST_NAME))
        .as_text()
        .unwrap_or_default();
    let last = row
        .get(mapping.column(keys::LAST_NAME))
        .as_text()
        .unwrap_or_default();
    let name = title_case(format!("{first} {last}").trim());

    let derivation = derive_row(row, mapping, position);

    PlayerProfile {
        name,
        birth_date: normalize_birth_date(row.get(mapping.column(keys::BIRTH_DATE))),
        weight: row.get(mapping.column(keys::WEIGHT)).to_scalar(),
        height: row.get(mapping.column(keys::HEIGHT)).to_scalar(),
        position,
        metrics: derivation.metrics,
        provenance: derivation.provenance,
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
