// Schema resolution and metric derivation.
//
// Headers are normalized, matched against the alias table once per dataset,
// and every row is then turned into a canonical `PlayerProfile`.

pub mod aliases;
pub mod dates;
pub mod derive;
pub mod header;
pub mod profile;
pub mod reader;
pub mod resolve;
pub mod row;

use prospector_core::PlayerProfile;
use tracing::debug;

use self::aliases::COLUMN_ALIASES;
use self::resolve::{ResolveOptions, SchemaMapping};
use self::row::RawTable;

/// Resolve a whole table into profiles. The alias mapping and the position
/// signature are decided once for the dataset and applied to every row.
pub fn resolve_table(table: &RawTable, options: &ResolveOptions) -> Vec<PlayerProfile> {
    let mapping = SchemaMapping::resolve(&COLUMN_ALIASES, &table.headers);
    let position = mapping.classify(options.position_hint);
    debug!(
        "resolved {} of {} canonical keys; dataset classified as {}",
        mapping.len(),
        COLUMN_ALIASES.len(),
        position
    );

    table
        .rows
        .iter()
        .map(|row| profile::profile_from_row(row, &mapping, position))
        .collect()
}
