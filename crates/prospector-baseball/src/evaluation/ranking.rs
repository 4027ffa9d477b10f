// Composite ranking: weighted average of per-feature percentiles.

use std::collections::BTreeMap;

use super::scoring::ScoringTable;

/// Weighted average of `percentiles` using the table's weights, truncated to
/// an integer and clamped to `[0, 100]`. Percentiles of metrics the table
/// does not weigh are ignored; weighted metrics without a percentile count
/// as 0.
pub fn composite_ranking(percentiles: &BTreeMap<String, u32>, table: &ScoringTable) -> u32 {
    let total_weight: f64 = table.weights.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 {
        return 0;
    }
    let weighted: f64 = table
        .weights
        .iter()
        .map(|(metric, w)| percentiles.get(*metric).copied().unwrap_or(0) as f64 * w)
        .sum();
    // The epsilon absorbs float drift so e.g. a flat 70 does not land on 69.
    let average = (weighted / total_weight + 1e-9).floor();
    average.clamp(0.0, 100.0) as u32
}
