// Derived sabermetric indicators with zero-guarded formulas.
//
// Each rate metric has an explicit fallback policy: `PreferSource` metrics
// pass a present, numeric source value through unchanged and are computed
// only when the source lacks them; `AlwaysDerive` metrics are recomputed
// from counting stats every time. The decision taken for each metric is
// recorded as a `MetricOrigin`.

use prospector_core::{MetricMap, MetricOrigin, Position};
use std::collections::BTreeMap;

use super::aliases::keys;
use super::resolve::SchemaMapping;
use super::row::RawRow;

// ---------------------------------------------------------------------------
// Fallback policy table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Use the source value when present and numeric, otherwise compute.
    PreferSource,
    /// Always compute from counting stats.
    AlwaysDerive,
}

#[derive(Debug, Clone, Copy)]
pub struct RateRule {
    pub key: &'static str,
    pub policy: FallbackPolicy,
}

const fn rule(key: &'static str, policy: FallbackPolicy) -> RateRule {
    RateRule { key, policy }
}

/// Batting rate metrics, in evaluation order (OPS reads settled OBP and SLG).
pub const BATTING_RULES: [RateRule; 8] = [
    rule(keys::AVG, FallbackPolicy::PreferSource),
    rule(keys::OBP, FallbackPolicy::PreferSource),
    rule(keys::SLG, FallbackPolicy::PreferSource),
    rule(keys::OPS, FallbackPolicy::PreferSource),
    rule(keys::K_PCT, FallbackPolicy::AlwaysDerive),
    rule(keys::BB_PER_K, FallbackPolicy::AlwaysDerive),
    rule(keys::FPCT, FallbackPolicy::PreferSource),
    rule(keys::RF, FallbackPolicy::AlwaysDerive),
];

pub const PITCHING_RULES: [RateRule; 7] = [
    rule(keys::ERA, FallbackPolicy::PreferSource),
    rule(keys::WHIP, FallbackPolicy::PreferSource),
    rule(keys::K_PER_9, FallbackPolicy::AlwaysDerive),
    rule(keys::BB_PER_9, FallbackPolicy::AlwaysDerive),
    rule(keys::K_PER_BB, FallbackPolicy::AlwaysDerive),
    rule(keys::FPCT, FallbackPolicy::PreferSource),
    rule(keys::RF, FallbackPolicy::AlwaysDerive),
];

/// Rules applied for a position; `unknown` derives nothing.
pub fn rules_for(position: Position) -> &'static [RateRule] {
    match position {
        Position::Batter => &BATTING_RULES,
        Position::Pitcher => &PITCHING_RULES,
        Position::Unknown => &[],
    }
}

/// Settle one metric against its policy.
pub fn settle(
    policy: FallbackPolicy,
    sourced: Option<f64>,
    derive: impl FnOnce() -> f64,
) -> (f64, MetricOrigin) {
    match (policy, sourced) {
        (FallbackPolicy::PreferSource, Some(v)) => (v, MetricOrigin::Sourced),
        _ => (derive(), MetricOrigin::Derived),
    }
}

/// `num / den`, or 0 when the denominator is not positive.
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Counting-stat lines
// ---------------------------------------------------------------------------

fn count(row: &RawRow, mapping: &SchemaMapping, key: &str, default: f64) -> f64 {
    row.get(mapping.column(key)).as_number().unwrap_or(default)
}

/// Putouts, assists, errors and games, shared by both positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldingLine {
    pub g: f64,
    pub po: f64,
    pub a: f64,
    pub e: f64,
}

impl FieldingLine {
    fn from_row(row: &RawRow, mapping: &SchemaMapping) -> Self {
        FieldingLine {
            // Games default to 1 so per-game rates stay defined.
            g: count(row, mapping, keys::G, 1.0),
            po: count(row, mapping, keys::PO, 0.0),
            a: count(row, mapping, keys::A, 0.0),
            e: count(row, mapping, keys::E, 0.0),
        }
    }

    pub fn fpct(&self) -> f64 {
        safe_div(self.po + self.a, self.po + self.a + self.e)
    }

    pub fn range_factor(&self) -> f64 {
        safe_div(self.po + self.a, self.g)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BattingLine {
    pub ab: f64,
    pub h: f64,
    pub doubles: f64,
    pub triples: f64,
    pub hr: f64,
    pub bb: f64,
    pub so: f64,
    pub hbp: f64,
    pub sf: f64,
    pub fielding: FieldingLine,
}

impl BattingLine {
    pub fn from_row(row: &RawRow, mapping: &SchemaMapping) -> Self {
        BattingLine {
            ab: count(row, mapping, keys::AB, 0.0),
            h: count(row, mapping, keys::H, 0.0),
            doubles: count(row, mapping, keys::DOUBLES, 0.0),
            triples: count(row, mapping, keys::TRIPLES, 0.0),
            hr: count(row, mapping, keys::HR, 0.0),
            bb: count(row, mapping, keys::BB, 0.0),
            so: count(row, mapping, keys::SO, 0.0),
            hbp: count(row, mapping, keys::HBP, 0.0),
            sf: count(row, mapping, keys::SF, 0.0),
            fielding: FieldingLine::from_row(row, mapping),
        }
    }

    pub fn singles(&self) -> f64 {
        self.h - self.doubles - self.triples - self.hr
    }

    pub fn total_bases(&self) -> f64 {
        self.singles() + 2.0 * self.doubles + 3.0 * self.triples + 4.0 * self.hr
    }

    pub fn avg(&self) -> f64 {
        safe_div(self.h, self.ab)
    }

    pub fn obp(&self) -> f64 {
        safe_div(
            self.h + self.bb + self.hbp,
            self.ab + self.bb + self.hbp + self.sf,
        )
    }

    pub fn slg(&self) -> f64 {
        safe_div(self.total_bases(), self.ab)
    }

    pub fn k_pct(&self) -> f64 {
        safe_div(self.so, self.ab) * 100.0
    }

    pub fn bb_per_k(&self) -> f64 {
        safe_div(self.bb, self.so)
    }

    /// Counting stats as stored on the profile.
    fn counts(&self) -> [(&'static str, f64); 13] {
        [
            (keys::G, self.fielding.g),
            (keys::AB, self.ab),
            (keys::H, self.h),
            (keys::DOUBLES, self.doubles),
            (keys::TRIPLES, self.triples),
            (keys::HR, self.hr),
            (keys::BB, self.bb),
            (keys::SO, self.so),
            (keys::HBP, self.hbp),
            (keys::SF, self.sf),
            (keys::PO, self.fielding.po),
            (keys::A, self.fielding.a),
            (keys::E, self.fielding.e),
        ]
    }

    fn rate(&self, key: &str, settled: &MetricMap) -> f64 {
        match key {
            keys::AVG => self.avg(),
            keys::OBP => self.obp(),
            keys::SLG => self.slg(),
            keys::OPS => {
                settled.get(keys::OBP).copied().unwrap_or_else(|| self.obp())
                    + settled.get(keys::SLG).copied().unwrap_or_else(|| self.slg())
            }
            keys::K_PCT => self.k_pct(),
            keys::BB_PER_K => self.bb_per_k(),
            keys::FPCT => self.fielding.fpct(),
            keys::RF => self.fielding.range_factor(),
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PitchingLine {
    pub er: f64,
    pub ip: f64,
    pub h: f64,
    pub bb: f64,
    pub so: f64,
    pub fielding: FieldingLine,
}

impl PitchingLine {
    pub fn from_row(row: &RawRow, mapping: &SchemaMapping) -> Self {
        PitchingLine {
            er: count(row, mapping, keys::ER, 0.0),
            ip: count(row, mapping, keys::IP, 0.0),
            h: count(row, mapping, keys::H, 0.0),
            bb: count(row, mapping, keys::BB, 0.0),
            so: count(row, mapping, keys::SO, 0.0),
            fielding: FieldingLine::from_row(row, mapping),
        }
    }

    pub fn era(&self) -> f64 {
        safe_div(9.0 * self.er, self.ip)
    }

    pub fn whip(&self) -> f64 {
        safe_div(self.bb + self.h, self.ip)
    }

    pub fn k_per_9(&self) -> f64 {
        safe_div(9.0 * self.so, self.ip)
    }

    pub fn bb_per_9(&self) -> f64 {
        safe_div(9.0 * self.bb, self.ip)
    }

    pub fn k_per_bb(&self) -> f64 {
        safe_div(self.so, self.bb)
    }

    fn counts(&self) -> [(&'static str, f64); 9] {
        [
            (keys::ER, self.er),
            (keys::IP, self.ip),
            (keys::H, self.h),
            (keys::BB, self.bb),
            (keys::SO, self.so),
            (keys::PO, self.fielding.po),
            (keys::A, self.fielding.a),
            (keys::E, self.fielding.e),
            (keys::G, self.fielding.g),
        ]
    }

    fn rate(&self, key: &str) -> f64 {
        match key {
            keys::ERA => self.era(),
            keys::WHIP => self.whip(),
            keys::K_PER_9 => self.k_per_9(),
            keys::BB_PER_9 => self.bb_per_9(),
            keys::K_PER_BB => self.k_per_bb(),
            keys::FPCT => self.fielding.fpct(),
            keys::RF => self.fielding.range_factor(),
            _ => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Row derivation
// ---------------------------------------------------------------------------

/// Metrics and provenance for one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derivation {
    pub metrics: MetricMap,
    pub provenance: BTreeMap<String, MetricOrigin>,
}

/// Compute counting stats and rate metrics for one row. Rows of an
/// `unknown` dataset carry no metrics.
pub fn derive_row(row: &RawRow, mapping: &SchemaMapping, position: Position) -> Derivation {
    let mut out = Derivation::default();
    match position {
        Position::Batter => {
            let line = BattingLine::from_row(row, mapping);
            for (key, value) in line.counts() {
                out.metrics.insert(key.to_string(), value);
            }
            for r in rules_for(position) {
                let sourced = row.get(mapping.column(r.key)).as_number();
                let (value, origin) = settle(r.policy, sourced, || line.rate(r.key, &out.metrics));
                out.record(r.key, value, origin);
            }
        }
        Position::Pitcher => {
            let line = PitchingLine::from_row(row, mapping);
            for (key, value) in line.counts() {
                out.metrics.insert(key.to_string(), value);
            }
            for r in rules_for(position) {
                let sourced = row.get(mapping.column(r.key)).as_number();
                let (value, origin) = settle(r.policy, sourced, || line.rate(r.key));
                out.record(r.key, value, origin);
            }
        }
        Position::Unknown => {}
    }
    out
}

impl Derivation {
    fn record(&mut self, key: &str, value: f64, origin: MetricOrigin) {
        self.metrics.insert(key.to_string(), value);
        self.provenance.insert(key.to_string(), origin);
    }
}
