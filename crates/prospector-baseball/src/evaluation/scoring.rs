// Fixed per-position scoring tables: composite-ranking weights and the
// lower-is-better metrics.

use prospector_core::Position;

use crate::schema::aliases::keys;

#[derive(Debug)]
pub struct ScoringTable {
    pub position: Position,
    /// Composite-ranking weights; they sum to 1.0.
    pub weights: &'static [(&'static str, f64)],
    /// Metrics where a lower value ranks higher.
    pub inverted: &'static [&'static str],
}

pub static BATTING_TABLE: ScoringTable = ScoringTable {
    position: Position::Batter,
    weights: &[
        (keys::AVG, 0.15),
        (keys::OBP, 0.20),
        (keys::SLG, 0.15),
        (keys::OPS, 0.25),
        (keys::K_PCT, 0.10),
        (keys::BB_PER_K, 0.05),
        (keys::FPCT, 0.05),
        (keys::RF, 0.05),
    ],
    inverted: &[keys::K_PCT],
};

pub static PITCHING_TABLE: ScoringTable = ScoringTable {
    position: Position::Pitcher,
    weights: &[
        (keys::ERA, 0.20),
        (keys::WHIP, 0.25),
        (keys::K_PER_9, 0.20),
        (keys::BB_PER_9, 0.15),
        (keys::K_PER_BB, 0.15),
        (keys::FPCT, 0.025),
        (keys::RF, 0.025),
    ],
    inverted: &[keys::ERA, keys::WHIP, keys::BB_PER_9],
};

impl ScoringTable {
    pub fn for_position(position: Position) -> Option<&'static ScoringTable> {
        match position {
            Position::Batter => Some(&BATTING_TABLE),
            Position::Pitcher => Some(&PITCHING_TABLE),
            Position::Unknown => None,
        }
    }

    pub fn is_inverted(&self, metric: &str) -> bool {
        self.inverted.contains(&metric)
    }

    /// Weight for a metric; metrics outside the table weigh nothing.
    pub fn weight(&self, metric: &str) -> f64 {
        self.weights
            .iter()
            .find(|(k, _)| *k == metric)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        for table in [&BATTING_TABLE, &PITCHING_TABLE] {
            let total: f64 = table.weights.iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-9, "{:?} sums to {total}", table.position);
        }
    }

    #[test]
    fn inverted_metrics() {
        assert!(BATTING_TABLE.is_inverted("K%"));
        assert!(!BATTING_TABLE.is_inverted("AVG"));
        assert!(PITCHING_TABLE.is_inverted("BB/9"));
        assert!(!PITCHING_TABLE.is_inverted("K/9"));
    }

    #[test]
    fn lookup_by_position() {
        assert_eq!(
            ScoringTable::for_position(Position::Pitcher).unwrap().position,
            Position::Pitcher
        );
        assert!(ScoringTable::for_position(Position::Unknown).is_none());
        assert_eq!(BATTING_TABLE.weight("OPS"), 0.25);
        assert_eq!(BATTING_TABLE.weight("ERA"), 0.0);
    }
}
