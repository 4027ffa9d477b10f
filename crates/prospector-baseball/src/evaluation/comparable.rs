// Nearest historical player by Euclidean distance over raw features.

use super::reference::{ReferenceDataset, ReferenceRecord};

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Closest reference record to `player`; the first one wins on ties.
pub fn nearest<'a>(player: &[f64], reference: &'a ReferenceDataset) -> Option<&'a ReferenceRecord> {
    let mut best: Option<(f64, &ReferenceRecord)> = None;
    for record in reference.records() {
        let d = squared_distance(player, &record.values);
        match best {
            Some((best_d, _)) if d >= best_d => {}
            _ => best = Some((d, record)),
        }
    }
    best.map(|(_, r)| r)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: &str, year: &str, values: Vec<f64>) -> ReferenceRecord {
        ReferenceRecord {
            name_first: first.into(),
            name_last: "Doe".into(),
            year_id: year.into(),
            values,
        }
    }

    fn dataset(records: Vec<ReferenceRecord>) -> ReferenceDataset {
        ReferenceDataset::new(vec!["X".into(), "Y".into()], records).unwrap()
    }

    #[test]
    fn picks_the_closest_record() {
        let ds = dataset(vec![
            record("Far", "1990", vec![10.0, 10.0]),
            record("Near", "2001", vec![1.0, 1.5]),
            record("Mid", "1995", vec![3.0, 3.0]),
        ]);
        let best = nearest(&[1.0, 1.0], &ds).unwrap();
        assert_eq!(best.label(), "Near Doe (2001)");
    }

    #[test]
    fn first_record_wins_ties() {
        let ds = dataset(vec![
            record("First", "2000", vec![1.0, 0.0]),
            record("Second", "2000", vec![-1.0, 0.0]),
        ]);
        assert_eq!(nearest(&[0.0, 0.0], &ds).unwrap().name_first, "First");
    }
}
