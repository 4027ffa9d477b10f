// Small synthetic batting model shared by the pipeline and batch tests.

use super::artifact::ScoringArtifact;
use super::classifier::{Classifier, LogisticModel};
use super::pipeline::PositionModel;
use super::reference::{ReferenceDataset, ReferenceRecord};
use super::scaler::FeatureScaler;
use prospector_core::{MetricMap, Position};

pub const FEATURES: [&str; 8] = ["AVG", "OBP", "SLG", "OPS", "K%", "BB/K", "FPCT", "RF"];

/// Prospect iff `10 * OPS - 8 > 0`, i.e. OPS above .800.
pub fn batting_artifact() -> ScoringArtifact {
    let mut coefficients = vec![0.0; 8];
    coefficients[3] = 10.0;
    ScoringArtifact {
        features: FEATURES.iter().map(|s| s.to_string()).collect(),
        scaler: FeatureScaler::Standard {
            mean: vec![0.0; 8],
            scale: vec![1.0; 8],
        },
        classifier: Classifier::Logistic(LogisticModel {
            coefficients,
            intercept: -8.0,
        }),
    }
}

pub fn batting_reference() -> ReferenceDataset {
    let rows: [(&str, &str, &str, [f64; 8]); 5] = [
        ("Ann", "Avery", "2000", [0.200, 0.250, 0.300, 0.550, 0.30, 0.2, 0.950, 1.0]),
        ("Bob", "Baker", "2001", [0.250, 0.300, 0.400, 0.700, 0.25, 0.3, 0.960, 2.0]),
        ("Cal", "Cruz", "2002", [0.270, 0.340, 0.450, 0.790, 0.20, 0.5, 0.970, 3.0]),
        ("Dan", "Diaz", "2003", [0.290, 0.370, 0.500, 0.870, 0.15, 0.7, 0.980, 4.0]),
        ("Eve", "Ellis", "2004", [0.310, 0.400, 0.550, 0.950, 0.10, 0.9, 0.990, 5.0]),
    ];
    let records = rows
        .iter()
        .map(|(first, last, year, values)| ReferenceRecord {
            name_first: first.to_string(),
            name_last: last.to_string(),
            year_id: year.to_string(),
            values: values.to_vec(),
        })
        .collect();
    ReferenceDataset::new(FEATURES.iter().map(|s| s.to_string()).collect(), records).unwrap()
}

pub fn batting_model() -> PositionModel {
    PositionModel::new(Position::Batter, batting_artifact(), batting_reference()).unwrap()
}

pub fn metrics(values: [f64; 8]) -> MetricMap {
    FEATURES
        .iter()
        .zip(values)
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub fn strong_bat() -> MetricMap {
    metrics([0.320, 0.410, 0.560, 0.970, 0.08, 1.0, 0.995, 6.0])
}

pub fn weak_bat() -> MetricMap {
    metrics([0.190, 0.240, 0.290, 0.530, 0.35, 0.1, 0.940, 0.5])
}

/// Identical to the third reference record.
pub fn middling_bat() -> MetricMap {
    metrics([0.270, 0.340, 0.450, 0.790, 0.20, 0.5, 0.970, 3.0])
}
