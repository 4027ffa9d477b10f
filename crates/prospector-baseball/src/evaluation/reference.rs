// Historical reference population for percentiles and comparables.

use std::collections::HashMap;
use std::io::Read;
use tracing::{info, warn};

use super::artifact::ArtifactError;

const NAME_FIRST: &str = "nameFirst";
const NAME_LAST: &str = "nameLast";
const YEAR_ID: &str = "yearID";

/// One historical player-season.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRecord {
    pub name_first: String,
    pub name_last: String,
    pub year_id: String,
    /// Feature values in the dataset's feature order.
    pub values: Vec<f64>,
}

impl ReferenceRecord {
    /// `"First Last (Year)"`.
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.name_first, self.name_last, self.year_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDataset {
    features: Vec<String>,
    records: Vec<ReferenceRecord>,
}

impl ReferenceDataset {
    /// Build directly from records; every record must carry one value per feature.
    pub fn new(features: Vec<String>, records: Vec<ReferenceRecord>) -> Result<Self, ArtifactError> {
        if records.is_empty() {
            return Err(ArtifactError::EmptyReference);
        }
        if let Some(bad) = records.iter().find(|r| r.values.len() != features.len()) {
            return Err(ArtifactError::Validation(format!(
                "reference record {} has {} values for {} features",
                bad.label(),
                bad.values.len(),
                features.len()
            )));
        }
        Ok(ReferenceDataset { features, records })
    }

    /// Read a CSV with identity columns plus every feature in `features`.
    /// Identity columns are optional; feature columns are required. Rows
    /// whose feature values do not parse as finite numbers are skipped.
    pub fn from_csv_reader<R: Read>(rdr: R, features: &[String]) -> Result<Self, ArtifactError> {
        let mut reader = csv::Reader::from_reader(rdr);
        let headers = reader.headers()?.clone();
        let index: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim(), i))
            .collect();

        let feature_cols = features
            .iter()
            .map(|f| {
                index
                    .get(f.as_str())
                    .copied()
                    .ok_or_else(|| ArtifactError::MissingColumn { column: f.clone() })
            })
            .collect::<Result<Vec<usize>, _>>()?;
        let first_col = index.get(NAME_FIRST).copied();
        let last_col = index.get(NAME_LAST).copied();
        let year_col = index.get(YEAR_ID).copied();

        let mut records = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!("skipping malformed reference row: {}", e);
                    continue;
                }
            };
            let values: Option<Vec<f64>> = feature_cols
                .iter()
                .map(|&c| {
                    record
                        .get(c)
                        .and_then(|v| v.trim().parse::<f64>().ok())
                        .filter(|v| v.is_finite())
                })
                .collect();
            let Some(values) = values else {
                warn!("skipping reference row {}: non-numeric feature value", line + 2);
                continue;
            };
            let text = |col: Option<usize>| {
                col.and_then(|c| record.get(c))
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default()
            };
            records.push(ReferenceRecord {
                name_first: text(first_col),
                name_last: text(last_col),
                year_id: text(year_col),
                values,
            });
        }

        let dataset = Self::new(features.to_vec(), records)?;
        info!(
            "reference dataset loaded: {} records, {} features",
            dataset.len(),
            dataset.features.len()
        );
        Ok(dataset)
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one feature column.
    pub fn column(&self, feature_idx: usize) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| r.values[feature_idx])
    }
}
