// Scoring artifacts: classifier + feature scaler + ordered feature names.

use serde::Deserialize;
use std::collections::HashSet;
use tracing::info;

use super::classifier::{Classifier, ProspectClassifier};
use super::scaler::FeatureScaler;
use super::scoring::ScoringTable;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to parse scoring artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("reference dataset CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("reference dataset is missing column `{column}`")]
    MissingColumn { column: String },

    #[error("reference dataset has no usable rows")]
    EmptyReference,

    #[error("artifact validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// ScoringArtifact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoringArtifact {
    /// Feature order expected by the scaler and the classifier.
    pub features: Vec<String>,
    pub scaler: FeatureScaler,
    pub classifier: Classifier,
}

impl ScoringArtifact {
    /// Parse and structurally validate a JSON artifact.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let artifact: ScoringArtifact = serde_json::from_slice(bytes)?;
        artifact.validate_structure()?;
        info!(
            "scoring artifact loaded: {} features",
            artifact.features.len()
        );
        Ok(artifact)
    }

    fn validate_structure(&self) -> Result<(), ArtifactError> {
        if self.features.is_empty() {
            return Err(ArtifactError::Validation("artifact declares no features".into()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.features.iter().find(|f| !seen.insert(f.as_str())) {
            return Err(ArtifactError::Validation(format!(
                "feature `{dup}` is declared twice"
            )));
        }
        let n = self.features.len();
        self.scaler.validate(n)?;
        self.classifier.validate(n)
    }

    /// Every weighted metric of the position's table must be a feature.
    pub fn validate_for(&self, table: &ScoringTable) -> Result<(), ArtifactError> {
        self.validate_structure()?;
        for (metric, _) in table.weights {
            if !self.features.iter().any(|f| f == metric) {
                return Err(ArtifactError::Validation(format!(
                    "{} artifact does not declare weighted feature `{metric}`",
                    table.position
                )));
            }
        }
        Ok(())
    }

    /// Scale a raw feature vector and classify it.
    pub fn score(&self, raw: &[f64]) -> (bool, f64) {
        self.classifier.classify(&self.scaler.transform(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::scoring::BATTING_TABLE;

    fn artifact_json(features: &[&str]) -> String {
        let n = features.len();
        serde_json::json!({
            "features": features,
            "scaler": {"kind": "standard", "mean": vec![0.0; n], "scale": vec![1.0; n]},
            "classifier": {"kind": "logistic", "coefficients": vec![1.0; n], "intercept": 0.0}
        })
        .to_string()
    }

    const BATTING: [&str; 8] = ["AVG", "OBP", "SLG", "OPS", "K%", "BB/K", "FPCT", "RF"];

    #[test]
    fn parses_and_scores() {
        let artifact = ScoringArtifact::from_json_slice(artifact_json(&BATTING).as_bytes()).unwrap();
        assert_eq!(artifact.features.len(), 8);
        assert!(artifact.validate_for(&BATTING_TABLE).is_ok());
        let (flag, p) = artifact.score(&[0.0; 8]);
        assert!(!flag);
        assert!((p - 0.5).abs() < 1e-12);
        let (flag, _) = artifact.score(&[1.0; 8]);
        assert!(flag);
        // Identity scaling: the artifact defers to its classifier.
        assert_eq!(artifact.score(&[0.5; 8]), artifact.classifier.classify(&[0.5; 8]));
    }

    #[test]
    fn rejects_missing_weighted_feature() {
        let artifact =
            ScoringArtifact::from_json_slice(artifact_json(&BATTING[..7]).as_bytes()).unwrap();
        let err = artifact.validate_for(&BATTING_TABLE).unwrap_err();
        assert!(err.to_string().contains("RF"));
    }

    #[test]
    fn rejects_duplicate_features() {
        let err = ScoringArtifact::from_json_slice(artifact_json(&["AVG", "AVG"]).as_bytes())
            .unwrap_err();
        assert!(matches!(err, ArtifactError::Validation(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ScoringArtifact::from_json_slice(b"{not json").unwrap_err();
        assert!(matches!(err, ArtifactError::Parse(_)));
    }
}
