// Affine per-feature scalers.

use serde::Deserialize;

use super::artifact::ArtifactError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    /// `(x - mean) / scale`; a zero scale leaves the centered value as is.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`.
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl FeatureScaler {
    pub fn len(&self) -> usize {
        match self {
            FeatureScaler::Standard { mean, .. } => mean.len(),
            FeatureScaler::MinMax { min, .. } => min.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self, n_features: usize) -> Result<(), ArtifactError> {
        let (a, b) = match self {
            FeatureScaler::Standard { mean, scale } => (mean, scale),
            FeatureScaler::MinMax { min, scale } => (min, scale),
        };
        if a.len() != n_features || b.len() != n_features {
            return Err(ArtifactError::Validation(format!(
                "scaler has {}/{} parameters for {} features",
                a.len(),
                b.len(),
                n_features
            )));
        }
        if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
            return Err(ArtifactError::Validation(
                "scaler parameters must be finite".into(),
            ));
        }
        Ok(())
    }

    pub fn transform(&self, x: &[f64]) -> Vec<f64> {
        match self {
            FeatureScaler::Standard { mean, scale } => x
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(v, (m, s))| {
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (v - m) / s
                })
                .collect(),
            FeatureScaler::MinMax { min, scale } => x
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(v, (m, s))| v * s + m)
                .collect(),
        }
    }
}
