// Single-player evaluation against the loaded per-position models.

use std::collections::BTreeMap;
use tracing::{debug, info};

use prospector_core::{MetricMap, Position, UnknownPositionTag};

use super::artifact::{ArtifactError, ScoringArtifact};
use super::comparable;
use super::percentile::percentile;
use super::ranking::composite_ranking;
use super::reference::ReferenceDataset;
use super::report::{EvaluationReport, MetricStanding};
use super::scoring::ScoringTable;
use super::summary::narrative;
use crate::error::ErrorBody;

const STRENGTH_PERCENTILE: u32 = 80;
const IMPROVEMENT_PERCENTILE: u32 = 20;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("unsupported position `{position}`; expected batter or pitcher")]
    UnsupportedPosition { position: Position },

    #[error(transparent)]
    UnknownPositionTag(#[from] UnknownPositionTag),

    #[error("no {position} model is loaded")]
    ModelNotLoaded { position: Position },

    #[error("missing required metric `{metric}`")]
    MissingMetric { metric: String },
}

impl EvaluationError {
    pub fn kind(&self) -> &'static str {
        match self {
            EvaluationError::UnsupportedPosition { .. } => "unsupported_position",
            EvaluationError::UnknownPositionTag(_) => "unsupported_position",
            EvaluationError::ModelNotLoaded { .. } => "model_not_loaded",
            EvaluationError::MissingMetric { .. } => "missing_metric",
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody::new(self.kind(), self.to_string())
    }
}

// ---------------------------------------------------------------------------
// Models and engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Reject metric maps that lack a declared feature instead of zero-filling.
    pub strict: bool,
    /// Spread batch evaluation across the rayon pool.
    pub parallel_batch: bool,
}

/// Everything needed to score one position: artifact, reference population
/// and the fixed weight table.
#[derive(Debug, Clone)]
pub struct PositionModel {
    position: Position,
    artifact: ScoringArtifact,
    reference: ReferenceDataset,
    table: &'static ScoringTable,
}

impl PositionModel {
    pub fn new(
        position: Position,
        artifact: ScoringArtifact,
        reference: ReferenceDataset,
    ) -> Result<Self, ArtifactError> {
        let table = ScoringTable::for_position(position).ok_or_else(|| {
            ArtifactError::Validation(format!("no scoring table for position `{position}`"))
        })?;
        artifact.validate_for(table)?;
        if reference.features() != artifact.features.as_slice() {
            return Err(ArtifactError::Validation(format!(
                "{position} reference features {:?} differ from artifact features {:?}",
                reference.features(),
                artifact.features
            )));
        }
        info!(
            "{} model ready: {} features, {} reference records",
            position,
            artifact.features.len(),
            reference.len()
        );
        Ok(PositionModel {
            position,
            artifact,
            reference,
            table,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn features(&self) -> &[String] {
        &self.artifact.features
    }

    pub fn reference(&self) -> &ReferenceDataset {
        &self.reference
    }
}

/// The evaluation engine. Immutable after construction; share it behind an
/// `Arc` for concurrent use.
#[derive(Debug, Clone, Default)]
pub struct ProspectEngine {
    options: EngineOptions,
    batter: Option<PositionModel>,
    pitcher: Option<PositionModel>,
}

impl ProspectEngine {
    pub fn new(options: EngineOptions) -> Self {
        ProspectEngine {
            options,
            batter: None,
            pitcher: None,
        }
    }

    /// Install a model, replacing any earlier one for the same position.
    pub fn with_model(mut self, model: PositionModel) -> Self {
        match model.position {
            Position::Batter => self.batter = Some(model),
            Position::Pitcher => self.pitcher = Some(model),
            Position::Unknown => {}
        }
        self
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn model(&self, position: Position) -> Option<&PositionModel> {
        match position {
            Position::Batter => self.batter.as_ref(),
            Position::Pitcher => self.pitcher.as_ref(),
            Position::Unknown => None,
        }
    }

    fn model_for(&self, position: Position) -> Result<&PositionModel, EvaluationError> {
        if position == Position::Unknown {
            return Err(EvaluationError::UnsupportedPosition { position });
        }
        self.model(position)
            .ok_or(EvaluationError::ModelNotLoaded { position })
    }

    /// Evaluate with a free-form position tag such as `"batter"`.
    pub fn evaluate_tag(
        &self,
        metrics: &MetricMap,
        tag: &str,
    ) -> Result<EvaluationReport, EvaluationError> {
        let position: Position = tag.parse()?;
        self.evaluate(metrics, position)
    }

    pub fn evaluate(
        &self,
        metrics: &MetricMap,
        position: Position,
    ) -> Result<EvaluationReport, EvaluationError> {
        let model = self.model_for(position)?;
        let raw = self.feature_vector(metrics, model.features())?;
        let (is_prospect, prospect_probability) = model.artifact.score(&raw);

        let mut percentiles = BTreeMap::new();
        let mut strengths = Vec::new();
        let mut improvement_areas = Vec::new();
        for (idx, (feature, &value)) in model.features().iter().zip(&raw).enumerate() {
            let pct = percentile(
                value,
                model.reference.column(idx),
                model.table.is_inverted(feature),
            );
            percentiles.insert(feature.clone(), pct);
            let standing = MetricStanding {
                metric: feature.clone(),
                value,
                percentile: pct,
            };
            if pct >= STRENGTH_PERCENTILE {
                strengths.push(standing);
            } else if pct <= IMPROVEMENT_PERCENTILE {
                improvement_areas.push(standing);
            }
        }

        let ranking = composite_ranking(&percentiles, model.table);
        let comparable_player = comparable::nearest(&raw, &model.reference)
            .map(|r| r.label())
            .unwrap_or_default();
        let summary = narrative(is_prospect, ranking, &improvement_areas);

        debug!(
            "{} evaluated: prospect={} p={:.3} ranking={}",
            position, is_prospect, prospect_probability, ranking
        );

        Ok(EvaluationReport {
            is_prospect,
            prospect_probability,
            ranking,
            strengths,
            improvement_areas,
            percentiles,
            comparable_player,
            summary,
            calculated_stats: model.features().iter().cloned().zip(raw).collect(),
        })
    }

    /// Declared features in order; absent or non-finite metrics are zero,
    /// or an error in strict mode.
    fn feature_vector(
        &self,
        metrics: &MetricMap,
        features: &[String],
    ) -> Result<Vec<f64>, EvaluationError> {
        features
            .iter()
            .map(|f| match metrics.get(f).copied().filter(|v| v.is_finite()) {
                Some(v) => Ok(v),
                None if self.options.strict => {
                    Err(EvaluationError::MissingMetric { metric: f.clone() })
                }
                None => Ok(0.0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::testing::*;

    fn engine() -> ProspectEngine {
        ProspectEngine::new(EngineOptions::default()).with_model(batting_model())
    }

    #[test]
    fn strong_player_is_a_prospect_with_full_strengths() {
        let report = engine().evaluate(&strong_bat(), Position::Batter).unwrap();
        assert!(report.is_prospect);
        assert!(report.prospect_probability > 0.5);
        assert_eq!(report.ranking, 100);
        assert_eq!(report.strengths.len(), 8);
        assert!(report.improvement_areas.is_empty());
        assert!(report.percentiles.values().all(|&p| p == 100));
        assert_eq!(report.comparable_player, "Eve Ellis (2004)");
        assert!(report.summary.contains("100%"));
    }

    #[test]
    fn weak_player_lists_improvement_areas_in_feature_order() {
        let report = engine().evaluate(&weak_bat(), Position::Batter).unwrap();
        assert!(!report.is_prospect);
        assert_eq!(report.ranking, 0);
        assert!(report.strengths.is_empty());
        let names: Vec<&str> = report
            .improvement_areas
            .iter()
            .map(|m| m.metric.as_str())
            .collect();
        assert_eq!(names, FEATURES.to_vec());
        assert_eq!(report.improvement_areas[4].value, 0.35);
        assert!(report.summary.contains("AVG, OBP, SLG, OPS, K%, BB/K, FPCT, RF"));
        assert_eq!(report.comparable_player, "Ann Avery (2000)");
    }

    #[test]
    fn middling_player_is_solid_but_underdeveloped() {
        let report = engine().evaluate(&middling_bat(), Position::Batter).unwrap();
        assert!(!report.is_prospect);
        // Ties with the third record count on neither side.
        assert!(report.percentiles.values().all(|&p| p == 40));
        assert_eq!(report.ranking, 40);
        assert!(report.strengths.is_empty());
        assert!(report.improvement_areas.is_empty());
        assert!(report.summary.contains("solid"));
        assert_eq!(report.comparable_player, "Cal Cruz (2002)");
    }

    #[test]
    fn missing_metrics_are_zero_filled() {
        let metrics = MetricMap::from([("OPS".to_string(), 0.97), ("AVG".to_string(), f64::NAN)]);
        let report = engine().evaluate(&metrics, Position::Batter).unwrap();
        assert!(report.is_prospect);
        assert_eq!(report.calculated_stats.len(), 8);
        assert_eq!(report.calculated_stats["AVG"], 0.0);
        assert_eq!(report.calculated_stats["OPS"], 0.97);
        // A zero K% beats everyone on an inverted metric.
        assert_eq!(report.percentiles["K%"], 100);
    }

    #[test]
    fn strict_mode_rejects_missing_metrics() {
        let engine = ProspectEngine::new(EngineOptions {
            strict: true,
            parallel_batch: false,
        })
        .with_model(batting_model());
        let mut metrics = strong_bat();
        metrics.remove("SLG");
        match engine.evaluate(&metrics, Position::Batter) {
            Err(EvaluationError::MissingMetric { metric }) => assert_eq!(metric, "SLG"),
            other => panic!("expected MissingMetric, got {other:?}"),
        }
        assert!(engine.evaluate(&strong_bat(), Position::Batter).is_ok());
    }

    #[test]
    fn unsupported_positions_are_structured_errors() {
        let engine = engine();
        let err = engine.evaluate(&strong_bat(), Position::Unknown).unwrap_err();
        assert_eq!(err.to_error_body().kind, "unsupported_position");

        let err = engine.evaluate_tag(&strong_bat(), "catcher").unwrap_err();
        assert!(matches!(err, EvaluationError::UnknownPositionTag(_)));

        let err = engine.evaluate(&strong_bat(), Position::Pitcher).unwrap_err();
        assert_eq!(err.kind(), "model_not_loaded");

        assert!(engine.evaluate_tag(&strong_bat(), "Batter").is_ok());
    }

    #[test]
    fn model_rejects_mismatched_reference() {
        let mut artifact = batting_artifact();
        artifact.features.swap(0, 1);
        let err = PositionModel::new(Position::Batter, artifact, batting_reference()).unwrap_err();
        assert!(matches!(err, ArtifactError::Validation(_)));

        let err = PositionModel::new(Position::Pitcher, batting_artifact(), batting_reference())
            .unwrap_err();
        assert!(err.to_string().contains("ERA"));

        assert!(
            PositionModel::new(Position::Unknown, batting_artifact(), batting_reference()).is_err()
        );
    }
}
