// Evaluation report shapes, as handed back to callers.
//
// Floats are written through `finite_or_null` so a report is always valid
// JSON; dates are already ISO strings on the profile.

use prospector_core::{MetricMap, PlayerIdentity};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::ErrorBody;

fn finite_or_null<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    if v.is_finite() {
        s.serialize_f64(*v)
    } else {
        s.serialize_none()
    }
}

fn finite_map<S: Serializer>(map: &MetricMap, s: S) -> Result<S::Ok, S::Error> {
    s.collect_map(
        map.iter()
            .map(|(k, v)| (k, if v.is_finite() { Some(*v) } else { None })),
    )
}

/// One metric's value and percentile standing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStanding {
    pub metric: String,
    #[serde(serialize_with = "finite_or_null")]
    pub value: f64,
    pub percentile: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub is_prospect: bool,
    #[serde(serialize_with = "finite_or_null")]
    pub prospect_probability: f64,
    /// Composite ranking in `[0, 100]`.
    pub ranking: u32,
    /// Features at or above the 80th percentile.
    pub strengths: Vec<MetricStanding>,
    /// Features at or below the 20th percentile.
    pub improvement_areas: Vec<MetricStanding>,
    pub percentiles: BTreeMap<String, u32>,
    /// `"First Last (Year)"` of the nearest reference record.
    pub comparable_player: String,
    pub summary: String,
    /// The feature vector actually scored, zero-filled, keyed by feature.
    #[serde(serialize_with = "finite_map")]
    pub calculated_stats: MetricMap,
}

// ---- batch ----

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Report(Box<EvaluationReport>),
    Failed(ErrorBody),
}

/// A batch result: the player's identity plus either a report or an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    #[serde(flatten)]
    pub identity: PlayerIdentity,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    pub fn report(&self) -> Option<&EvaluationReport> {
        match &self.outcome {
            BatchOutcome::Report(r) => Some(r),
            BatchOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match &self.outcome {
            BatchOutcome::Report(_) => None,
            BatchOutcome::Failed(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospector_core::Scalar;

    fn report() -> EvaluationReport {
        EvaluationReport {
            is_prospect: false,
            prospect_probability: f64::NAN,
            ranking: 12,
            strengths: vec![],
            improvement_areas: vec![MetricStanding {
                metric: "ERA".into(),
                value: f64::INFINITY,
                percentile: 3,
            }],
            percentiles: BTreeMap::from([("ERA".to_string(), 3)]),
            comparable_player: "Greg Maddux (1995)".into(),
            summary: "x".into(),
            calculated_stats: MetricMap::from([("ERA".to_string(), f64::NAN), ("WHIP".to_string(), 1.2)]),
        }
    }

    fn identity() -> PlayerIdentity {
        PlayerIdentity {
            name: "Juan Soto".into(),
            birth_date: "1998-10-25".into(),
            weight: Some(Scalar::Number(224.0)),
            height: None,
        }
    }

    #[test]
    fn non_finite_floats_become_null() {
        let v = serde_json::to_value(report()).unwrap();
        assert!(v["prospect_probability"].is_null());
        assert!(v["improvement_areas"][0]["value"].is_null());
        assert!(v["calculated_stats"]["ERA"].is_null());
        assert_eq!(v["calculated_stats"]["WHIP"], 1.2);
    }

    #[test]
    fn batch_entry_flattens_identity_and_report() {
        let entry = BatchEntry {
            identity: identity(),
            outcome: BatchOutcome::Report(Box::new(report())),
        };
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["player"], "Juan Soto");
        assert_eq!(v["birth_date"], "1998-10-25");
        assert_eq!(v["weight"], 224.0);
        assert!(v["height"].is_null());
        assert_eq!(v["ranking"], 12);
        assert!(entry.error().is_none());
    }

    #[test]
    fn batch_entry_flattens_errors() {
        let entry = BatchEntry {
            identity: identity(),
            outcome: BatchOutcome::Failed(ErrorBody::new("missing_metric", "missing OBP")),
        };
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["player"], "Juan Soto");
        assert_eq!(v["kind"], "missing_metric");
        assert_eq!(v["error"], "missing OBP");
        assert!(v.get("ranking").is_none());
        assert!(entry.report().is_none());
    }
}
