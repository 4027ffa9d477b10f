// Batch evaluation over resolved player profiles.

use rayon::prelude::*;
use tracing::info;

use prospector_core::{PlayerProfile, Position};

use super::pipeline::{EvaluationError, ProspectEngine};
use super::report::{BatchEntry, BatchOutcome};

impl ProspectEngine {
    /// Evaluate every profile under `position`, returning one entry per
    /// profile in input order. A failing player becomes an error entry; it
    /// never aborts the batch.
    pub fn evaluate_batch(&self, profiles: &[PlayerProfile], position: Position) -> Vec<BatchEntry> {
        let entries: Vec<BatchEntry> = if self.options().parallel_batch {
            profiles
                .par_iter()
                .map(|p| self.batch_entry(p, position))
                .collect()
        } else {
            profiles
                .iter()
                .map(|p| self.batch_entry(p, position))
                .collect()
        };

        let failed = entries.iter().filter(|e| e.error().is_some()).count();
        info!(
            "batch evaluated: {} {} profiles, {} failed",
            entries.len(),
            position,
            failed
        );
        entries
    }

    /// Like [`evaluate_batch`](Self::evaluate_batch) with a free-form position tag.
    pub fn evaluate_batch_tag(
        &self,
        profiles: &[PlayerProfile],
        tag: &str,
    ) -> Result<Vec<BatchEntry>, EvaluationError> {
        let position: Position = tag.parse()?;
        Ok(self.evaluate_batch(profiles, position))
    }

    fn batch_entry(&self, profile: &PlayerProfile, position: Position) -> BatchEntry {
        let outcome = match self.evaluate(&profile.metrics, position) {
            Ok(report) => BatchOutcome::Report(Box::new(report)),
            Err(e) => BatchOutcome::Failed(e.to_error_body()),
        };
        BatchEntry {
            identity: profile.identity(),
            outcome,
        }
    }
}
