// Evaluation pipeline: classification, percentiles, composite ranking,
// comparable-player lookup and narrative summary.

pub mod artifact;
pub mod batch;
pub mod classifier;
pub mod comparable;
pub mod percentile;
pub mod pipeline;
pub mod ranking;
pub mod reference;
pub mod report;
pub mod scaler;
pub mod scoring;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;
