// Shared building blocks for the prospect evaluation engine: configuration
// and the canonical player entities passed between resolver and pipeline.

pub mod config;
pub mod profile;

pub use profile::{
    MetricMap, MetricOrigin, PlayerIdentity, PlayerProfile, Position, Scalar, UnknownPositionTag,
};
