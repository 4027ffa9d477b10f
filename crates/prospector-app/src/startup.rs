// One-time, fail-fast engine construction from configured artifacts.

use anyhow::Context;
use std::path::Path;
use tracing::info;

use prospector_baseball::evaluation::artifact::ScoringArtifact;
use prospector_baseball::evaluation::reference::ReferenceDataset;
use prospector_baseball::{EngineOptions, PositionModel, ProspectEngine};
use prospector_core::config::{ArtifactSources, Config};
use prospector_core::Position;

use crate::artifacts::ArtifactSource;

pub fn engine_options(config: &Config) -> EngineOptions {
    EngineOptions {
        strict: config.evaluation.strict,
        parallel_batch: config.evaluation.parallel_batch,
    }
}

/// Fetch and validate both positions' artifacts. Any failure aborts; there
/// is no partially loaded engine.
pub async fn load_engine(config: &Config, base_dir: &Path) -> anyhow::Result<ProspectEngine> {
    let http = reqwest::Client::new();
    let (batter, pitcher) = tokio::try_join!(
        load_position(&http, Position::Batter, &config.artifacts.batter, base_dir),
        load_position(&http, Position::Pitcher, &config.artifacts.pitcher, base_dir),
    )?;
    info!("engine ready (strict={})", config.evaluation.strict);
    Ok(ProspectEngine::new(engine_options(config))
        .with_model(batter)
        .with_model(pitcher))
}

async fn load_position(
    http: &reqwest::Client,
    position: Position,
    sources: &ArtifactSources,
    base_dir: &Path,
) -> anyhow::Result<PositionModel> {
    let model_src = ArtifactSource::parse(&sources.model, base_dir);
    let reference_src = ArtifactSource::parse(&sources.reference, base_dir);

    let (model_bytes, reference_bytes) =
        tokio::try_join!(model_src.fetch_bytes(http), reference_src.fetch_bytes(http))
            .with_context(|| format!("failed to fetch {position} artifacts"))?;

    let artifact = ScoringArtifact::from_json_slice(&model_bytes)
        .with_context(|| format!("invalid {position} scoring artifact {model_src}"))?;
    let reference = ReferenceDataset::from_csv_reader(reference_bytes.as_slice(), &artifact.features)
        .with_context(|| format!("invalid {position} reference dataset {reference_src}"))?;

    PositionModel::new(position, artifact, reference)
        .with_context(|| format!("{position} artifacts are inconsistent"))
}
