// Command handlers behind the CLI. Each returns the JSON document to print,
// or a structured error body.

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use prospector_baseball::evaluation::pipeline::EvaluationError;
use prospector_baseball::{read_player_file, ErrorBody, ProspectEngine, ReadOptions};
use prospector_core::config::Config;
use prospector_core::{MetricMap, PlayerProfile, Position};

/// Read options for `path`: an explicit file type wins, then the extension,
/// then the configured default.
pub fn read_options(
    config: &Config,
    path: &Path,
    file_type: Option<&str>,
    position_hint: Option<Position>,
) -> ReadOptions {
    let file_type = match file_type {
        Some(ft) => Some(ft.to_string()),
        None if path.extension().is_none() => Some(config.input.default_file_type.clone()),
        None => None,
    };
    ReadOptions {
        file_type,
        encoding: config.input.encoding,
        position_hint,
    }
}

/// `prospector resolve`: canonical profiles for every row in a file.
pub fn resolve_file(
    config: &Config,
    path: &Path,
    file_type: Option<&str>,
    position_hint: Option<Position>,
) -> Result<Value, ErrorBody> {
    let options = read_options(config, path, file_type, position_hint);
    let profiles = read_player_file(path, &options).map_err(|e| e.to_error_body())?;
    Ok(json!({ "players": profiles }))
}

/// Keep at most `limit` profiles; returns the truncation warning if any
/// were dropped.
pub fn apply_quota(profiles: &mut Vec<PlayerProfile>, limit: Option<usize>) -> Option<String> {
    let total = profiles.len();
    let limit = limit?;
    if total <= limit {
        return None;
    }
    profiles.truncate(limit);
    Some(format!(
        "Quota reached: processed {limit} of {total} players. The remaining players were skipped."
    ))
}

/// `prospector evaluate-file`: batch reports for every player in a file.
pub fn evaluate_file(
    engine: &ProspectEngine,
    config: &Config,
    path: &Path,
    position: &str,
    file_type: Option<&str>,
    limit: Option<usize>,
) -> Result<Value, ErrorBody> {
    let position: Position = position
        .parse()
        .map_err(|e| EvaluationError::from(e).to_error_body())?;
    let options = read_options(config, path, file_type, Some(position));
    let mut profiles = read_player_file(path, &options).map_err(|e| e.to_error_body())?;

    let warning = apply_quota(&mut profiles, limit);
    if let Some(w) = &warning {
        warn!("{}", w);
    }

    let results = engine.evaluate_batch(&profiles, position);
    info!("evaluated {} players from {}", results.len(), path.display());

    let mut out = json!({ "results": results });
    if let Some(w) = warning {
        out["warning"] = Value::String(w);
    }
    Ok(out)
}

/// Parse a JSON object of metric values. Non-numeric entries are dropped
/// so they fall back to the engine's missing-metric handling.
pub fn parse_stats(stats: &str) -> Result<MetricMap, ErrorBody> {
    let raw: BTreeMap<String, Value> = serde_json::from_str(stats)
        .map_err(|e| ErrorBody::new("invalid_stats", format!("stats must be a JSON object: {e}")))?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| {
            let n = v
                .as_f64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()));
            n.map(|n| (k, n))
        })
        .collect())
}

/// `prospector evaluate`: one report for a metric map.
pub fn evaluate_stats(engine: &ProspectEngine, position: &str, stats: &str) -> Result<Value, ErrorBody> {
    let metrics = parse_stats(stats)?;
    let report = engine
        .evaluate_tag(&metrics, position)
        .map_err(|e| e.to_error_body())?;
    serde_json::to_value(report)
        .map_err(|e| ErrorBody::new("serialization_error", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospector_core::Scalar;

    fn profiles(n: usize) -> Vec<PlayerProfile> {
        (0..n)
            .map(|i| PlayerProfile {
                name: format!("P{i}"),
                birth_date: String::new(),
                weight: Some(Scalar::Number(80.0)),
                height: None,
                position: Position::Batter,
                metrics: MetricMap::new(),
                provenance: BTreeMap::new(),
            })
            .collect()
    }

    #[test]
    fn quota_truncates_and_warns() {
        let mut players = profiles(5);
        let warning = apply_quota(&mut players, Some(3)).unwrap();
        assert_eq!(players.len(), 3);
        assert_eq!(players[2].name, "P2");
        assert!(warning.contains("processed 3 of 5"));
    }

    #[test]
    fn quota_within_limit_is_silent() {
        let mut players = profiles(3);
        assert!(apply_quota(&mut players, Some(3)).is_none());
        assert!(apply_quota(&mut players, None).is_none());
        assert_eq!(players.len(), 3);
    }

    #[test]
    fn stats_parsing_keeps_numbers() {
        let metrics = parse_stats(r#"{"ERA": 2.5, "WHIP": "1.1", "team": "ATL"}"#).unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics["ERA"], 2.5);
        assert_eq!(metrics["WHIP"], 1.1);

        let err = parse_stats("[1, 2]").unwrap_err();
        assert_eq!(err.kind, "invalid_stats");
    }
}
