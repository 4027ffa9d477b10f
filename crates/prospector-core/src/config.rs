// Configuration loading and parsing (engine.toml).

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "config/engine.toml";
const DEFAULT_FILE: &str = "defaults/engine.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("`{field}` {message}")]
    Invalid { field: String, message: String },

    #[error("cannot seed {path} from defaults/engine.toml: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub artifacts: ArtifactsConfig,
    pub input: InputConfig,
    pub evaluation: EvaluationConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// engine.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire engine.toml file.
#[derive(Debug, Clone, Deserialize)]
struct EngineFile {
    artifacts: ArtifactsConfig,
    #[serde(default)]
    input: InputConfig,
    #[serde(default)]
    evaluation: EvaluationConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

/// Where each position's scoring artifact and reference dataset live.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    pub batter: ArtifactSources,
    pub pitcher: ArtifactSources,
}

/// A model/reference pair. Each entry is a filesystem path or an
/// `http(s)://` URL.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactSources {
    pub model: String,
    pub reference: String,
}

/// Primary text encoding for delimited input. Latin-1 is always the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub encoding: TextEncoding,
    #[serde(default = "default_file_type")]
    pub default_file_type: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            encoding: TextEncoding::Utf8,
            default_file_type: default_file_type(),
        }
    }
}

fn default_file_type() -> String {
    "csv".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// Reject metric maps that lack a declared feature instead of zero-filling.
    #[serde(default)]
    pub strict: bool,
    #[serde(default = "default_true")]
    pub parallel_batch: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            strict: false,
            parallel_batch: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
            dir: default_log_dir(),
        }
    }
}

fn default_log_filter() -> String {
    "prospector=info,warn".into()
}

fn default_log_dir() -> String {
    "logs".into()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/engine.toml` under `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_config(&text, &path)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: EngineFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let config = Config {
        artifacts: file.artifacts,
        input: file.input,
        evaluation: file.evaluation,
        logging: file.logging,
    };
    validate(&config)?;
    Ok(config)
}

/// Seed `config/engine.toml` from `defaults/engine.toml` when it is absent.
///
/// Returns the path written, or `None` when there was nothing to do: the
/// config already exists or no default ships alongside it. An existing
/// config is never overwritten.
pub fn seed_engine_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join(CONFIG_FILE);
    let default = base_dir.join(DEFAULT_FILE);
    if target.exists() || !default.is_file() {
        return Ok(None);
    }
    let seed_err = |source: io::Error| ConfigError::Seed {
        path: target.clone(),
        source,
    };
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(seed_err)?;
    }
    std::fs::copy(&default, &target).map_err(seed_err)?;
    Ok(Some(target))
}

/// Load the config relative to the working directory, seeding it from the
/// shipped default on first run.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Read {
        path: PathBuf::from("."),
        source,
    })?;
    seed_engine_config(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let sources: &[(&str, &str)] = &[
        ("artifacts.batter.model", &config.artifacts.batter.model),
        ("artifacts.batter.reference", &config.artifacts.batter.reference),
        ("artifacts.pitcher.model", &config.artifacts.pitcher.model),
        ("artifacts.pitcher.reference", &config.artifacts.pitcher.reference),
    ];
    for (field, value) in sources {
        if value.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    let file_type = config.input.default_file_type.to_lowercase();
    if !matches!(file_type.as_str(), "csv" | "tsv" | "txt" | "xlsx" | "xlsm" | "xls" | "ods") {
        return Err(ConfigError::Invalid {
            field: "input.default_file_type".into(),
            message: format!("unsupported file type `{file_type}`"),
        });
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// The workspace root, which holds `defaults/engine.toml`.
    fn workspace_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        tmp
    }

    fn parse(text: &str) -> Result<Config, ConfigError> {
        parse_config(text, Path::new(CONFIG_FILE))
    }

    const MINIMAL: &str = r#"
[artifacts.batter]
model = "data/artifacts/batter_model.json"
reference = "data/artifacts/batter_reference.csv"

[artifacts.pitcher]
model = "https://example.org/pitcher_model.json"
reference = "https://example.org/pitcher_reference.csv"
"#;

    fn invalid_field(err: ConfigError) -> String {
        match err {
            ConfigError::Invalid { field, .. } => field,
            other => panic!("expected Invalid, got: {other}"),
        }
    }

    #[test]
    fn shipped_default_is_valid() {
        let text = fs::read_to_string(workspace_root().join(DEFAULT_FILE)).unwrap();
        let config = parse(&text).unwrap();

        assert_eq!(config.artifacts.batter.model, "data/artifacts/batter_model.json");
        assert_eq!(
            config.artifacts.pitcher.reference,
            "data/artifacts/pitcher_reference.csv"
        );
        assert_eq!(config.input.encoding, TextEncoding::Utf8);
        assert_eq!(config.input.default_file_type, "csv");
        assert!(!config.evaluation.strict);
        assert!(config.evaluation.parallel_batch);
        assert_eq!(config.logging.filter, "prospector=info,warn");
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(config.input.encoding, TextEncoding::Utf8);
        assert!(!config.evaluation.strict);
        assert!(config.evaluation.parallel_batch);
        assert_eq!(config.logging.dir, "logs");
    }

    #[test]
    fn latin1_encoding_aliases() {
        for alias in ["latin-1", "latin1", "iso-8859-1"] {
            let text = format!("{MINIMAL}\n[input]\nencoding = \"{alias}\"\n");
            assert_eq!(parse(&text).unwrap().input.encoding, TextEncoding::Latin1);
        }
    }

    #[test]
    fn rejects_empty_artifact_source() {
        let text = MINIMAL.replace("data/artifacts/batter_model.json", " ");
        assert_eq!(invalid_field(parse(&text).unwrap_err()), "artifacts.batter.model");
    }

    #[test]
    fn rejects_unsupported_default_file_type() {
        let text = format!("{MINIMAL}\n[input]\ndefault_file_type = \"parquet\"\n");
        assert_eq!(invalid_field(parse(&text).unwrap_err()), "input.default_file_type");
    }

    #[test]
    fn unknown_encoding_is_a_parse_error() {
        let text = format!("{MINIMAL}\n[input]\nencoding = \"utf-16\"\n");
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let tmp = scratch_dir("prospector_config_load");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(&err, ConfigError::Read { path, .. } if path.ends_with("engine.toml")));

        fs::write(tmp.join(CONFIG_FILE), "this is not valid [[[ toml").unwrap();
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(&err, ConfigError::Parse { path, .. } if path.ends_with("engine.toml")));

        fs::write(tmp.join(CONFIG_FILE), MINIMAL).unwrap();
        assert!(load_config_from(&tmp).is_ok());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seeding_writes_the_default_once() {
        let tmp = std::env::temp_dir().join(format!("prospector_config_seed_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join(DEFAULT_FILE), MINIMAL).unwrap();

        let written = seed_engine_config(&tmp).unwrap();
        assert_eq!(written, Some(tmp.join(CONFIG_FILE)));
        assert!(load_config_from(&tmp).is_ok());

        // A user-edited config survives a second run.
        fs::write(tmp.join(CONFIG_FILE), "# custom\n").unwrap();
        assert_eq!(seed_engine_config(&tmp).unwrap(), None);
        assert_eq!(fs::read_to_string(tmp.join(CONFIG_FILE)).unwrap(), "# custom\n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seeding_without_a_default_is_a_no_op() {
        let tmp = std::env::temp_dir().join(format!("prospector_config_nodefault_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        assert_eq!(seed_engine_config(&tmp).unwrap(), None);
        assert!(!tmp.join("config").exists());
        assert!(matches!(load_config_from(&tmp), Err(ConfigError::Read { .. })));
        let _ = fs::remove_dir_all(&tmp);
    }
}
