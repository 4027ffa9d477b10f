// Artifact sources: local files or http(s) blobs, fetched once at startup.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch artifact {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("artifact {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Where one artifact lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    Path(PathBuf),
    Url(String),
}

impl ArtifactSource {
    /// Interpret a configured source. Relative paths are resolved against
    /// `base_dir`.
    pub fn parse(raw: &str, base_dir: &Path) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return ArtifactSource::Url(raw.to_string());
        }
        let path = Path::new(raw);
        if path.is_absolute() {
            ArtifactSource::Path(path.to_path_buf())
        } else {
            ArtifactSource::Path(base_dir.join(path))
        }
    }

    pub async fn fetch_bytes(&self, http: &reqwest::Client) -> Result<Vec<u8>, FetchError> {
        let bytes = match self {
            ArtifactSource::Path(path) => {
                tokio::fs::read(path).await.map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?
            }
            ArtifactSource::Url(url) => {
                let http_error = |source| FetchError::Http {
                    url: url.clone(),
                    source,
                };
                let response = http.get(url).send().await.map_err(http_error)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        url: url.clone(),
                        status,
                    });
                }
                response.bytes().await.map_err(http_error)?.to_vec()
            }
        };
        info!("fetched {} bytes from {}", bytes.len(), self);
        Ok(bytes)
    }
}

impl std::fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactSource::Path(p) => write!(f, "{}", p.display()),
            ArtifactSource::Url(u) => f.write_str(u),
        }
    }
}
