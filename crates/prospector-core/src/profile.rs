// Canonical player entities.
//
// A `PlayerProfile` is produced once per input row by the schema resolver and
// consumed read-only by the evaluation pipeline.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Canonical metric key -> numeric value.
pub type MetricMap = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Which statistical signature a dataset exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Batter,
    Pitcher,
    Unknown,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Batter => "batter",
            Position::Pitcher => "pitcher",
            Position::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized position tag `{0}`")]
pub struct UnknownPositionTag(pub String);

impl FromStr for Position {
    type Err = UnknownPositionTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batter" | "hitter" => Ok(Position::Batter),
            "pitcher" => Ok(Position::Pitcher),
            "unknown" => Ok(Position::Unknown),
            _ => Err(UnknownPositionTag(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Metric provenance
// ---------------------------------------------------------------------------

/// Whether a rate metric was taken from the source file or computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricOrigin {
    Sourced,
    Derived,
}

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// A raw identity value (weight, height) carried through untouched.
///
/// Serializes non-finite numbers as `null` so reports stay valid JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Scalar::Number(_) => serializer.serialize_none(),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerProfile
// ---------------------------------------------------------------------------

/// One canonical player record: identity, position tag, and metrics
/// (raw counting stats plus derived rate stats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub birth_date: String,
    pub weight: Option<Scalar>,
    pub height: Option<Scalar>,
    pub position: Position,
    pub metrics: MetricMap,
    /// Origin of each rate metric the deriver produced.
    #[serde(default)]
    pub provenance: BTreeMap<String, MetricOrigin>,
}

impl PlayerProfile {
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }

    pub fn identity(&self) -> PlayerIdentity {
        PlayerIdentity {
            name: self.name.clone(),
            birth_date: self.birth_date.clone(),
            weight: self.weight.clone(),
            height: self.height.clone(),
        }
    }
}

/// Identity fields attached to every batch report entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerIdentity {
    #[serde(rename = "player")]
    pub name: String,
    pub birth_date: String,
    pub weight: Option<Scalar>,
    pub height: Option<Scalar>,
}
