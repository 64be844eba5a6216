use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::graha::Graha;

/// Errors that can occur while obtaining raw positions.
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed {
        body: Graha,
        jd: f64,
        message: String,
    },
    #[error("Swiss Ephemeris fell back from its data files for {body} at JD {jd} (flags {flags:#x})")]
    Degraded { body: Graha, jd: f64, flags: i32 },
    #[error("Provider returned no position for {body}")]
    MissingBody { body: Graha },
    #[error("Provider {provider} is unavailable: {message}")]
    Unavailable { provider: String, message: String },
}

/// Raw ephemeris output for one body, before any classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    /// Ecliptic longitude in degrees (tropical)
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

/// Raw positions keyed by body, in chart order.
pub type RawPositions = BTreeMap<Graha, RawPosition>;

/// Which lunar node Rahu is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Mean,
    True,
}

/// Explicit ephemeris configuration, handed to a provider at construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisConfig {
    /// Directory holding the Swiss Ephemeris `.se1` files.
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then `/usr/local/share/swisseph`.
    pub path: Option<PathBuf>,
    pub node: NodeType,
}

impl EphemerisConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// The data directory this configuration points at.
    pub fn resolve_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        })
    }
}
