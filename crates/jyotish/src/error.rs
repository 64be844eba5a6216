use crate::ephemeris::EphemerisError;
use crate::houses::HouseSystem;
use std::path::PathBuf;
use thiserror::Error;

/// A malformed input field, reported before any computation starts.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that abort a chart computation. No partial chart is ever returned.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("ephemeris unavailable: {0}")]
    Provider(#[from] EphemerisError),
    #[error("house system {system} is not implemented; only whole_sign is supported")]
    UnsupportedHouseSystem { system: HouseSystem },
}

/// Errors raised while loading chart settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}
