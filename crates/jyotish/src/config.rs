//! Chart settings, loadable from TOML.
//!
//! ```toml
//! zodiac = "sidereal"
//! ayanamsa = "lahiri"
//! house_system = "whole_sign"
//! vargas = ["d9", "d10"]
//! cache = true
//!
//! [ephemeris]
//! path = "/usr/local/share/swisseph"
//! node = "true"
//!
//! [aspects]
//! conjunction = 10.0
//!
//! [dasha]
//! depth = 3
//! balance = "exact"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::aspects::AspectSettings;
use crate::ayanamsa::{Ayanamsa, Zodiac};
use crate::dasha::{DashaBalance, DashaLevel, MAX_DASHA_DEPTH};
use crate::ephemeris::EphemerisConfig;
use crate::error::ConfigError;
use crate::houses::HouseSystem;
use crate::vargas::Varga;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub ephemeris: EphemerisConfig,
    pub zodiac: Zodiac,
    pub ayanamsa: Ayanamsa,
    pub house_system: HouseSystem,
    pub aspects: AspectSettings,
    pub dasha: DashaSettings,
    pub vargas: Vec<Varga>,
    /// Keep computed charts in memory, keyed by birth event.
    pub cache: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            ephemeris: EphemerisConfig::default(),
            zodiac: Zodiac::default(),
            ayanamsa: Ayanamsa::default(),
            house_system: HouseSystem::default(),
            aspects: AspectSettings::default(),
            dasha: DashaSettings::default(),
            vargas: vec![Varga::D9],
            cache: false,
        }
    }
}

impl ChartSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        log::debug!("loaded chart settings from {}", path.display());
        Ok(settings)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashaSettings {
    /// Levels to generate, 1 to 3. Larger values are clamped.
    pub depth: usize,
    pub balance: DashaBalance,
}

impl DashaSettings {
    pub fn level(&self) -> DashaLevel {
        if self.depth > MAX_DASHA_DEPTH {
            log::warn!(
                "dasha depth {} exceeds {}; clamping",
                self.depth,
                MAX_DASHA_DEPTH
            );
        }
        DashaLevel::from_depth(self.depth)
    }
}

impl Default for DashaSettings {
    fn default() -> Self {
        Self {
            depth: MAX_DASHA_DEPTH,
            balance: DashaBalance::default(),
        }
    }
}
