//! Ayanamsa: offset between the tropical and sidereal zodiacs.
//!
//! Each system is pinned by its value at J2000.0 and advanced with the
//! general precession in longitude.

use serde::{Deserialize, Serialize};

use crate::time::centuries_since_j2000;

/// General precession in longitude, arcseconds per Julian century.
const PRECESSION_ARCSEC_PER_CENTURY: f64 = 5028.796_195;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    /// Chitrapaksha: Spica at 0° Libra. Indian national standard.
    #[default]
    Lahiri,
    Raman,
    Krishnamurti,
    FaganBradley,
}

impl Ayanamsa {
    /// Ayanamsa at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Self::Lahiri => 23.853,
            Self::Raman => 22.370,
            Self::Krishnamurti => 23.850,
            Self::FaganBradley => 24.736,
        }
    }

    /// Ayanamsa in degrees at a Julian Day.
    pub fn degrees_at(self, jd: f64) -> f64 {
        let t = centuries_since_j2000(jd);
        self.reference_j2000_deg() + PRECESSION_ARCSEC_PER_CENTURY * t / 3600.0
    }
}

/// Which zodiac longitudes are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    Tropical,
    #[default]
    Sidereal,
}
