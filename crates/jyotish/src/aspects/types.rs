use serde::{Deserialize, Serialize};

use crate::graha::Graha;

pub const DEFAULT_ORB: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
}

impl AspectKind {
    /// Match order: the first kind within orb wins.
    pub const ORDER: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
    ];

    pub const fn exact_angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Opposition => 180.0,
            Self::Trine => 120.0,
            Self::Square => 90.0,
            Self::Sextile => 60.0,
        }
    }
}

/// Core aspect information for one pair of longitudes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    pub kind: AspectKind,
    /// Angular separation, the smaller arc (0-180)
    pub separation: f64,
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    #[serde(rename = "exactAngle")]
    pub exact_angle: f64,
    /// Deviation from the exact angle
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact)
    #[serde(rename = "isApplying")]
    pub is_applying: bool,
    /// Whether the aspect is exact (within 0.1 degrees)
    #[serde(rename = "isExact")]
    pub is_exact: bool,
    /// Whether either body is retrograde
    #[serde(rename = "isRetrograde")]
    pub is_retrograde: bool,
}

/// An aspect between two grahas; `from` precedes `to` in chart order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub from: Graha,
    pub to: Graha,
    #[serde(flatten)]
    pub aspect: AspectCore,
}

/// Orb per aspect kind, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectSettings {
    pub conjunction: f64,
    pub opposition: f64,
    pub trine: f64,
    pub square: f64,
    pub sextile: f64,
}

impl AspectSettings {
    pub fn orb_for(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Opposition => self.opposition,
            AspectKind::Trine => self.trine,
            AspectKind::Square => self.square,
            AspectKind::Sextile => self.sextile,
        }
    }
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            conjunction: DEFAULT_ORB,
            opposition: DEFAULT_ORB,
            trine: DEFAULT_ORB,
            square: DEFAULT_ORB,
            sextile: DEFAULT_ORB,
        }
    }
}
