//! Types shared by the Vimshottari builder and lookup.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::zodiac::Nakshatra;

/// Hierarchical dasha levels, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    #[default]
    Pratyantardasha,
}

impl DashaLevel {
    /// Number of levels from the root down to and including this one.
    pub const fn depth(self) -> usize {
        match self {
            Self::Mahadasha => 1,
            Self::Antardasha => 2,
            Self::Pratyantardasha => 3,
        }
    }

    /// Level for a numeric depth, clamped to `1..=3`.
    pub const fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => Self::Mahadasha,
            2 => Self::Antardasha,
            _ => Self::Pratyantardasha,
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
        }
    }
}

/// How much of the first mahadasha had elapsed at birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaBalance {
    /// `(pada - 1) / 4`: whole padas only.
    #[default]
    Pada,
    /// The Moon's continuous progress through its nakshatra.
    Exact,
}

/// One node of the dasha tree. `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub planet: Graha,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "durationYears")]
    pub duration_years: f64,
    pub level: DashaLevel,
    #[serde(rename = "parentPlanet", skip_serializing_if = "Option::is_none")]
    pub parent: Option<Graha>,
    pub children: Vec<DashaPeriod>,
}

impl DashaPeriod {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The period without its subtree.
    pub fn summary(&self) -> PeriodSummary {
        PeriodSummary {
            planet: self.planet,
            level: self.level,
            start: self.start,
            end: self.end,
            duration_years: self.duration_years,
            parent: self.parent,
        }
    }
}

/// A dasha period detached from its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub planet: Graha,
    pub level: DashaLevel,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "durationYears")]
    pub duration_years: f64,
    #[serde(rename = "parentPlanet", skip_serializing_if = "Option::is_none")]
    pub parent: Option<Graha>,
}

/// The generated dasha tree plus the birth data it was anchored to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VimshottariTimeline {
    #[serde(rename = "birthDateTime")]
    pub birth: DateTime<Utc>,
    #[serde(rename = "moonNakshatra")]
    pub moon_nakshatra: Nakshatra,
    #[serde(rename = "moonPada")]
    pub moon_pada: u8,
    #[serde(rename = "startingPlanet")]
    pub starting_planet: Graha,
    /// Fraction of the first mahadasha already elapsed at birth.
    #[serde(rename = "elapsedFraction")]
    pub elapsed_fraction: f64,
    pub balance: DashaBalance,
    pub depth: DashaLevel,
    pub periods: Vec<DashaPeriod>,
}

/// The periods running at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentDasha {
    pub at: DateTime<Utc>,
    pub mahadasha: PeriodSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antardasha: Option<PeriodSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pratyantardasha: Option<PeriodSummary>,
    /// True when `at` fell outside some level and its first period was used.
    pub fallback: bool,
}
