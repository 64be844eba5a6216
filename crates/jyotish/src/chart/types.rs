use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aspects::Aspect;
use crate::ayanamsa::{Ayanamsa, Zodiac};
use crate::birth::BirthEvent;
use crate::dasha::{CurrentDasha, VimshottariTimeline};
use crate::graha::Graha;
use crate::houses::{House, HouseSystem};
use crate::positions::{AscendantPosition, PlanetPosition};
use crate::vargas::VargaChart;

/// Ayanamsa system and the value applied to this chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AyanamsaValue {
    pub system: Ayanamsa,
    pub degrees: f64,
}

/// A fully computed birth chart. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub birth: BirthEvent,
    #[serde(rename = "birthUtc")]
    pub birth_utc: DateTime<Utc>,
    #[serde(rename = "julianDay")]
    pub julian_day: f64,
    pub provider: String,
    pub zodiac: Zodiac,
    /// `None` for tropical charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayanamsa: Option<AyanamsaValue>,
    #[serde(rename = "houseSystem")]
    pub house_system: HouseSystem,
    pub planets: Vec<PlanetPosition>,
    pub ascendant: AscendantPosition,
    pub houses: Vec<House>,
    pub aspects: Vec<Aspect>,
    pub dasha: VimshottariTimeline,
    pub vargas: Vec<VargaChart>,
}

impl Chart {
    pub fn planet(&self, graha: Graha) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.graha == graha)
    }

    /// House number (1-12) holding `graha`.
    pub fn house_of(&self, graha: Graha) -> Option<u8> {
        self.houses
            .iter()
            .find(|h| h.occupants.contains(&graha))
            .map(|h| h.number)
    }

    pub fn aspects_of(&self, graha: Graha) -> impl Iterator<Item = &Aspect> + '_ {
        self.aspects
            .iter()
            .filter(move |a| a.from == graha || a.to == graha)
    }

    /// Dasha periods running at `now`.
    pub fn current_dasha(&self, now: DateTime<Utc>) -> Option<CurrentDasha> {
        self.dasha.current(now)
    }
}
