//! Bhava (house) assignment.
//!
//! Whole-sign houses: house 1 is the Ascendant's sign and each following
//! house is the next sign. Cusps sit on sign boundaries. Other systems are
//! accepted as settings values but rejected by [`assign_houses`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChartError;
use crate::graha::Graha;
use crate::positions::{AscendantPosition, PlanetPosition};
use crate::zodiac::{sign_of, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    WholeSign,
    Equal,
    Placidus,
    Koch,
}

impl HouseSystem {
    pub const fn id(self) -> &'static str {
        match self {
            Self::WholeSign => "whole_sign",
            Self::Equal => "equal",
            Self::Placidus => "placidus",
            Self::Koch => "koch",
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    /// 1..=12
    pub number: u8,
    /// Start of the house's sign
    pub cusp: f64,
    pub sign: Sign,
    pub occupants: Vec<Graha>,
}

/// Whole-sign house number (1..=12) of `longitude` for an ascendant sign.
pub fn house_number(ascendant_sign: Sign, longitude: f64) -> u8 {
    let offset = (sign_of(longitude).index() + 12 - ascendant_sign.index()) % 12;
    offset as u8 + 1
}

/// Build the twelve houses and place every planet in exactly one of them.
pub fn assign_houses(
    system: HouseSystem,
    ascendant: &AscendantPosition,
    planets: &[PlanetPosition],
) -> Result<Vec<House>, ChartError> {
    if system != HouseSystem::WholeSign {
        return Err(ChartError::UnsupportedHouseSystem { system });
    }

    let first = ascendant.placement.sign;
    let mut houses: Vec<House> = (0..12)
        .map(|i| {
            let sign = first.advance(i);
            House {
                number: i as u8 + 1,
                cusp: sign.start(),
                sign,
                occupants: Vec::new(),
            }
        })
        .collect();

    for planet in planets {
        let number = house_number(first, planet.longitude);
        houses[number as usize - 1].occupants.push(planet.graha);
    }

    Ok(houses)
}
