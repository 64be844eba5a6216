//! Divisional chart (varga) helpers.
//!
//! Each sign is cut into `n` parts and every part is mapped onto a sign of
//! the divisional chart. The starting sign depends on the varga's rule
//! (sign quality, odd/even, or element); D30 uses unequal parts.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::positions::{AscendantPosition, PlanetPosition};
use crate::zodiac::{normalize_degrees, sign_of, Sign, SIGN_SPAN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Varga {
    D1,
    D2,
    D3,
    D4,
    D7,
    D9,
    D10,
    D12,
    D16,
    D20,
    D24,
    D27,
    D30,
    D40,
    D45,
    D60,
}

impl Varga {
    pub const fn division(self) -> u32 {
        match self {
            Self::D1 => 1,
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D4 => 4,
            Self::D7 => 7,
            Self::D9 => 9,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D16 => 16,
            Self::D20 => 20,
            Self::D24 => 24,
            Self::D27 => 27,
            Self::D30 => 30,
            Self::D40 => 40,
            Self::D45 => 45,
            Self::D60 => 60,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::D1 => "Rashi",
            Self::D2 => "Hora",
            Self::D3 => "Drekkana",
            Self::D4 => "Chaturthamsa",
            Self::D7 => "Saptamsa",
            Self::D9 => "Navamsa",
            Self::D10 => "Dasamsa",
            Self::D12 => "Dvadasamsa",
            Self::D16 => "Shodasamsa",
            Self::D20 => "Vimsamsa",
            Self::D24 => "ChaturVimsamsa",
            Self::D27 => "Bhamsa",
            Self::D30 => "Trimsamsa",
            Self::D40 => "Khavedamsa",
            Self::D45 => "Akshavedamsa",
            Self::D60 => "Shashtiamsa",
        }
    }

    /// Longitude of `longitude` in this divisional chart.
    pub fn longitude(self, longitude: f64) -> f64 {
        let lon = normalize_degrees(longitude);
        let sign = sign_of(lon);
        let s = sign.index();
        let within = (lon - sign.start()).clamp(0.0, SIGN_SPAN);
        let odd = s % 2 == 0; // 0-indexed: Aries, Gemini, ... are odd signs

        match self {
            Self::D1 => lon,
            Self::D2 => hora(s, within),
            Self::D3 => {
                // 1st, 5th, 9th from the sign
                let part = part_index(within, 3);
                segment(within, 3, s + [0, 4, 8][part], part)
            }
            Self::D4 => {
                // 1st, 4th, 7th, 10th from the sign
                let part = part_index(within, 4);
                segment(within, 4, s + [0, 3, 6, 9][part], part)
            }
            Self::D7 => by_parity(within, 7, odd, s, s + 6),
            Self::D9 => by_quality(within, 9, s, [s, s + 8, s + 4]),
            Self::D10 => by_parity(within, 10, odd, s, s + 8),
            Self::D12 => continuous(within, 12, s),
            Self::D16 => by_quality(within, 16, s, [0, 4, 8]),
            Self::D20 => by_quality(within, 20, s, [0, 8, 4]),
            Self::D24 => by_parity(within, 24, odd, 4, 3),
            Self::D27 => continuous(within, 27, [0, 3, 6, 9][s % 4]),
            Self::D30 => trimsamsa(odd, within),
            Self::D40 => by_parity(within, 40, odd, 0, 6),
            Self::D45 => by_quality(within, 45, s, [0, 4, 8]),
            Self::D60 => continuous(within, 60, s),
        }
    }

    pub fn sign(self, longitude: f64) -> Sign {
        sign_of(self.longitude(longitude))
    }
}

fn part_index(within: f64, division: u32) -> usize {
    let size = SIGN_SPAN / division as f64;
    ((within / size).floor() as usize).min(division as usize - 1)
}

/// Map part `part` onto `start_sign`, scaling the remainder to a full sign.
fn segment(within: f64, division: u32, start_sign: usize, part: usize) -> f64 {
    let size = SIGN_SPAN / division as f64;
    let remainder = (within - part as f64 * size).max(0.0);
    let varga_sign = start_sign % 12;
    normalize_degrees(varga_sign as f64 * SIGN_SPAN + remainder * division as f64)
}

/// Parts run consecutively through the zodiac from `start_sign`.
fn continuous(within: f64, division: u32, start_sign: usize) -> f64 {
    let part = part_index(within, division);
    segment(within, division, start_sign + part, part)
}

fn by_parity(within: f64, division: u32, odd: bool, odd_start: usize, even_start: usize) -> f64 {
    continuous(within, division, if odd { odd_start } else { even_start })
}

/// `starts` is indexed movable, fixed, dual.
fn by_quality(within: f64, division: u32, sign_index: usize, starts: [usize; 3]) -> f64 {
    continuous(within, division, starts[sign_index % 3])
}

fn hora(sign_index: usize, within: f64) -> f64 {
    // Odd signs: Sun's hora (Leo) then Moon's (Cancer); even signs reversed
    const LEO: usize = 4;
    const CANCER: usize = 3;
    let odd = sign_index % 2 == 0;
    let first_half = within < 15.0;
    let varga_sign = match (odd, first_half) {
        (true, true) | (false, false) => LEO,
        _ => CANCER,
    };
    let remainder = if first_half { within } else { within - 15.0 };
    normalize_degrees(varga_sign as f64 * SIGN_SPAN + remainder * 2.0)
}

fn trimsamsa(odd: bool, within: f64) -> f64 {
    // (sign ruled by the part's lord, part start, part end)
    const ODD: [(usize, f64, f64); 5] = [
        (0, 0.0, 5.0),   // Mars -> Aries
        (10, 5.0, 10.0), // Saturn -> Aquarius
        (8, 10.0, 18.0), // Jupiter -> Sagittarius
        (2, 18.0, 25.0), // Mercury -> Gemini
        (6, 25.0, 30.0), // Venus -> Libra
    ];
    const EVEN: [(usize, f64, f64); 5] = [
        (1, 0.0, 5.0),   // Venus -> Taurus
        (5, 5.0, 12.0),  // Mercury -> Virgo
        (11, 12.0, 20.0), // Jupiter -> Pisces
        (9, 20.0, 25.0), // Saturn -> Capricorn
        (7, 25.0, 30.0), // Mars -> Scorpio
    ];
    let table = if odd { &ODD } else { &EVEN };
    let (varga_sign, start, end) = table
        .iter()
        .copied()
        .find(|&(_, _, end)| within < end)
        .unwrap_or(table[4]);
    let scaled = (within - start) / (end - start) * SIGN_SPAN;
    normalize_degrees(varga_sign as f64 * SIGN_SPAN + scaled)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VargaPlacement {
    pub graha: Graha,
    pub longitude: f64,
    pub sign: Sign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VargaChart {
    pub varga: Varga,
    pub label: String,
    #[serde(rename = "ascendantSign")]
    pub ascendant_sign: Sign,
    pub planets: Vec<VargaPlacement>,
}

/// Build the requested divisional charts, in request order, skipping repeats.
pub fn build_varga_charts(
    requested: &[Varga],
    ascendant: &AscendantPosition,
    planets: &[PlanetPosition],
) -> Vec<VargaChart> {
    let mut charts: Vec<VargaChart> = Vec::with_capacity(requested.len());
    for &varga in requested {
        if charts.iter().any(|c| c.varga == varga) {
            continue;
        }
        let placements = planets
            .iter()
            .map(|p| {
                let longitude = varga.longitude(p.longitude);
                VargaPlacement {
                    graha: p.graha,
                    longitude,
                    sign: sign_of(longitude),
                }
            })
            .collect();
        charts.push(VargaChart {
            varga,
            label: varga.label().to_string(),
            ascendant_sign: varga.sign(ascendant.longitude),
            planets: placements,
        });
    }
    charts
}
