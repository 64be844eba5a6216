//! Rashi (sign), nakshatra and pada classification.
//!
//! The ecliptic is cut into 12 signs of 30° and 27 nakshatras of 13°20',
//! each nakshatra quartered into padas of 3°20'. Every slice is half-open,
//! `[start, end)`: a longitude sitting exactly on an edge belongs to the
//! slice that starts there.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::graha::Graha;

pub const SIGN_SPAN: f64 = 30.0;
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

/// Normalize degrees to `[0, 360)`.
pub fn normalize_degrees(value: f64) -> f64 {
    ((value % 360.0) + 360.0) % 360.0
}

/// Index of the half-open slice of width `span` containing `lon`.
///
/// Edges are the products `k * span`, so a caller holding a slice start
/// computed the same way always lands in that slice.
fn slice_index(lon: f64, span: f64, count: usize) -> usize {
    let mut index = ((lon / span).floor() as usize).min(count - 1);
    if index + 1 < count && lon >= (index + 1) as f64 * span {
        index += 1;
    }
    if index > 0 && lon < index as f64 * span {
        index -= 1;
    }
    index
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// 0-based index, Aries = 0.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Sign at `index % 12`.
    pub const fn from_index(index: usize) -> Sign {
        Self::ALL[index % 12]
    }

    /// The sign `steps` places further along the zodiac.
    pub const fn advance(self, steps: usize) -> Sign {
        Self::from_index(self.index() + steps)
    }

    /// Longitude where the sign begins.
    pub fn start(self) -> f64 {
        self.index() as f64 * SIGN_SPAN
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Sanskrit rashi name.
    pub const fn rashi_name(self) -> &'static str {
        match self {
            Self::Aries => "Mesha",
            Self::Taurus => "Vrishabha",
            Self::Gemini => "Mithuna",
            Self::Cancer => "Karka",
            Self::Leo => "Simha",
            Self::Virgo => "Kanya",
            Self::Libra => "Tula",
            Self::Scorpio => "Vrishchika",
            Self::Sagittarius => "Dhanu",
            Self::Capricorn => "Makara",
            Self::Aquarius => "Kumbha",
            Self::Pisces => "Meena",
        }
    }

    /// Traditional (parashari) sign lord.
    pub const fn ruler(self) -> Graha {
        match self {
            Self::Aries | Self::Scorpio => Graha::Mars,
            Self::Taurus | Self::Libra => Graha::Venus,
            Self::Gemini | Self::Virgo => Graha::Mercury,
            Self::Cancer => Graha::Moon,
            Self::Leo => Graha::Sun,
            Self::Sagittarius | Self::Pisces => Graha::Jupiter,
            Self::Capricorn | Self::Aquarius => Graha::Saturn,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishta,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

struct NakshatraRecord {
    nakshatra: Nakshatra,
    name: &'static str,
    lord: Graha,
}

const NAKSHATRA_ORDER: [NakshatraRecord; 27] = [
    NakshatraRecord { nakshatra: Nakshatra::Ashwini, name: "Ashwini", lord: Graha::Ketu },
    NakshatraRecord { nakshatra: Nakshatra::Bharani, name: "Bharani", lord: Graha::Venus },
    NakshatraRecord { nakshatra: Nakshatra::Krittika, name: "Krittika", lord: Graha::Sun },
    NakshatraRecord { nakshatra: Nakshatra::Rohini, name: "Rohini", lord: Graha::Moon },
    NakshatraRecord { nakshatra: Nakshatra::Mrigashira, name: "Mrigashira", lord: Graha::Mars },
    NakshatraRecord { nakshatra: Nakshatra::Ardra, name: "Ardra", lord: Graha::Rahu },
    NakshatraRecord { nakshatra: Nakshatra::Punarvasu, name: "Punarvasu", lord: Graha::Jupiter },
    NakshatraRecord { nakshatra: Nakshatra::Pushya, name: "Pushya", lord: Graha::Saturn },
    NakshatraRecord { nakshatra: Nakshatra::Ashlesha, name: "Ashlesha", lord: Graha::Mercury },
    NakshatraRecord { nakshatra: Nakshatra::Magha, name: "Magha", lord: Graha::Ketu },
    NakshatraRecord { nakshatra: Nakshatra::PurvaPhalguni, name: "Purva Phalguni", lord: Graha::Venus },
    NakshatraRecord { nakshatra: Nakshatra::UttaraPhalguni, name: "Uttara Phalguni", lord: Graha::Sun },
    NakshatraRecord { nakshatra: Nakshatra::Hasta, name: "Hasta", lord: Graha::Moon },
    NakshatraRecord { nakshatra: Nakshatra::Chitra, name: "Chitra", lord: Graha::Mars },
    NakshatraRecord { nakshatra: Nakshatra::Swati, name: "Swati", lord: Graha::Rahu },
    NakshatraRecord { nakshatra: Nakshatra::Vishakha, name: "Vishakha", lord: Graha::Jupiter },
    NakshatraRecord { nakshatra: Nakshatra::Anuradha, name: "Anuradha", lord: Graha::Saturn },
    NakshatraRecord { nakshatra: Nakshatra::Jyeshtha, name: "Jyeshtha", lord: Graha::Mercury },
    NakshatraRecord { nakshatra: Nakshatra::Mula, name: "Mula", lord: Graha::Ketu },
    NakshatraRecord { nakshatra: Nakshatra::PurvaAshadha, name: "Purva Ashadha", lord: Graha::Venus },
    NakshatraRecord { nakshatra: Nakshatra::UttaraAshadha, name: "Uttara Ashadha", lord: Graha::Sun },
    NakshatraRecord { nakshatra: Nakshatra::Shravana, name: "Shravana", lord: Graha::Moon },
    NakshatraRecord { nakshatra: Nakshatra::Dhanishta, name: "Dhanishta", lord: Graha::Mars },
    NakshatraRecord { nakshatra: Nakshatra::Shatabhisha, name: "Shatabhisha", lord: Graha::Rahu },
    NakshatraRecord { nakshatra: Nakshatra::PurvaBhadrapada, name: "Purva Bhadrapada", lord: Graha::Jupiter },
    NakshatraRecord { nakshatra: Nakshatra::UttaraBhadrapada, name: "Uttara Bhadrapada", lord: Graha::Saturn },
    NakshatraRecord { nakshatra: Nakshatra::Revati, name: "Revati", lord: Graha::Mercury },
];

lazy_static::lazy_static! {
    // Slice starts, computed once so every lookup compares against the same values.
    static ref NAKSHATRA_STARTS: [f64; 27] = {
        let mut starts = [0.0; 27];
        for (idx, start) in starts.iter_mut().enumerate() {
            *start = idx as f64 * NAKSHATRA_SPAN;
        }
        starts
    };
}

impl Nakshatra {
    /// 0-based index, Ashwini = 0.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Nakshatra at `index`, or `None` past Revati.
    pub fn from_index(index: usize) -> Option<Nakshatra> {
        NAKSHATRA_ORDER.get(index).map(|record| record.nakshatra)
    }

    pub fn name(self) -> &'static str {
        NAKSHATRA_ORDER[self.index()].name
    }

    /// Vimshottari dasha lord.
    pub fn lord(self) -> Graha {
        NAKSHATRA_ORDER[self.index()].lord
    }

    /// Longitude where the nakshatra begins.
    pub fn start(self) -> f64 {
        NAKSHATRA_STARTS[self.index()]
    }

    /// Longitude where the next nakshatra begins.
    pub fn end(self) -> f64 {
        (self.index() + 1) as f64 * NAKSHATRA_SPAN
    }

    /// Longitude where `pada` (1..=4) begins.
    pub fn pada_start(self, pada: u8) -> f64 {
        self.start() + (pada.clamp(1, 4) - 1) as f64 * PADA_SPAN
    }
}

impl fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Nakshatra placement of a longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPosition {
    pub nakshatra: Nakshatra,
    /// 1..=4
    pub pada: u8,
    /// Degrees travelled into the nakshatra.
    pub offset: f64,
    /// `offset` as a fraction of the nakshatra span.
    pub progress: f64,
}

/// Sign containing the longitude.
pub fn sign_of(longitude: f64) -> Sign {
    let lon = normalize_degrees(longitude);
    Sign::from_index(slice_index(lon, SIGN_SPAN, 12))
}

/// Degrees travelled into the containing sign, `[0, 30)`.
pub fn degrees_in_sign(longitude: f64) -> f64 {
    let lon = normalize_degrees(longitude);
    (lon - sign_of(lon).start()).max(0.0)
}

/// Nakshatra and pada containing the longitude.
pub fn nakshatra_of(longitude: f64) -> NakshatraPosition {
    let lon = normalize_degrees(longitude);
    let index = slice_index(lon, NAKSHATRA_SPAN, 27);
    let nakshatra = NAKSHATRA_ORDER[index].nakshatra;

    let mut pada = 1u8;
    while pada < 4 && lon >= nakshatra.pada_start(pada + 1) {
        pada += 1;
    }

    let offset = (lon - nakshatra.start()).max(0.0);
    NakshatraPosition {
        nakshatra,
        pada,
        offset,
        progress: (offset / NAKSHATRA_SPAN).min(1.0),
    }
}

/// Validate a raw `(nakshatra index, pada)` pair coming from outside the engine.
pub fn nakshatra_from_index(index: usize, pada: u8) -> Result<(Nakshatra, u8), ValidationError> {
    let nakshatra = Nakshatra::from_index(index).ok_or_else(|| {
        ValidationError::new("nakshatra", format!("index {index} is not in 0..27"))
    })?;
    if !(1..=4).contains(&pada) {
        return Err(ValidationError::new("pada", format!("{pada} is not in 1..=4")));
    }
    Ok((nakshatra, pada))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-1e-17), 0.0);
    }

    #[test]
    fn test_sign_boundaries_go_to_next_sign() {
        assert_eq!(sign_of(0.0), Sign::Aries);
        assert_eq!(sign_of(29.999_999), Sign::Aries);
        assert_eq!(sign_of(30.0), Sign::Taurus);
        assert_eq!(sign_of(360.0), Sign::Aries);
        assert_eq!(sign_of(330.0), Sign::Pisces);
        assert_eq!(sign_of(-0.5), Sign::Pisces);
    }

    #[test]
    fn test_every_nakshatra_boundary_goes_to_next_slice() {
        for idx in 0..27 {
            let nakshatra = Nakshatra::from_index(idx).unwrap();
            let placed = nakshatra_of(nakshatra.start());
            assert_eq!(placed.nakshatra, nakshatra);
            assert_eq!(placed.pada, 1);
            for pada in 2..=4 {
                assert_eq!(nakshatra_of(nakshatra.pada_start(pada)).pada, pada);
            }
        }
    }

    #[test]
    fn test_nakshatra_lords_follow_vimshottari_cycle() {
        assert_eq!(Nakshatra::Ashwini.lord(), Graha::Ketu);
        assert_eq!(Nakshatra::Rohini.lord(), Graha::Moon);
        assert_eq!(Nakshatra::Magha.lord(), Graha::Ketu);
        assert_eq!(Nakshatra::Revati.lord(), Graha::Mercury);
    }

    #[test]
    fn test_nakshatra_of_mid_slice() {
        // Rohini spans 40°00' - 53°20'; pada 2 starts at 43°20'
        let placed = nakshatra_of(45.0);
        assert_eq!(placed.nakshatra, Nakshatra::Rohini);
        assert_eq!(placed.pada, 2);
        assert!((placed.offset - 5.0).abs() < 1e-9);
        assert_eq!(nakshatra_of(359.999).nakshatra, Nakshatra::Revati);
        assert_eq!(nakshatra_of(359.999).pada, 4);
    }

    #[test]
    fn test_nakshatra_from_index_validates() {
        assert_eq!(nakshatra_from_index(3, 2).unwrap(), (Nakshatra::Rohini, 2));
        assert_eq!(nakshatra_from_index(27, 1).unwrap_err().field, "nakshatra");
        assert_eq!(nakshatra_from_index(0, 0).unwrap_err().field, "pada");
        assert_eq!(nakshatra_from_index(0, 5).unwrap_err().field, "pada");
    }

    #[test]
    fn test_degrees_in_sign() {
        assert!((degrees_in_sign(200.0) - 20.0).abs() < 1e-9);
        assert_eq!(degrees_in_sign(30.0), 0.0);
    }
}
