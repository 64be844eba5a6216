//! Classified positions: raw ephemeris output plus sign, nakshatra and pada.

use serde::{Deserialize, Serialize};

use crate::ephemeris::{EphemerisError, RawPosition, RawPositions};
use crate::graha::Graha;
use crate::zodiac::{degrees_in_sign, nakshatra_of, normalize_degrees, sign_of, Nakshatra, Sign};

/// Where a longitude falls in the sign and nakshatra tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub sign: Sign,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    #[serde(rename = "degreesInSign")]
    pub degrees_in_sign: f64,
    #[serde(rename = "degreesInNakshatra")]
    pub degrees_in_nakshatra: f64,
}

impl Placement {
    pub fn of(longitude: f64) -> Self {
        let nakshatra = nakshatra_of(longitude);
        Self {
            sign: sign_of(longitude),
            nakshatra: nakshatra.nakshatra,
            pada: nakshatra.pada,
            degrees_in_sign: degrees_in_sign(longitude),
            degrees_in_nakshatra: nakshatra.offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub graha: Graha,
    /// Longitude in degrees (0-360), in the chart's zodiac
    pub longitude: f64,
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
    pub retrograde: bool,
    #[serde(flatten)]
    pub placement: Placement,
}

impl PlanetPosition {
    /// Classify a raw position after subtracting `ayanamsa` degrees.
    pub fn from_raw(graha: Graha, raw: &RawPosition, ayanamsa: f64) -> Self {
        let longitude = normalize_degrees(raw.longitude - ayanamsa);
        Self {
            graha,
            longitude,
            latitude: raw.latitude,
            distance: raw.distance,
            speed: raw.speed,
            retrograde: raw.speed < 0.0,
            placement: Placement::of(longitude),
        }
    }

    /// Ketu, exactly opposite Rahu and moving with it.
    pub fn ketu_from(rahu: &PlanetPosition) -> Self {
        let longitude = normalize_degrees(rahu.longitude + 180.0);
        Self {
            graha: Graha::Ketu,
            longitude,
            latitude: rahu.latitude,
            distance: rahu.distance,
            speed: rahu.speed,
            retrograde: rahu.retrograde,
            placement: Placement::of(longitude),
        }
    }
}

/// The Lagna and Midheaven. Not a body, so it carries no speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AscendantPosition {
    pub longitude: f64,
    pub midheaven: f64,
    #[serde(flatten)]
    pub placement: Placement,
}

impl AscendantPosition {
    pub fn new(longitude: f64, midheaven: f64) -> Self {
        let longitude = normalize_degrees(longitude);
        Self {
            longitude,
            midheaven: normalize_degrees(midheaven),
            placement: Placement::of(longitude),
        }
    }
}

/// Classify all provided bodies and synthesize Ketu, in [`Graha::ALL`] order.
///
/// Any Ketu entry in `raw` is discarded.
pub fn resolve_planets(
    raw: &RawPositions,
    ayanamsa: f64,
) -> Result<Vec<PlanetPosition>, EphemerisError> {
    if raw.contains_key(&Graha::Ketu) {
        log::debug!("discarding provider-supplied ketu; it is derived from rahu");
    }

    let mut planets = Vec::with_capacity(Graha::ALL.len());
    for body in Graha::PROVIDED {
        let position = raw.get(&body).ok_or(EphemerisError::MissingBody { body })?;
        planets.push(PlanetPosition::from_raw(body, position, ayanamsa));
    }

    let rahu = planets
        .iter()
        .find(|p| p.graha == Graha::Rahu)
        .ok_or(EphemerisError::MissingBody { body: Graha::Rahu })?;
    let ketu = PlanetPosition::ketu_from(rahu);
    planets.push(ketu);

    Ok(planets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(longitude: f64, speed: f64) -> RawPosition {
        RawPosition {
            longitude,
            latitude: 0.1,
            distance: 0.0026,
            speed,
        }
    }

    fn full_table(rahu_lon: f64) -> RawPositions {
        let mut table = RawPositions::new();
        for (i, body) in Graha::PROVIDED.iter().enumerate() {
            table.insert(*body, raw(i as f64 * 37.0, 1.0));
        }
        table.insert(Graha::Rahu, raw(rahu_lon, -0.053));
        table
    }

    #[test]
    fn test_retrograde_is_negative_speed() {
        assert!(PlanetPosition::from_raw(Graha::Saturn, &raw(10.0, -0.01), 0.0).retrograde);
        assert!(!PlanetPosition::from_raw(Graha::Saturn, &raw(10.0, 0.0), 0.0).retrograde);
    }

    #[test]
    fn test_ayanamsa_is_subtracted_and_wrapped() {
        let p = PlanetPosition::from_raw(Graha::Sun, &raw(10.0, 1.0), 23.85);
        assert!((p.longitude - 346.15).abs() < 1e-9);
        assert_eq!(p.placement.sign, Sign::Pisces);
    }

    #[test]
    fn test_ketu_opposes_rahu() {
        for rahu_lon in [0.0, 13.333_333, 179.99, 180.0, 250.5, 359.9] {
            let planets = resolve_planets(&full_table(rahu_lon), 0.0).unwrap();
            let rahu = &planets[7];
            let ketu = &planets[8];
            assert_eq!(ketu.graha, Graha::Ketu);
            assert_eq!(ketu.longitude, normalize_degrees(rahu.longitude + 180.0));
            assert_eq!(ketu.speed, rahu.speed);
            assert_eq!(ketu.latitude, rahu.latitude);
            assert_eq!(ketu.distance, rahu.distance);
            assert!(ketu.retrograde && rahu.retrograde);
            assert_eq!(ketu.placement.sign, rahu.placement.sign.advance(6));
        }
    }

    #[test]
    fn test_missing_body_fails() {
        let mut table = full_table(100.0);
        table.remove(&Graha::Moon);
        match resolve_planets(&table, 0.0) {
            Err(EphemerisError::MissingBody { body }) => assert_eq!(body, Graha::Moon),
            other => panic!("expected missing moon, got {other:?}"),
        }
    }

    #[test]
    fn test_provider_ketu_is_replaced() {
        let mut table = full_table(100.0);
        table.insert(Graha::Ketu, raw(5.0, 1.0));
        let planets = resolve_planets(&table, 0.0).unwrap();
        assert_eq!(planets.len(), 9);
        assert_eq!(planets[8].longitude, 280.0);
    }
}
