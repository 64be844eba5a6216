//! Lagna (Ascendant) and Midheaven from sidereal time.
//!
//! Closed-form, no iteration. Near the poles `tan(ε)·sin(φ) + cos(φ)·sin(LST)`
//! and `cos(LST)` can both approach zero, leaving the ascendant ill-defined;
//! the formula is evaluated as-is there.

use crate::time::{centuries_since_j2000, local_sidereal_time};
use crate::zodiac::normalize_degrees;

/// Mean obliquity of the ecliptic in degrees.
pub fn obliquity(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    23.439_291 - 0.013_004_2 * t - 1.64e-7 * t * t + 5.04e-7 * t * t * t
}

/// Ascendant longitude (tropical) in degrees for local sidereal time,
/// obliquity and geographic latitude, all in degrees.
pub fn ascendant_from_lst(lst: f64, obliquity: f64, latitude: f64) -> f64 {
    let lst = lst.to_radians();
    let eps = obliquity.to_radians();
    let phi = latitude.to_radians();

    let asc = f64::atan2(-lst.cos(), eps.tan() * phi.sin() + phi.cos() * lst.sin());
    normalize_degrees(asc.to_degrees())
}

/// Midheaven longitude (tropical) in degrees.
pub fn midheaven_from_lst(lst: f64, obliquity: f64) -> f64 {
    let lst = lst.to_radians();
    let eps = obliquity.to_radians();
    normalize_degrees(f64::atan2(lst.sin(), lst.cos() * eps.cos()).to_degrees())
}

/// Ascendant (tropical) for a Julian Day and geographic position.
pub fn ascendant(jd: f64, latitude: f64, longitude: f64) -> f64 {
    let lst = local_sidereal_time(jd, longitude);
    ascendant_from_lst(lst, obliquity(jd), latitude)
}

/// Midheaven (tropical) for a Julian Day and east longitude.
pub fn midheaven(jd: f64, longitude: f64) -> f64 {
    midheaven_from_lst(local_sidereal_time(jd, longitude), obliquity(jd))
}
