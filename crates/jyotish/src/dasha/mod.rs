//! Vimshottari dasha: the 120-year cycle of planetary periods.
//!
//! Periods are anchored on the Moon's nakshatra at birth and subdivided
//! proportionally, so every level's children exactly tile their parent.

pub mod builder;
pub mod lookup;
pub mod types;

use crate::graha::Graha;

pub use builder::{compute_vimshottari_dasha, vimshottari_from_nakshatra};
pub use types::{
    CurrentDasha, DashaBalance, DashaLevel, DashaPeriod, PeriodSummary, VimshottariTimeline,
};

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Days per dasha year.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Deepest level the builder will generate.
pub const MAX_DASHA_DEPTH: usize = 3;

/// Full 120-year cycles of mahadashas generated from the anchor.
pub const MAHADASHA_CYCLES: usize = 2;

/// Cycle order with each planet's mahadasha length in years.
pub const VIMSHOTTARI_SEQUENCE: [(Graha, f64); 9] = [
    (Graha::Ketu, 7.0),
    (Graha::Venus, 20.0),
    (Graha::Sun, 6.0),
    (Graha::Moon, 10.0),
    (Graha::Mars, 7.0),
    (Graha::Rahu, 18.0),
    (Graha::Jupiter, 16.0),
    (Graha::Saturn, 19.0),
    (Graha::Mercury, 17.0),
];

/// Position of `planet` in [`VIMSHOTTARI_SEQUENCE`].
pub fn sequence_index(planet: Graha) -> usize {
    match planet {
        Graha::Ketu => 0,
        Graha::Venus => 1,
        Graha::Sun => 2,
        Graha::Moon => 3,
        Graha::Mars => 4,
        Graha::Rahu => 5,
        Graha::Jupiter => 6,
        Graha::Saturn => 7,
        Graha::Mercury => 8,
    }
}

/// Mahadasha length of `planet` in years.
pub fn vimshottari_years(planet: Graha) -> f64 {
    VIMSHOTTARI_SEQUENCE[sequence_index(planet)].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_sums_to_120() {
        let total: f64 = VIMSHOTTARI_SEQUENCE.iter().map(|(_, y)| y).sum();
        assert_eq!(total, VIMSHOTTARI_TOTAL_YEARS);
    }

    #[test]
    fn test_sequence_index_matches_table() {
        for (idx, (planet, years)) in VIMSHOTTARI_SEQUENCE.iter().enumerate() {
            assert_eq!(sequence_index(*planet), idx);
            assert_eq!(vimshottari_years(*planet), *years);
        }
    }
}
