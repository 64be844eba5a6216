use chrono::{DateTime, Duration, Utc};

use crate::dasha::types::{DashaBalance, DashaLevel, DashaPeriod, VimshottariTimeline};
use crate::dasha::{
    sequence_index, DAYS_PER_YEAR, MAHADASHA_CYCLES, VIMSHOTTARI_SEQUENCE,
    VIMSHOTTARI_TOTAL_YEARS,
};
use crate::error::ValidationError;
use crate::graha::Graha;
use crate::zodiac::{nakshatra_from_index, nakshatra_of, Nakshatra};

const MILLIS_PER_YEAR: f64 = DAYS_PER_YEAR * 86_400_000.0;

/// Compute the Vimshottari timeline from the Moon's sidereal longitude.
pub fn compute_vimshottari_dasha(
    birth: DateTime<Utc>,
    moon_longitude: f64,
    depth: DashaLevel,
    balance: DashaBalance,
) -> Result<VimshottariTimeline, ValidationError> {
    if !moon_longitude.is_finite() {
        return Err(ValidationError::new("moon longitude", "not a finite number"));
    }
    let moon = nakshatra_of(moon_longitude);
    let elapsed = match balance {
        DashaBalance::Pada => pada_fraction(moon.pada),
        DashaBalance::Exact => moon.progress,
    };
    build_timeline(birth, moon.nakshatra, moon.pada, elapsed, balance, depth)
}

/// Compute the timeline from a raw nakshatra index (0-26) and pada (1-4).
pub fn vimshottari_from_nakshatra(
    birth: DateTime<Utc>,
    nakshatra_index: usize,
    pada: u8,
    depth: DashaLevel,
) -> Result<VimshottariTimeline, ValidationError> {
    let (nakshatra, pada) = nakshatra_from_index(nakshatra_index, pada)?;
    build_timeline(
        birth,
        nakshatra,
        pada,
        pada_fraction(pada),
        DashaBalance::Pada,
        depth,
    )
}

fn pada_fraction(pada: u8) -> f64 {
    (pada.clamp(1, 4) - 1) as f64 / 4.0
}

fn build_timeline(
    birth: DateTime<Utc>,
    nakshatra: Nakshatra,
    pada: u8,
    elapsed: f64,
    balance: DashaBalance,
    depth: DashaLevel,
) -> Result<VimshottariTimeline, ValidationError> {
    let starting_planet = nakshatra.lord();
    let start_index = sequence_index(starting_planet);
    let first_years = VIMSHOTTARI_SEQUENCE[start_index].1;

    // The first mahadasha began before birth by the elapsed share
    let anchor = shift(birth, -elapsed * first_years)?;

    let count = VIMSHOTTARI_SEQUENCE.len() * MAHADASHA_CYCLES;
    let mut periods = Vec::with_capacity(count);
    let mut elapsed_years = 0.0;
    let mut start = anchor;
    for offset in 0..count {
        let (planet, years) = VIMSHOTTARI_SEQUENCE[(start_index + offset) % 9];
        elapsed_years += years;
        // Boundaries are measured from the anchor so rounding never drifts
        let end = shift(anchor, elapsed_years)?;
        periods.push(build_period(
            planet,
            None,
            start,
            end,
            years,
            DashaLevel::Mahadasha,
            depth,
        ));
        start = end;
    }

    log::debug!(
        "vimshottari: {} pada {} -> {} ({:.4} elapsed), {} mahadashas to {}",
        nakshatra,
        pada,
        starting_planet,
        elapsed,
        periods.len(),
        depth.name()
    );

    Ok(VimshottariTimeline {
        birth,
        moon_nakshatra: nakshatra,
        moon_pada: pada,
        starting_planet,
        elapsed_fraction: elapsed,
        balance,
        depth,
        periods,
    })
}

/// One period and its subtree down to `target`.
///
/// Children split `[start, end)` in proportion to their mahadasha years,
/// starting from the parent's own planet. The last child ends exactly at
/// `end`.
fn build_period(
    planet: Graha,
    parent: Option<Graha>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_years: f64,
    level: DashaLevel,
    target: DashaLevel,
) -> DashaPeriod {
    let mut period = DashaPeriod {
        planet,
        start,
        end,
        duration_years,
        level,
        parent,
        children: Vec::new(),
    };

    let child_level = match level.child_level() {
        Some(child) if level.depth() < target.depth() => child,
        _ => return period,
    };

    let span_ms = (end - start).num_milliseconds();
    let first = sequence_index(planet);
    let mut share = 0.0;
    let mut child_start = start;
    period.children.reserve(VIMSHOTTARI_SEQUENCE.len());
    for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
        let (child_planet, child_years) = VIMSHOTTARI_SEQUENCE[(first + offset) % 9];
        share += child_years;
        let child_end = if offset + 1 == VIMSHOTTARI_SEQUENCE.len() {
            end
        } else {
            let offset_ms = (span_ms as f64 * share / VIMSHOTTARI_TOTAL_YEARS).round() as i64;
            start + Duration::milliseconds(offset_ms)
        };
        period.children.push(build_period(
            child_planet,
            Some(planet),
            child_start,
            child_end,
            duration_years * child_years / VIMSHOTTARI_TOTAL_YEARS,
            child_level,
            target,
        ));
        child_start = child_end;
    }

    period
}

/// `at` moved by a (possibly negative) number of dasha years, to the millisecond.
fn shift(at: DateTime<Utc>, years: f64) -> Result<DateTime<Utc>, ValidationError> {
    let millis = (years * MILLIS_PER_YEAR).round() as i64;
    at.checked_add_signed(Duration::milliseconds(millis))
        .ok_or_else(|| ValidationError::new("birth", "dasha window leaves the supported date range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 6, 15, 6, 30, 0).unwrap()
    }

    fn check_children(period: &DashaPeriod) {
        if period.children.is_empty() {
            return;
        }
        assert_eq!(period.children.len(), 9);
        assert_eq!(period.children[0].planet, period.planet);
        assert_eq!(period.children[0].start, period.start);
        assert_eq!(period.children[8].end, period.end);
        for pair in period.children.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let years: f64 = period.children.iter().map(|c| c.duration_years).sum();
        assert!((years - period.duration_years).abs() < 1e-9);
        let millis: i64 = period
            .children
            .iter()
            .map(|c| c.duration().num_milliseconds())
            .sum();
        assert_eq!(millis, period.duration().num_milliseconds());
        for child in &period.children {
            assert_eq!(child.parent, Some(period.planet));
            check_children(child);
        }
    }

    #[test]
    fn test_rohini_pada_two_starts_moon_before_birth() {
        // Rohini spans 40°00'-53°20'; pada 2 starts at 43°20'
        let timeline =
            compute_vimshottari_dasha(birth(), 44.0, DashaLevel::Mahadasha, DashaBalance::Pada)
                .unwrap();
        assert_eq!(timeline.moon_nakshatra, Nakshatra::Rohini);
        assert_eq!(timeline.moon_pada, 2);
        assert_eq!(timeline.starting_planet, Graha::Moon);
        assert_eq!(timeline.elapsed_fraction, 0.25);

        let first = &timeline.periods[0];
        assert_eq!(first.planet, Graha::Moon);
        // 2.5 years of 365.25 days
        let expected_start = birth() - Duration::milliseconds(78_894_000_000);
        assert_eq!(first.start, expected_start);
        assert_eq!(first.end, expected_start + Duration::milliseconds(315_576_000_000));
        assert_eq!(timeline.periods[1].planet, Graha::Mars);
    }

    #[test]
    fn test_two_full_cycles_are_contiguous() {
        let timeline =
            compute_vimshottari_dasha(birth(), 200.0, DashaLevel::Mahadasha, DashaBalance::Pada)
                .unwrap();
        assert_eq!(timeline.periods.len(), 18);
        for pair in timeline.periods.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let total = timeline.periods[17].end - timeline.periods[0].start;
        assert_eq!(total.num_milliseconds(), (240.0 * MILLIS_PER_YEAR) as i64);
        assert_eq!(timeline.periods[0].planet, timeline.periods[9].planet);
    }

    #[test]
    fn test_children_tile_parents_at_every_level() {
        let timeline = compute_vimshottari_dasha(
            birth(),
            317.3,
            DashaLevel::Pratyantardasha,
            DashaBalance::Exact,
        )
        .unwrap();
        for period in &timeline.periods {
            assert_eq!(period.children.len(), 9);
            assert!(period.children.iter().all(|c| c.children.len() == 9));
            check_children(period);
        }
    }

    #[test]
    fn test_depth_controls_levels() {
        let shallow =
            compute_vimshottari_dasha(birth(), 10.0, DashaLevel::Mahadasha, DashaBalance::Pada)
                .unwrap();
        assert!(shallow.periods.iter().all(|p| p.children.is_empty()));

        let two =
            compute_vimshottari_dasha(birth(), 10.0, DashaLevel::Antardasha, DashaBalance::Pada)
                .unwrap();
        let antar = &two.periods[0].children[0];
        assert_eq!(antar.level, DashaLevel::Antardasha);
        assert!(antar.children.is_empty());
    }

    #[test]
    fn test_exact_balance_uses_progress() {
        // Halfway through Ashwini (Ketu)
        let half = 360.0 / 27.0 / 2.0;
        let timeline =
            compute_vimshottari_dasha(birth(), half, DashaLevel::Mahadasha, DashaBalance::Exact)
                .unwrap();
        assert_eq!(timeline.starting_planet, Graha::Ketu);
        assert!((timeline.elapsed_fraction - 0.5).abs() < 1e-9);
        let before_birth = birth() - timeline.periods[0].start;
        assert_eq!(before_birth.num_milliseconds(), (3.5 * MILLIS_PER_YEAR) as i64);
    }

    #[test]
    fn test_from_nakshatra_validates_input() {
        let ok = vimshottari_from_nakshatra(birth(), 3, 2, DashaLevel::Mahadasha).unwrap();
        assert_eq!(ok.starting_planet, Graha::Moon);

        let err = vimshottari_from_nakshatra(birth(), 27, 1, DashaLevel::Mahadasha).unwrap_err();
        assert_eq!(err.field, "nakshatra");
        let err = vimshottari_from_nakshatra(birth(), 0, 5, DashaLevel::Mahadasha).unwrap_err();
        assert_eq!(err.field, "pada");
        let err = vimshottari_from_nakshatra(birth(), 0, 0, DashaLevel::Mahadasha).unwrap_err();
        assert_eq!(err.field, "pada");
    }

    #[test]
    fn test_rejects_non_finite_moon() {
        let err = compute_vimshottari_dasha(
            birth(),
            f64::NAN,
            DashaLevel::Mahadasha,
            DashaBalance::Pada,
        )
        .unwrap_err();
        assert_eq!(err.field, "moon longitude");
    }
}
