use chrono::{DateTime, Duration, TimeZone, Utc};
use jyotish::dasha::{
    compute_vimshottari_dasha, vimshottari_from_nakshatra, vimshottari_years, DashaBalance,
    DashaLevel, DashaPeriod, VIMSHOTTARI_SEQUENCE,
};
use jyotish::{Graha, Nakshatra};

fn birth() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1985, 11, 3, 22, 15, 0).unwrap()
}

fn assert_tiles(parent: &DashaPeriod) {
    let children = &parent.children;
    if children.is_empty() {
        return;
    }
    assert_eq!(children.first().unwrap().start, parent.start);
    assert_eq!(children.last().unwrap().end, parent.end);
    let total: f64 = children.iter().map(|c| c.duration_years).sum();
    assert!(
        (total - parent.duration_years).abs() < 1e-9,
        "{} children sum to {total}",
        parent.planet
    );
    for child in children {
        assert!(child.start < child.end);
        assert_tiles(child);
    }
}

#[test]
fn test_children_durations_sum_at_both_levels() {
    for moon in [0.0, 44.0, 133.7, 266.66, 359.99] {
        let timeline = compute_vimshottari_dasha(
            birth(),
            moon,
            DashaLevel::Pratyantardasha,
            DashaBalance::Pada,
        )
        .unwrap();
        for maha in &timeline.periods {
            assert_eq!(maha.duration_years, vimshottari_years(maha.planet));
            assert_tiles(maha);
        }
    }
}

#[test]
fn test_rohini_pada_two() {
    // Rohini index 3, lord Moon
    let timeline =
        vimshottari_from_nakshatra(birth(), 3, 2, DashaLevel::Mahadasha).unwrap();
    assert_eq!(timeline.moon_nakshatra, Nakshatra::Rohini);
    assert_eq!(timeline.starting_planet, Graha::Moon);
    assert_eq!(timeline.elapsed_fraction, 0.25);
    let expected = birth() - Duration::milliseconds((2.5 * 365.25 * 86_400_000.0) as i64);
    assert_eq!(timeline.periods[0].start, expected);
}

#[test]
fn test_full_window_has_no_fallback() {
    let timeline = compute_vimshottari_dasha(
        birth(),
        201.5,
        DashaLevel::Pratyantardasha,
        DashaBalance::Exact,
    )
    .unwrap();
    let start = timeline.periods[0].start;
    let end = timeline.periods.last().unwrap().end;
    assert_eq!((end - start).num_days(), (240.0 * 365.25) as i64);

    let mut at = start;
    while at < end {
        let current = timeline.current(at).unwrap();
        assert!(!current.fallback, "no period at {at}");
        assert!(current.pratyantardasha.is_some());
        at += Duration::days(41);
    }
    // The last millisecond of the window is still covered
    let last = timeline.current(end - Duration::milliseconds(1)).unwrap();
    assert!(!last.fallback);
}

#[test]
fn test_cycle_order_is_fixed() {
    let timeline =
        compute_vimshottari_dasha(birth(), 0.0, DashaLevel::Mahadasha, DashaBalance::Pada)
            .unwrap();
    // Ashwini pada 1: Ketu from the very start
    assert_eq!(timeline.periods[0].start, birth());
    let planets: Vec<Graha> = timeline.periods.iter().map(|p| p.planet).collect();
    let expected: Vec<Graha> = VIMSHOTTARI_SEQUENCE
        .iter()
        .chain(VIMSHOTTARI_SEQUENCE.iter())
        .map(|(g, _)| *g)
        .collect();
    assert_eq!(planets, expected);
}

#[test]
fn test_timeline_serializes_levels_lowercase() {
    let timeline =
        vimshottari_from_nakshatra(birth(), 10, 4, DashaLevel::Antardasha).unwrap();
    let json = serde_json::to_value(&timeline).unwrap();
    assert_eq!(json["periods"][0]["level"], "mahadasha");
    assert_eq!(json["periods"][0]["children"][0]["level"], "antardasha");
    assert_eq!(json["periods"][0]["children"][0]["parentPlanet"], json["periods"][0]["planet"]);
    assert!(json["periods"][0].get("parentPlanet").is_none());
}
