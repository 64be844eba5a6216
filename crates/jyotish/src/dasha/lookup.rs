use chrono::{DateTime, Utc};

use crate::dasha::types::{CurrentDasha, DashaPeriod, VimshottariTimeline};

impl VimshottariTimeline {
    /// Periods running at `at`, one per generated level.
    ///
    /// When `at` lies outside a level's periods the first period of that
    /// level is used and `fallback` is set. Returns `None` only for a
    /// timeline with no periods.
    pub fn current(&self, at: DateTime<Utc>) -> Option<CurrentDasha> {
        let mut fallback = false;

        let maha = locate(&self.periods, at, &mut fallback)?;
        let antar = locate(&maha.children, at, &mut fallback);
        let pratyantar = antar.and_then(|a| locate(&a.children, at, &mut fallback));

        if fallback {
            log::warn!(
                "no dasha period contains {}; window is {} to {}",
                at,
                self.periods[0].start,
                self.periods[self.periods.len() - 1].end
            );
        }

        Some(CurrentDasha {
            at,
            mahadasha: maha.summary(),
            antardasha: antar.map(DashaPeriod::summary),
            pratyantardasha: pratyantar.map(DashaPeriod::summary),
            fallback,
        })
    }

    /// Mahadasha covering `at`, without falling back.
    pub fn mahadasha_at(&self, at: DateTime<Utc>) -> Option<&DashaPeriod> {
        self.periods.iter().find(|p| p.contains(at))
    }
}

fn locate<'a>(
    periods: &'a [DashaPeriod],
    at: DateTime<Utc>,
    fallback: &mut bool,
) -> Option<&'a DashaPeriod> {
    match periods.iter().find(|p| p.contains(at)) {
        Some(found) => Some(found),
        None => {
            let first = periods.first()?;
            *fallback = true;
            Some(first)
        }
    }
}
