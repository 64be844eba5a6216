use crate::aspects::types::{Aspect, AspectCore, AspectKind, AspectSettings};
use crate::positions::PlanetPosition;

/// Smaller arc between two longitudes, in `[0, 180]`.
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs() % 360.0;
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Aspect calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Aspects between every unordered pair of planets, in input order.
    pub fn compute_aspects(
        &self,
        planets: &[PlanetPosition],
        settings: &AspectSettings,
    ) -> Vec<Aspect> {
        let mut pairs = Vec::new();
        for i in 0..planets.len() {
            for j in (i + 1)..planets.len() {
                let p1 = &planets[i];
                let p2 = &planets[j];

                if let Some(aspect) = self.calculate_aspect(
                    p1.longitude,
                    p2.longitude,
                    p1.speed,
                    p2.speed,
                    settings,
                ) {
                    pairs.push(Aspect {
                        from: p1.graha,
                        to: p2.graha,
                        aspect,
                    });
                }
            }
        }
        pairs
    }

    /// Classify the separation of two longitudes, if any aspect is within orb.
    pub fn calculate_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        settings: &AspectSettings,
    ) -> Option<AspectCore> {
        let separation = angular_separation(lon1, lon2);

        for kind in AspectKind::ORDER {
            let exact_angle = kind.exact_angle();
            let orb = (separation - exact_angle).abs();
            if orb > settings.orb_for(kind) {
                continue;
            }

            return Some(AspectCore {
                kind,
                separation,
                exact_angle,
                orb,
                is_applying: self.is_aspect_applying(
                    lon1,
                    lon2,
                    speed1,
                    speed2,
                    exact_angle,
                    separation,
                ),
                is_exact: orb < 0.1,
                is_retrograde: speed1 < 0.0 || speed2 < 0.0,
            });
        }

        None
    }

    /// Determine if an aspect is applying (approaching exact) or separating
    fn is_aspect_applying(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        aspect_angle: f64,
        current_angle: f64,
    ) -> bool {
        let relative_speed = speed1 - speed2;

        // Direction is unreliable when the bodies move together
        if relative_speed.abs() < 0.01 {
            return current_angle < aspect_angle + 0.5;
        }

        let signed_diff = wrap_signed(lon1 - lon2);
        let current_distance = (current_angle - aspect_angle).abs();

        // Project a tenth of a day forward
        let time_step = 0.1;
        let future_angle = wrap_signed(signed_diff + relative_speed * time_step).abs();
        let future_distance = (future_angle - aspect_angle).abs();

        future_distance < current_distance
    }
}

/// Wrap a signed difference into `(-180, 180]`.
fn wrap_signed(diff: f64) -> f64 {
    let mut wrapped = diff % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}
