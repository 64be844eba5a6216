use std::sync::Arc;

use crate::ascendant::{ascendant, midheaven};
use crate::aspects::AspectCalculator;
use crate::ayanamsa::Zodiac;
use crate::birth::BirthEvent;
use crate::chart::cache::ChartCache;
use crate::chart::types::{AyanamsaValue, Chart};
use crate::config::ChartSettings;
use crate::dasha::compute_vimshottari_dasha;
use crate::ephemeris::{EphemerisError, PositionProvider, RawPositions, SwissEphemerisAdapter};
use crate::error::ChartError;
use crate::graha::Graha;
use crate::houses::{assign_houses, HouseSystem};
use crate::positions::{resolve_planets, AscendantPosition};
use crate::vargas::build_varga_charts;
use crate::zodiac::normalize_degrees;

/// Turns birth events into charts with one provider and one set of settings.
pub struct ChartEngine<P> {
    provider: P,
    settings: ChartSettings,
    calculator: AspectCalculator,
    cache: Option<ChartCache>,
}

impl ChartEngine<SwissEphemerisAdapter> {
    /// Engine over the Swiss Ephemeris, configured from `settings.ephemeris`.
    pub fn swiss(settings: ChartSettings) -> Result<Self, ChartError> {
        let adapter = SwissEphemerisAdapter::new(&settings.ephemeris)?;
        Ok(Self::new(adapter, settings))
    }
}

impl<P: PositionProvider> ChartEngine<P> {
    pub fn new(provider: P, settings: ChartSettings) -> Self {
        let cache = settings.cache.then(ChartCache::new);
        Self {
            provider,
            settings,
            calculator: AspectCalculator::new(),
            cache,
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> Option<&ChartCache> {
        self.cache.as_ref()
    }

    /// Compute the chart for `birth`.
    ///
    /// Any failing step aborts the computation; there are no partial charts.
    pub async fn compute(&self, birth: &BirthEvent) -> Result<Arc<Chart>, ChartError> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(birth)) {
            log::debug!("chart cache hit for {:?}", birth);
            return Ok(hit);
        }

        birth.validate()?;
        self.check_house_system()?;
        let jd = birth.julian_day()?;

        log::debug!("fetching positions from {} for JD {}", self.provider.name(), jd);
        let raw = self.provider.positions(jd).await?;
        let chart = Arc::new(self.assemble(birth, jd, &raw)?);

        Ok(match &self.cache {
            Some(cache) => cache.insert(birth, chart),
            None => chart,
        })
    }

    /// Assemble a chart from positions already obtained for `birth`.
    pub fn compute_with_positions(
        &self,
        birth: &BirthEvent,
        raw: &RawPositions,
    ) -> Result<Chart, ChartError> {
        birth.validate()?;
        self.check_house_system()?;
        let jd = birth.julian_day()?;
        self.assemble(birth, jd, raw)
    }

    fn check_house_system(&self) -> Result<(), ChartError> {
        let system = self.settings.house_system;
        if system != HouseSystem::WholeSign {
            log::warn!("rejecting unsupported house system {}", system);
            return Err(ChartError::UnsupportedHouseSystem { system });
        }
        Ok(())
    }

    fn assemble(&self, birth: &BirthEvent, jd: f64, raw: &RawPositions) -> Result<Chart, ChartError> {
        let settings = &self.settings;
        let birth_utc = birth.instant_utc()?;

        let ayanamsa = match settings.zodiac {
            Zodiac::Sidereal => Some(AyanamsaValue {
                system: settings.ayanamsa,
                degrees: settings.ayanamsa.degrees_at(jd),
            }),
            Zodiac::Tropical => None,
        };
        let offset = ayanamsa.map_or(0.0, |a| a.degrees);

        let planets = resolve_planets(raw, offset)?;
        log::debug!("resolved {} planets (ayanamsa {:.6})", planets.len(), offset);

        let asc = ascendant(jd, birth.latitude, birth.longitude);
        let mc = midheaven(jd, birth.longitude);
        let lagna =
            AscendantPosition::new(normalize_degrees(asc - offset), normalize_degrees(mc - offset));
        log::debug!("ascendant {:.4} in {}", lagna.longitude, lagna.placement.sign);

        let houses = assign_houses(settings.house_system, &lagna, &planets)?;
        let aspects = self.calculator.compute_aspects(&planets, &settings.aspects);
        let vargas = build_varga_charts(&settings.vargas, &lagna, &planets);

        let moon = planets
            .iter()
            .find(|p| p.graha == Graha::Moon)
            .ok_or(EphemerisError::MissingBody { body: Graha::Moon })?;
        let dasha = compute_vimshottari_dasha(
            birth_utc,
            moon.longitude,
            settings.dasha.level(),
            settings.dasha.balance,
        )?;

        log::debug!(
            "chart assembled: {} aspects, {} vargas, dasha from {}",
            aspects.len(),
            vargas.len(),
            dasha.starting_planet
        );

        Ok(Chart {
            birth: birth.clone(),
            birth_utc,
            julian_day: jd,
            provider: self.provider.name().to_string(),
            zodiac: settings.zodiac,
            ayanamsa,
            house_system: settings.house_system,
            planets,
            ascendant: lagna,
            houses,
            aspects,
            dasha,
            vargas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{RawPosition, StaticProvider};
    use crate::zodiac::Sign;

    fn provider() -> StaticProvider {
        StaticProvider::from_longitudes(&[
            (Graha::Sun, 84.0),
            (Graha::Moon, 44.0 + 23.853),
            (Graha::Mars, 10.0),
            (Graha::Mercury, 70.0),
            (Graha::Jupiter, 95.0),
            (Graha::Venus, 130.0),
            (Graha::Saturn, 200.0),
            (Graha::Rahu, 300.0),
        ])
    }

    fn birth() -> BirthEvent {
        BirthEvent {
            year: 2000,
            month: 1,
            day: 1,
            hour: 12,
            minute: 0,
            second: 0,
            latitude: 51.5,
            longitude: 0.0,
            timezone: "UTC".to_string(),
        }
    }

    fn tropical() -> ChartSettings {
        ChartSettings {
            zodiac: Zodiac::Tropical,
            ..ChartSettings::default()
        }
    }

    #[tokio::test]
    async fn test_tropical_chart_keeps_provider_longitudes() {
        let engine = ChartEngine::new(provider(), tropical());
        let chart = engine.compute(&birth()).await.unwrap();
        assert!(chart.ayanamsa.is_none());
        assert_eq!(chart.planets.len(), 9);
        assert_eq!(chart.planet(Graha::Mars).unwrap().longitude, 10.0);
        assert_eq!(chart.planet(Graha::Ketu).unwrap().longitude, 120.0);
        assert_eq!(chart.houses.len(), 12);
        assert_eq!(chart.provider, "static");
    }

    #[tokio::test]
    async fn test_sidereal_shift_applies_to_planets_and_ascendant() {
        let tropical_engine = ChartEngine::new(provider(), tropical());
        let sidereal_engine = ChartEngine::new(provider(), ChartSettings::default());
        let t = tropical_engine.compute(&birth()).await.unwrap();
        let s = sidereal_engine.compute(&birth()).await.unwrap();

        let ayanamsa = s.ayanamsa.unwrap();
        assert_eq!(ayanamsa.degrees, 23.853);
        let moon = s.planet(Graha::Moon).unwrap();
        assert!((moon.longitude - 44.0).abs() < 1e-9);
        let expected_asc = normalize_degrees(t.ascendant.longitude - ayanamsa.degrees);
        assert!((s.ascendant.longitude - expected_asc).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unsupported_house_system_aborts() {
        let settings = ChartSettings {
            house_system: HouseSystem::Placidus,
            ..ChartSettings::default()
        };
        let engine = ChartEngine::new(provider(), settings);
        let err = engine.compute(&birth()).await.unwrap_err();
        assert!(matches!(
            err,
            ChartError::UnsupportedHouseSystem { system: HouseSystem::Placidus }
        ));
    }

    #[tokio::test]
    async fn test_missing_body_is_provider_error() {
        let partial = StaticProvider::from_longitudes(&[(Graha::Sun, 10.0)]);
        let engine = ChartEngine::new(partial, ChartSettings::default());
        let err = engine.compute(&birth()).await.unwrap_err();
        assert!(matches!(err, ChartError::Provider(EphemerisError::MissingBody { .. })));
    }

    #[tokio::test]
    async fn test_cache_returns_same_chart() {
        let settings = ChartSettings {
            cache: true,
            ..ChartSettings::default()
        };
        let engine = ChartEngine::new(provider(), settings);
        let first = engine.compute(&birth()).await.unwrap();
        let second = engine.compute(&birth()).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(engine.cache().map(ChartCache::len), Some(1));
    }

    #[test]
    fn test_compute_with_positions() {
        let engine = ChartEngine::new(provider(), tropical());
        let mut raw = provided_positions();
        raw.remove(&Graha::Rahu);
        assert!(engine.compute_with_positions(&birth(), &raw).is_err());

        let full = provided_positions();
        let chart = engine.compute_with_positions(&birth(), &full).unwrap();
        assert_eq!(chart.planet(Graha::Saturn).unwrap().placement.sign, Sign::Libra);
    }

    fn provided_positions() -> RawPositions {
        let mut raw = RawPositions::new();
        for (i, body) in Graha::PROVIDED.iter().enumerate() {
            raw.insert(
                *body,
                RawPosition {
                    longitude: 200.0 + i as f64,
                    latitude: 0.0,
                    distance: 1.0,
                    speed: 1.0,
                },
            );
        }
        raw
    }
}
