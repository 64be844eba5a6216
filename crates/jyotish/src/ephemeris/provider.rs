use async_trait::async_trait;
use std::sync::Arc;

use crate::ephemeris::types::{EphemerisError, RawPosition, RawPositions};
use crate::graha::Graha;

/// Source of raw planetary positions for a Julian Day (UT).
///
/// Implementations supply the eight bodies in [`Graha::PROVIDED`]. Ketu is
/// derived by the engine and ignored if a provider returns it.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn positions(&self, jd_ut: f64) -> Result<RawPositions, EphemerisError>;
}

#[async_trait]
impl<P: PositionProvider + ?Sized> PositionProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn positions(&self, jd_ut: f64) -> Result<RawPositions, EphemerisError> {
        (**self).positions(jd_ut).await
    }
}

/// Provider serving a fixed table of positions regardless of the date.
///
/// Useful when positions were obtained elsewhere, and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    positions: RawPositions,
}

impl StaticProvider {
    pub fn new(positions: RawPositions) -> Self {
        Self { positions }
    }

    /// Build from bare longitudes; latitude 0, distance 1 AU, speed 1°/day.
    pub fn from_longitudes(longitudes: &[(Graha, f64)]) -> Self {
        let positions = longitudes
            .iter()
            .map(|&(body, longitude)| {
                (
                    body,
                    RawPosition {
                        longitude,
                        latitude: 0.0,
                        distance: 1.0,
                        speed: 1.0,
                    },
                )
            })
            .collect();
        Self { positions }
    }

    /// Replace one body's position.
    pub fn with_position(mut self, body: Graha, position: RawPosition) -> Self {
        self.positions.insert(body, position);
        self
    }
}

#[async_trait]
impl PositionProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn positions(&self, _jd_ut: f64) -> Result<RawPositions, EphemerisError> {
        Ok(self.positions.clone())
    }
}
