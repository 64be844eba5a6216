//! Vedic (sidereal) birth chart computation.
//!
//! A [`BirthEvent`] goes through a [`ChartEngine`] and comes out as an
//! immutable [`Chart`]: nine graha positions, the Lagna, whole-sign houses,
//! aspects, divisional charts and the Vimshottari dasha tree. Planetary
//! positions come from a [`PositionProvider`]; the Swiss Ephemeris adapter
//! is the production one.

pub mod ascendant;
pub mod aspects;
pub mod ayanamsa;
pub mod birth;
pub mod chart;
pub mod config;
pub mod dasha;
pub mod ephemeris;
pub mod error;
pub mod graha;
pub mod houses;
pub mod positions;
pub mod time;
pub mod vargas;
pub mod zodiac;

pub use ayanamsa::{Ayanamsa, Zodiac};
pub use birth::BirthEvent;
pub use chart::{Chart, ChartEngine};
pub use config::ChartSettings;
pub use dasha::{CurrentDasha, DashaBalance, DashaLevel, DashaPeriod, VimshottariTimeline};
pub use ephemeris::{PositionProvider, StaticProvider, SwissEphemerisAdapter};
pub use error::{ChartError, ConfigError, ValidationError};
pub use graha::Graha;
pub use houses::HouseSystem;
pub use zodiac::{Nakshatra, Sign};
