pub mod adapter;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use provider::{PositionProvider, StaticProvider};
pub use types::{EphemerisConfig, EphemerisError, NodeType, RawPosition, RawPositions};
