pub mod cache;
pub mod engine;
pub mod types;

pub use cache::ChartCache;
pub use engine::ChartEngine;
pub use types::{AyanamsaValue, Chart};
