pub mod enums;
pub mod error;
pub mod params;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Statistic;
pub use error::CoreError;
pub use params::AnalyticsParams;
pub use structs::{PriceObservation, ReturnObservation};
