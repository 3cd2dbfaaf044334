//! Infrastructure layer for city-concierge
//!
//! Concrete adapters for the application layer's ports: the three
//! capability providers backed by external HTTP data sources, the
//! retrying HTTP client they share, and configuration loading.

pub mod config;
pub mod http;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use http::{ApiError, HttpClient};
pub use providers::{GeoDbProvider, OpenWeatherProvider, WorldTimeProvider, build_capabilities};
