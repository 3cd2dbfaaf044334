//! Capability provider adapters
//!
//! One adapter per capability, all sharing a single retrying
//! [`HttpClient`]. Each adapter is read-only after construction and is
//! wired into the briefing use case at the composition root.

pub mod facts;
pub mod localtime;
pub mod weather;

pub use facts::GeoDbProvider;
pub use localtime::WorldTimeProvider;
pub use weather::OpenWeatherProvider;

use crate::config::FileConfig;
use crate::http::HttpClient;
use concierge_application::CapabilityPort;
use std::sync::Arc;
use std::time::Duration;

/// Build the full provider set from configuration.
///
/// Returns the providers in briefing order: facts, weather, time.
pub fn build_capabilities(
    config: &FileConfig,
) -> (
    Arc<dyn CapabilityPort>,
    Arc<dyn CapabilityPort>,
    Arc<dyn CapabilityPort>,
) {
    let http = Arc::new(HttpClient::new(
        Duration::from_secs(config.http.timeout_secs),
        config.http.max_attempts,
    ));

    let facts = Arc::new(GeoDbProvider::new(
        http.clone(),
        config.geodb.api_key.clone(),
        config.geodb.host.clone(),
    ));
    let weather = Arc::new(OpenWeatherProvider::new(
        http.clone(),
        config.weather.api_key.clone(),
        config.weather.base_url.clone(),
    ));
    let time = Arc::new(WorldTimeProvider::new(
        http,
        config.time.base_url.clone(),
        Duration::from_secs(config.time.cache_ttl_secs),
    ));

    (facts, weather, time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::CapabilityKind;

    #[test]
    fn test_build_capabilities_order_matches_briefing() {
        let config = FileConfig::default();
        let (facts, weather, time) = build_capabilities(&config);

        assert_eq!(facts.kind(), CapabilityKind::Facts);
        assert_eq!(weather.kind(), CapabilityKind::Weather);
        assert_eq!(time.kind(), CapabilityKind::Time);
    }
}
