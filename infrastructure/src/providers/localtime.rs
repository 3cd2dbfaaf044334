//! WorldTimeAPI adapter for the local-time capability
//!
//! The only provider with a cache: time answers change slowly relative
//! to request volume, so successful (and degraded) lookups are kept for
//! a short TTL, keyed by the requested city. The cache is an explicit
//! lookup-then-store step inside `fetch`, not a wrapper around it.

use crate::http::HttpClient;
use async_trait::async_trait;
use concierge_application::CapabilityPort;
use concierge_domain::localtime::{LocalTimeSnapshot, display_datetime, timezone_for};
use concierge_domain::{CapabilityKind, CapabilityOutcome, CityRef};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Degradation marker prefixed to mock reports when the source erred
const UNAVAILABLE_MARKER: &str = "⚠️ Time service temporarily unavailable. Approximate time:";

/// Default cache lifetime for resolved times
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Timezone payload from WorldTimeAPI (the fields we use)
#[derive(Debug, Deserialize)]
struct WtResponse {
    datetime: String,
    timezone: String,
    utc_offset: String,
    dst: bool,
}

struct CacheEntry {
    stored_at: Instant,
    outcome: CapabilityOutcome,
}

/// Local-time provider backed by WorldTimeAPI.
///
/// Needs no API key. Cities the timezone table does not know fall back
/// to their country's representative timezone, then to UTC, so this
/// provider answers for any input.
pub struct WorldTimeProvider {
    http: Arc<HttpClient>,
    base_url: String,
    cache_ttl: Duration,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl WorldTimeProvider {
    pub fn new(http: Arc<HttpClient>, base_url: impl Into<String>, cache_ttl: Duration) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            cache_ttl,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cache_key(city: &CityRef) -> String {
        format!(
            "{}|{}",
            city.normalized_name(),
            city.normalized_country().unwrap_or_default()
        )
    }

    fn cache_lookup(&self, key: &str) -> Option<CapabilityOutcome> {
        let cache = self.cache.lock().ok()?;
        let entry = cache.get(key)?;
        if entry.stored_at.elapsed() < self.cache_ttl {
            Some(entry.outcome.clone())
        } else {
            None
        }
    }

    fn cache_store(&self, key: String, outcome: &CapabilityOutcome) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(
                key,
                CacheEntry {
                    stored_at: Instant::now(),
                    outcome: outcome.clone(),
                },
            );
        }
    }

    fn mock_outcome(&self, city: &CityRef, timezone: &str, reason: String) -> CapabilityOutcome {
        warn!("Using mock time data for {}: {}", city, reason);
        let report = LocalTimeSnapshot::mock(city.name(), timezone).to_report();
        CapabilityOutcome::degraded(format!("{}\n\n{}", UNAVAILABLE_MARKER, report), reason)
    }
}

#[async_trait]
impl CapabilityPort for WorldTimeProvider {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Time
    }

    async fn fetch(&self, city: &CityRef) -> CapabilityOutcome {
        let key = Self::cache_key(city);
        if let Some(outcome) = self.cache_lookup(&key) {
            debug!("Time cache hit for {}", city);
            return outcome;
        }

        let timezone = timezone_for(city);
        let url = format!("{}/timezone/{}", self.base_url, timezone);

        let outcome = match self.http.get_json("WorldTimeAPI", &url, &[], &[]).await {
            Ok(payload) => match serde_json::from_value::<WtResponse>(payload) {
                Ok(response) => {
                    let snapshot = LocalTimeSnapshot {
                        city: city.name().to_string(),
                        timezone: response.timezone,
                        current_time: display_datetime(&response.datetime),
                        utc_offset: response.utc_offset,
                        is_dst: response.dst,
                    };
                    info!("Retrieved time data for {}", city);
                    CapabilityOutcome::success(snapshot.to_report())
                }
                Err(error) => self.mock_outcome(
                    city,
                    timezone,
                    format!("unexpected response shape: {}", error),
                ),
            },
            Err(error) => self.mock_outcome(city, timezone, error.to_string()),
        };

        // Degraded answers are cached too: a flapping source should not
        // be re-queried on every request within the TTL
        self.cache_store(key, &outcome);
        outcome
    }
}
