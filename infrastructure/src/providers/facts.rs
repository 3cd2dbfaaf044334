//! GeoDB adapter for the city-facts capability

use crate::http::HttpClient;
use async_trait::async_trait;
use concierge_application::CapabilityPort;
use concierge_domain::facts::{CityProfile, generic_facts};
use concierge_domain::{CapabilityKind, CapabilityOutcome, CityRef};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Degradation marker prefixed to mock reports when the source erred
const UNAVAILABLE_MARKER: &str =
    "⚠️ City database temporarily unavailable. Here's general information:";

/// How many candidates to ask the places database for
const CANDIDATE_LIMIT: usize = 5;

/// One city candidate from the GeoDB search (the fields we use)
#[derive(Debug, Clone, Deserialize)]
struct GeoCity {
    name: String,
    country: Option<String>,
    population: Option<u64>,
    region: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(rename = "elevationMeters")]
    elevation_meters: Option<i64>,
    timezone: Option<String>,
    #[serde(rename = "foundingDate")]
    founding_date: Option<String>,
    area: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    #[serde(default)]
    data: Vec<GeoCity>,
}

/// City-facts provider backed by the GeoDB places database.
///
/// Searches by name prefix ranked by population and picks the candidate
/// whose name matches the query best. An absent API key degrades to the
/// built-in mock profiles.
pub struct GeoDbProvider {
    http: Arc<HttpClient>,
    api_key: Option<String>,
    host: String,
}

impl GeoDbProvider {
    pub fn new(http: Arc<HttpClient>, api_key: Option<String>, host: impl Into<String>) -> Self {
        Self {
            http,
            api_key,
            host: host.into(),
        }
    }

    fn mock_outcome(&self, city: &CityRef, reason: String) -> CapabilityOutcome {
        warn!("Using mock city facts for {}: {}", city, reason);
        let report = CityProfile::mock(city).to_report();
        CapabilityOutcome::degraded(format!("{}\n\n{}", UNAVAILABLE_MARKER, report), reason)
    }
}

/// Pick the best candidate for a query: the first whose normalized name
/// substring-matches the query in either direction, else the top-ranked
/// (most populous) candidate.
fn best_match<'a>(candidates: &'a [GeoCity], query: &str) -> Option<&'a GeoCity> {
    let query = query.trim().to_lowercase();
    candidates
        .iter()
        .find(|candidate| {
            let name = candidate.name.to_lowercase();
            name.contains(&query) || query.contains(&name)
        })
        .or_else(|| candidates.first())
}

/// Build a profile from the matched candidate, keeping the resolved
/// spelling and synthesizing the descriptive facts.
fn profile_from(candidate: &GeoCity, city: &CityRef) -> CityProfile {
    let name = candidate.name.clone();
    let country = candidate
        .country
        .clone()
        .or_else(|| city.country().map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string());

    CityProfile {
        facts: generic_facts(&name, &country),
        city: name,
        country,
        population: candidate.population,
        region: candidate.region.clone(),
        latitude: candidate.latitude,
        longitude: candidate.longitude,
        elevation: candidate.elevation_meters,
        timezone: candidate.timezone.clone(),
        founded: candidate.founding_date.clone(),
        area: candidate.area,
    }
}

#[async_trait]
impl CapabilityPort for GeoDbProvider {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Facts
    }

    async fn fetch(&self, city: &CityRef) -> CapabilityOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return self.mock_outcome(city, "GeoDB API key not configured".to_string());
        };

        let url = format!("https://{}/v1/geo/cities", self.host);
        let limit = CANDIDATE_LIMIT.to_string();
        let result = self
            .http
            .get_json(
                "GeoDB",
                &url,
                &[
                    ("namePrefix", city.name()),
                    ("limit", limit.as_str()),
                    ("offset", "0"),
                    ("sort", "-population"),
                ],
                &[
                    ("X-RapidAPI-Key", api_key),
                    ("X-RapidAPI-Host", self.host.as_str()),
                ],
            )
            .await;

        match result {
            Ok(payload) => match serde_json::from_value::<GeoSearchResponse>(payload) {
                Ok(response) => match best_match(&response.data, city.name()) {
                    Some(candidate) => {
                        info!("Retrieved city facts for {} from GeoDB", city);
                        CapabilityOutcome::success(profile_from(candidate, city).to_report())
                    }
                    None => self.mock_outcome(
                        city,
                        format!("no places database entry for '{}'", city.name()),
                    ),
                },
                Err(error) => {
                    self.mock_outcome(city, format!("unexpected response shape: {}", error))
                }
            },
            Err(error) => self.mock_outcome(city, error.to_string()),
        }
    }
}
