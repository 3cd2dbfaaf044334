//! OpenWeatherMap adapter for the weather capability

use crate::http::HttpClient;
use async_trait::async_trait;
use concierge_application::CapabilityPort;
use concierge_domain::{
    CapabilityError, CapabilityKind, CapabilityOutcome, CityRef, WeatherSnapshot,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Degradation marker prefixed to mock reports when the source erred
const UNAVAILABLE_MARKER: &str = "⚠️ Weather service temporarily unavailable. Here's sample data:";

/// Current-conditions payload from OpenWeatherMap (the fields we use)
#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: String,
    sys: OwmSys,
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: u32,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    deg: Option<f64>,
}

/// Weather provider backed by the OpenWeatherMap current-conditions API.
///
/// An absent API key is a valid degraded-mode configuration: the
/// provider answers from the representative mock snapshot instead of
/// treating it as an error.
pub struct OpenWeatherProvider {
    http: Arc<HttpClient>,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(http: Arc<HttpClient>, api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.into(),
        }
    }

    fn mock_outcome(&self, city: &CityRef, reason: String, with_marker: bool) -> CapabilityOutcome {
        warn!("Using mock weather data for {}: {}", city, reason);
        let report = WeatherSnapshot::mock(city.name(), city.country()).to_report();
        let report = if with_marker {
            format!("{}\n\n{}", UNAVAILABLE_MARKER, report)
        } else {
            report
        };
        CapabilityOutcome::degraded(report, reason)
    }
}

/// Convert a raw OpenWeatherMap payload into a snapshot.
///
/// Separated from the provider so tests can drive it with fixture JSON.
fn parse_snapshot(payload: serde_json::Value) -> Result<WeatherSnapshot, String> {
    let response: OwmResponse =
        serde_json::from_value(payload).map_err(|e| format!("unexpected response shape: {}", e))?;

    let conditions = response
        .weather
        .first()
        .map(|c| c.description.clone())
        .ok_or_else(|| "response carried no weather conditions".to_string())?;

    Ok(WeatherSnapshot {
        city: response.name,
        country: response.sys.country,
        temperature: response.main.temp,
        feels_like: response.main.feels_like,
        humidity: response.main.humidity,
        pressure: response.main.pressure,
        conditions,
        wind_speed: response.wind.speed,
        wind_direction: response.wind.deg,
        visibility: response.visibility,
    })
}

#[async_trait]
impl CapabilityPort for OpenWeatherProvider {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Weather
    }

    async fn fetch(&self, city: &CityRef) -> CapabilityOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return self.mock_outcome(
                city,
                "OpenWeatherMap API key not configured".to_string(),
                false,
            );
        };

        let url = format!("{}/weather", self.base_url);
        let query = city.query_string();
        let result = self
            .http
            .get_json(
                "OpenWeatherMap",
                &url,
                &[("q", query.as_str()), ("appid", api_key), ("units", "metric")],
                &[],
            )
            .await;

        match result {
            Ok(payload) => match parse_snapshot(payload) {
                Ok(snapshot) => {
                    info!("Retrieved weather data for {}", city);
                    CapabilityOutcome::success(snapshot.to_report())
                }
                // A body we cannot make sense of is an internal
                // contract violation, not a degraded source
                Err(message) => CapabilityOutcome::failed(CapabilityError::new(
                    self.kind().tool_name(),
                    city,
                    message,
                )),
            },
            // Transport, status, and decode failures all take the
            // mock-data path; retry already happened inside get_json
            Err(error) => self.mock_outcome(city, error.to_string(), true),
        }
    }
}
