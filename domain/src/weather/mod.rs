//! Weather snapshot and report formatting
//!
//! Pure data plus formatting; fetching lives in the infrastructure
//! layer. Units follow the upstream source: Celsius, m/s, hPa, meters.

use serde::{Deserialize, Serialize};

/// 16-point compass rose, clockwise from north
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Convert a wind direction in degrees to a 16-point compass bearing
pub fn compass_bearing(degrees: f64) -> &'static str {
    let index = ((degrees.rem_euclid(360.0) + 11.25) / 22.5) as usize % 16;
    COMPASS_POINTS[index]
}

/// Current weather conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Resolved city name
    pub city: String,
    /// Resolved country name or code
    pub country: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage
    pub humidity: u32,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Textual conditions, e.g. "partly cloudy"
    pub conditions: String,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction in degrees, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<f64>,
    /// Visibility in meters, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<u32>,
}

impl WeatherSnapshot {
    /// Representative conditions used when the weather source is
    /// unavailable: mild, partly cloudy, light southerly wind.
    pub fn mock(city: &str, country: Option<&str>) -> Self {
        Self {
            city: city.to_string(),
            country: country.unwrap_or("Unknown").to_string(),
            temperature: 20.5,
            feels_like: 22.0,
            humidity: 65,
            pressure: 1013,
            conditions: "partly cloudy".to_string(),
            wind_speed: 3.2,
            wind_direction: Some(180.0),
            visibility: Some(10_000),
        }
    }

    /// Format the snapshot as the fixed natural-language weather report.
    ///
    /// Fahrenheit is derived (`C * 9/5 + 32`), both temperatures render
    /// to one decimal, and the wind direction (when present) is given as
    /// a compass bearing.
    pub fn to_report(&self) -> String {
        let temp_f = self.temperature * 9.0 / 5.0 + 32.0;

        let mut report = format!(
            "Current weather in {}, {}:\n\
             🌡️ Temperature: {:.1}°C ({:.1}°F)\n\
             🤔 Feels like: {:.1}°C\n\
             ☁️ Conditions: {}\n\
             💧 Humidity: {}%\n\
             🌬️ Wind: {:.1} m/s",
            self.city,
            self.country,
            self.temperature,
            temp_f,
            self.feels_like,
            title_case(&self.conditions),
            self.humidity,
            self.wind_speed,
        );

        if let Some(degrees) = self.wind_direction {
            report.push_str(&format!(" from {}", compass_bearing(degrees)));
        }

        report.push_str(&format!("\n🔍 Pressure: {} hPa", self.pressure));

        if let Some(visibility) = self.visibility {
            report.push_str(&format!(
                "\n👁️ Visibility: {:.1} km",
                f64::from(visibility) / 1000.0
            ));
        }

        report
    }
}

/// Capitalize the first letter of every word ("light rain" -> "Light Rain")
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
