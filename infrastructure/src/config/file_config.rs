//! Configuration file schema
//!
//! Every field has a serde default, so a missing file, a partial file,
//! and no file at all are all valid configurations. API keys default to
//! absent, which puts the corresponding provider in degraded mode.

use serde::{Deserialize, Serialize};

/// Root configuration (`concierge.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub weather: WeatherConfig,
    pub geodb: GeoDbConfig,
    pub time: TimeConfig,
    pub http: HttpConfig,
}

/// OpenWeatherMap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// API key; absent means the provider answers from mock data
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }
}

/// GeoDB (places database) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoDbConfig {
    /// RapidAPI key; absent means the provider answers from mock data
    pub api_key: Option<String>,
    pub host: String,
}

impl Default for GeoDbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            host: "wft-geo-db.p.rapidapi.com".to_string(),
        }
    }
}

/// WorldTimeAPI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub base_url: String,
    /// How long resolved times stay cached
    pub cache_ttl_secs: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://worldtimeapi.org/api".to_string(),
            cache_ttl_secs: 300,
        }
    }
}

/// Shared HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Attempt ceiling per request (first try plus retries)
    pub max_attempts: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_attempts: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_upstream_endpoints() {
        let config = FileConfig::default();
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(config.geodb.host, "wft-geo-db.p.rapidapi.com");
        assert_eq!(config.time.base_url, "http://worldtimeapi.org/api");
        assert_eq!(config.time.cache_ttl_secs, 300);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.max_attempts, 3);
    }

    #[test]
    fn test_keys_default_to_degraded_mode() {
        let config = FileConfig::default();
        assert!(config.weather.api_key.is_none());
        assert!(config.geodb.api_key.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: FileConfig = toml_from_str(
            r#"
            [weather]
            api_key = "secret"
            "#,
        );
        assert_eq!(config.weather.api_key.as_deref(), Some("secret"));
        // Untouched sections keep their defaults
        assert_eq!(config.http.max_attempts, 3);
        assert_eq!(config.geodb.host, "wft-geo-db.p.rapidapi.com");
    }

    fn toml_from_str(raw: &str) -> FileConfig {
        use figment::{
            Figment,
            providers::{Format, Serialized, Toml},
        };
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::string(raw))
            .extract()
            .unwrap()
    }
}
