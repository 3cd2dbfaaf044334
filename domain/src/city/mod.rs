//! City reference value object

use serde::{Deserialize, Serialize};

/// A reference to a real-world city (Value Object)
///
/// Identifies the subject of a capability query. The optional country
/// disambiguates when multiple places share a name ("Paris, France" vs
/// "Paris, US"). Immutable once constructed; created per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRef {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

impl CityRef {
    /// Create a new city reference
    ///
    /// # Panics
    /// Panics if the name is empty or only whitespace
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.trim().is_empty(), "City name cannot be empty");
        Self {
            name,
            country: None,
        }
    }

    /// Try to create a city reference, returning None if the name is blank
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self {
                name,
                country: None,
            })
        }
    }

    /// Attach a disambiguating country
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Attach an optional disambiguating country
    pub fn with_country_opt(mut self, country: Option<String>) -> Self {
        self.country = country;
        self
    }

    /// Get the city name as given
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the disambiguating country, if any
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Lowercased, trimmed name used as a lookup key in static tables
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Lowercased country used as a fallback lookup key
    pub fn normalized_country(&self) -> Option<String> {
        self.country.as_deref().map(|c| c.trim().to_lowercase())
    }

    /// Query string for name-based API lookups: `"name"` or `"name,country"`
    pub fn query_string(&self) -> String {
        match &self.country {
            Some(country) => format!("{},{}", self.name, country),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Display for CityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}, {}", self.name, country),
            None => write!(f, "{}", self.name),
        }
    }
}
