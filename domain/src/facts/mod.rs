//! City profile, generic fact synthesis, and report formatting
//!
//! The profile is best-effort: every field except country is optional,
//! and the report only renders what is known. The mock table carries a
//! handful of well-known cities with fixed values; everything else gets
//! a generic templated profile so unknown cities still produce a
//! complete, non-empty report.

use crate::city::CityRef;
use serde::{Deserialize, Serialize};

/// Descriptive information about one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityProfile {
    /// City name as resolved
    pub city: String,
    /// Country the city is in
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    /// Administrative region or state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Elevation in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Founding date, free-form ("43 AD (as Londinium)")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded: Option<String>,
    /// Area in square kilometers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Short descriptive facts, rendered as a numbered list
    #[serde(default)]
    pub facts: Vec<String>,
}

impl CityProfile {
    /// Profile used when the places database is unavailable.
    ///
    /// A few well-known cities have fixed representative values; any
    /// other city gets a generic profile referencing its own name.
    pub fn mock(city: &CityRef) -> Self {
        match city.normalized_name().as_str() {
            "london" => Self {
                city: city.name().to_string(),
                country: "United Kingdom".to_string(),
                population: Some(8_982_000),
                region: Some("Greater London".to_string()),
                latitude: Some(51.5074),
                longitude: Some(-0.1278),
                elevation: Some(35),
                timezone: Some("Europe/London".to_string()),
                founded: Some("43 AD (as Londinium)".to_string()),
                area: Some(1572.0),
                facts: vec![
                    "London is home to over 8 million people, making it the largest city in the UK"
                        .to_string(),
                    "The city has over 170 museums and more than 11,000 listed buildings"
                        .to_string(),
                    "London's Underground is the oldest subway system in the world, opened in 1863"
                        .to_string(),
                    "The city is built on the River Thames, which flows for 215 miles through southern England"
                        .to_string(),
                    "London has been the capital of England for nearly 1,000 years".to_string(),
                ],
            },
            "paris" => Self {
                city: city.name().to_string(),
                country: "France".to_string(),
                population: Some(2_161_000),
                region: Some("Île-de-France".to_string()),
                latitude: Some(48.8566),
                longitude: Some(2.3522),
                elevation: Some(35),
                timezone: Some("Europe/Paris".to_string()),
                founded: Some("3rd century BC".to_string()),
                area: Some(105.4),
                facts: vec![
                    "Paris is known as the 'City of Light' due to its early adoption of street lighting"
                        .to_string(),
                    "The Eiffel Tower was built for the 1889 World's Fair and was initially criticized"
                        .to_string(),
                    "Paris has 20 administrative districts called arrondissements".to_string(),
                    "The Louvre Museum is the world's largest art museum".to_string(),
                    "Paris is home to over 400 parks and gardens".to_string(),
                ],
            },
            "tokyo" => Self {
                city: city.name().to_string(),
                country: "Japan".to_string(),
                population: Some(13_960_000),
                region: Some("Kantō".to_string()),
                latitude: Some(35.6762),
                longitude: Some(139.6503),
                elevation: Some(40),
                timezone: Some("Asia/Tokyo".to_string()),
                founded: Some("1457 (as Edo)".to_string()),
                area: Some(2194.0),
                facts: vec![
                    "Tokyo is the most populous metropolitan area in the world".to_string(),
                    "The city was originally called Edo before being renamed Tokyo in 1868"
                        .to_string(),
                    "Tokyo has the world's busiest train stations and most extensive urban rail network"
                        .to_string(),
                    "The city is built on the Kantō Plain and sits on Tokyo Bay".to_string(),
                ],
            },
            _ => {
                let name = city.name();
                Self {
                    city: name.to_string(),
                    country: city.country().unwrap_or("Unknown").to_string(),
                    population: Some(500_000),
                    region: Some("Unknown Region".to_string()),
                    latitude: Some(0.0),
                    longitude: Some(0.0),
                    elevation: Some(100),
                    timezone: Some("UTC".to_string()),
                    founded: Some("Unknown".to_string()),
                    area: Some(100.0),
                    facts: vec![
                        format!("{} is a city with rich history and culture", name),
                        "The city offers many attractions for visitors".to_string(),
                        format!("{} has a unique local cuisine and traditions", name),
                    ],
                }
            }
        }
    }

    /// Format the profile as the fixed natural-language facts report
    pub fn to_report(&self) -> String {
        let mut report = format!("🏙️ **{}, {}**\n\n", self.city, self.country);

        if let Some(population) = self.population {
            report.push_str(&format!(
                "👥 Population: {}\n",
                group_thousands(population)
            ));
        }
        if let Some(region) = &self.region {
            report.push_str(&format!("📍 Region: {}\n", region));
        }
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            report.push_str(&format!("🌍 Coordinates: {:.4}, {:.4}\n", lat, lon));
        }
        if let Some(elevation) = self.elevation {
            report.push_str(&format!("⛰️ Elevation: {}m above sea level\n", elevation));
        }
        if let Some(area) = self.area {
            report.push_str(&format!("📏 Area: {:.1} km²\n", area));
        }
        if let Some(founded) = &self.founded {
            report.push_str(&format!("🏛️ Founded: {}\n", founded));
        }
        if let Some(timezone) = &self.timezone {
            report.push_str(&format!("🕐 Timezone: {}\n", timezone));
        }

        if !self.facts.is_empty() {
            report.push_str("\n✨ **Interesting Facts:**\n");
            for (i, fact) in self.facts.iter().enumerate() {
                report.push_str(&format!("{}. {}\n", i + 1, fact));
            }
        }

        report.trim_end().to_string()
    }
}

/// Templated descriptive facts for a city resolved from the places
/// database (the database itself carries no prose).
pub fn generic_facts(city: &str, country: &str) -> Vec<String> {
    vec![
        format!("{} is located in {} and has a rich cultural heritage", city, country),
        "The city offers various attractions for tourists and locals alike".to_string(),
        format!("{} has its own unique architectural style and landmarks", city),
        format!("Local cuisine in {} reflects the regional traditions of {}", city, country),
        format!("The city plays an important role in the economy and culture of {}", country),
    ]
}

/// Render an integer with thousands separators (8982000 -> "8,982,000")
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(8_982_000), "8,982,000");
    }

    #[test]
    fn test_mock_london_fixed_values() {
        let profile = CityProfile::mock(&CityRef::new("London"));
        assert_eq!(profile.population, Some(8_982_000));
        assert_eq!(profile.country, "United Kingdom");
        assert_eq!(profile.founded.as_deref(), Some("43 AD (as Londinium)"));

        let report = profile.to_report();
        assert!(report.contains("Population: 8,982,000"));
        assert!(report.contains("Greater London"));
    }

    #[test]
    fn test_mock_unknown_city_is_generic_but_named() {
        let profile = CityProfile::mock(&CityRef::new("Nowhereville"));
        assert_eq!(profile.population, Some(500_000));
        assert_eq!(profile.country, "Unknown");

        let report = profile.to_report();
        assert!(report.contains("Nowhereville"));
        assert!(report.contains("rich history and culture"));
    }

    #[test]
    fn test_mock_keeps_caller_spelling() {
        // The caller's capitalization is preserved even for table hits
        let profile = CityProfile::mock(&CityRef::new("LONDON"));
        assert_eq!(profile.city, "LONDON");
        assert_eq!(profile.population, Some(8_982_000));
    }

    #[test]
    fn test_report_skips_unknown_fields() {
        let profile = CityProfile {
            city: "Smalltown".to_string(),
            country: "Atlantis".to_string(),
            population: None,
            region: None,
            latitude: None,
            longitude: None,
            elevation: None,
            timezone: None,
            founded: None,
            area: None,
            facts: vec![],
        };

        let report = profile.to_report();
        assert_eq!(report, "🏙️ **Smalltown, Atlantis**");
    }

    #[test]
    fn test_generic_facts_reference_city_and_country() {
        let facts = generic_facts("Berlin", "Germany");
        assert_eq!(facts.len(), 5);
        assert!(facts[0].contains("Berlin"));
        assert!(facts[0].contains("Germany"));
    }

    #[test]
    fn test_coordinates_require_both_axes() {
        let mut profile = CityProfile::mock(&CityRef::new("Paris"));
        profile.longitude = None;
        assert!(!profile.to_report().contains("Coordinates"));
    }
}
