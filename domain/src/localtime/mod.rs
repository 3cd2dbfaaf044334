//! Local time snapshot, timezone resolution, and report formatting
//!
//! Timezone resolution is table-driven: a city-level table takes
//! priority, then a country-level fallback, then UTC. The tables are
//! intentionally small — they cover the cities the assistant is asked
//! about most, and anything unmapped still gets a well-formed answer.

use crate::city::CityRef;
use serde::{Deserialize, Serialize};

/// City name (normalized) to IANA timezone identifier
const CITY_TIMEZONES: [(&str, &str); 30] = [
    ("london", "Europe/London"),
    ("paris", "Europe/Paris"),
    ("berlin", "Europe/Berlin"),
    ("rome", "Europe/Rome"),
    ("madrid", "Europe/Madrid"),
    ("amsterdam", "Europe/Amsterdam"),
    ("new york", "America/New_York"),
    ("los angeles", "America/Los_Angeles"),
    ("chicago", "America/Chicago"),
    ("toronto", "America/Toronto"),
    ("vancouver", "America/Vancouver"),
    ("tokyo", "Asia/Tokyo"),
    ("beijing", "Asia/Shanghai"),
    ("shanghai", "Asia/Shanghai"),
    ("hong kong", "Asia/Hong_Kong"),
    ("singapore", "Asia/Singapore"),
    ("mumbai", "Asia/Kolkata"),
    ("delhi", "Asia/Kolkata"),
    ("sydney", "Australia/Sydney"),
    ("melbourne", "Australia/Melbourne"),
    ("dubai", "Asia/Dubai"),
    ("moscow", "Europe/Moscow"),
    ("istanbul", "Europe/Istanbul"),
    ("cairo", "Africa/Cairo"),
    ("lagos", "Africa/Lagos"),
    ("johannesburg", "Africa/Johannesburg"),
    ("sao paulo", "America/Sao_Paulo"),
    ("rio de janeiro", "America/Sao_Paulo"),
    ("buenos aires", "America/Argentina/Buenos_Aires"),
    ("mexico city", "America/Mexico_City"),
];

/// Country name or code (normalized) to a representative timezone,
/// used when the city itself is unmapped
const COUNTRY_TIMEZONES: [(&str, &str); 15] = [
    ("us", "America/New_York"),
    ("usa", "America/New_York"),
    ("uk", "Europe/London"),
    ("gb", "Europe/London"),
    ("france", "Europe/Paris"),
    ("germany", "Europe/Berlin"),
    ("italy", "Europe/Rome"),
    ("spain", "Europe/Madrid"),
    ("japan", "Asia/Tokyo"),
    ("china", "Asia/Shanghai"),
    ("india", "Asia/Kolkata"),
    ("australia", "Australia/Sydney"),
    ("canada", "America/Toronto"),
    ("brazil", "America/Sao_Paulo"),
    ("russia", "Europe/Moscow"),
];

/// Resolve a city to an IANA timezone identifier.
///
/// City entries win over country fallbacks; entirely unmapped cities
/// default to `"UTC"` so the provider can still answer.
pub fn timezone_for(city: &CityRef) -> &'static str {
    let name = city.normalized_name();
    if let Some((_, tz)) = CITY_TIMEZONES.iter().find(|(key, _)| *key == name) {
        return tz;
    }

    if let Some(country) = city.normalized_country()
        && let Some((_, tz)) = COUNTRY_TIMEZONES.iter().find(|(key, _)| *key == country)
    {
        return tz;
    }

    "UTC"
}

/// Current local time for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTimeSnapshot {
    /// City the time was asked about
    pub city: String,
    /// IANA timezone identifier the answer is for
    pub timezone: String,
    /// Wall-clock time, `YYYY-MM-DD HH:MM:SS`
    pub current_time: String,
    /// UTC offset, e.g. `+02:00`
    pub utc_offset: String,
    /// Whether daylight saving time is in effect
    pub is_dst: bool,
}

impl LocalTimeSnapshot {
    /// Approximate time used when the time source is unavailable:
    /// the current UTC instant, labelled with the resolved timezone.
    pub fn mock(city: &str, timezone: &str) -> Self {
        Self {
            city: city.to_string(),
            timezone: timezone.to_string(),
            current_time: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            utc_offset: "+00:00".to_string(),
            is_dst: false,
        }
    }

    /// Format the snapshot as the fixed natural-language time report
    pub fn to_report(&self) -> String {
        let dst_suffix = if self.is_dst {
            " (Daylight Saving Time)"
        } else {
            ""
        };

        format!(
            "🕐 Current time in {}:\n\
             ⏰ {}\n\
             🌍 Timezone: {} (UTC{}){}",
            self.city, self.current_time, self.timezone, self.utc_offset, dst_suffix,
        )
    }
}

/// Strip an ISO-8601 datetime down to `YYYY-MM-DD HH:MM:SS` for display:
/// fractional seconds and the offset suffix are dropped, `T` becomes a
/// space.
pub fn display_datetime(iso: &str) -> String {
    let date_time = iso.split('.').next().unwrap_or(iso);
    // No fractional seconds present; trim a trailing offset instead.
    // Position guard keeps the date's own hyphens intact.
    let date_time = match date_time.rfind(['+', '-', 'Z']) {
        Some(pos) if pos > 10 => &date_time[..pos],
        _ => date_time,
    };
    date_time.replacen('T', " ", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_lookup_wins() {
        let city = CityRef::new("Tokyo").with_country("Japan");
        assert_eq!(timezone_for(&city), "Asia/Tokyo");
    }

    #[test]
    fn test_country_fallback_for_unmapped_city() {
        let city = CityRef::new("unknown_city").with_country("Japan");
        assert_eq!(timezone_for(&city), "Asia/Tokyo");
    }

    #[test]
    fn test_unmapped_city_defaults_to_utc() {
        let city = CityRef::new("Nowhereville");
        assert_eq!(timezone_for(&city), "UTC");
    }

    #[test]
    fn test_city_entry_priority_over_country() {
        // Sao Paulo maps directly; the country fallback would give the
        // same answer, but the city entry must be the one consulted
        let city = CityRef::new("Rio de Janeiro").with_country("Brazil");
        assert_eq!(timezone_for(&city), "America/Sao_Paulo");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let city = CityRef::new("LONDON");
        assert_eq!(timezone_for(&city), "Europe/London");
    }

    #[test]
    fn test_display_datetime_strips_fraction_and_offset() {
        assert_eq!(
            display_datetime("2024-06-01T14:30:05.123456+02:00"),
            "2024-06-01 14:30:05"
        );
        assert_eq!(
            display_datetime("2024-06-01T14:30:05+02:00"),
            "2024-06-01 14:30:05"
        );
        assert_eq!(
            display_datetime("2024-06-01T14:30:05Z"),
            "2024-06-01 14:30:05"
        );
        assert_eq!(
            display_datetime("2024-06-01T09:15:00-04:00"),
            "2024-06-01 09:15:00"
        );
        assert_eq!(display_datetime("2024-06-01 14:30:05"), "2024-06-01 14:30:05");
    }

    #[test]
    fn test_report_mentions_dst_only_when_active() {
        let mut snapshot = LocalTimeSnapshot {
            city: "Paris".to_string(),
            timezone: "Europe/Paris".to_string(),
            current_time: "2024-06-01 14:30:05".to_string(),
            utc_offset: "+02:00".to_string(),
            is_dst: true,
        };
        assert!(snapshot.to_report().contains("(Daylight Saving Time)"));

        snapshot.is_dst = false;
        assert!(!snapshot.to_report().contains("Daylight Saving Time"));
    }

    #[test]
    fn test_mock_snapshot_shape() {
        let snapshot = LocalTimeSnapshot::mock("Nowhereville", "UTC");
        assert_eq!(snapshot.timezone, "UTC");
        assert_eq!(snapshot.utc_offset, "+00:00");
        assert!(!snapshot.is_dst);
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(snapshot.current_time.len(), 19);
    }
}
