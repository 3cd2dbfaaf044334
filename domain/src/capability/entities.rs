//! Capability entities: kinds, call records, and the aggregate briefing

use super::value_objects::CapabilityOutcome;
use crate::city::CityRef;
use serde::{Deserialize, Serialize};

/// The closed set of capabilities the system knows about.
///
/// The briefing invokes them in the fixed order facts, weather, time —
/// see [`CapabilityKind::BRIEFING_ORDER`]. The order is not data
/// dependent; it keeps call records reproducible across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    /// General city information: population, coordinates, facts
    Facts,
    /// Current weather conditions
    Weather,
    /// Current local time and timezone
    Time,
}

impl CapabilityKind {
    /// Invocation order used by the briefing use case
    pub const BRIEFING_ORDER: [CapabilityKind; 3] = [Self::Facts, Self::Weather, Self::Time];

    /// Canonical tool name, stable across the wire and logs
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Facts => "get_city_facts",
            Self::Weather => "get_weather",
            Self::Time => "get_time",
        }
    }

    /// Fixed emoji-labelled header used for this capability's section
    /// in a combined report
    pub fn section_header(&self) -> &'static str {
        match self {
            Self::Facts => "📍 **City Information:**",
            Self::Weather => "🌤️ **Current Weather:**",
            Self::Time => "⏰ **Local Time:**",
        }
    }
}

impl std::fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tool_name())
    }
}

/// Audit record for one capability invocation within a briefing run.
///
/// Append-only: the use case pushes one record per invocation, in
/// invocation order, regardless of outcome. Surfaced to callers as a
/// trace of what was asked and what came back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityCall {
    /// Which capability was invoked
    pub capability: CapabilityKind,
    /// The parameters it was invoked with
    pub city: CityRef,
    /// What came back
    pub outcome: CapabilityOutcome,
}

impl CapabilityCall {
    pub fn new(capability: CapabilityKind, city: CityRef, outcome: CapabilityOutcome) -> Self {
        Self {
            capability,
            city,
            outcome,
        }
    }
}

/// The aggregate result of one briefing run.
///
/// Built exactly once per run. `reasoning` states intent before any
/// capability is invoked; `calls` preserves invocation order; and
/// `combined_report` concatenates every capability's section plus the
/// trailing visit-planning tips, whether or not the capabilities
/// succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityBriefing {
    /// One-line statement of what the run set out to do
    pub reasoning: String,
    /// Per-capability audit trail, in invocation order
    pub calls: Vec<CapabilityCall>,
    /// The merged natural-language report
    pub combined_report: String,
}

impl CityBriefing {
    /// Serialize the briefing for API responses
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Count of calls that produced no usable answer
    pub fn failed_calls(&self) -> usize {
        self.calls.iter().filter(|c| c.outcome.is_failed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_briefing_order_is_facts_weather_time() {
        assert_eq!(
            CapabilityKind::BRIEFING_ORDER,
            [
                CapabilityKind::Facts,
                CapabilityKind::Weather,
                CapabilityKind::Time
            ]
        );
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(CapabilityKind::Facts.tool_name(), "get_city_facts");
        assert_eq!(CapabilityKind::Weather.tool_name(), "get_weather");
        assert_eq!(CapabilityKind::Time.tool_name(), "get_time");
    }

    #[test]
    fn test_section_headers_are_distinct() {
        let headers: std::collections::HashSet<_> = CapabilityKind::BRIEFING_ORDER
            .iter()
            .map(|k| k.section_header())
            .collect();
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_briefing_json_roundtrip() {
        let city = CityRef::new("Paris").with_country("France");
        let briefing = CityBriefing {
            reasoning: "gathering information".to_string(),
            calls: vec![CapabilityCall::new(
                CapabilityKind::Facts,
                city,
                CapabilityOutcome::success("facts"),
            )],
            combined_report: "facts\n\ntips".to_string(),
        };

        let json = briefing.to_json();
        let parsed: CityBriefing = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.reasoning, briefing.reasoning);
        assert_eq!(parsed.calls.len(), 1);
        assert_eq!(parsed.combined_report, briefing.combined_report);
    }

    #[test]
    fn test_failed_calls_count() {
        let city = CityRef::new("Berlin");
        let briefing = CityBriefing {
            reasoning: String::new(),
            calls: vec![
                CapabilityCall::new(
                    CapabilityKind::Facts,
                    city.clone(),
                    CapabilityOutcome::success("ok"),
                ),
                CapabilityCall::new(
                    CapabilityKind::Weather,
                    city.clone(),
                    CapabilityOutcome::failed(super::super::CapabilityError::new(
                        "get_weather",
                        &city,
                        "boom",
                    )),
                ),
            ],
            combined_report: String::new(),
        };
        assert_eq!(briefing.failed_calls(), 1);
    }
}
