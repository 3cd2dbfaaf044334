//! Plan Visit use case — the composite briefing over all capabilities.
//!
//! Runs every capability provider for one city, records each call, and
//! merges the reports into a single briefing. The use case itself never
//! fails: a provider that comes back `Failed` contributes an
//! "unavailable" section, and the worst possible output is a briefing
//! where every section is unavailable plus the static planning tips.
//!
//! Invocation order is fixed (facts, then weather, then time) and
//! sequential. Providers are independent, so nothing forces this order
//! beyond keeping the call trace reproducible for auditing and tests —
//! which is exactly why it is fixed.

use crate::ports::capability::CapabilityPort;
use concierge_domain::{CapabilityCall, CapabilityKind, CityBriefing, CityRef};
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for assembling a full city briefing.
///
/// Holds one provider per [`CapabilityKind`], injected by the
/// composition root. Providers carry no per-request state, so the use
/// case is freely shareable across concurrent requests.
pub struct PlanVisitUseCase {
    facts: Arc<dyn CapabilityPort>,
    weather: Arc<dyn CapabilityPort>,
    time: Arc<dyn CapabilityPort>,
}

impl PlanVisitUseCase {
    pub fn new(
        facts: Arc<dyn CapabilityPort>,
        weather: Arc<dyn CapabilityPort>,
        time: Arc<dyn CapabilityPort>,
    ) -> Self {
        Self {
            facts,
            weather,
            time,
        }
    }

    fn provider_for(&self, kind: CapabilityKind) -> &Arc<dyn CapabilityPort> {
        match kind {
            CapabilityKind::Facts => &self.facts,
            CapabilityKind::Weather => &self.weather,
            CapabilityKind::Time => &self.time,
        }
    }

    /// Run all capabilities for the city and assemble the briefing.
    ///
    /// Infallible by contract: callers always receive a briefing
    /// object, never an error.
    pub async fn execute(&self, city: &CityRef) -> CityBriefing {
        let reasoning = format!(
            "To help you plan your visit to {}, I'll gather comprehensive information \
             by checking city facts, current weather conditions, and local time.",
            city.name()
        );

        info!("Planning visit for {}", city);

        let mut calls = Vec::with_capacity(CapabilityKind::BRIEFING_ORDER.len());
        let mut sections = Vec::with_capacity(CapabilityKind::BRIEFING_ORDER.len() + 1);

        for kind in CapabilityKind::BRIEFING_ORDER {
            info!("Invoking {} for {}", kind, city);
            let outcome = self.provider_for(kind).fetch(city).await;

            let section = match outcome.report_text() {
                Some(report) => format!("{}\n{}", kind.section_header(), report),
                None => {
                    warn!(
                        "{} produced no usable answer for {}: {}",
                        kind,
                        city,
                        outcome.reason().unwrap_or("unknown")
                    );
                    format!("{} Currently unavailable", kind.section_header())
                }
            };

            sections.push(section);
            calls.push(CapabilityCall::new(kind, city.clone(), outcome));
        }

        sections.push(visit_tips(city.name()));

        CityBriefing {
            reasoning,
            calls,
            combined_report: sections.join("\n\n"),
        }
    }
}

/// Static visit-planning tips appended to every briefing.
///
/// Deliberately not derived from provider output: the block renders the
/// same whether every capability succeeded or every one degraded.
pub fn visit_tips(city: &str) -> String {
    let header = format!("🎯 **Visit Planning Tips for {}:**", city);
    [
        header.as_str(),
        "• Check local events and festivals happening during your visit",
        "• Research popular attractions and book tickets in advance",
        "• Consider the weather when packing and planning outdoor activities",
        "• Look into local transportation options and city passes",
        "• Try local cuisine and visit recommended restaurants",
        "• Learn a few basic phrases in the local language",
        "• Check visa requirements and travel advisories",
        "",
        "💡 **Pro Tip:** Use this information to plan your itinerary and make the most of your visit!",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use concierge_domain::{CapabilityError, CapabilityOutcome};

    /// Stub provider returning a canned outcome
    struct StubProvider {
        kind: CapabilityKind,
        outcome: CapabilityOutcome,
    }

    impl StubProvider {
        fn ok(kind: CapabilityKind, report: &str) -> Arc<dyn CapabilityPort> {
            Arc::new(Self {
                kind,
                outcome: CapabilityOutcome::success(report),
            })
        }

        fn failing(kind: CapabilityKind, message: &str) -> Arc<dyn CapabilityPort> {
            let city = CityRef::new("stub");
            Arc::new(Self {
                kind,
                outcome: CapabilityOutcome::failed(CapabilityError::new(
                    kind.tool_name(),
                    &city,
                    message,
                )),
            })
        }
    }

    #[async_trait]
    impl CapabilityPort for StubProvider {
        fn kind(&self) -> CapabilityKind {
            self.kind
        }

        async fn fetch(&self, _city: &CityRef) -> CapabilityOutcome {
            self.outcome.clone()
        }
    }

    fn all_ok_use_case() -> PlanVisitUseCase {
        PlanVisitUseCase::new(
            StubProvider::ok(CapabilityKind::Facts, "facts report"),
            StubProvider::ok(CapabilityKind::Weather, "weather report"),
            StubProvider::ok(CapabilityKind::Time, "time report"),
        )
    }

    #[tokio::test]
    async fn test_calls_are_exactly_three_in_fixed_order() {
        let city = CityRef::new("Berlin").with_country("Germany");
        let briefing = all_ok_use_case().execute(&city).await;

        assert_eq!(briefing.calls.len(), 3);
        assert_eq!(briefing.calls[0].capability, CapabilityKind::Facts);
        assert_eq!(briefing.calls[1].capability, CapabilityKind::Weather);
        assert_eq!(briefing.calls[2].capability, CapabilityKind::Time);
    }

    #[tokio::test]
    async fn test_reasoning_names_the_city() {
        let city = CityRef::new("Berlin").with_country("Germany");
        let briefing = all_ok_use_case().execute(&city).await;
        assert!(briefing.reasoning.contains("Berlin"));
    }

    #[tokio::test]
    async fn test_tips_block_is_final_segment() {
        let city = CityRef::new("Paris");
        let briefing = all_ok_use_case().execute(&city).await;
        assert!(briefing.combined_report.ends_with(
            "💡 **Pro Tip:** Use this information to plan your itinerary \
             and make the most of your visit!"
        ));
        assert!(
            briefing
                .combined_report
                .contains("Visit Planning Tips for Paris")
        );
    }

    #[tokio::test]
    async fn test_failed_weather_yields_unavailable_section_and_record() {
        let city = CityRef::new("Berlin").with_country("Germany");
        let use_case = PlanVisitUseCase::new(
            StubProvider::ok(CapabilityKind::Facts, "facts report"),
            StubProvider::failing(CapabilityKind::Weather, "connection reset"),
            StubProvider::ok(CapabilityKind::Time, "time report"),
        );

        let briefing = use_case.execute(&city).await;

        assert!(
            briefing
                .combined_report
                .contains("🌤️ **Current Weather:** Currently unavailable")
        );
        assert!(briefing.combined_report.contains("facts report"));
        assert!(briefing.combined_report.contains("time report"));

        assert_eq!(briefing.failed_calls(), 1);
        assert!(briefing.calls[1].outcome.is_failed());
        assert!(briefing.calls[0].outcome.is_success());
        assert!(briefing.calls[2].outcome.is_success());
    }

    #[tokio::test]
    async fn test_every_provider_failing_still_produces_briefing() {
        let city = CityRef::new("Atlantis");
        let use_case = PlanVisitUseCase::new(
            StubProvider::failing(CapabilityKind::Facts, "down"),
            StubProvider::failing(CapabilityKind::Weather, "down"),
            StubProvider::failing(CapabilityKind::Time, "down"),
        );

        let briefing = use_case.execute(&city).await;

        assert_eq!(briefing.failed_calls(), 3);
        assert_eq!(
            briefing
                .combined_report
                .matches("Currently unavailable")
                .count(),
            3
        );
        // The tips block survives even a total outage
        assert!(briefing.combined_report.contains("Visit Planning Tips"));
    }

    #[tokio::test]
    async fn test_degraded_report_text_is_used_verbatim() {
        let city = CityRef::new("Lagos");
        let degraded = Arc::new(StubProvider {
            kind: CapabilityKind::Weather,
            outcome: CapabilityOutcome::degraded("sample weather", "api down"),
        });
        let use_case = PlanVisitUseCase::new(
            StubProvider::ok(CapabilityKind::Facts, "facts"),
            degraded,
            StubProvider::ok(CapabilityKind::Time, "time"),
        );

        let briefing = use_case.execute(&city).await;
        assert!(
            briefing
                .combined_report
                .contains("🌤️ **Current Weather:**\nsample weather")
        );
        assert!(briefing.calls[1].outcome.is_degraded());
    }

    #[test]
    fn test_visit_tips_are_static_apart_from_city_name() {
        let a = visit_tips("Rome");
        let b = visit_tips("Rome");
        assert_eq!(a, b);
        assert!(a.starts_with("🎯 **Visit Planning Tips for Rome:**"));
    }
}
