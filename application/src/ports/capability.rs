//! Capability port
//!
//! Defines the contract every information provider (facts, weather,
//! local time) implements. Adapters live in the infrastructure layer.

use async_trait::async_trait;
use concierge_domain::{CapabilityKind, CapabilityOutcome, CityRef};

/// Port for one information capability.
///
/// The contract mirrors the outcome taxonomy rather than `Result`:
/// `fetch` **always** returns an outcome. Transient source failures are
/// retried inside the adapter, non-retryable ones degrade to built-in
/// representative data, and only an unexpected internal failure
/// surfaces as [`CapabilityOutcome::Failed`]. Callers never need an
/// error path.
///
/// Implementations carry only read-only configuration (keys, base
/// URLs, lookup tables), so one instance is safely shared across
/// concurrent requests.
#[async_trait]
pub trait CapabilityPort: Send + Sync {
    /// Which capability this provider answers for
    fn kind(&self) -> CapabilityKind;

    /// Produce a best-effort report about the city.
    ///
    /// The only suspension point is the provider's external call;
    /// formatting and table lookups are synchronous.
    async fn fetch(&self, city: &CityRef) -> CapabilityOutcome;
}
