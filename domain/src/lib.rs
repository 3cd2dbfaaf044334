//! Domain layer for city-concierge
//!
//! This crate contains the core entities, outcome types, and report
//! formatting logic. It has no dependencies on infrastructure concerns:
//! everything here is pure computation over in-memory data.
//!
//! # Core Concepts
//!
//! ## Capability
//!
//! A capability answers one dimension of information about a city:
//!
//! - **Facts**: population, coordinates, founding date, general facts
//! - **Weather**: current conditions from a weather source
//! - **Time**: current local time resolved through a timezone table
//!
//! ## Outcome
//!
//! Every capability invocation ends in exactly one [`CapabilityOutcome`]:
//! `Success` (authoritative data), `Degraded` (representative fallback
//! data plus the reason the real source was unavailable), or `Failed`
//! (no usable answer). Degradation is a first-class value here, not an
//! error that happens to be caught.

pub mod capability;
pub mod city;
pub mod facts;
pub mod localtime;
pub mod weather;

// Re-export commonly used types
pub use capability::{
    entities::{CapabilityCall, CapabilityKind, CityBriefing},
    value_objects::{CapabilityError, CapabilityOutcome},
};
pub use city::CityRef;
pub use facts::CityProfile;
pub use localtime::LocalTimeSnapshot;
pub use weather::WeatherSnapshot;
