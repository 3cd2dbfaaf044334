//! Capability domain: outcome taxonomy, call records, and briefings

pub mod entities;
pub mod value_objects;

pub use entities::{CapabilityCall, CapabilityKind, CityBriefing};
pub use value_objects::{CapabilityError, CapabilityOutcome};
