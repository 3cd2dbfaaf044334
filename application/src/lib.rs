//! Application layer for city-concierge
//!
//! This crate contains the capability port definition and the briefing
//! use case. It depends only on the domain layer; the concrete
//! providers live in the infrastructure layer and are injected at the
//! composition root.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::capability::CapabilityPort;
pub use use_cases::plan_visit::{PlanVisitUseCase, visit_tips};
