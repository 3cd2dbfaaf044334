//! Capability outcome and error value objects
//!
//! These types form the **output side** of every capability invocation.
//! The contract is strict: a provider call yields exactly one
//! [`CapabilityOutcome`] and never lets any other error type escape its
//! boundary.
//!
//! `Degraded` is deliberately not an error. When an external data source
//! is unreachable, providers synthesize a representative report from
//! built-in tables and surface it as a usable answer together with the
//! reason authoritative data was unavailable. Only an unexpected internal
//! failure (a bug, not a network condition) produces `Failed`.

use crate::city::CityRef;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured failure from a capability invocation.
///
/// This is the only typed error that crosses a provider boundary, and it
/// does so as a value inside [`CapabilityOutcome::Failed`], never as an
/// `Err`. Carries the capability name and the queried city as diagnostic
/// context for logging and alerting.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{capability} error for '{city}': {message}")]
pub struct CapabilityError {
    /// Canonical tool name of the capability that failed
    pub capability: String,
    /// The city the caller asked about, with disambiguator if given
    pub city: String,
    /// Human-readable description of what went wrong
    pub message: String,
}

impl CapabilityError {
    pub fn new(
        capability: impl Into<String>,
        city: &CityRef,
        message: impl Into<String>,
    ) -> Self {
        Self {
            capability: capability.into(),
            city: city.to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of a single capability invocation.
///
/// | Variant | Meaning | Report text |
/// |---------|---------|-------------|
/// | `Success` | Authoritative data from the external source | yes |
/// | `Degraded` | Representative fallback data, source unavailable | yes |
/// | `Failed` | No usable answer (unexpected internal failure) | no |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CapabilityOutcome {
    /// Authoritative answer formatted as a natural-language report
    Success { report: String },
    /// Usable but non-authoritative answer plus why the real source
    /// was unavailable
    Degraded { report: String, reason: String },
    /// No usable answer
    Failed { error: CapabilityError },
}

impl CapabilityOutcome {
    /// Create a successful outcome
    pub fn success(report: impl Into<String>) -> Self {
        Self::Success {
            report: report.into(),
        }
    }

    /// Create a degraded outcome
    pub fn degraded(report: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Degraded {
            report: report.into(),
            reason: reason.into(),
        }
    }

    /// Create a failed outcome
    pub fn failed(error: CapabilityError) -> Self {
        Self::Failed { error }
    }

    /// Report text for outcomes that carry one (`Success` and `Degraded`)
    pub fn report_text(&self) -> Option<&str> {
        match self {
            Self::Success { report } | Self::Degraded { report, .. } => Some(report),
            Self::Failed { .. } => None,
        }
    }

    /// Why the outcome is not authoritative, if it isn't
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Degraded { reason, .. } => Some(reason),
            Self::Failed { error } => Some(&error.message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
