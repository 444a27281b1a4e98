//! Metrics for credential issuance
//!
//! All metrics use the `token_` prefix and the `_total` suffix for counters.
//!
//! # Cardinality
//!
//! - `kind`: 2 values (session, service)
//! - `status`: 2 values (success, error)
//! - `reason`: 5 values, one per validation kind of `TokenError`

use crate::errors::TokenError;
use metrics::counter;

/// Which credential format was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceKind {
    Session,
    Service,
}

impl IssuanceKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuanceKind::Session => "session",
            IssuanceKind::Service => "service",
        }
    }
}

/// Record the outcome of one issuance call
///
/// Metric: `token_issuance_total`
/// Labels: `kind`, `status`
pub fn record_token_issuance(kind: IssuanceKind, success: bool) {
    let status = if success { "success" } else { "error" };
    counter!("token_issuance_total", "kind" => kind.as_str(), "status" => status).increment(1);
}

/// Record why a request was rejected
///
/// Only called for validation kinds; signing faults are counted by
/// `token_issuance_total{status="error"}` alone.
///
/// Metric: `token_validation_failures_total`
/// Labels: `reason`
pub fn record_validation_failure(error: &TokenError) {
    counter!("token_validation_failures_total", "reason" => error.metric_reason()).increment(1);
}
