//! Observability for credential issuance.
//!
//! Spans use `#[instrument(skip_all)]` with an explicit field allow-list.
//! Account ids, roles and scopes may be recorded. Secrets, signatures and
//! issued tokens never are.

pub mod metrics;

pub use metrics::{record_token_issuance, record_validation_failure};
