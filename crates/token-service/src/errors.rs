use thiserror::Error;

/// Failure kinds of credential issuance.
///
/// Every kind is deterministic for a given input and configuration, so none
/// of them is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("An invalid session ID was passed")]
    MalformedSessionId,

    #[error("The session ID does not belong to this account")]
    SessionOwnershipMismatch,

    #[error("{0} is not a recognized role")]
    InvalidRole(String),

    #[error("Invalid expire time: {0}")]
    ExpiryOutOfRange(String),

    #[error("Connection data must be at most 1000 characters, got {length}")]
    PayloadTooLarge { length: usize },

    #[error("Signing failed: {0}")]
    SigningFailure(String),
}

impl TokenError {
    /// Stable machine-readable code for this kind
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MalformedSessionId => "MALFORMED_SESSION_ID",
            TokenError::SessionOwnershipMismatch => "SESSION_OWNERSHIP_MISMATCH",
            TokenError::InvalidRole(_) => "INVALID_ROLE",
            TokenError::ExpiryOutOfRange(_) => "EXPIRY_OUT_OF_RANGE",
            TokenError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            TokenError::SigningFailure(_) => "SIGNING_FAILURE",
        }
    }

    /// Whether the request itself was rejected, as opposed to a signing fault
    #[must_use]
    pub fn is_validation_failure(&self) -> bool {
        !matches!(self, TokenError::SigningFailure(_))
    }

    /// Bounded label value for metrics
    #[must_use]
    pub fn metric_reason(&self) -> &'static str {
        match self {
            TokenError::MalformedSessionId => "malformed_session_id",
            TokenError::SessionOwnershipMismatch => "ownership_mismatch",
            TokenError::InvalidRole(_) => "invalid_role",
            TokenError::ExpiryOutOfRange(_) => "expiry_out_of_range",
            TokenError::PayloadTooLarge { .. } => "payload_too_large",
            TokenError::SigningFailure(_) => "signing_failure",
        }
    }
}
