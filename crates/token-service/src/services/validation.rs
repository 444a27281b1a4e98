//! Rules that must hold before a session token is signed.
//!
//! Checks run in a fixed order and stop at the first failure. Ownership of the
//! session is always established before role, expiry or payload are looked at.

use crate::errors::TokenError;
use crate::models::{Role, TokenRequest};
use crate::session_id;
use chrono::{DateTime, Utc};
use common::types::AccountId;

/// Longest allowed token lifetime (30 days).
pub const MAX_EXPIRY_SECS: i64 = 2_592_000;

/// Tolerated clock skew for an expiry just behind the current time.
pub const EXPIRY_GRACE_SECS: i64 = 1;

/// Maximum connection data length, in UTF-16 code units.
pub const MAX_CONNECTION_DATA_UNITS: usize = 1000;

/// A request that passed every check, with its role parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub session_id: String,
    pub role: Role,
    /// Expiry in Unix epoch seconds, `None` when the token never expires.
    pub expire_time: Option<i64>,
    pub connection_data: Option<String>,
}

/// Validate a token request on behalf of `account_id` at time `now`.
///
/// # Errors
///
/// - `MalformedSessionId` if the session id is empty or cannot be decoded
/// - `SessionOwnershipMismatch` if the session belongs to another account
/// - `InvalidRole` if the role is null or not one of the known values
/// - `ExpiryOutOfRange` if the expiry is in the past or more than 30 days out
/// - `PayloadTooLarge` if the connection data exceeds 1000 UTF-16 code units
pub fn validate(
    request: &TokenRequest,
    account_id: AccountId,
    now: DateTime<Utc>,
) -> Result<ValidatedRequest, TokenError> {
    if request.session_id.is_empty() {
        return Err(TokenError::MalformedSessionId);
    }

    let owner = session_id::decode_owner(&request.session_id)?;
    if owner != account_id.to_string() {
        tracing::debug!(
            target: "token.validation",
            account_id = %account_id,
            "Session belongs to a different account"
        );
        return Err(TokenError::SessionOwnershipMismatch);
    }

    let role = match request.role.as_deref() {
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|_| TokenError::InvalidRole(raw.to_string()))?,
        None => return Err(TokenError::InvalidRole("null".to_string())),
    };

    let expire_time = validate_expiry(request.expire_time, now)?;

    if let Some(data) = &request.connection_data {
        // Characters outside the BMP count twice
        let length = data.encode_utf16().count();
        if length > MAX_CONNECTION_DATA_UNITS {
            return Err(TokenError::PayloadTooLarge { length });
        }
    }

    Ok(ValidatedRequest {
        session_id: request.session_id.clone(),
        role,
        expire_time,
        connection_data: request.connection_data.clone(),
    })
}

/// Whole-second window check. An expiry at the epoch means "never".
fn validate_expiry(
    expire_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<Option<i64>, TokenError> {
    let Some(expiry_secs) = expire_time.map(|t| t.timestamp()).filter(|secs| *secs != 0) else {
        return Ok(None);
    };

    let now_secs = now.timestamp();
    if expiry_secs < now_secs - EXPIRY_GRACE_SECS {
        return Err(TokenError::ExpiryOutOfRange(
            "Expire time must be in the future".to_string(),
        ));
    }
    if expiry_secs > now_secs + MAX_EXPIRY_SECS {
        return Err(TokenError::ExpiryOutOfRange(
            "Expire time must be in the next 30 days".to_string(),
        ));
    }

    Ok(Some(expiry_secs))
}
