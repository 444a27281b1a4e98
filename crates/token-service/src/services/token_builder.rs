//! Token assembly for both credential formats.
//!
//! Legacy session tokens look like:
//!
//! ```text
//! T1==base64("partner_id=<account>&sig=<hex-hmac>:<data>")
//! data = session_id=..&create_time=..&nonce=..&role=..[&expire_time=..][&connection_data=..]
//! ```
//!
//! The signature covers exactly the data string that follows the `:`, so the
//! field order here is part of the wire format.

use crate::crypto::{self, ServiceCredentialClaims};
use crate::errors::TokenError;
use crate::models::ServiceScope;
use crate::services::validation::ValidatedRequest;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use common::config::LegacyHmacAlgorithm;
use common::secret::SecretString;
use common::types::{AccountId, IssuerType};
use tracing::instrument;

/// Prefix identifying the legacy token format.
pub const LEGACY_TOKEN_PREFIX: &str = "T1==";

/// Lifetime of a service credential.
pub const SERVICE_CREDENTIAL_TTL_SECS: i64 = 3600;

/// Build the `&`-joined data string that the legacy signature covers.
#[must_use]
pub fn legacy_data_string(request: &ValidatedRequest, nonce: i32, now: DateTime<Utc>) -> String {
    let mut data = format!(
        "session_id={}&create_time={}&nonce={}&role={}",
        request.session_id,
        now.timestamp(),
        nonce,
        request.role
    );

    if let Some(expire_time) = request.expire_time {
        data.push_str("&expire_time=");
        data.push_str(&expire_time.to_string());
    }

    if let Some(connection_data) = &request.connection_data {
        data.push_str("&connection_data=");
        data.extend(url::form_urlencoded::byte_serialize(connection_data.as_bytes()));
    }

    data
}

/// Build a signed legacy session token from a validated request.
///
/// # Errors
///
/// Returns `TokenError::SigningFailure` if the secret is empty.
#[instrument(skip_all, fields(account_id = %account_id, role = %request.role))]
pub fn build_legacy_token(
    request: &ValidatedRequest,
    account_id: AccountId,
    secret: &SecretString,
    algorithm: LegacyHmacAlgorithm,
    nonce: i32,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let data = legacy_data_string(request, nonce, now);
    let signature = crypto::sign_legacy(&data, secret, algorithm)?;

    let inner = format!("partner_id={account_id}&sig={signature}:{data}");
    Ok(format!("{LEGACY_TOKEN_PREFIX}{}", STANDARD.encode(inner)))
}

/// Build a signed service credential for one operation scope.
///
/// # Errors
///
/// Returns `TokenError::SigningFailure` if the secret is empty.
#[instrument(skip_all, fields(account_id = %account_id, scope = %scope))]
pub fn build_service_credential(
    account_id: AccountId,
    secret: &SecretString,
    scope: ServiceScope,
    issuer_type: IssuerType,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let iat = now.timestamp();
    let claims = ServiceCredentialClaims {
        iss: account_id.to_string(),
        scope: scope.as_str().to_string(),
        ist: issuer_type,
        iat,
        exp: iat + SERVICE_CREDENTIAL_TTL_SECS,
    };

    crypto::sign_service_credential(&claims, secret)
}
