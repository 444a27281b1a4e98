//! Signature primitives.
//!
//! Two independent schemes share the account secret as key material:
//!
//! - **Legacy**: RFC 2104 HMAC over the `&`-joined session token data string,
//!   rendered as lowercase hex.
//! - **Service credential**: compact HS256 JWT carrying the calling account,
//!   the operation scope and the issuer type.

use crate::errors::TokenError;
use common::config::LegacyHmacAlgorithm;
use common::secret::{ExposeSecret, SecretString};
use common::types::IssuerType;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use ring::hmac;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Claims of a service credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceCredentialClaims {
    /// Issuer: the account id as a decimal string.
    pub iss: String,

    /// Operation the credential authorizes, e.g. `archive.create`.
    pub scope: String,

    /// Issuer type.
    pub ist: IssuerType,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,
}

fn ring_algorithm(algorithm: LegacyHmacAlgorithm) -> hmac::Algorithm {
    match algorithm {
        LegacyHmacAlgorithm::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
        LegacyHmacAlgorithm::Sha256 => hmac::HMAC_SHA256,
    }
}

fn legacy_key(
    secret: &SecretString,
    algorithm: LegacyHmacAlgorithm,
) -> Result<hmac::Key, TokenError> {
    let key_bytes = secret.expose_secret().as_bytes();
    if key_bytes.is_empty() {
        return Err(TokenError::SigningFailure(
            "HMAC key must not be empty".to_string(),
        ));
    }
    Ok(hmac::Key::new(ring_algorithm(algorithm), key_bytes))
}

/// Sign a legacy token data string, returning the lowercase hex MAC.
///
/// # Errors
///
/// Returns `TokenError::SigningFailure` if the secret is empty.
#[instrument(skip_all, fields(algorithm = ?algorithm))]
pub fn sign_legacy(
    data: &str,
    secret: &SecretString,
    algorithm: LegacyHmacAlgorithm,
) -> Result<String, TokenError> {
    let key = legacy_key(secret, algorithm)?;
    let tag = hmac::sign(&key, data.as_bytes());
    Ok(hex::encode(tag.as_ref()))
}

/// Sign service credential claims as a compact HS256 JWT.
///
/// # Errors
///
/// Returns `TokenError::SigningFailure` if the secret is empty or JWT
/// encoding fails.
#[instrument(skip_all, fields(scope = %claims.scope))]
pub fn sign_service_credential(
    claims: &ServiceCredentialClaims,
    secret: &SecretString,
) -> Result<String, TokenError> {
    let key_bytes = secret.expose_secret().as_bytes();
    if key_bytes.is_empty() {
        tracing::warn!(target: "token.crypto", "Empty account secret cannot sign a JWT");
        return Err(TokenError::SigningFailure(
            "HS256 key must not be empty".to_string(),
        ));
    }

    let encoding_key = EncodingKey::from_secret(key_bytes);
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &encoding_key)
        .map_err(|e| TokenError::SigningFailure(format!("JWT signing operation failed: {e}")))
}
