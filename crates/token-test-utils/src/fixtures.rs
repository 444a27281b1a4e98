//! Deterministic fixtures for issuance tests
//!
//! Session ids are produced the way the platform produces them: a version tag
//! followed by unpadded URL-safe base64 of the `~`-delimited claims.

use crate::test_ids::{TEST_ACCOUNT_ID, TEST_ACCOUNT_SECRET, TEST_NONCE, TEST_NOW_SECS};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use common::config::{AccountCredentials, LegacyHmacAlgorithm};
use common::types::{AccountId, IssuerType};
use std::sync::Arc;
use token_service::clock::{Clock, NonceSource};
use token_service::{TokenError, TokenIssuer};

/// Encode a session id whose claims carry `owner` as the owning account.
pub fn encode_session_id(owner: &str) -> String {
    encode_session_id_claims(&format!("1~{owner}~~1700000000000~0.7215~"))
}

/// Encode an arbitrary claims string as a session id.
pub fn encode_session_id_claims(claims: &str) -> String {
    format!("1_{}", URL_SAFE_NO_PAD.encode(claims))
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_secs(secs: i64) -> Self {
        Self(DateTime::<Utc>::from_timestamp(secs, 0).expect("timestamp in range"))
    }

    pub fn at_millis(millis: i64) -> Self {
        Self(DateTime::<Utc>::from_timestamp_millis(millis).expect("timestamp in range"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Nonce source that always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedNonce(pub i32);

impl NonceSource for FixedNonce {
    fn next_nonce(&self) -> Result<i32, TokenError> {
        Ok(self.0)
    }
}

/// The test instant as a `DateTime`.
pub fn test_now() -> DateTime<Utc> {
    FixedClock::at_secs(TEST_NOW_SECS).0
}

pub fn test_credentials() -> AccountCredentials {
    AccountCredentials::new(TEST_ACCOUNT_ID, TEST_ACCOUNT_SECRET).expect("valid test credentials")
}

/// Partner issuer for the test account, pinned to [`TEST_NOW_SECS`] and
/// [`TEST_NONCE`].
pub fn test_issuer() -> TokenIssuer {
    pinned_issuer(TEST_ACCOUNT_ID, TEST_ACCOUNT_SECRET, IssuerType::Partner)
}

/// Pinned issuer for any account.
pub fn pinned_issuer(account_id: AccountId, secret: &str, issuer_type: IssuerType) -> TokenIssuer {
    let credentials = AccountCredentials::new(account_id, secret).expect("valid test credentials");
    TokenIssuer::from_credentials(credentials, issuer_type)
        .with_clock(Arc::new(FixedClock::at_secs(TEST_NOW_SECS)))
        .with_nonce_source(Arc::new(FixedNonce(TEST_NONCE)))
}

/// [`test_issuer`] signing legacy tokens with `algorithm`.
pub fn test_issuer_with_hmac(algorithm: LegacyHmacAlgorithm) -> TokenIssuer {
    test_issuer().with_legacy_hmac(algorithm)
}
