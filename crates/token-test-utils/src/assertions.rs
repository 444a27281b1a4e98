//! Custom test assertions for expressive tests
//!
//! Signatures are recomputed here with `ring` directly rather than through
//! the issuing crate, so a bug in the signer cannot hide itself.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};
use common::config::LegacyHmacAlgorithm;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use ring::hmac;
use serde::Deserialize;

/// Decoded pieces of a `T1==` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTokenParts {
    pub partner_id: String,
    pub signature: String,
    pub data: String,
}

impl LegacyTokenParts {
    /// Value of one `&`-separated field of the data string.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.data.split('&').find_map(|pair| {
            pair.split_once('=')
                .filter(|(key, _)| *key == name)
                .map(|(_, value)| value)
        })
    }

    /// Field names in the order they appear.
    pub fn field_names(&self) -> Vec<&str> {
        self.data
            .split('&')
            .filter_map(|pair| pair.split_once('=').map(|(key, _)| key))
            .collect()
    }
}

/// Split a legacy token into partner id, signature and data string.
pub fn decode_legacy_token(token: &str) -> LegacyTokenParts {
    let encoded = token
        .strip_prefix("T1==")
        .unwrap_or_else(|| panic!("Legacy token must start with T1==, got {token}"));

    let inner_bytes = STANDARD
        .decode(encoded)
        .unwrap_or_else(|e| panic!("Legacy token body is not base64: {e}"));
    let inner = String::from_utf8(inner_bytes).expect("Legacy token body must be UTF-8");

    let (header, data) = inner
        .split_once(':')
        .expect("Legacy token body must contain ':'");
    let rest = header
        .strip_prefix("partner_id=")
        .expect("Legacy token body must start with partner_id=");
    let (partner_id, signature) = rest
        .split_once("&sig=")
        .expect("Legacy token body must contain &sig=");

    LegacyTokenParts {
        partner_id: partner_id.to_string(),
        signature: signature.to_string(),
        data: data.to_string(),
    }
}

/// Recompute a legacy HMAC as lowercase hex.
pub fn expected_legacy_signature(
    data: &str,
    secret: &str,
    algorithm: LegacyHmacAlgorithm,
) -> String {
    let ring_algorithm = match algorithm {
        LegacyHmacAlgorithm::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
        LegacyHmacAlgorithm::Sha256 => hmac::HMAC_SHA256,
    };
    let key = hmac::Key::new(ring_algorithm, secret.as_bytes());
    hex::encode(hmac::sign(&key, data.as_bytes()).as_ref())
}

/// Custom assertions for legacy session tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_legacy_format()
///     .assert_for_partner("123456")
///     .assert_data_field("role", "moderator");
/// ```
pub trait LegacyTokenAssertions {
    /// Assert the `T1==` envelope decodes into partner id, signature and data
    fn assert_legacy_format(&self) -> &Self;

    /// Assert the token was issued for the given account
    fn assert_for_partner(&self, partner_id: &str) -> &Self;

    /// Assert the signature matches an independent HMAC over the data string
    fn assert_signed_with(&self, secret: &str, algorithm: LegacyHmacAlgorithm) -> &Self;

    /// Assert a data field has the given (still URL-encoded) value
    fn assert_data_field(&self, name: &str, value: &str) -> &Self;

    /// Assert a data field is absent
    fn assert_no_data_field(&self, name: &str) -> &Self;
}

impl LegacyTokenAssertions for String {
    fn assert_legacy_format(&self) -> &Self {
        let parts = decode_legacy_token(self);
        assert!(
            !parts.signature.is_empty(),
            "Legacy token must carry a signature"
        );
        assert!(
            parts.signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "Signature must be lowercase hex, got {}",
            parts.signature
        );
        self
    }

    fn assert_for_partner(&self, partner_id: &str) -> &Self {
        let parts = decode_legacy_token(self);
        assert_eq!(parts.partner_id, partner_id, "Unexpected partner id");
        self
    }

    fn assert_signed_with(&self, secret: &str, algorithm: LegacyHmacAlgorithm) -> &Self {
        let parts = decode_legacy_token(self);
        let expected = expected_legacy_signature(&parts.data, secret, algorithm);
        assert_eq!(
            parts.signature, expected,
            "Signature does not match HMAC of the data string"
        );
        self
    }

    fn assert_data_field(&self, name: &str, value: &str) -> &Self {
        let parts = decode_legacy_token(self);
        assert_eq!(
            parts.field(name),
            Some(value),
            "Unexpected value for data field {name} in {}",
            parts.data
        );
        self
    }

    fn assert_no_data_field(&self, name: &str) -> &Self {
        let parts = decode_legacy_token(self);
        assert_eq!(
            parts.field(name),
            None,
            "Data field {name} should be absent in {}",
            parts.data
        );
        self
    }
}

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
}

/// Service credential claims structure
#[derive(Debug, Deserialize)]
pub struct ServiceCredentialPayload {
    pub iss: String,
    pub scope: String,
    pub ist: String,
    pub iat: i64,
    pub exp: i64,
}

/// Decode the claims of a service credential without verifying it.
pub fn decode_service_credential(token: &str) -> ServiceCredentialPayload {
    let payload = token
        .split('.')
        .nth(1)
        .unwrap_or_else(|| panic!("Service credential must be a JWT, got {token}"));
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .expect("JWT payload must be base64url");
    serde_json::from_slice(&bytes).expect("JWT payload must be service credential claims")
}

/// Custom assertions for service credentials
pub trait ServiceCredentialAssertions {
    /// Assert the token is a three-part HS256 JWT
    fn assert_valid_service_credential(&self) -> &Self;

    /// Assert the HS256 signature verifies with `secret`
    fn assert_verifies_with(&self, secret: &str) -> &Self;

    /// Assert the scope claim
    fn assert_scope(&self, scope: &str) -> &Self;

    /// Assert the issuer and issuer type claims
    fn assert_issued_by(&self, account_id: &str, issuer_type: &str) -> &Self;

    /// Assert `iat` and `exp = iat + lifetime_secs`
    fn assert_issued_at(&self, iat: i64, lifetime_secs: i64) -> &Self;
}

impl ServiceCredentialAssertions for String {
    fn assert_valid_service_credential(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header_bytes = URL_SAFE_NO_PAD
            .decode(parts[0])
            .expect("Failed to base64 decode JWT header");
        let header: JwtHeader =
            serde_json::from_slice(&header_bytes).expect("Failed to parse JWT header JSON");
        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        self
    }

    fn assert_verifies_with(&self, secret: &str) -> &Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let result = decode::<serde_json::Value>(
            self,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        );
        assert!(
            result.is_ok(),
            "Service credential did not verify: {:?}",
            result.err()
        );
        self
    }

    fn assert_scope(&self, scope: &str) -> &Self {
        assert_eq!(decode_service_credential(self).scope, scope, "Unexpected scope");
        self
    }

    fn assert_issued_by(&self, account_id: &str, issuer_type: &str) -> &Self {
        let claims = decode_service_credential(self);
        assert_eq!(claims.iss, account_id, "Unexpected issuer");
        assert_eq!(claims.ist, issuer_type, "Unexpected issuer type");
        self
    }

    fn assert_issued_at(&self, iat: i64, lifetime_secs: i64) -> &Self {
        let claims = decode_service_credential(self);
        assert_eq!(claims.iat, iat, "Unexpected iat");
        assert_eq!(claims.exp, iat + lifetime_secs, "Unexpected exp");
        self
    }
}
