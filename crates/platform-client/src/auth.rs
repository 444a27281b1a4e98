//! Authentication headers of the platform API.
//!
//! Current endpoints take a per-request service credential in
//! `X-OPENTOK-AUTH`. The oldest session-create endpoint instead takes the raw
//! account secret in `X-TB-PARTNER-AUTH`, tagged with `X-TB-VERSION: 1`.

use common::config::AccountCredentials;
use common::secret::ExposeSecret;
use reqwest::header::{HeaderMap, HeaderValue};
use token_service::{ServiceScope, TokenError, TokenIssuer};

use crate::errors::PlatformError;

// Header names are case-insensitive on the wire; `HeaderMap` wants lowercase.
pub const SERVICE_AUTH_HEADER: &str = "x-opentok-auth";
pub const PARTNER_AUTH_HEADER: &str = "x-tb-partner-auth";
pub const VERSION_HEADER: &str = "x-tb-version";
pub const LEGACY_API_VERSION: &str = "1";

/// Headers carrying a fresh service credential for `scope`.
///
/// # Errors
///
/// Returns `PlatformError::Credential` if the credential cannot be signed.
pub fn service_auth_headers(
    issuer: &TokenIssuer,
    scope: ServiceScope,
) -> Result<HeaderMap, PlatformError> {
    let credential = issuer.issue_service_credential(scope)?;
    let mut value = HeaderValue::from_str(&credential).map_err(|_| {
        TokenError::SigningFailure("Service credential is not a valid header value".to_string())
    })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(SERVICE_AUTH_HEADER, value);
    Ok(headers)
}

/// Legacy `X-TB-PARTNER-AUTH` and `X-TB-VERSION` headers.
///
/// # Errors
///
/// Returns `PlatformError::Transport` if the secret contains characters that
/// cannot travel in a header.
pub fn legacy_auth_headers(credentials: &AccountCredentials) -> Result<HeaderMap, PlatformError> {
    let auth = credentials.partner_auth_value();
    let mut value = HeaderValue::from_str(auth.expose_secret()).map_err(|_| {
        PlatformError::Transport("Account secret is not a valid header value".to_string())
    })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(PARTNER_AUTH_HEADER, value);
    headers.insert(VERSION_HEADER, HeaderValue::from_static(LEGACY_API_VERSION));
    Ok(headers)
}
