//! Account credentials and environment-driven configuration.
//!
//! A client is built once from an immutable [`AccountConfig`]. Nothing in
//! here is shared or mutated after construction.

use crate::secret::{ExposeSecret, SecretString};
use crate::types::{AccountId, IssuerType};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default platform API base URL.
pub const DEFAULT_API_URL: &str = "https://api.tokbox.com";

/// Default HTTP timeout for platform API calls.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("API secret must not be empty")]
    EmptySecret,

    #[error("Invalid issuer type: {0}")]
    InvalidIssuerType(String),

    #[error("Invalid legacy HMAC algorithm: {0}")]
    InvalidHmacAlgorithm(String),

    #[error("Invalid HTTP timeout: {0}")]
    InvalidTimeout(String),
}

/// Hash function used by the legacy `T1==` session token signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyHmacAlgorithm {
    /// HMAC-SHA1, accepted by the platform for this token generation
    #[default]
    Sha1,
    /// HMAC-SHA256
    Sha256,
}

impl LegacyHmacAlgorithm {
    /// Parse a configuration value (`sha1` or `sha256`, case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHmacAlgorithm` for any other value.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sha1" | "hmac-sha1" => Ok(Self::Sha1),
            "sha256" | "hmac-sha256" => Ok(Self::Sha256),
            _ => Err(ConfigError::InvalidHmacAlgorithm(value.to_string())),
        }
    }
}

/// An account identifier bound to its shared secret.
///
/// The secret is trimmed exactly once, here, and must not be empty.
#[derive(Clone)]
pub struct AccountCredentials {
    account_id: AccountId,
    secret: SecretString,
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("account_id", &self.account_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl AccountCredentials {
    /// Bind `secret` to `account_id`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptySecret` if the secret is empty after trimming.
    pub fn new(account_id: AccountId, secret: &str) -> Result<Self, ConfigError> {
        let trimmed = secret.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        Ok(Self {
            account_id,
            secret: SecretString::from(trimmed.to_string()),
        })
    }

    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// Value of the legacy `X-TB-PARTNER-AUTH` header: `<accountId>:<secret>`.
    ///
    /// The secret travels in the clear with this header. It exists only for
    /// the oldest session-create endpoint.
    #[must_use]
    pub fn partner_auth_value(&self) -> SecretString {
        SecretString::from(format!(
            "{}:{}",
            self.account_id,
            self.secret.expose_secret()
        ))
    }
}

/// Per-client configuration.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub credentials: AccountCredentials,
    pub api_url: String,
    pub issuer_type: IssuerType,
    pub legacy_hmac: LegacyHmacAlgorithm,
    pub http_timeout: Duration,
}

impl AccountConfig {
    /// Configuration with defaults for everything but the credentials
    #[must_use]
    pub fn new(credentials: AccountCredentials, issuer_type: IssuerType) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_API_URL.to_string(),
            issuer_type,
            legacy_hmac: LegacyHmacAlgorithm::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[must_use]
    pub fn with_legacy_hmac(mut self, algorithm: LegacyHmacAlgorithm) -> Self {
        self.legacy_hmac = algorithm;
        self
    }

    #[must_use]
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// See [`AccountConfig::from_vars`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or any value
    /// fails to parse.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let api_key_raw = vars
            .get("PLATFORM_API_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("PLATFORM_API_KEY".to_string()))?;

        let account_id: AccountId = api_key_raw
            .parse()
            .map_err(|_| ConfigError::InvalidApiKey(api_key_raw.clone()))?;

        let secret = vars
            .get("PLATFORM_API_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("PLATFORM_API_SECRET".to_string()))?;

        let credentials = AccountCredentials::new(account_id, secret)?;

        let api_url = vars
            .get("PLATFORM_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let issuer_type = match vars.get("PLATFORM_ISSUER_TYPE") {
            Some(value) => IssuerType::parse(value.trim())
                .ok_or_else(|| ConfigError::InvalidIssuerType(value.clone()))?,
            None => IssuerType::Partner,
        };

        let legacy_hmac = match vars.get("LEGACY_HMAC_ALGORITHM") {
            Some(value) => LegacyHmacAlgorithm::parse(value)?,
            None => LegacyHmacAlgorithm::default(),
        };

        let http_timeout = match vars.get("PLATFORM_HTTP_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::InvalidTimeout(value.clone()))?,
            None => DEFAULT_HTTP_TIMEOUT,
        };

        tracing::debug!(
            target: "common.config",
            account_id = %account_id,
            issuer_type = %issuer_type,
            api_url = %api_url,
            "Account configuration loaded"
        );

        Ok(Self {
            credentials,
            api_url,
            issuer_type,
            legacy_hmac,
            http_timeout,
        })
    }
}
