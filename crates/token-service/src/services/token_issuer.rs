use crate::clock::{Clock, NonceSource, SystemClock, SystemNonceSource};
use crate::errors::TokenError;
use crate::models::{ServiceScope, TokenRequest};
use crate::observability::metrics::{self, IssuanceKind};
use crate::services::{token_builder, validation};
use common::config::{AccountConfig, AccountCredentials, LegacyHmacAlgorithm};
use common::types::{AccountId, IssuerType};
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

/// Issues session tokens and service credentials for one account.
///
/// Configuration is fixed at construction. The issuer holds no mutable
/// state, so clones can be shared freely across tasks.
#[derive(Clone)]
pub struct TokenIssuer {
    credentials: AccountCredentials,
    issuer_type: IssuerType,
    legacy_hmac: LegacyHmacAlgorithm,
    clock: Arc<dyn Clock>,
    nonce_source: Arc<dyn NonceSource>,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("credentials", &self.credentials)
            .field("issuer_type", &self.issuer_type)
            .field("legacy_hmac", &self.legacy_hmac)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new(config: &AccountConfig) -> Self {
        Self::from_credentials(config.credentials.clone(), config.issuer_type)
            .with_legacy_hmac(config.legacy_hmac)
    }

    /// Issuer with the wall clock, the system CSPRNG and SHA-1 legacy HMAC.
    #[must_use]
    pub fn from_credentials(credentials: AccountCredentials, issuer_type: IssuerType) -> Self {
        Self {
            credentials,
            issuer_type,
            legacy_hmac: LegacyHmacAlgorithm::default(),
            clock: Arc::new(SystemClock),
            nonce_source: Arc::new(SystemNonceSource::new()),
        }
    }

    #[must_use]
    pub fn with_legacy_hmac(mut self, algorithm: LegacyHmacAlgorithm) -> Self {
        self.legacy_hmac = algorithm;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_nonce_source(mut self, nonce_source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = nonce_source;
        self
    }

    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.credentials.account_id()
    }

    #[must_use]
    pub fn issuer_type(&self) -> IssuerType {
        self.issuer_type
    }

    #[must_use]
    pub fn credentials(&self) -> &AccountCredentials {
        &self.credentials
    }

    /// Validate `request` and sign a legacy session token for it.
    ///
    /// # Errors
    ///
    /// Any validation failure from [`validation::validate`], or
    /// `SigningFailure` if no nonce can be drawn or the key is unusable.
    #[instrument(skip_all, fields(account_id = %self.account_id()))]
    pub fn issue_session_token(&self, request: &TokenRequest) -> Result<String, TokenError> {
        let result = self.sign_session_token(request);

        match &result {
            Ok(_) => {
                tracing::debug!(target: "token.issuer", "Session token issued");
            }
            Err(e) => {
                if e.is_validation_failure() {
                    metrics::record_validation_failure(e);
                }
                tracing::debug!(
                    target: "token.issuer",
                    error_code = e.code(),
                    "Session token rejected"
                );
            }
        }
        metrics::record_token_issuance(IssuanceKind::Session, result.is_ok());

        result
    }

    /// Session token with the default role, no expiry and no payload.
    ///
    /// # Errors
    ///
    /// See [`TokenIssuer::issue_session_token`].
    pub fn generate_token(&self, session_id: &str) -> Result<String, TokenError> {
        self.issue_session_token(&TokenRequest::new(session_id))
    }

    fn sign_session_token(&self, request: &TokenRequest) -> Result<String, TokenError> {
        let now = self.clock.now();
        let validated = validation::validate(request, self.account_id(), now)?;
        let nonce = self.nonce_source.next_nonce()?;

        token_builder::build_legacy_token(
            &validated,
            self.account_id(),
            self.credentials.secret(),
            self.legacy_hmac,
            nonce,
            now,
        )
    }

    /// Sign a short-lived credential authorizing one platform operation.
    ///
    /// # Errors
    ///
    /// Returns `SigningFailure` if the account secret is empty.
    #[instrument(skip_all, fields(account_id = %self.account_id(), scope = %scope))]
    pub fn issue_service_credential(&self, scope: ServiceScope) -> Result<String, TokenError> {
        let result = token_builder::build_service_credential(
            self.account_id(),
            self.credentials.secret(),
            scope,
            self.issuer_type,
            self.clock.now(),
        );

        if let Err(e) = &result {
            tracing::warn!(
                target: "token.issuer",
                error_code = e.code(),
                "Service credential signing failed"
            );
        }
        metrics::record_token_issuance(IssuanceKind::Service, result.is_ok());

        result
    }
}
