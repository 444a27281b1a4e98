use crate::auth;
use crate::errors::PlatformError;
use common::config::AccountConfig;
use common::types::IssuerType;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use token_service::{ServiceScope, TokenIssuer};
use tracing::{error, warn};

/// Connect timeout, separate from the overall request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP plumbing shared by the partner and provisioning clients.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: Client,
    base_url: String,
    issuer: TokenIssuer,
}

impl Transport {
    pub(crate) fn new(config: &AccountConfig, issuer_type: IssuerType) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                error!(target: "platform.transport", error = %e, "Failed to build HTTP client");
                PlatformError::Transport(format!("Failed to build HTTP client: {e}"))
            })?;

        let issuer = TokenIssuer::from_credentials(config.credentials.clone(), issuer_type)
            .with_legacy_hmac(config.legacy_hmac);

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            issuer,
        })
    }

    pub(crate) fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request authorized with a service credential for `scope`.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        scope: ServiceScope,
    ) -> Result<RequestBuilder, PlatformError> {
        let headers = auth::service_auth_headers(&self.issuer, scope)?;
        Ok(self.client.request(method, self.url(path)).headers(headers))
    }

    /// Request authorized with the legacy partner headers.
    pub(crate) fn legacy_request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, PlatformError> {
        let headers = auth::legacy_auth_headers(self.issuer.credentials())?;
        Ok(self.client.request(method, self.url(path)).headers(headers))
    }

    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Response, PlatformError> {
        request.send().await.map_err(|e| {
            warn!(target: "platform.transport", error = %e, "{}", context);
            PlatformError::Transport(format!("{context}: {e}"))
        })
    }
}

/// Fail unless the response has exactly `expected` status.
pub(crate) fn check_status(
    response: Response,
    expected: StatusCode,
    context: &str,
) -> Result<Response, PlatformError> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    if status.is_server_error() {
        warn!(target: "platform.transport", status = %status, "Platform returned server error");
    } else {
        warn!(target: "platform.transport", status = %status, "Platform rejected request");
    }
    Err(PlatformError::from_status(status, context))
}

/// Read a 200 response as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, PlatformError> {
    let response = check_status(response, StatusCode::OK, context)?;
    response.json().await.map_err(|e| {
        error!(target: "platform.transport", error = %e, "Failed to parse platform response");
        PlatformError::InvalidResponse(format!("{context}. The response body was invalid: {e}"))
    })
}

/// Read a 200 response as text.
pub(crate) async fn read_text(response: Response, context: &str) -> Result<String, PlatformError> {
    let response = check_status(response, StatusCode::OK, context)?;
    response.text().await.map_err(|e| {
        error!(target: "platform.transport", error = %e, "Failed to read platform response");
        PlatformError::Transport(format!("{context}: {e}"))
    })
}
