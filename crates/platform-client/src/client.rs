//! Partner-level client of the platform API.
//!
//! Every call signs a fresh service credential scoped to exactly the
//! operation being performed, issued as a `partner`.

use crate::errors::PlatformError;
use crate::models::{
    Archive, ArchiveList, ArchiveStorageBody, Callback, CallbackBody, SessionProperties,
    StartArchiveBody, StorageFallback, StorageType,
};
use crate::transport::{self, Transport};
use common::config::AccountConfig;
use common::types::{AccountId, IssuerType};
use reqwest::{Method, StatusCode};
use token_service::{ServiceScope, TokenError, TokenIssuer, TokenRequest};
use tracing::{debug, instrument};

/// Default page size of the archive listing.
pub const DEFAULT_ARCHIVE_PAGE_SIZE: u32 = 1000;

/// Client for one partner account.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    transport: Transport,
}

impl PlatformClient {
    /// Create a client for the partner account in `config`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &AccountConfig) -> Result<Self, PlatformError> {
        Ok(Self {
            transport: Transport::new(config, IssuerType::Partner)?,
        })
    }

    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.transport.issuer().account_id()
    }

    /// Issuer used for this client's credentials.
    #[must_use]
    pub fn issuer(&self) -> &TokenIssuer {
        self.transport.issuer()
    }

    /// Session token with the default role, no expiry and no payload.
    ///
    /// # Errors
    ///
    /// See [`TokenIssuer::issue_session_token`].
    pub fn generate_token(&self, session_id: &str) -> Result<String, TokenError> {
        self.transport.issuer().generate_token(session_id)
    }

    /// # Errors
    ///
    /// See [`TokenIssuer::issue_session_token`].
    pub fn issue_session_token(&self, request: &TokenRequest) -> Result<String, TokenError> {
        self.transport.issuer().issue_session_token(request)
    }

    /// Create a session and return its id.
    ///
    /// # Errors
    ///
    /// - `Credential` if the service credential cannot be signed
    /// - `Transport` if the platform is unreachable
    /// - a status kind for any non-200 response
    /// - `InvalidResponse` if the body carries an error or no session id
    #[instrument(skip_all, fields(account_id = %self.account_id()))]
    pub async fn create_session(
        &self,
        properties: &SessionProperties,
    ) -> Result<String, PlatformError> {
        const CONTEXT: &str = "Could not create a session";

        let request = self
            .transport
            .request(Method::POST, "/session/create", ServiceScope::SessionCreate)?
            .form(&properties.to_form());
        let response = self.transport.send(request, CONTEXT).await?;
        let body = transport::read_text(response, CONTEXT).await?;

        let session_id = extract_session_id(&body)?;
        debug!(target: "platform.client", "Session created");
        Ok(session_id)
    }

    /// Create a session through the legacy partner-auth endpoint.
    ///
    /// # Errors
    ///
    /// As [`PlatformClient::create_session`], without the credential case.
    #[instrument(skip_all, fields(account_id = %self.account_id()))]
    pub async fn create_session_legacy(
        &self,
        properties: &SessionProperties,
    ) -> Result<String, PlatformError> {
        const CONTEXT: &str = "Could not create a session";

        let request = self
            .transport
            .legacy_request(Method::POST, "/session/create")?
            .form(&properties.to_form());
        let response = self.transport.send(request, CONTEXT).await?;
        let body = transport::read_text(response, CONTEXT).await?;

        extract_session_id(&body)
    }

    fn archive_path(&self, suffix: &str) -> String {
        format!("/v2/partner/{}/archive{suffix}", self.account_id())
    }

    /// Start recording a session.
    ///
    /// # Errors
    ///
    /// `NotFound` if the session does not exist or has no clients, `Conflict`
    /// if it is already being recorded, or any other request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id()))]
    pub async fn start_archive(
        &self,
        session_id: &str,
        name: Option<&str>,
    ) -> Result<Archive, PlatformError> {
        const CONTEXT: &str = "Could not start an archive";

        let body = StartArchiveBody { session_id, name };
        let request = self
            .transport
            .request(Method::POST, &self.archive_path(""), ServiceScope::ArchiveCreate)?
            .json(&body);
        let response = self.transport.send(request, CONTEXT).await?;
        transport::read_json(response, CONTEXT).await
    }

    /// # Errors
    ///
    /// `BadRequest` for a malformed archive id, or any other request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), archive_id = %archive_id))]
    pub async fn get_archive(&self, archive_id: &str) -> Result<Archive, PlatformError> {
        const CONTEXT: &str = "Could not get an archive";

        let request = self.transport.request(
            Method::GET,
            &self.archive_path(&format!("/{archive_id}")),
            ServiceScope::ArchiveRead,
        )?;
        let response = self.transport.send(request, CONTEXT).await?;
        transport::read_json(response, CONTEXT).await
    }

    /// List archives, newest first.
    ///
    /// Query parameters are only sent when they differ from the platform
    /// defaults (offset 0, count 1000).
    ///
    /// # Errors
    ///
    /// Any request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), offset = offset, count = count))]
    pub async fn list_archives(&self, offset: u32, count: u32) -> Result<ArchiveList, PlatformError> {
        const CONTEXT: &str = "Could not list archives";

        let path = self.archive_path(&archive_list_query(offset, count));
        let request = self
            .transport
            .request(Method::GET, &path, ServiceScope::ArchiveList)?;
        let response = self.transport.send(request, CONTEXT).await?;
        transport::read_json(response, CONTEXT).await
    }

    /// # Errors
    ///
    /// `Conflict` if the archive is not being recorded, or any other request
    /// failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), archive_id = %archive_id))]
    pub async fn stop_archive(&self, archive_id: &str) -> Result<Archive, PlatformError> {
        const CONTEXT: &str = "Could not stop an archive";

        let request = self.transport.request(
            Method::POST,
            &self.archive_path(&format!("/{archive_id}/stop")),
            ServiceScope::ArchiveStop,
        )?;
        let response = self.transport.send(request, CONTEXT).await?;
        transport::read_json(response, CONTEXT).await
    }

    /// # Errors
    ///
    /// `Conflict` if the archive is still recording, or any other request
    /// failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), archive_id = %archive_id))]
    pub async fn delete_archive(&self, archive_id: &str) -> Result<(), PlatformError> {
        const CONTEXT: &str = "Could not delete an archive";

        let request = self.transport.request(
            Method::DELETE,
            &self.archive_path(&format!("/{archive_id}")),
            ServiceScope::ArchiveDelete,
        )?;
        let response = self.transport.send(request, CONTEXT).await?;
        transport::check_status(response, StatusCode::NO_CONTENT, CONTEXT)?;
        Ok(())
    }

    /// Set where completed archives are uploaded.
    ///
    /// `config` is passed through verbatim; its shape depends on
    /// `storage_type`.
    ///
    /// # Errors
    ///
    /// Any request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), storage_type = ?storage_type))]
    pub async fn update_archive_storage(
        &self,
        storage_type: StorageType,
        config: &serde_json::Value,
        fallback: StorageFallback,
    ) -> Result<(), PlatformError> {
        const CONTEXT: &str = "Could not update archive storage";

        let body = ArchiveStorageBody {
            storage_type,
            config,
            fallback,
        };
        let request = self
            .transport
            .request(
                Method::PUT,
                &self.archive_path("/storage"),
                ServiceScope::ArchiveStorageUpdate,
            )?
            .json(&body);
        let response = self.transport.send(request, CONTEXT).await?;
        transport::check_status(response, StatusCode::OK, CONTEXT)?;
        Ok(())
    }

    /// # Errors
    ///
    /// `NotFound` if no upload target is configured, or any other request
    /// failure.
    #[instrument(skip_all, fields(account_id = %self.account_id()))]
    pub async fn delete_archive_storage(&self) -> Result<(), PlatformError> {
        const CONTEXT: &str = "Could not delete archive storage";

        let request = self.transport.request(
            Method::DELETE,
            &self.archive_path("/storage"),
            ServiceScope::ArchiveStorageDelete,
        )?;
        let response = self.transport.send(request, CONTEXT).await?;
        transport::check_status(response, StatusCode::NO_CONTENT, CONTEXT)?;
        Ok(())
    }

    /// Register `url` to receive `event` notifications of `group`.
    ///
    /// # Errors
    ///
    /// Any request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), group = %group, event = %event))]
    pub async fn update_callback(
        &self,
        group: &str,
        event: &str,
        url: &str,
    ) -> Result<Callback, PlatformError> {
        const CONTEXT: &str = "Could not update callback url";

        let request = self
            .transport
            .request(
                Method::POST,
                &format!("/v2/partner/{}/callback", self.account_id()),
                ServiceScope::Callback,
            )?
            .json(&CallbackBody { group, event, url });
        let response = self.transport.send(request, CONTEXT).await?;
        transport::read_json(response, CONTEXT).await
    }
}

fn archive_list_query(offset: u32, count: u32) -> String {
    let mut params = Vec::new();
    if offset != 0 {
        params.push(format!("offset={offset}"));
    }
    if count != DEFAULT_ARCHIVE_PAGE_SIZE {
        params.push(format!("count={count}"));
    }

    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

/// Pull the session id out of a session-create XML response.
fn extract_session_id(body: &str) -> Result<String, PlatformError> {
    const OPEN: &str = "<session_id>";
    const CLOSE: &str = "</session_id>";

    if body.contains("<error") {
        return Err(PlatformError::InvalidResponse(
            "Unable to create session".to_string(),
        ));
    }

    body.find(OPEN)
        .map(|start| start + OPEN.len())
        .and_then(|start| {
            let rest = body.get(start..)?;
            rest.find(CLOSE).and_then(|end| rest.get(..end))
        })
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| {
            PlatformError::InvalidResponse(
                "Session create response carried no session id".to_string(),
            )
        })
}
