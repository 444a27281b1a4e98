use crate::errors::PlatformError;
use crate::models::{CreatePartnerBody, Partner, PartnerStatus, UpdatePartnerBody};
use crate::transport::{self, Transport};
use common::config::AccountConfig;
use common::types::{AccountId, IssuerType};
use reqwest::{Method, StatusCode};
use token_service::ServiceScope;
use tracing::{info, instrument};

/// Manages partner accounts on behalf of a user account.
///
/// Credentials are issued as `user`, so `config` must hold user-level
/// (master) credentials rather than a partner key.
#[derive(Debug, Clone)]
pub struct Provisioning {
    transport: Transport,
}

impl Provisioning {
    /// # Errors
    ///
    /// Returns `PlatformError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &AccountConfig) -> Result<Self, PlatformError> {
        Ok(Self {
            transport: Transport::new(config, IssuerType::User)?,
        })
    }

    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.transport.issuer().account_id()
    }

    /// # Errors
    ///
    /// Any request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id()))]
    pub async fn create_partner(&self, name: &str) -> Result<Partner, PlatformError> {
        const CONTEXT: &str = "Could not create a partner";

        let request = self
            .transport
            .request(Method::POST, "/v2/partner/", ServiceScope::PartnerCreate)?
            .json(&CreatePartnerBody { name });
        let response = self.transport.send(request, CONTEXT).await?;
        let partner: Partner = transport::read_json(response, CONTEXT).await?;

        info!(target: "platform.provisioning", partner_id = partner.id, "Partner created");
        Ok(partner)
    }

    /// # Errors
    ///
    /// Any request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), partner_id = partner_id))]
    pub async fn get_partner(&self, partner_id: u32) -> Result<Partner, PlatformError> {
        const CONTEXT: &str = "Could not get a partner";

        let request = self.transport.request(
            Method::GET,
            &format!("/v2/partner/{partner_id}"),
            ServiceScope::PartnerRead,
        )?;
        let response = self.transport.send(request, CONTEXT).await?;
        transport::read_json(response, CONTEXT).await
    }

    /// Activate or suspend a partner.
    ///
    /// # Errors
    ///
    /// Any request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), partner_id = partner_id, status = status.as_str()))]
    pub async fn update_partner(
        &self,
        partner_id: u32,
        status: PartnerStatus,
    ) -> Result<Partner, PlatformError> {
        const CONTEXT: &str = "Could not update a partner";

        let request = self
            .transport
            .request(
                Method::PUT,
                &format!("/v2/partner/{partner_id}"),
                ServiceScope::PartnerUpdate,
            )?
            .json(&UpdatePartnerBody { status });
        let response = self.transport.send(request, CONTEXT).await?;
        transport::read_json(response, CONTEXT).await
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown partner, or any other request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), partner_id = partner_id))]
    pub async fn delete_partner(&self, partner_id: u32) -> Result<(), PlatformError> {
        const CONTEXT: &str = "Could not delete a partner";

        let request = self.transport.request(
            Method::DELETE,
            &format!("/v2/partner/{partner_id}"),
            ServiceScope::PartnerDelete,
        )?;
        let response = self.transport.send(request, CONTEXT).await?;
        transport::check_status(response, StatusCode::NO_CONTENT, CONTEXT)?;

        info!(target: "platform.provisioning", partner_id, "Partner deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Any request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id()))]
    pub async fn list_partners(&self) -> Result<Vec<Partner>, PlatformError> {
        const CONTEXT: &str = "Could not list partners";

        let request =
            self.transport
                .request(Method::GET, "/v2/partner/", ServiceScope::PartnerList)?;
        let response = self.transport.send(request, CONTEXT).await?;
        transport::read_json(response, CONTEXT).await
    }

    /// Replace a partner's secret. The returned record carries the new one.
    ///
    /// # Errors
    ///
    /// Any request failure.
    #[instrument(skip_all, fields(account_id = %self.account_id(), partner_id = partner_id))]
    pub async fn refresh_secret(&self, partner_id: u32) -> Result<Partner, PlatformError> {
        const CONTEXT: &str = "Could not refresh a partner secret";

        let request = self.transport.request(
            Method::POST,
            &format!("/v2/partner/{partner_id}/refreshSecret"),
            ServiceScope::PartnerRefreshSecret,
        )?;
        let response = self.transport.send(request, CONTEXT).await?;
        let partner = transport::read_json(response, CONTEXT).await?;

        info!(target: "platform.provisioning", partner_id, "Partner secret refreshed");
        Ok(partner)
    }
}
