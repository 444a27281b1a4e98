use common::config::AccountConfig;
use common::types::IssuerType;
use platform_client::auth::SERVICE_AUTH_HEADER;
use platform_client::{PlatformClient, Provisioning};
use token_test_utils::test_credentials;
use wiremock::MockServer;

pub fn test_config(server: &MockServer) -> AccountConfig {
    AccountConfig::new(test_credentials(), IssuerType::Partner).with_api_url(server.uri())
}

pub fn test_client(server: &MockServer) -> PlatformClient {
    PlatformClient::new(&test_config(server)).unwrap()
}

pub fn test_provisioning(server: &MockServer) -> Provisioning {
    Provisioning::new(&test_config(server)).unwrap()
}

/// Service credentials carried by every request the server has seen, in order.
pub async fn received_credentials(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .map(|request| {
            request
                .headers
                .get(SERVICE_AUTH_HEADER)
                .expect("request carries a service credential")
                .to_str()
                .unwrap()
                .to_string()
        })
        .collect()
}
