//! Partner provisioning endpoints, authorized as a user account

use crate::support::{received_credentials, test_provisioning};
use common::secret::ExposeSecret;
use platform_client::{PartnerStatus, PlatformError};
use serde_json::json;
use token_test_utils::*;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn partner_json(status: &str, secret: &str) -> serde_json::Value {
    json!({
        "id": 99,
        "secret": secret,
        "status": status,
        "name": "acme",
        "createdAt": 1_395_183_243_556_i64
    })
}

#[tokio::test]
async fn test_create_partner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/partner/"))
        .and(body_json(json!({"name": "acme"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(partner_json("ACTIVE", "s1")))
        .expect(1)
        .mount(&server)
        .await;

    let partner = test_provisioning(&server).create_partner("acme").await.unwrap();
    assert_eq!(partner.id, 99);
    assert_eq!(partner.status, PartnerStatus::Active);
    assert_eq!(partner.secret.unwrap().expose_secret(), "s1");

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_verifies_with(TEST_ACCOUNT_SECRET)
        .assert_scope("partner.create")
        .assert_issued_by("123456", "user");
}

#[tokio::test]
async fn test_get_partner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/partner/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(partner_json("VALID", "s1")))
        .expect(1)
        .mount(&server)
        .await;

    let partner = test_provisioning(&server).get_partner(99).await.unwrap();
    assert_eq!(partner.status, PartnerStatus::Active);

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("partner.read")
        .assert_issued_by("123456", "user");
}

#[tokio::test]
async fn test_suspend_partner() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/partner/99"))
        .and(body_json(json!({"status": "SUSPENDED"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(partner_json("SUSPENDED", "s1")))
        .expect(1)
        .mount(&server)
        .await;

    let partner = test_provisioning(&server)
        .update_partner(99, PartnerStatus::Suspended)
        .await
        .unwrap();
    assert_eq!(partner.status, PartnerStatus::Suspended);

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("partner.update");
}

#[tokio::test]
async fn test_delete_partner() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/partner/99"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_provisioning(&server).delete_partner(99).await.unwrap();

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("partner.delete");
}

#[tokio::test]
async fn test_delete_unknown_partner() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/partner/100"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_provisioning(&server).delete_partner(100).await;
    assert!(matches!(result, Err(PlatformError::NotFound(_))));
}

#[tokio::test]
async fn test_list_partners() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/partner/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            partner_json("ACTIVE", "s1"),
            partner_json("SUSPENDED", "s2")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let partners = test_provisioning(&server).list_partners().await.unwrap();
    let statuses: Vec<PartnerStatus> = partners.iter().map(|p| p.status).collect();
    assert_eq!(statuses, [PartnerStatus::Active, PartnerStatus::Suspended]);

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("partner.list");
}

#[tokio::test]
async fn test_refresh_secret() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/partner/99/refreshSecret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(partner_json("ACTIVE", "s2")))
        .expect(1)
        .mount(&server)
        .await;

    let partner = test_provisioning(&server).refresh_secret(99).await.unwrap();
    assert_eq!(partner.secret.unwrap().expose_secret(), "s2");

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("partner.refreshSecret");
}
