//! Archive control, storage and callback endpoints

use crate::support::{received_credentials, test_client};
use platform_client::{ArchiveStatus, PlatformError, StorageFallback, StorageType};
use serde_json::json;
use token_test_utils::*;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARCHIVE_ID: &str = "30b3ebf1-ba36-4f5b-8def-6f70d9986fe9";

fn archive_json(status: &str) -> serde_json::Value {
    json!({
        "createdAt": 1_395_183_243_556_i64,
        "duration": 0,
        "id": ARCHIVE_ID,
        "name": "",
        "partnerId": 123_456,
        "reason": "",
        "sessionId": "SESSIONID",
        "size": 0,
        "status": status,
        "url": null
    })
}

#[tokio::test]
async fn test_start_archive() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/partner/123456/archive"))
        .and(body_json(json!({"sessionId": "SESSIONID", "name": "ARCHIVE NAME"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("started")))
        .expect(1)
        .mount(&server)
        .await;

    let archive = test_client(&server)
        .start_archive("SESSIONID", Some("ARCHIVE NAME"))
        .await
        .unwrap();
    assert_eq!(archive.id, ARCHIVE_ID);
    assert_eq!(archive.status, ArchiveStatus::Started);

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("archive.create")
        .assert_issued_by("123456", "partner");
}

#[tokio::test]
async fn test_start_archive_without_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/partner/123456/archive"))
        .and(body_json(json!({"sessionId": "SESSIONID"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("started")))
        .expect(1)
        .mount(&server)
        .await;

    assert!(test_client(&server)
        .start_archive("SESSIONID", None)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_start_archive_already_recording() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/partner/123456/archive"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already started"))
        .mount(&server)
        .await;

    let result = test_client(&server).start_archive("SESSIONID", None).await;
    assert!(matches!(result, Err(PlatformError::Conflict(_))));
}

#[tokio::test]
async fn test_get_archive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/partner/123456/archive/{ARCHIVE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("available")))
        .expect(1)
        .mount(&server)
        .await;

    let archive = test_client(&server).get_archive(ARCHIVE_ID).await.unwrap();
    assert_eq!(archive.status, ArchiveStatus::Available);
    assert_eq!(archive.partner_id, 123_456);

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("archive.read");
}

#[tokio::test]
async fn test_list_archives_default_page_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/partner/123456/archive"))
        .and(query_param_is_missing("offset"))
        .and(query_param_is_missing("count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "items": [archive_json("available"), archive_json("stopped")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = test_client(&server).list_archives(0, 1000).await.unwrap();
    assert_eq!(list.count, 2);
    assert_eq!(list.items.len(), 2);

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("archive.list");
}

#[tokio::test]
async fn test_list_archives_paged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/partner/123456/archive"))
        .and(query_param("offset", "10"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 60,
            "items": [archive_json("uploaded")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = test_client(&server).list_archives(10, 5).await.unwrap();
    assert_eq!(list.count, 60);
    assert_eq!(list.items.len(), 1);
}

#[tokio::test]
async fn test_stop_archive() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/partner/123456/archive/{ARCHIVE_ID}/stop")))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("stopped")))
        .expect(1)
        .mount(&server)
        .await;

    let archive = test_client(&server).stop_archive(ARCHIVE_ID).await.unwrap();
    assert_eq!(archive.status, ArchiveStatus::Stopped);

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("archive.stop");
}

#[tokio::test]
async fn test_delete_archive() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v2/partner/123456/archive/{ARCHIVE_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server).delete_archive(ARCHIVE_ID).await.unwrap();

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("archive.delete");
}

#[tokio::test]
async fn test_delete_archive_requires_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v2/partner/123456/archive/{ARCHIVE_ID}")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = test_client(&server).delete_archive(ARCHIVE_ID).await;
    assert!(matches!(
        result,
        Err(PlatformError::UnexpectedStatus { status: 200, .. })
    ));
}

#[tokio::test]
async fn test_update_archive_storage() {
    let server = MockServer::start().await;
    let config = json!({"accessKey": "key", "secretKey": "secret", "bucket": "bucket"});
    Mock::given(method("PUT"))
        .and(path("/v2/partner/123456/archive/storage"))
        .and(body_json(json!({
            "type": "s3",
            "config": config.clone(),
            "fallback": "opentok"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .update_archive_storage(StorageType::S3, &config, StorageFallback::Opentok)
        .await
        .unwrap();

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("archive.storage.update");
}

#[tokio::test]
async fn test_delete_archive_storage() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/partner/123456/archive/storage"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server).delete_archive_storage().await.unwrap();

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("archive.storage.delete");
}

#[tokio::test]
async fn test_update_callback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/partner/123456/callback"))
        .and(body_json(json!({
            "group": "archive",
            "event": "status",
            "url": "https://example.com/hooks/archive"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "group": "archive",
            "event": "status",
            "url": "https://example.com/hooks/archive",
            "createdAt": 1_395_183_243_556_i64,
            "updatedAt": 1_395_183_243_556_i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    let callback = test_client(&server)
        .update_callback("archive", "status", "https://example.com/hooks/archive")
        .await
        .unwrap();
    assert_eq!(callback.id, 7);
    assert_eq!(callback.url, "https://example.com/hooks/archive");

    received_credentials(&server)
        .await
        .first()
        .unwrap()
        .assert_scope("callback");
}

#[tokio::test]
async fn test_each_request_gets_its_own_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/partner/123456/archive/{ARCHIVE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("available")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/partner/123456/archive/{ARCHIVE_ID}/stop")))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("stopped")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.get_archive(ARCHIVE_ID).await.unwrap();
    client.stop_archive(ARCHIVE_ID).await.unwrap();

    let scopes: Vec<String> = received_credentials(&server)
        .await
        .iter()
        .map(|credential| decode_service_credential(credential).scope)
        .collect();
    assert_eq!(scopes, ["archive.read", "archive.stop"]);
}
