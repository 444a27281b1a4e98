//! Rejection paths and the order in which checks fire

use chrono::Duration;
use token_service::{TokenError, TokenRequest};
use token_test_utils::*;

#[test]
fn test_session_without_delimiter_is_malformed() {
    let session_ids = [
        TEST_MALFORMED_SESSION_ID.to_string(),
        encode_session_id_claims("no delimiter here"),
        "1_".to_string(),
        "x".to_string(),
        String::new(),
    ];

    for session_id in session_ids {
        assert_eq!(
            test_issuer().generate_token(&session_id),
            Err(TokenError::MalformedSessionId),
            "session id {session_id:?}"
        );
    }
}

#[test]
fn test_session_of_other_account_is_rejected() {
    let session_id = encode_session_id(&TEST_OTHER_ACCOUNT_ID.to_string());
    assert_eq!(
        test_issuer().generate_token(&session_id),
        Err(TokenError::SessionOwnershipMismatch)
    );
}

#[test]
fn test_owner_compared_as_text() {
    // Same number, different rendering
    let session_id = encode_session_id("0123456");
    assert_eq!(
        test_issuer().generate_token(&session_id),
        Err(TokenError::SessionOwnershipMismatch)
    );
}

#[test]
fn test_ownership_precedes_every_other_check() {
    let request = TokenRequest::new(encode_session_id(&TEST_OTHER_ACCOUNT_ID.to_string()))
        .with_raw_role(Some("admin"))
        .with_expire_time(test_now() - Duration::days(1))
        .with_connection_data("x".repeat(5000));

    assert_eq!(
        test_issuer().issue_session_token(&request),
        Err(TokenError::SessionOwnershipMismatch)
    );
}

#[test]
fn test_role_precedes_expiry_and_payload() {
    let request = TokenRequest::new(encode_session_id(&TEST_ACCOUNT_ID.to_string()))
        .with_raw_role(Some("admin"))
        .with_expire_time(test_now() - Duration::days(1))
        .with_connection_data("x".repeat(5000));

    assert_eq!(
        test_issuer().issue_session_token(&request),
        Err(TokenError::InvalidRole("admin".to_string()))
    );
}

#[test]
fn test_expiry_precedes_payload() {
    let request = TokenRequest::new(encode_session_id(&TEST_ACCOUNT_ID.to_string()))
        .with_expire_time(test_now() + Duration::days(31))
        .with_connection_data("x".repeat(5000));

    assert!(matches!(
        test_issuer().issue_session_token(&request),
        Err(TokenError::ExpiryOutOfRange(_))
    ));
}

#[test]
fn test_rejections_carry_stable_codes() {
    let err = test_issuer()
        .generate_token(TEST_MALFORMED_SESSION_ID)
        .unwrap_err();
    assert_eq!(err.code(), "MALFORMED_SESSION_ID");
    assert_eq!(err.to_string(), "An invalid session ID was passed");
}
