//! Service credential issuance

use common::types::IssuerType;
use token_service::services::token_builder::SERVICE_CREDENTIAL_TTL_SECS;
use token_service::ServiceScope;
use token_test_utils::*;

#[test]
fn test_archive_create_credential() {
    let token = test_issuer()
        .issue_service_credential(ServiceScope::ArchiveCreate)
        .unwrap();

    token
        .assert_valid_service_credential()
        .assert_verifies_with(TEST_ACCOUNT_SECRET)
        .assert_scope("archive.create")
        .assert_issued_by("123456", "partner")
        .assert_issued_at(TEST_NOW_SECS, 3600);
}

#[test]
fn test_every_scope_is_signed() {
    let issuer = test_issuer();
    for scope in ServiceScope::ALL {
        let token = issuer.issue_service_credential(scope).unwrap();
        token
            .assert_valid_service_credential()
            .assert_scope(scope.as_str())
            .assert_issued_at(TEST_NOW_SECS, SERVICE_CREDENTIAL_TTL_SECS);
    }
}

#[test]
fn test_user_issuer_type() {
    let token = pinned_issuer(TEST_ACCOUNT_ID, TEST_ACCOUNT_SECRET, IssuerType::User)
        .issue_service_credential(ServiceScope::PartnerCreate)
        .unwrap();

    token
        .assert_issued_by("123456", "user")
        .assert_scope("partner.create");
}

#[test]
fn test_credential_does_not_verify_with_other_secret() {
    let token = pinned_issuer(TEST_ACCOUNT_ID, TEST_OTHER_SECRET, IssuerType::Partner)
        .issue_service_credential(ServiceScope::Callback)
        .unwrap();

    token.assert_verifies_with(TEST_OTHER_SECRET);
    assert_ne!(
        token,
        test_issuer()
            .issue_service_credential(ServiceScope::Callback)
            .unwrap()
    );
}

#[test]
fn test_short_secret_signs_both_formats() {
    let issuer = pinned_issuer(TEST_ACCOUNT_ID, "abcdefghij0123456789", IssuerType::Partner);

    issuer
        .issue_service_credential(ServiceScope::ArchiveCreate)
        .unwrap()
        .assert_valid_service_credential()
        .assert_verifies_with("abcdefghij0123456789")
        .assert_scope("archive.create");
    assert!(issuer
        .generate_token(&encode_session_id(&TEST_ACCOUNT_ID.to_string()))
        .is_ok());
}
