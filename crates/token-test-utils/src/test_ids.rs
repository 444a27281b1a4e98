//! Fixed test ids and secrets for deterministic tests

use common::types::AccountId;

// Accounts
pub const TEST_ACCOUNT_ID: AccountId = AccountId(123_456);
pub const TEST_OTHER_ACCOUNT_ID: AccountId = AccountId(654_321);

// Secrets
pub const TEST_ACCOUNT_SECRET: &str = "test-secret-do-not-use-in-production-0001";
pub const TEST_OTHER_SECRET: &str = "test-secret-do-not-use-in-production-0002";

// Pinned issuance inputs
pub const TEST_NOW_SECS: i64 = 1_700_000_000;
pub const TEST_NONCE: i32 = 42;

// Session ids
pub const TEST_MALFORMED_SESSION_ID: &str = "jkasjda2ndasd";
