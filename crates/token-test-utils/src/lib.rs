//! # Token Test Utilities
//!
//! Shared test utilities for credential issuance.
//!
//! This crate provides:
//! - Session id fixtures (encode a session owned by any account)
//! - Pinned clock and nonce sources for deterministic tokens
//! - Fixed test account ids and secrets
//! - Custom assertions (`LegacyTokenAssertions`, `ServiceCredentialAssertions`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use token_test_utils::*;
//!
//! #[test]
//! fn test_example() {
//!     let issuer = test_issuer();
//!     let token = issuer.generate_token(&encode_session_id("123456")).unwrap();
//!
//!     token
//!         .assert_legacy_format()
//!         .assert_signed_with(TEST_ACCOUNT_SECRET, LegacyHmacAlgorithm::Sha1)
//!         .assert_data_field("role", "publisher");
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod test_ids;

pub use assertions::*;
pub use fixtures::*;
pub use test_ids::*;
