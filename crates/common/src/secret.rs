//! Secret types for protecting sensitive values from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Account secrets,
//! legacy partner-auth header values and issued credentials are all held in
//! these types so that a derived `Debug` never prints them.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct Account {
//!     api_key: u32,
//!     api_secret: SecretString,
//! }
//!
//! let account = Account {
//!     api_key: 123_456,
//!     api_secret: SecretString::from("0123456789abcdef"),
//! };
//!
//! // The secret is redacted in Debug output
//! assert!(!format!("{account:?}").contains("0123456789abcdef"));
//!
//! // Signing code reads it explicitly
//! let key: &str = account.api_secret.expose_secret();
//! assert_eq!(key.len(), 16);
//! ```
//!
//! # Usage Guidelines
//!
//! Use `SecretString` for:
//! - Account (API) secrets
//! - Values of the legacy `X-TB-PARTNER-AUTH` header, which embed the secret
//! - Secrets returned by partner provisioning calls

// Re-export the main types from secrecy
pub use secrecy::{ExposeSecret, SecretBox, SecretString};
