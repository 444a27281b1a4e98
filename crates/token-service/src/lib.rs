//! Session credential issuance library.
//!
//! Issues signed session tokens that let end clients join a platform session
//! with a given role, and short-lived service credentials that authenticate
//! server-side calls to the platform API.
//!
//! # Modules
//!
//! - `session_id` - Decoding of opaque session identifiers
//! - `crypto` - Legacy HMAC and HS256 signing
//! - `models` - Roles, token requests and service scopes
//! - `services` - Validation, token assembly and the `TokenIssuer` facade
//! - `clock` - Time and nonce sources
//! - `errors` - Error types
//! - `observability` - Metrics

pub mod clock;
pub mod crypto;
pub mod errors;
pub mod models;
pub mod observability;
pub mod services;
pub mod session_id;

pub use errors::TokenError;
pub use models::{Role, ServiceScope, TokenRequest};
pub use services::TokenIssuer;
