//! Async client of the session platform's REST API.
//!
//! Wraps session creation, archive control, archive storage, event callbacks
//! and partner provisioning. Each request is authorized with a service
//! credential from `token-service`, scoped to that one operation.
//!
//! - [`PlatformClient`] acts for a partner account.
//! - [`Provisioning`] acts for a user account that manages partners.

pub mod auth;
pub mod client;
pub mod errors;
pub mod models;
pub mod provisioning;
mod transport;

pub use client::PlatformClient;
pub use errors::PlatformError;
pub use models::{
    Archive, ArchiveList, ArchiveStatus, Callback, Partner, PartnerStatus, SessionProperties,
    StorageFallback, StorageType,
};
pub use provisioning::Provisioning;
