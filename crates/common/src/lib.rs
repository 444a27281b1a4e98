//! Common types shared by the credential issuer and the platform API client.

#![warn(clippy::pedantic)]

/// Module for account identity types
pub mod types;

/// Module for account credentials and environment configuration
pub mod config;

/// Module for secret types that prevent accidental logging
pub mod secret;
