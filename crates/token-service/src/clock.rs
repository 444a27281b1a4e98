//! Time and randomness inputs to token issuance.
//!
//! Issuance reads exactly two non-deterministic inputs: the current time and
//! a 32-bit nonce. Both sit behind traits so tests can pin them.

use crate::errors::TokenError;
use chrono::{DateTime, Utc};
use ring::rand::{SecureRandom, SystemRandom};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of the per-token nonce.
///
/// Uniqueness is best-effort. The nonce only keeps two otherwise identical
/// requests from producing identical signatures.
pub trait NonceSource: Send + Sync {
    /// Draw the next nonce.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::SigningFailure` if no nonce can be produced.
    fn next_nonce(&self) -> Result<i32, TokenError>;
}

/// Nonces drawn from the operating system CSPRNG.
#[derive(Debug)]
pub struct SystemNonceSource {
    rng: SystemRandom,
}

impl Default for SystemNonceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemNonceSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl NonceSource for SystemNonceSource {
    fn next_nonce(&self) -> Result<i32, TokenError> {
        let mut bytes = [0u8; 4];
        self.rng.fill(&mut bytes).map_err(|_| {
            tracing::error!(target: "token.clock", "CSPRNG failed to produce a nonce");
            TokenError::SigningFailure("Nonce generation failed".to_string())
        })?;
        Ok(i32::from_be_bytes(bytes))
    }
}
