//! Account identity types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric identifier of a platform account (the "API key").
///
/// Immutable once assigned. It is embedded in every credential the account
/// issues and in every session identifier the platform mints for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u32);

impl AccountId {
    /// Raw numeric value
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AccountId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for AccountId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Category of credentials a client was constructed with.
///
/// Selects the `ist` claim of service credentials. Partner credentials manage
/// sessions and archives for one API key; user credentials manage the partner
/// keys themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuerType {
    /// Account-level (master) credentials
    User,
    /// API-key-level credentials
    Partner,
}

impl IssuerType {
    /// Wire value of the `ist` claim
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuerType::User => "user",
            IssuerType::Partner => "partner",
        }
    }

    /// Parse a wire value; returns `None` for anything else
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(IssuerType::User),
            "partner" => Some(IssuerType::Partner),
            _ => None,
        }
    }
}

impl fmt::Display for IssuerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
