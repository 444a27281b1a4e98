use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Role granted to a session participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Subscriber,
    Publisher,
    Moderator,
    /// No explicit role; the platform applies its own default.
    Default,
}

impl Role {
    /// Wire representation used in the token data string
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Subscriber => "subscriber",
            Role::Publisher => "publisher",
            Role::Moderator => "moderator",
            Role::Default => "",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Case-sensitive; only the four wire values are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subscriber" => Ok(Role::Subscriber),
            "publisher" => Ok(Role::Publisher),
            "moderator" => Ok(Role::Moderator),
            "" => Ok(Role::Default),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

/// Caller-supplied parameters of a session token.
///
/// The role stays a raw string until validation so that session ownership is
/// always checked before anything else. `None` is an explicit null role and
/// is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub session_id: String,
    pub role: Option<String>,
    pub expire_time: Option<DateTime<Utc>>,
    pub connection_data: Option<String>,
}

impl TokenRequest {
    /// Request with the default role (`publisher`), no expiry and no payload.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            role: Some(Role::Publisher.as_str().to_string()),
            expire_time: None,
            connection_data: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role.as_str().to_string());
        self
    }

    /// Set the role from an unvalidated string, or `None` for a null role.
    #[must_use]
    pub fn with_raw_role(mut self, role: Option<&str>) -> Self {
        self.role = role.map(ToString::to_string);
        self
    }

    #[must_use]
    pub fn with_expire_time(mut self, expire_time: DateTime<Utc>) -> Self {
        self.expire_time = Some(expire_time);
        self
    }

    #[must_use]
    pub fn with_connection_data(mut self, data: impl Into<String>) -> Self {
        self.connection_data = Some(data.into());
        self
    }
}

/// Operation a service credential authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceScope {
    SessionCreate,
    ArchiveCreate,
    ArchiveRead,
    ArchiveList,
    ArchiveStop,
    ArchiveDelete,
    ArchiveStorageUpdate,
    ArchiveStorageDelete,
    PartnerCreate,
    PartnerRead,
    PartnerUpdate,
    PartnerDelete,
    PartnerList,
    PartnerRefreshSecret,
    Callback,
}

impl ServiceScope {
    pub const ALL: [ServiceScope; 15] = [
        ServiceScope::SessionCreate,
        ServiceScope::ArchiveCreate,
        ServiceScope::ArchiveRead,
        ServiceScope::ArchiveList,
        ServiceScope::ArchiveStop,
        ServiceScope::ArchiveDelete,
        ServiceScope::ArchiveStorageUpdate,
        ServiceScope::ArchiveStorageDelete,
        ServiceScope::PartnerCreate,
        ServiceScope::PartnerRead,
        ServiceScope::PartnerUpdate,
        ServiceScope::PartnerDelete,
        ServiceScope::PartnerList,
        ServiceScope::PartnerRefreshSecret,
        ServiceScope::Callback,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceScope::SessionCreate => "session.create",
            ServiceScope::ArchiveCreate => "archive.create",
            ServiceScope::ArchiveRead => "archive.read",
            ServiceScope::ArchiveList => "archive.list",
            ServiceScope::ArchiveStop => "archive.stop",
            ServiceScope::ArchiveDelete => "archive.delete",
            ServiceScope::ArchiveStorageUpdate => "archive.storage.update",
            ServiceScope::ArchiveStorageDelete => "archive.storage.delete",
            ServiceScope::PartnerCreate => "partner.create",
            ServiceScope::PartnerRead => "partner.read",
            ServiceScope::PartnerUpdate => "partner.update",
            ServiceScope::PartnerDelete => "partner.delete",
            ServiceScope::PartnerList => "partner.list",
            ServiceScope::PartnerRefreshSecret => "partner.refreshSecret",
            ServiceScope::Callback => "callback",
        }
    }
}

impl fmt::Display for ServiceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceScope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| format!("Invalid service scope: {s}"))
    }
}
