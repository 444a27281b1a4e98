//! Request and response records of the platform API.
//!
//! Response records tolerate unknown fields so that additions on the
//! platform side do not break older clients.

use common::secret::SecretString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Options for creating a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionProperties {
    pub location: Option<String>,
    pub p2p_preference: bool,
}

impl SessionProperties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// IP address hint used to pick the media server location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_p2p_preference(mut self, enabled: bool) -> Self {
        self.p2p_preference = enabled;
        self
    }

    /// Form parameters of the session-create request.
    #[must_use]
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(location) = &self.location {
            params.push(("location", location.clone()));
        }
        if self.p2p_preference {
            params.push(("p2p.preference", "enabled".to_string()));
        }
        params
    }
}

/// Lifecycle state of an archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveStatus {
    Available,
    Deleted,
    Failed,
    Started,
    Stopped,
    Uploaded,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A recording of a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub partner_id: u32,
    /// Creation time in Unix epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
    /// Length in seconds
    #[serde(default)]
    pub duration: u32,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub status: ArchiveStatus,
    #[serde(default)]
    pub reason: String,
    /// Download URL, present only once the archive is available
    #[serde(default)]
    pub url: Option<String>,
}

/// One page of archives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchiveList {
    /// Total number of archives, not just this page
    pub count: u32,
    #[serde(default)]
    pub items: Vec<Archive>,
}

/// Status of a provisioned partner account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerStatus {
    Active,
    Suspended,
}

impl PartnerStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerStatus::Active => "ACTIVE",
            PartnerStatus::Suspended => "SUSPENDED",
        }
    }
}

impl Serialize for PartnerStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PartnerStatus {
    /// Older partner records carry `VALID` and similar placeholders, which
    /// all mean active.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "SUSPENDED" => PartnerStatus::Suspended,
            _ => PartnerStatus::Active,
        })
    }
}

/// A provisioned partner account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: u32,
    #[serde(default)]
    pub secret: Option<SecretString>,
    pub status: PartnerStatus,
    #[serde(default)]
    pub name: Option<String>,
    /// Creation time in Unix epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
}

/// A registered event callback.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Callback {
    pub id: u32,
    pub group: String,
    pub event: String,
    pub url: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Upload target for completed archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    S3,
    Azure,
}

/// What happens to an archive when the upload target is unreachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFallback {
    /// Keep the archive on the platform and make it downloadable there
    Opentok,
    #[default]
    None,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StartArchiveBody<'a> {
    pub session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ArchiveStorageBody<'a> {
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    pub config: &'a serde_json::Value,
    pub fallback: StorageFallback,
}

#[derive(Debug, Serialize)]
pub(crate) struct CallbackBody<'a> {
    pub group: &'a str,
    pub event: &'a str,
    pub url: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePartnerBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdatePartnerBody {
    pub status: PartnerStatus,
}
