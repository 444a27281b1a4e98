use reqwest::StatusCode;
use thiserror::Error;
use token_service::TokenError;

/// Failures of platform API calls.
///
/// Transport failures are kept apart from the credential kinds: only
/// `Transport` and `ServerError` are worth retrying.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Credential error: {0}")]
    Credential(#[from] TokenError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Unexpected response status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PlatformError {
    /// Map a non-success status to an error kind, prefixing `context`.
    #[must_use]
    pub fn from_status(status: StatusCode, context: &str) -> Self {
        match status.as_u16() {
            400 => PlatformError::BadRequest(format!("{context}. The request was invalid.")),
            403 => PlatformError::Unauthorized(format!(
                "{context}. The request was not authorized."
            )),
            404 => PlatformError::NotFound(format!("{context}. The resource was not found.")),
            409 => PlatformError::Conflict(format!(
                "{context}. The resource is in a conflicting state."
            )),
            code if status.is_server_error() => PlatformError::ServerError {
                status: code,
                message: format!("{context}. A server error occurred."),
            },
            code => PlatformError::UnexpectedStatus {
                status: code,
                message: format!("{context}. The server response was invalid."),
            },
        }
    }

    /// HTTP status behind this error, when there is one
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PlatformError::BadRequest(_) => Some(400),
            PlatformError::Unauthorized(_) => Some(403),
            PlatformError::NotFound(_) => Some(404),
            PlatformError::Conflict(_) => Some(409),
            PlatformError::ServerError { status, .. }
            | PlatformError::UnexpectedStatus { status, .. } => Some(*status),
            PlatformError::Credential(_)
            | PlatformError::Transport(_)
            | PlatformError::InvalidResponse(_) => None,
        }
    }

    /// Whether the same call may succeed if repeated
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PlatformError::Transport(_) | PlatformError::ServerError { .. }
        )
    }
}
