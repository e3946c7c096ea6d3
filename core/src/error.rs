//! Error types for the accounts API client.
//!
//! # Design
//! Non-2xx responses are split by who is at fault: `ClientRejected` for 4xx,
//! `ServerFailed` for 5xx. `NotFound` is the 404 case of `ClientRejected`,
//! kept separate because callers often want to tell "gone" apart from
//! "refused". `TransportUnavailable` means no response arrived at all.

/// Errors returned by `AccountClient` and `AccountApi` implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The operation needs a server-assigned id and none was given.
    #[error("account id is required")]
    MissingId,

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a 4xx status other than 404.
    #[error("request rejected with HTTP {status}: {body}")]
    ClientRejected { status: u16, body: String },

    /// The server returned a 5xx status.
    #[error("server failed with HTTP {status}: {body}")]
    ServerFailed { status: u16, body: String },

    /// The request never reached the server or no response came back.
    #[error("{0}")]
    TransportUnavailable(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Classify a non-2xx status code.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => ApiError::NotFound,
            500..=599 => ApiError::ServerFailed { status, body },
            _ => ApiError::ClientRejected { status, body },
        }
    }

    /// True when no usable response was received, either because the
    /// round-trip failed or because the body was unreadable.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::TransportUnavailable(_) | ApiError::Deserialization(_))
    }
}
