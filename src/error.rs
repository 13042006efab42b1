use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not encode storage file: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Server error {status}: {payload}")]
    Server { status: StatusCode, payload: Value },
    #[error("Server error {status}: {body}")]
    ServerText { status: StatusCode, body: String },
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// HTTP status of the rejected response, if one was received.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } | Self::ServerText { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Reads a non-empty string field from the structured error payload.
    pub fn payload_field(&self, field: &str) -> Option<&str> {
        match self {
            Self::Server { payload, .. } => payload.get(field).and_then(Value::as_str).filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    /// Human-readable message supplied by the server.
    ///
    /// The backend reports validation and auth failures under `detail` and
    /// everything else under `error`.
    pub fn server_message(&self) -> Option<&str> {
        self.payload_field("detail").or_else(|| self.payload_field("error"))
    }
}
