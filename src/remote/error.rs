use thiserror::Error;

/// Failure talking to the management API.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("build http client")]
    Client(#[source] reqwest::Error),

    #[error("{label}: request failed")]
    Request {
        label: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unauthorized (access token invalid or expired)")]
    Unauthorized,

    #[error("forbidden (insufficient privileges for {label})")]
    Forbidden { label: String },

    #[error("{label}: remote returned {status}: {message}")]
    Status {
        label: String,
        status: u16,
        message: String,
    },

    #[error("{label}: could not decode response")]
    Decode {
        label: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Unauthorized => Some(401),
            TransportError::Forbidden { .. } => Some(403),
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
