//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by client actions
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a response (connection, timeout, bad URL)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with an error status
    #[error("API error {status} {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    /// Machine-readable code of an API error
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Build an API error from a non-success response body
    pub(crate) fn from_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => Self::Api {
                status,
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => Self::Api {
                status,
                code: "UNKNOWN".to_string(),
                message: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }
}

/// `{"error": {...}}` body sent by the server
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    code: String,
    message: String,
}

/// Result alias for client actions
pub type ClientResult<T> = Result<T, ClientError>;
