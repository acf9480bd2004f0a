//! # API Error Types

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single backend exchange.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Unable to connect to server: {message}")]
    Transport { message: String },

    /// The backend answered with a non-2xx status.
    #[error("{}", status_text(*.status, .message.as_deref()))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// The response body was not the JSON the caller expected.
    #[error("Invalid response from server: {message}")]
    Decode { message: String },

    /// The response body was empty where a record was required.
    #[error("Empty response from server")]
    EmptyBody,

    /// The request payload could not be serialized.
    #[error("Invalid request payload: {message}")]
    Encode { message: String },
}

fn status_text(status: StatusCode, message: Option<&str>) -> &str {
    message.unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed"))
}

impl ApiError {
    pub fn transport<T: Into<String>>(message: T) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(status: StatusCode, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    pub fn decode<T: Into<String>>(message: T) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn encode<T: Into<String>>(message: T) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// The backend's own message when it sent one, otherwise `fallback`.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Self::EmptyBody => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Status code of a rejected request.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status_code(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
