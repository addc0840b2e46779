//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message used when a failed response carries no usable `message` field
pub const GENERIC_ERROR_MESSAGE: &str = "Request failed";

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input rejected locally, before any request was sent
    #[error("Invalid input ({field}): {message}")]
    Validation {
        /// Offending input field
        field: &'static str,
        /// Human readable reason
        message: String,
    },

    /// The server answered with a non-2xx status
    #[error("{message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Server-provided message, or the request's fallback
        message: String,
    },

    /// No response was received
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The token store could not be read or written
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Coarse classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local input validation
    Validation,
    /// Non-2xx response
    HttpStatus,
    /// Network failure
    Transport,
    /// Undecodable response body
    Decode,
    /// Bad configuration
    Config,
    /// Token store I/O
    Storage,
}

impl ApiError {
    /// Create a validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Json(_) => ErrorKind::Decode,
            Self::Config(_) => ErrorKind::Config,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// HTTP status code, if the server answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::HttpStatus { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::HttpStatus { status, .. } if *status >= 500)
    }

    /// Check if the server rejected the credentials (401 or 403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_displays_server_message() {
        let err = ApiError::http_status(404, "User not found");
        assert_eq!(err.to_string(), "User not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.kind(), ErrorKind::HttpStatus);
    }

    #[test]
    fn test_classification() {
        assert!(ApiError::http_status(422, "bad").is_client_error());
        assert!(!ApiError::http_status(422, "bad").is_server_error());
        assert!(ApiError::http_status(503, "down").is_server_error());
        assert!(ApiError::http_status(401, "no").is_unauthorized());
        assert!(ApiError::http_status(403, "no").is_unauthorized());
        assert!(!ApiError::http_status(400, "no").is_unauthorized());
    }

    #[test]
    fn test_validation_error() {
        let err = ApiError::validation("id", "ID is required");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("ID is required"));
    }

    #[test]
    fn test_json_error_is_decode() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
