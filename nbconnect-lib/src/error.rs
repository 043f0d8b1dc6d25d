//! Error types for the connect client.

use std::time::Duration;

/// Errors that can occur during a connect attempt.
///
/// There is deliberately a single observable category: every variant is
/// terminal for its invocation, is never retried, and ends up in the same
/// user-facing dialog.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// HTTP error response from the backend.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Backend-reported message, or a plain rendering of the status.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid base URL or request target.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Response body did not match the expected shape.
    #[error("response parse error: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ConnectError {
    /// Creates an HTTP error from a status and the backend's optional
    /// message, falling back to a plain rendering of the status.
    pub fn http(status: u16, message: Option<String>) -> Self {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => format!("HTTP {status}"),
        };
        Self::Http { status, message }
    }

    /// Creates a parse error with the raw response body.
    pub fn parse(message: impl Into<String>, body: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body,
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_backend_message() {
        let err = ConnectError::http(404, Some("kernel not found".to_string()));
        assert_eq!(err.to_string(), "kernel not found");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_http_error_without_message_falls_back_to_status() {
        assert_eq!(ConnectError::http(500, None).to_string(), "HTTP 500");
        assert_eq!(
            ConnectError::http(404, Some(String::new())).to_string(),
            "HTTP 404"
        );
    }

    #[test]
    fn test_timeout_display_names_duration() {
        let err = ConnectError::Timeout(Duration::from_secs(30));
        assert!(err.to_string().contains("30s"));
    }
}
