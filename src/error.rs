//! Error types and handling for the WordPress REST SDK.
//!
//! Every layer of the crate returns [`Result`]. The public
//! [`WordPressClient`](crate::WordPressClient) converts request failures into
//! `None` after logging them, using [`WordPressError::severity`] to pick the
//! log level.
//!
//! ## Error Categories
//!
//! - **Network Errors**: connection issues, timeouts
//! - **API Errors**: non-2xx responses, carrying WordPress' `code`/`message`
//! - **Image Errors**: failed downloads, decode/encode failures
//! - **File System Errors**: missing files, read failures
//! - **Configuration Errors**: invalid settings or credentials
//!
//! ## Usage
//!
//! ```rust
//! use wordpress_pub_rs::WordPressError;
//! use wordpress_pub_rs::error::ErrorSeverity;
//!
//! fn report(error: &WordPressError) {
//!     match error.severity() {
//!         ErrorSeverity::Warning => tracing::warn!("{error}"),
//!         ErrorSeverity::Error => tracing::error!("{error}"),
//!         ErrorSeverity::Critical => tracing::error!("critical: {error}"),
//!     }
//! }
//! ```

use serde::Deserialize;
use std::fmt;

/// Result type alias for WordPress SDK operations.
pub type Result<T> = std::result::Result<T, WordPressError>;

/// Comprehensive error type for WordPress SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum WordPressError {
    /// Network-related errors
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    /// Non-2xx response from the REST API
    #[error("WordPress API error [{status}] {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("Invalid credentials: {reason}")]
    InvalidCredentials { reason: String },

    /// File system errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}, reason: {reason}")]
    FileRead { path: String, reason: String },

    /// Remote image fetch answered with something other than 200
    #[error("Image download failed: {url}, status code {status}")]
    ImageDownload { url: String, status: u16 },

    #[error("Image too large: {url}, {reason}")]
    ImageTooLarge { url: String, reason: String },

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported upload format: {format}")]
    UnsupportedFormat { format: String },

    /// A successful response lacked a field the SDK depends on
    #[error("Response is missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("JSON processing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Generic errors for wrapping other error types
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error body WordPress returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl WordPressError {
    /// Gets the severity level of the error for logging purposes.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WordPressError::Network(_) | WordPressError::Timeout => ErrorSeverity::Warning,

            // Authentication or authorization rejected: every later call will fail too
            WordPressError::Api { status, .. } => match status {
                401 | 403 => ErrorSeverity::Critical,
                _ => ErrorSeverity::Error,
            },

            WordPressError::InvalidCredentials { .. } => ErrorSeverity::Critical,

            WordPressError::FileNotFound { .. }
            | WordPressError::FileRead { .. }
            | WordPressError::ImageDownload { .. }
            | WordPressError::ImageTooLarge { .. }
            | WordPressError::Image(_)
            | WordPressError::UnsupportedFormat { .. }
            | WordPressError::MissingField { .. }
            | WordPressError::Config { .. }
            | WordPressError::Json(_)
            | WordPressError::Io(_)
            | WordPressError::UrlParse(_)
            | WordPressError::Internal(_) => ErrorSeverity::Error,
        }
    }

    /// Creates an API error from a response status and its raw body.
    ///
    /// WordPress answers errors with `{"code", "message", "data"}`; anything
    /// else is kept verbatim as the message.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => WordPressError::Api {
                status,
                code: parsed.code,
                message: parsed.message,
                data: parsed.data,
            },
            Err(_) => WordPressError::Api {
                status,
                code: "http_error".to_string(),
                message: body.to_string(),
                data: None,
            },
        }
    }

    /// Returns the id of the already existing term when WordPress refused to
    /// create a duplicate category or tag.
    pub fn existing_term_id(&self) -> Option<u64> {
        match self {
            WordPressError::Api {
                code, data: Some(data), ..
            } if code == "term_exists" => data.get("term_id").and_then(|id| id.as_u64()),
            _ => None,
        }
    }

    /// Creates a file-related error.
    pub fn file_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        WordPressError::FileRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        WordPressError::Config {
            message: message.into(),
        }
    }
}

/// Error severity levels for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Transient errors, usually network related
    Warning,
    /// Standard errors that affect specific operations
    Error,
    /// Errors that will keep failing until credentials or permissions change
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        assert_eq!(WordPressError::Timeout.severity(), ErrorSeverity::Warning);

        let config_err = WordPressError::config_error("missing site url");
        assert_eq!(config_err.severity(), ErrorSeverity::Error);

        let unauthorized = WordPressError::from_api_response(401, "");
        assert_eq!(unauthorized.severity(), ErrorSeverity::Critical);

        let bad_request = WordPressError::from_api_response(400, "");
        assert_eq!(bad_request.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_api_error_parsing() {
        let body = r#"{"code":"rest_post_invalid_id","message":"Invalid post ID.","data":{"status":404}}"#;
        match WordPressError::from_api_response(404, body) {
            WordPressError::Api {
                status,
                code,
                message,
                data,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, "rest_post_invalid_id");
                assert_eq!(message, "Invalid post ID.");
                assert_eq!(data.unwrap()["status"], 404);
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_with_plain_body() {
        let err = WordPressError::from_api_response(502, "Bad Gateway");
        assert_eq!(
            err.to_string(),
            "WordPress API error [502] http_error: Bad Gateway"
        );
    }

    #[test]
    fn test_existing_term_id() {
        let body = r#"{"code":"term_exists","message":"A term with the name provided already exists.","data":{"status":400,"term_id":12}}"#;
        let err = WordPressError::from_api_response(400, body);
        assert_eq!(err.existing_term_id(), Some(12));

        let other = WordPressError::from_api_response(
            400,
            r#"{"code":"rest_invalid_param","message":"x"}"#,
        );
        assert_eq!(other.existing_term_id(), None);
    }

    #[test]
    fn test_error_creation_helpers() {
        match WordPressError::file_error("/tmp/logo.png", "permission denied") {
            WordPressError::FileRead { path, reason } => {
                assert_eq!(path, "/tmp/logo.png");
                assert_eq!(reason, "permission denied");
            }
            _ => panic!("Expected FileRead error"),
        }

        match WordPressError::config_error("invalid configuration") {
            WordPressError::Config { message } => assert_eq!(message, "invalid configuration"),
            _ => panic!("Expected Config error"),
        }
    }
}
