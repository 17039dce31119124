//! Error handling for the preview pipeline
//!
//! The local conversion stages never fail. Errors only come from the remote
//! compiler, configuration loading and file IO, and the facade absorbs the
//! remote ones into a fallback render.

use thiserror::Error;

/// Preview error type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreviewError {
    /// The request never produced a response (connection refused, DNS, TLS, ...)
    #[error("Transport error: {message}")]
    Transport { message: String },
    /// The compile service answered with a non-success status
    #[error("Compile service returned status {code}")]
    Status { code: u16 },
    /// The response body could not be decoded
    #[error("Malformed compile response: {message}")]
    MalformedPayload { message: String },
    /// Invalid configuration value or file
    #[error("Configuration error: {message}")]
    Config { message: String },
    /// IO error (for file operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for PreviewError {
    fn from(err: std::io::Error) -> Self {
        PreviewError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PreviewError {
    fn from(err: serde_json::Error) -> Self {
        PreviewError::MalformedPayload {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for PreviewError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return PreviewError::Status {
                code: status.as_u16(),
            };
        }
        if err.is_decode() {
            return PreviewError::malformed(err.to_string());
        }
        PreviewError::transport(err.to_string())
    }
}

/// Result type for preview operations
pub type PreviewResult<T> = Result<T, PreviewError>;

// Convenience constructors for errors
impl PreviewError {
    pub fn transport(message: impl Into<String>) -> Self {
        PreviewError::Transport {
            message: message.into(),
        }
    }

    pub fn status(code: u16) -> Self {
        PreviewError::Status { code }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        PreviewError::MalformedPayload {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PreviewError::Config {
            message: message.into(),
        }
    }

    /// Whether a later attempt for the same content could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            PreviewError::Transport { .. } => true,
            PreviewError::Status { code } => *code >= 500 || *code == 429,
            _ => false,
        }
    }
}
