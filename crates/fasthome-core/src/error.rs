//! Error types for Fasthome core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors surfaced by the device API.
///
/// Status codes are classified before any body is read, so `Client` and
/// `Server` never carry a decode failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("No data received")]
    NoDataReceived,

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Client error (HTTP {status})")]
    Client { status: u16 },

    #[error("Server error (HTTP {status})")]
    Server { status: u16 },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            400..=499 => ApiError::Client { status },
            500..=599 => ApiError::Server { status },
            other => ApiError::Unknown(format!("unexpected HTTP status {}", other)),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Client { status } | ApiError::Server { status } => Some(*status),
            _ => None,
        }
    }

    /// Message shown to the user when a store operation fails.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidUrl(_) => "invalid URL".to_string(),
            ApiError::NoDataReceived => "no data received".to_string(),
            ApiError::Decode(_) => "invalid server response".to_string(),
            ApiError::Client { status } => format!("client error (status code: {})", status),
            ApiError::Server { status } => format!("server error (status code: {})", status),
            ApiError::Transport(_) | ApiError::Unknown(_) => "unknown error".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
