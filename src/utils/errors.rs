//! Error handling for AssetDesk
//!
//! This module defines the main error types used by both consoles and
//! the HTTP clients behind them.

use thiserror::Error;

/// Main error type for AssetDesk
#[derive(Error, Debug)]
pub enum AssetDeskError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Backend API specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("request timed out")]
    Timeout,

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for AssetDesk operations
pub type Result<T> = std::result::Result<T, AssetDeskError>;

/// Classification of a failed console action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network or transport failure, no response received
    Transport,
    /// A response arrived with a non-success status
    Status,
    /// A success response whose body could not be understood
    Malformed,
    /// Anything raised on the client side before a request was made
    Client,
}

impl ApiError {
    /// Map a reqwest transport error the same way for every endpoint
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::ServiceUnavailable(err.to_string())
        } else {
            ApiError::RequestFailed(err.to_string())
        }
    }

    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ApiError::RequestFailed(_) | ApiError::Timeout | ApiError::ServiceUnavailable(_) => {
                FailureKind::Transport
            }
            ApiError::Status { .. } => FailureKind::Status,
            ApiError::InvalidResponse(_) => FailureKind::Malformed,
        }
    }
}

impl AssetDeskError {
    /// Classify the error into the backend failure taxonomy
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AssetDeskError::Api(api) => api.failure_kind(),
            AssetDeskError::Http(_) => FailureKind::Transport,
            AssetDeskError::Serialization(_) => FailureKind::Malformed,
            _ => FailureKind::Client,
        }
    }

    /// Check if the error is recoverable by re-triggering the action
    pub fn is_recoverable(&self) -> bool {
        match self {
            AssetDeskError::Api(api) => !matches!(api, ApiError::InvalidResponse(_)),
            AssetDeskError::Config(_) => false,
            AssetDeskError::ConfigLoad(_) => false,
            AssetDeskError::NotFound(_) => false,
            AssetDeskError::InvalidStateTransition { .. } => false,
            AssetDeskError::Http(_) => true,
            AssetDeskError::Serialization(_) => false,
            AssetDeskError::Io(_) => true,
            AssetDeskError::UrlParse(_) => false,
            AssetDeskError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AssetDeskError::Config(_) => ErrorSeverity::Critical,
            AssetDeskError::ConfigLoad(_) => ErrorSeverity::Critical,
            AssetDeskError::UrlParse(_) => ErrorSeverity::Critical,
            AssetDeskError::InvalidInput(_) => ErrorSeverity::Info,
            AssetDeskError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            AssetDeskError::NotFound(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
