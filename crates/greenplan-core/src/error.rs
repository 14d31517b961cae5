//! Error types for GreenPlan

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GreenplanError {
    // Request errors
    #[error("Invalid design request field {field}: {reason}")]
    InvalidRequest { field: String, reason: String },

    #[error("Unknown room type: {name}")]
    UnknownRoomType { name: String },

    // Location errors
    #[error("Unknown location: {token}")]
    UnknownLocation { token: String },

    #[error("Location table is missing entries for: {missing}")]
    IncompleteLocationTable { missing: String },

    // Generator errors
    #[error("Generator unavailable: {reason}. Try: {remediation}")]
    GeneratorUnavailable {
        reason: String,
        remediation: String,
    },

    #[error("Malformed generator response: {reason}")]
    MalformedResponse { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GreenplanError {
    /// Shorthand for an `InvalidRequest` error
    pub fn invalid_request(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRequest { field: field.into(), reason: reason.into() }
    }
}

impl From<serde_json::Error> for GreenplanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GreenplanError>;
