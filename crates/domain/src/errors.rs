//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for TenantShift
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TenantShiftError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Normalization error: {0}")]
    Normalization(String),

    #[error("Remote write rejected ({status}): {body}")]
    RemoteWrite { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for TenantShift operations
pub type Result<T> = std::result::Result<T, TenantShiftError>;
