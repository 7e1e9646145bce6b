//! Core error types for dailyhold-core.
//!
//! Most of these errors are advisory: the session state machine never lets
//! a storage or keep-alive failure abort a transition. They exist so the
//! boundary components can report *why* something degraded, and so hosts
//! can log it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dailyhold-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Keep-alive capability errors
    #[error("Keep-alive error: {0}")]
    KeepAlive(#[from] KeepAliveError),

    /// Share/export errors
    #[error("Share error: {0}")]
    Share(#[from] ShareError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
///
/// All of these are soft failures for the session flow: a read failure is
/// treated as "no record", a write failure as "write skipped".
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Data directory could not be created or determined
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Keep-alive capability errors.
///
/// Every variant is non-fatal by design: the keep-alive resource is a UX
/// enhancement, never a correctness requirement.
#[derive(Error, Debug)]
pub enum KeepAliveError {
    /// The platform has no wake-lock capability
    #[error("Wake lock API not supported on this platform")]
    Unsupported,

    /// The platform rejected the request
    #[error("Wake lock request rejected: {0}")]
    RequestFailed(String),

    /// The platform errored while releasing
    #[error("Wake lock release failed: {0}")]
    ReleaseFailed(String),

    /// The handle was already invalidated by the platform
    #[error("Wake lock already released by the platform")]
    AlreadyReleased,
}

/// Share/export errors.
#[derive(Error, Debug)]
pub enum ShareError {
    /// No native share target on this platform
    #[error("Native share unavailable")]
    Unavailable,

    /// The user backed out of the native share sheet
    #[error("Share cancelled")]
    Cancelled,

    /// Clipboard fallback failed
    #[error("Clipboard write failed: {0}")]
    ClipboardFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
