//! Error types for the tweak runner.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tweak runner.
#[derive(Error, Debug)]
pub enum Error {
    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // Template errors
    #[error("Invalid template document: {0}")]
    InvalidTemplate(String),

    #[error("Template contains no rollback instructions; execute it first")]
    NoRollbackData,

    // Engine errors
    #[error("Unknown action plugin: {0}")]
    PluginNotFound(String),

    #[error("Plugin '{plugin}' fault: {reason}")]
    PluginFault { plugin: String, reason: String },

    // Rollback errors
    #[error("Rollback conflict: {0}")]
    RollbackConflict(String),

    // Session errors
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
