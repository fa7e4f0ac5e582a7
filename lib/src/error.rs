use crate::models::errors::ChannelError;

/// Error type for the markport library
///
/// Using `thiserror` crate for automatic `Error` trait implementation and `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Firefox places database errors (SQLite)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O errors (bookmark files, downloads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request/response round trip failed at the transport level
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// The host bookmark store could not produce a tree
    #[error("Bookmark store error: {0}")]
    Store(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Browser detection errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Generic error for cases that don't fit other categories
    #[error("{0}")]
    Other(String),
}

/// Result type alias using ExportError
pub type Result<T> = std::result::Result<T, ExportError>;

impl From<String> for ExportError {
    fn from(s: String) -> Self {
        ExportError::Other(s)
    }
}

impl From<&str> for ExportError {
    fn from(s: &str) -> Self {
        ExportError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Json(err.to_string())
    }
}

impl From<tempfile::PersistError> for ExportError {
    fn from(err: tempfile::PersistError) -> Self {
        ExportError::Io(err.error)
    }
}
