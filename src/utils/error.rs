//! Error Handling
//!
//! Unified error types for the markdown record store.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-wide error type.
///
/// Each variant corresponds to one failure class the HTTP boundary maps to a
/// status code via [`AppError::http_status`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Backing file missing entirely
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File exists but the expected `## ` heading is absent
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Key or record absent within an otherwise valid file
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate key or record on create/rename
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Empty or invalid input from the caller
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Malformed individual record that fails structural extraction
    #[error("Parse error: {0}")]
    Parse(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a file-not-found error
    pub fn file_not_found(msg: impl Into<String>) -> Self {
        Self::FileNotFound(msg.into())
    }

    /// Create a section-not-found error
    pub fn section_not_found(msg: impl Into<String>) -> Self {
        Self::SectionNotFound(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a bad-request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// The HTTP status code the boundary layer responds with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::BadRequest(_) => 400,
            AppError::FileNotFound(_) | AppError::SectionNotFound(_) | AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::Parse(_) | AppError::Io(_) | AppError::Serialization(_) => 500,
        }
    }
}

/// Convert AppError to a string suitable for API error payloads
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
