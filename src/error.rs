/// Error types for character-creator
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for character-creator operations
#[derive(Error, Debug)]
pub enum CreatorError {
    /// I/O errors (vault reads and writes, settings file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level failure talking to the generative API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The generative API answered with a non-success status
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// A note already exists where we wanted to create one
    #[error("Note already exists: {0}")]
    NoteExists(String),

    /// Path escapes the vault or is otherwise unusable
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Path was expected to be a folder in the vault
    #[error("Not a folder: {0}")]
    NotAFolder(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for character-creator operations
pub type Result<T> = std::result::Result<T, CreatorError>;

/// Convert CreatorError to a user-friendly error message
impl CreatorError {
    pub fn user_message(&self) -> String {
        match self {
            CreatorError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            CreatorError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            CreatorError::Http(e) => {
                format!("Could not reach the generation service. Details: {}", e)
            }
            CreatorError::Api { status, .. } => {
                format!("The generation service rejected the request (HTTP {})", status)
            }
            CreatorError::NoteExists(path) => {
                format!("A note already exists at '{}'", path)
            }
            CreatorError::InvalidPath(path) => {
                format!("'{}' is not a usable vault path", path)
            }
            CreatorError::NotAFolder(path) => {
                format!("'{}' is not a folder in this vault", path)
            }
            CreatorError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
        }
    }
}
