//! Common error types for Paperdock

use thiserror::Error;

/// Common result type for Paperdock operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds shared by the CLI and the web surface
#[derive(Error, Debug)]
pub enum Error {
    /// Input did not match any recognized arXiv identifier form
    #[error("Invalid arXiv identifier: {0}")]
    InvalidIdentifier(String),

    /// The arXiv metadata query failed or returned an unusable document
    #[error("Metadata fetch failed: {0}")]
    MetadataFetch(String),

    /// A binary artifact download or repository clone failed
    #[error("Artifact fetch failed: {0}")]
    ArtifactFetch(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
