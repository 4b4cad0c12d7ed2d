use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for image-publish operations
#[derive(Error, Debug)]
pub enum ImagePublishError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Issue resolution failed: {0}")]
    IssueResolution(String),

    #[error("Refusing to overwrite existing file: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Git operation failed: {0}")]
    Repository(#[from] git2::Error),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Image operation failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Draft fetch failed: {0}")]
    Http(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in image-publish
pub type Result<T> = std::result::Result<T, ImagePublishError>;

impl ImagePublishError {
    /// Create an invalid-argument error with context
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        ImagePublishError::InvalidArgument(msg.into())
    }

    /// Create an issue-resolution error with context
    pub fn issue_resolution(msg: impl Into<String>) -> Self {
        ImagePublishError::IssueResolution(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ImagePublishError::Remote(msg.into())
    }

    /// Create an HTTP error with context
    pub fn http(msg: impl Into<String>) -> Self {
        ImagePublishError::Http(msg.into())
    }
}
