use thiserror::Error;

/// Unified error type for pr-autotag operations
#[derive(Error, Debug)]
pub enum AutotagError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event error: {0}")]
    Event(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Publication failed ({status}): {body}")]
    Publish { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pr-autotag
pub type Result<T> = std::result::Result<T, AutotagError>;

impl AutotagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutotagError::Config(msg.into())
    }

    /// Create an event error with context
    pub fn event(msg: impl Into<String>) -> Self {
        AutotagError::Event(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        AutotagError::Version(msg.into())
    }

    /// Create a publication error from a remote status and body
    pub fn publish(status: u16, body: impl Into<String>) -> Self {
        AutotagError::Publish {
            status,
            body: body.into(),
        }
    }
}
