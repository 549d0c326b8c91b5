use thiserror::Error;

/// Result type alias for hosting operations
pub type Result<T> = std::result::Result<T, HostingError>;

/// Errors raised by the hosting client and the retry dispatcher.
///
/// Only [`HostingError::Recoverable`] may be retried; every other kind is
/// fatal and propagates unmodified to the process boundary.
#[derive(Debug, Error)]
pub enum HostingError {
    /// The API answered with an unexpected status code. Safe to retry.
    #[error("{0}")]
    Recoverable(String),

    #[error("Number of retries exceeded ({max_retries}). Aborting.")]
    RetryExhausted { max_retries: u32 },

    #[error("{name} not set")]
    MissingCredential { name: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl HostingError {
    /// Create a new recoverable error from an API status mismatch
    pub fn recoverable<S: Into<String>>(message: S) -> Self {
        Self::Recoverable(message.into())
    }

    /// Whether the dispatcher is permitted to retry this failure
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable(_))
    }

    /// Get a user-friendly message for command line display
    pub fn user_message(&self) -> String {
        match self {
            Self::Recoverable(msg) => msg.clone(),
            Self::RetryExhausted { max_retries } => {
                format!("Number of retries exceeded ({max_retries}). Aborting.")
            }
            Self::MissingCredential { name } => {
                format!("\"{name}\" environment variable not set")
            }
            Self::Http(err) => format!("HTTP transport error: {err}"),
            Self::Io(err) => format!("I/O operation failed: {err}"),
            Self::InvalidUrl(err) => format!("Invalid URL: {err}"),
        }
    }
}
