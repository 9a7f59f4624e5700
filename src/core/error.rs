//! Error types for the consumer system.
//!
//! The step layer defines no error channel of its own; failures in user
//! code travel through the effect capability. This type is the channel of
//! the [`Fallible`](crate::core::Fallible) effect.

use std::fmt;
use std::sync::Arc;

/// The main error type for the consumer system.
#[derive(Debug, Clone)]
pub enum Error {
    /// A consumer failed while processing input
    Consumer(Arc<dyn std::error::Error + Send + Sync>),

    /// A custom error with a message
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Consumer(e) => write!(f, "Consumer error: {}", e),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Consumer(e) => Some(e.as_ref()),
            Error::Custom(_) => None,
        }
    }
}

// Convenience constructors
impl Error {
    /// Create a consumer error from any error type
    pub fn consumer<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Consumer(Arc::new(error))
    }

    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(message: S) -> Self {
        Error::Custom(message.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Custom(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Custom(s.to_string())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;
