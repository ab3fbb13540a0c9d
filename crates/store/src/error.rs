use thiserror::Error;

/// Crate-wide result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed store errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying MongoDB driver failure.
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    /// Backend-agnostic failure description.
    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}
