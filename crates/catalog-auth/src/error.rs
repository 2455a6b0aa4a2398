//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A mutating action was attempted without a stored token.
    #[error("not logged in")]
    NotLoggedIn,

    /// The token store could not be used.
    #[error("token store error: {0}")]
    Store(String),

    /// Filesystem error from the token store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Serialization(err.to_string())
    }
}
