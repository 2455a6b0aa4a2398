//! Bearer tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque token issued by the auth API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty tokens are treated as absent.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

// Keep the secret out of logs.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl From<String> for BearerToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BearerToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A token as persisted by a [`crate::TokenStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    /// The token value.
    pub token: BearerToken,
    /// When the token was saved.
    pub saved_at: DateTime<Utc>,
}

impl StoredToken {
    /// Stamp a token with the current time.
    pub fn now(token: BearerToken) -> Self {
        Self {
            token,
            saved_at: Utc::now(),
        }
    }
}
