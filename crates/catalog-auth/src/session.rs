//! Session management.

use crate::store::TokenStore;
use crate::token::{BearerToken, StoredToken};
use crate::AuthError;
use tracing::{debug, info};

/// The caller's authentication state.
///
/// Passed by reference into every mutating catalog call. The token is read
/// once on [`AuthSession::load`] and written back through the store on
/// sign-in and sign-out.
pub struct AuthSession {
    token: Option<BearerToken>,
    store: Box<dyn TokenStore>,
}

impl AuthSession {
    /// Load the session from `store`.
    pub fn load(store: impl TokenStore + 'static) -> Result<Self, AuthError> {
        let token = store
            .load()?
            .map(|stored| stored.token)
            .filter(|token| !token.is_empty());
        debug!(logged_in = token.is_some(), "loaded auth session");

        Ok(Self {
            token,
            store: Box::new(store),
        })
    }

    /// A signed-out session that persists nothing beyond the given store.
    pub fn anonymous(store: impl TokenStore + 'static) -> Self {
        Self {
            token: None,
            store: Box::new(store),
        }
    }

    /// The current token, if signed in.
    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// Whether a token is held.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Token required for a mutating call.
    pub fn require_token(&self) -> Result<&BearerToken, AuthError> {
        self.token.as_ref().ok_or(AuthError::NotLoggedIn)
    }

    /// Persist a freshly issued token and hold it.
    pub fn sign_in(&mut self, token: BearerToken) -> Result<(), AuthError> {
        if token.is_empty() {
            return Err(AuthError::Store("received an empty token".to_string()));
        }

        self.store.save(&StoredToken::now(token.clone()))?;
        self.token = Some(token);
        info!("signed in");
        Ok(())
    }

    /// Drop the token from memory and from the store.
    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.store.clear()?;
        self.token = None;
        info!("signed out");
        Ok(())
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileTokenStore, MemoryTokenStore};

    #[test]
    fn test_anonymous_requires_login() {
        let session = AuthSession::anonymous(MemoryTokenStore::new());
        assert!(!session.is_logged_in());
        assert!(matches!(
            session.require_token(),
            Err(AuthError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_load_existing_token() {
        let store = MemoryTokenStore::with_token(StoredToken::now(BearerToken::new("abc")));
        let session = AuthSession::load(store).unwrap();
        assert_eq!(session.require_token().unwrap().as_str(), "abc");
    }

    #[test]
    fn test_empty_stored_token_is_logged_out() {
        let store = MemoryTokenStore::with_token(StoredToken::now(BearerToken::new("")));
        let session = AuthSession::load(store).unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_sign_in_persists_and_sign_out_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");

        let mut session = AuthSession::load(FileTokenStore::new(&path)).unwrap();
        session.sign_in(BearerToken::new("fresh")).unwrap();
        assert!(session.is_logged_in());

        let reloaded = AuthSession::load(FileTokenStore::new(&path)).unwrap();
        assert_eq!(reloaded.token().unwrap().as_str(), "fresh");

        session.sign_out().unwrap();
        assert!(!session.is_logged_in());
        assert!(!path.exists());

        let after = AuthSession::load(FileTokenStore::new(&path)).unwrap();
        assert!(!after.is_logged_in());
    }

    #[test]
    fn test_sign_in_rejects_empty_token() {
        let mut session = AuthSession::anonymous(MemoryTokenStore::new());
        assert!(session.sign_in(BearerToken::new("")).is_err());
        assert!(!session.is_logged_in());
    }
}
