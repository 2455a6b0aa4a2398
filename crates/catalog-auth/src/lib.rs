//! Authentication for the product catalog client.
//!
//! Mutating catalog calls need a bearer token obtained from the login or
//! signup endpoints. The token lives in an [`AuthSession`], which reads and
//! writes it through a single [`TokenStore`].

mod credentials;
mod error;
mod session;
mod store;
mod token;

pub use credentials::{AuthResponse, LoginRequest, SignupRequest};
pub use error::AuthError;
pub use session::AuthSession;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::{BearerToken, StoredToken};
