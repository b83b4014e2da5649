//! Secure local storage for the session token.
//!
//! Exactly one secret is persisted: the opaque bearer token under the
//! `token` entry of the OS keychain. The token is treated as opaque - expiry
//! lives in the profile claims and is enforced by the service, never here.

use async_trait::async_trait;
use thiserror::Error;

/// Keychain service name
const SERVICE_NAME: &str = "washpass";

/// The single key this core uses in secure storage
const TOKEN_KEY: &str = "token";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Secure storage error: {0}")]
    Backend(#[from] keyring::Error),

    /// The storage backend cannot be reached at all, e.g. a locked keychain
    #[error("Secure storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable, secure persistence for the session token.
///
/// No concurrency control is provided here; the session controller
/// serializes writes through its operation gate.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored token, `None` if no session has been persisted
    async fn get(&self) -> Result<Option<String>, StoreError>;

    /// Persist the token, replacing any previous value
    async fn set(&self, token: &str) -> Result<(), StoreError>;

    /// Delete the stored token; succeeds when none was present
    async fn delete(&self) -> Result<(), StoreError>;
}

/// Token storage in the OS keychain via the `keyring` crate
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Use a non-default keychain service name (one store per app variant)
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, StoreError> {
        Ok(keyring::Entry::new(&self.service, TOKEN_KEY)?)
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for KeyringTokenStore {
    async fn get(&self) -> Result<Option<String>, StoreError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, token: &str) -> Result<(), StoreError> {
        self.entry()?.set_password(token)?;
        Ok(())
    }

    async fn delete(&self) -> Result<(), StoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
