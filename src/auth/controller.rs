//! Session controller: orchestrates sign-in, sign-up, auto-sign-in,
//! sign-out and profile refresh against the identity API and the token
//! store, driving the observable `SessionState` through a fixed pattern.
//!
//! Every lifecycle operation follows the same frame: dispatch `Loading`,
//! attempt the body, dispatch `Failure` on any error, and unconditionally
//! dispatch `Reset` as the last step. The status field therefore never
//! sticks on `Loading`, `Success` or `Failure` after an operation returns,
//! and the caller always receives the original error alongside the state
//! recovery.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::{ApiError, IdentityApi, IdentityClient};
use crate::config::Config;
use crate::models::{SignupRequest, SignupResponse, UserProfile};

use super::state::{SessionEvent, SessionHandle};
use super::store::{KeyringTokenStore, TokenStore};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] super::store::StoreError),

    /// No token in secure storage. Not a user-facing error: the caller
    /// interprets this as "render the signed-out flow".
    #[error("No stored session")]
    NoStoredSession,

    /// Rejected by the single-flight gate
    #[error("A {0} operation is already in flight")]
    InFlight(&'static str),
}

/// Orchestrates the session lifecycle.
///
/// Holds the process-wide `SessionHandle` and a single-flight gate shared by
/// the four lifecycle operations: a second lifecycle call while one is in
/// flight is rejected with `SessionError::InFlight` rather than interleaving
/// state dispatches or racing on the storage key. `fetch_user` has no
/// ordering dependency on the others and bypasses the gate.
pub struct SessionController {
    api: Arc<dyn IdentityApi>,
    store: Arc<dyn TokenStore>,
    session: SessionHandle,
    op_gate: Mutex<()>,
    /// Present when constructed from config; used to remember the last
    /// signed-in email for form prefill
    config: Option<std::sync::Mutex<Config>>,
}

impl SessionController {
    pub fn new(api: Arc<dyn IdentityApi>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            session: SessionHandle::new(),
            op_gate: Mutex::new(()),
            config: None,
        }
    }

    /// Like `new`, but carries the config so a successful sign-in records
    /// `last_email`
    pub fn with_config(api: Arc<dyn IdentityApi>, store: Arc<dyn TokenStore>, config: Config) -> Self {
        Self {
            config: Some(std::sync::Mutex::new(config)),
            ..Self::new(api, store)
        }
    }

    /// Wire up the reqwest client and the OS keychain store from config
    pub fn from_config(config: &Config) -> Result<Self, SessionError> {
        let api = IdentityClient::new(config.base_url())?;
        Ok(Self::with_config(
            Arc::new(api),
            Arc::new(KeyringTokenStore::new()),
            config.clone(),
        ))
    }

    /// The email of the last successful sign-in, for prefilling the form
    pub fn last_email(&self) -> Option<String> {
        let config = self.config.as_ref()?;
        let config = config.lock().ok()?;
        config.last_email.clone()
    }

    /// Remember the signed-in email in config; a save failure is logged,
    /// never surfaced to the sign-in caller
    fn remember_email(&self, email: &str) {
        let Some(ref config) = self.config else {
            return;
        };
        let Ok(mut config) = config.lock() else {
            return;
        };
        config.last_email = Some(email.to_string());
        if let Err(e) = config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }

    /// The observable session state
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Sign in with email and password.
    ///
    /// On success the token is persisted and the authoritative profile is
    /// fetched via `validate` before the session is established. If the
    /// token write succeeded but validation failed, the token stays in
    /// storage to be retried on the next auto-sign-in.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, SessionError> {
        self.run_lifecycle("sign-in", self.sign_in_inner(email, password))
            .await
    }

    async fn sign_in_inner(&self, email: &str, password: &str) -> Result<UserProfile, SessionError> {
        let login = self.api.login(email, password).await?;
        if login.access_token.is_empty() {
            return Err(ApiError::ProtocolViolation(
                "login response carried no access token".to_string(),
            )
            .into());
        }

        self.store.set(&login.access_token).await?;

        let profile = self.api.validate(&login.access_token).await?;
        self.remember_email(email);
        info!(sub = profile.sub, "signed in");
        self.session.dispatch(SessionEvent::SignedIn(profile.clone()));
        Ok(profile)
    }

    /// Register a new account and resolve with the echoed payload.
    ///
    /// Deliberately does not establish a session: the caller signs in
    /// afterwards. A response without a user id is raised as a protocol
    /// violation even though the transport call returned normally.
    pub async fn sign_up(&self, request: SignupRequest) -> Result<SignupResponse, SessionError> {
        self.run_lifecycle("sign-up", self.sign_up_inner(request))
            .await
    }

    async fn sign_up_inner(&self, request: SignupRequest) -> Result<SignupResponse, SessionError> {
        let response = self.api.register(&request).await?;
        let Some(id) = response.id else {
            return Err(ApiError::ProtocolViolation(
                "registration response carried no user id".to_string(),
            )
            .into());
        };

        info!(id, "account registered");
        self.session.dispatch(SessionEvent::SignedUp);
        Ok(response)
    }

    /// Silently restore the session from the stored token, invoked once at
    /// application start.
    ///
    /// With no stored token this fails with `NoStoredSession` without
    /// touching the network. A storage read failure is treated the same way.
    /// On a service-rejected token the stale token is left in storage, so a
    /// later attempt can retry it after a transient validation outage.
    pub async fn auto_sign_in(&self) -> Result<UserProfile, SessionError> {
        self.run_lifecycle("auto-sign-in", self.auto_sign_in_inner())
            .await
    }

    async fn auto_sign_in_inner(&self) -> Result<UserProfile, SessionError> {
        let token = match self.store.get().await {
            Ok(Some(token)) => token,
            Ok(None) => return Err(SessionError::NoStoredSession),
            Err(e) => {
                warn!(error = %e, "token read failed, treating as signed out");
                return Err(SessionError::NoStoredSession);
            }
        };

        let profile = self.api.validate(&token).await?;

        // Refresh-touch: re-persist the same token so the entry stays warm
        self.store.set(&token).await?;

        info!(sub = profile.sub, "session restored");
        self.session.dispatch(SessionEvent::SignedIn(profile.clone()));
        Ok(profile)
    }

    /// Sign out: delete the stored token and clear the in-memory session.
    ///
    /// A storage delete failure still takes the generic failure path, which
    /// clears the in-memory session either way; the error is surfaced so the
    /// caller can decide what to tell the user.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.run_lifecycle("sign-out", self.sign_out_inner()).await
    }

    async fn sign_out_inner(&self) -> Result<(), SessionError> {
        self.store.delete().await?;
        info!("signed out");
        self.session.dispatch(SessionEvent::SignedOut);
        Ok(())
    }

    /// Passive profile refresh: replaces `user` in place without the
    /// Loading/Success/Initial pulse and without touching `is_signed_in`.
    /// A refresh failure must never silently sign the user out, so it is
    /// logged and returned with no state change.
    pub async fn fetch_user(&self, user_id: i64) -> Result<UserProfile, SessionError> {
        match self.api.fetch_profile(user_id).await {
            Ok(profile) => {
                self.session
                    .dispatch(SessionEvent::UserRefreshed(profile.clone()));
                Ok(profile)
            }
            Err(e) => {
                warn!(user_id, error = %e, "profile refresh failed");
                Err(e.into())
            }
        }
    }

    /// Run a lifecycle operation under the single-flight gate with the
    /// Loading / Failure / Reset frame around its body.
    async fn run_lifecycle<T, F>(&self, op: &'static str, body: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, SessionError>>,
    {
        let _gate = self
            .op_gate
            .try_lock()
            .map_err(|_| SessionError::InFlight(op))?;

        self.session.dispatch(SessionEvent::Loading);
        let result = body.await;

        if let Err(ref e) = result {
            match e {
                // Expected on first launch, not worth a warning
                SessionError::NoStoredSession => debug!(operation = op, "no stored session"),
                _ => warn!(operation = op, error = %e, "session operation failed"),
            }
            self.session.dispatch(SessionEvent::Failure);
        }
        self.session.dispatch(SessionEvent::Reset);
        result
    }
}

// ============================================================================
// Tests
// ============================================================================
