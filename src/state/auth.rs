//! Auth-session state for the current terminal user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthContext` is the single source of truth for whether a session exists
//! and who it belongs to. It owns the bridge between the persistent
//! [`SessionStore`] and the [`AuthApi`] client, and publishes [`AuthState`]
//! through a watch channel so pages and callers can read or subscribe.
//!
//! The handle is cheap to clone; clones share one state and one writer.
//!
//! ERROR HANDLING
//! ==============
//! Corrupt stored data is cleaned up silently. Rejected logins and
//! registrations surface as [`AuthError`] with the server's detail message
//! when one was sent. Logout never fails: a server error is logged and the
//! local session is cleared anyway.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS, SessionStore, StoreError, USER_KEY};
use crate::net::api::AuthApi;
use crate::net::types::{LoginRequest, RegisterRequest, User};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State before the stored session has been checked.
    #[must_use]
    pub fn starting() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Failures surfaced to the caller of `login`/`register`.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{}", .detail.as_deref().unwrap_or(LOGIN_FAILED))]
    Login { detail: Option<String> },

    #[error("{}", .detail.as_deref().unwrap_or(REGISTRATION_FAILED))]
    Registration { detail: Option<String> },

    /// The session was accepted by the server but could not be persisted.
    #[error("session store write failed: {0}")]
    Storage(#[from] StoreError),
}

// =============================================================================
// CONTEXT
// =============================================================================

#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    state: watch::Sender<AuthState>,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext").field("state", &*self.inner.state.borrow()).finish_non_exhaustive()
    }
}

/// Clears `loading` when dropped, including when the owning future is dropped
/// mid-call.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<AuthState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

impl AuthContext {
    /// Create a context in the starting state (`loading`, no user). Call
    /// [`AuthContext::restore`] before reading it.
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(AuthState::starting());
        Self { inner: Arc::new(Inner { api, store, state }) }
    }

    // -------------------------------------------------------------------------
    // Readers
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state change from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    /// Stored access token, if a session exists.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read_key(ACCESS_TOKEN_KEY)
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Rebuild the in-memory session from the store.
    ///
    /// Trusts the stored snapshot without contacting the server. A missing
    /// token, missing user record, or unparseable user record clears every
    /// session key.
    pub fn restore(&self) {
        let user = self.stored_user();
        if user.is_none() {
            self.clear_store("restore");
        }
        tracing::debug!(authenticated = user.is_some(), "session restored");
        self.inner.state.send_modify(|s| {
            s.user = user;
            s.loading = false;
        });
    }

    /// Log in with email and password and persist the new session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Login`] if the server rejects the credentials or
    /// cannot be reached, or [`AuthError::Storage`] if the session could not
    /// be written. The store and current user are unchanged on error.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let _loading = self.begin_loading();
        let request = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        self.establish_session(&request).await
    }

    /// Register a new account, then log in with the same credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Registration`] if either the registration or the
    /// follow-up login fails, or [`AuthError::Storage`] if the session could
    /// not be written.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AuthError> {
        let _loading = self.begin_loading();

        self.inner.api.register(request).await.map_err(|e| {
            tracing::warn!(email = %request.email, error = %e, "registration rejected");
            AuthError::Registration { detail: e.detail().map(str::to_owned) }
        })?;
        tracing::info!(email = %request.email, "registered");

        self.establish_session(&request.credentials()).await.map_err(|e| match e {
            AuthError::Login { detail } => AuthError::Registration { detail },
            other => other,
        })
    }

    /// End the session. Always leaves the client logged out.
    pub async fn logout(&self) {
        let _loading = self.begin_loading();

        if let Err(e) = self.inner.api.logout().await {
            tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
        }

        self.clear_store("logout");
        self.inner.state.send_modify(|s| s.user = None);
        tracing::info!("logged out");
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn begin_loading(&self) -> LoadingGuard<'_> {
        self.inner.state.send_modify(|s| s.loading = true);
        LoadingGuard { state: &self.inner.state }
    }

    async fn establish_session(&self, request: &LoginRequest) -> Result<(), AuthError> {
        let response = self.inner.api.login(request).await.map_err(|e| {
            tracing::warn!(email = %request.email, error = %e, "login rejected");
            AuthError::Login { detail: e.detail().map(str::to_owned) }
        })?;

        let user_json = serde_json::to_string(&response.user).map_err(StoreError::from)?;
        self.inner.store.set_many(&[
            (ACCESS_TOKEN_KEY, response.access_token.as_str()),
            (REFRESH_TOKEN_KEY, response.refresh_token.as_str()),
            (USER_KEY, user_json.as_str()),
        ])?;

        tracing::info!(user_id = response.user.id, "logged in");
        self.inner.state.send_modify(|s| s.user = Some(response.user));
        Ok(())
    }

    fn stored_user(&self) -> Option<User> {
        self.read_key(ACCESS_TOKEN_KEY)?;
        let raw = self.read_key(USER_KEY)?;
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "stored user record is corrupt");
                None
            }
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.inner.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(key, error = %e, "session store read failed");
                None
            }
        }
    }

    fn clear_store(&self, reason: &'static str) {
        if let Err(e) = self.inner.store.remove_many(&SESSION_KEYS) {
            tracing::warn!(reason, error = %e, "session store clear failed");
        }
    }
}
