//! Auth-session state machine for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! App-lifetime state holding the current user, token, and loading flag.
//! Route guards and user-aware front ends observe [`AuthState`]; the
//! manager orchestrates login/register/logout against the remote API and
//! the persistent session store.
//!
//! FAILURE SEMANTICS
//! =================
//! Fail-closed: any remote failure during login/register, and any
//! incomplete or unreadable stored pair during activation, ends in a clean
//! fully-logged-out state. Token and user are never set or persisted
//! partially.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use crate::net::api::{ApiError, RosterApi};
use crate::net::types::{LoginCredentials, RegisterCredentials, User};
use crate::session::SessionStore;

/// Authentication state tracking the current session and loading status.
///
/// Starts with `loading = true`; [`SessionManager::initialize`] completes
/// the initial load.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, token: None, loading: true }
    }
}

impl AuthState {
    /// Authenticated iff both the user and the token are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

/// Owner and single writer of the auth session.
pub struct SessionManager {
    api: Arc<dyn RosterApi>,
    store: SessionStore,
    state: AuthState,
}

impl SessionManager {
    #[must_use]
    pub fn new(api: Arc<dyn RosterApi>, store: SessionStore) -> Self {
        Self { api, store, state: AuthState::default() }
    }

    /// Current observable state.
    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Initial load from the persistent store. Synchronous; no network.
    ///
    /// Both entries present adopts the stored session; an incomplete or
    /// unreadable pair clears the store. Always ends not-loading.
    pub fn initialize(&mut self) {
        let token = self.store.token();
        let user = self.store.user();
        match (token, user) {
            (Some(token), Some(user)) => {
                self.state.token = Some(token);
                self.state.user = Some(user);
            }
            (None, None) => {}
            _ => {
                tracing::warn!("incomplete stored session; clearing");
                self.store.clear_auth();
            }
        }
        self.state.loading = false;
    }

    /// Log in with the given credentials.
    ///
    /// On success the in-memory pair and the persistent store are updated
    /// together. On failure the session is fully logged out and the
    /// original error is re-raised.
    ///
    /// # Errors
    ///
    /// Returns the normalized remote error.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<(), ApiError> {
        self.state.loading = true;
        let result = self.api.login(credentials).await;
        let outcome = match result {
            Ok(session) => {
                self.state.token = Some(session.token.clone());
                self.state.user = Some(session.user.clone());
                self.store.set_token(&session.token);
                self.store.set_user(&session.user);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed; clearing session");
                self.logout();
                Err(e)
            }
        };
        self.state.loading = false;
        outcome
    }

    /// Register a new account. Symmetric to [`SessionManager::login`].
    ///
    /// # Errors
    ///
    /// Returns the normalized remote error.
    pub async fn register(&mut self, credentials: &RegisterCredentials) -> Result<(), ApiError> {
        self.state.loading = true;
        let result = self.api.register(credentials).await;
        let outcome = match result {
            Ok(session) => {
                self.state.token = Some(session.token.clone());
                self.state.user = Some(session.user.clone());
                self.store.set_token(&session.token);
                self.store.set_user(&session.user);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "registration failed; clearing session");
                self.logout();
                Err(e)
            }
        };
        self.state.loading = false;
        outcome
    }

    /// Clear the in-memory session and the persistent store.
    ///
    /// Idempotent; safe to call when already logged out.
    pub fn logout(&mut self) {
        self.state.user = None;
        self.state.token = None;
        self.store.clear_auth();
    }
}
