//! Route guards over the auth-session state.
//!
//! DESIGN
//! ======
//! Guards are explicit transition handlers, not per-render effects: each one
//! keeps a latch so the navigation side effect fires once per transition
//! into the triggering state, however often `observe` is called. Navigation
//! itself is a caller-supplied closure so the guards stay free of any
//! routing dependency.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::types::User;
use crate::state::auth::AuthState;

/// Default redirect target for unauthenticated visitors.
pub const LOGIN_PATH: &str = "/auth/login";
/// Default redirect target for already-authenticated visitors.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Guard for routes that require an authenticated session.
#[derive(Clone, Debug)]
pub struct RequireAuth {
    redirect_to: String,
    redirected: bool,
}

impl Default for RequireAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireAuth {
    #[must_use]
    pub fn new() -> Self {
        Self::with_redirect(LOGIN_PATH)
    }

    #[must_use]
    pub fn with_redirect(path: impl Into<String>) -> Self {
        Self { redirect_to: path.into(), redirected: false }
    }

    /// Observe the current auth state.
    ///
    /// Returns `Some(user)` once the session is loaded and authenticated.
    /// While loading, reports not-ready without side effects. Once loaded
    /// and unauthenticated, invokes `navigate` with the redirect path at
    /// most once per transition into that state.
    pub fn observe<F: FnMut(&str)>(&mut self, auth: &AuthState, mut navigate: F) -> Option<User> {
        if auth.loading {
            self.redirected = false;
            return None;
        }
        if !auth.is_authenticated() {
            if !self.redirected {
                self.redirected = true;
                navigate(&self.redirect_to);
            }
            return None;
        }
        self.redirected = false;
        auth.user.clone()
    }
}

/// Guard for routes that should be skipped by authenticated sessions
/// (login and registration pages).
#[derive(Clone, Debug)]
pub struct RedirectIfAuthenticated {
    redirect_to: String,
    redirected: bool,
}

impl Default for RedirectIfAuthenticated {
    fn default() -> Self {
        Self::new()
    }
}

impl RedirectIfAuthenticated {
    #[must_use]
    pub fn new() -> Self {
        Self::with_redirect(DASHBOARD_PATH)
    }

    #[must_use]
    pub fn with_redirect(path: impl Into<String>) -> Self {
        Self { redirect_to: path.into(), redirected: false }
    }

    /// Observe the current auth state.
    ///
    /// Returns `true` when the route may render. Once loaded and
    /// authenticated, invokes `navigate` with the redirect path at most
    /// once per transition into that state and returns `false`.
    pub fn observe<F: FnMut(&str)>(&mut self, auth: &AuthState, mut navigate: F) -> bool {
        if auth.loading {
            self.redirected = false;
            return false;
        }
        if auth.is_authenticated() {
            if !self.redirected {
                self.redirected = true;
                navigate(&self.redirect_to);
            }
            return false;
        }
        self.redirected = false;
        true
    }
}
