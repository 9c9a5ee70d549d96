//! Persistent session store — token and user record as opaque entries.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs the session manager with a small file-per-key store mirroring
//! browser localStorage entries. Reads and writes never raise: a missing or
//! unreadable entry reads as absent, and on an environment without storage
//! (no state directory configured) every read is absent and every write a
//! no-op. The session manager is the only writer by convention.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fs;
use std::path::PathBuf;

use crate::net::types::User;

/// Entry name holding the raw bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Entry name holding the JSON-serialized user record.
pub const USER_KEY: &str = "auth_user";

/// Environment variable naming the state directory.
pub const STATE_DIR_ENV: &str = "ROSTER_STATE_DIR";

/// Synchronous key-value store for the auth session.
///
/// Entries have no expiry; they live until [`SessionStore::clear_auth`] or
/// the directory is externally wiped.
#[derive(Clone, Debug)]
pub struct SessionStore {
    root: Option<PathBuf>,
}

impl SessionStore {
    /// Store rooted at `dir`. The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { root: Some(dir.into()) }
    }

    /// Store for an environment without persistent storage: reads return
    /// absent and writes are no-ops.
    #[must_use]
    pub fn disabled() -> Self {
        Self { root: None }
    }

    /// Store rooted at `ROSTER_STATE_DIR`, or disabled when unset.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(STATE_DIR_ENV).map_or_else(|_| Self::disabled(), |dir| Self::new(dir))
    }

    fn read(&self, key: &str) -> Option<String> {
        let root = self.root.as_ref()?;
        fs::read_to_string(root.join(key)).ok()
    }

    fn write(&self, key: &str, value: &str) {
        let Some(root) = self.root.as_ref() else {
            return;
        };
        let _ = fs::create_dir_all(root);
        let _ = fs::write(root.join(key), value);
    }

    fn remove(&self, key: &str) {
        let Some(root) = self.root.as_ref() else {
            return;
        };
        let _ = fs::remove_file(root.join(key));
    }

    /// Stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) {
        self.write(TOKEN_KEY, token);
    }

    /// Stored user record. Malformed stored JSON reads as absent; the
    /// session manager treats an incomplete pair as a fail-closed signal.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        let raw = self.read(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn set_user(&self, user: &User) {
        let Ok(raw) = serde_json::to_string(user) else {
            return;
        };
        self.write(USER_KEY, &raw);
    }

    /// Remove both entries. Token and user are only ever cleared together.
    pub fn clear_auth(&self) {
        self.remove(TOKEN_KEY);
        self.remove(USER_KEY);
    }

    /// True when both entries are present and readable.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.token().is_some() && self.user().is_some()
    }
}
