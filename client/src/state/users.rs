//! Paginated user-list state machine with optimistic local patching.
//!
//! DESIGN
//! ======
//! One manager per mounted listing. Reads replace the page wholesale and
//! absorb failures into the `error` field; writes patch the local items
//! optimistically on success and rethrow on failure so the front end can
//! show a transient notification. Mutations are never reconciled with the
//! server's totals until the next fetch.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::net::api::{ApiError, RosterApi};
use crate::net::types::{NewUser, User, UserPatch};
use crate::util::avatar::avatar_url;

/// Fixed page size of the user listing.
pub const PAGE_SIZE: u32 = 6;

/// Local projection of the listing's pagination counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: PAGE_SIZE, total: 0, total_pages: 0 }
    }
}

/// Observable list state.
///
/// Starts with `loading = true`; the activation fetch completes it.
#[derive(Clone, Debug)]
pub struct UsersState {
    pub items: Vec<User>,
    pub pagination: Pagination,
    pub loading: bool,
    /// Message of the last failed fetch; cleared on the next fetch.
    pub error: Option<String>,
}

impl Default for UsersState {
    fn default() -> Self {
        Self { items: Vec::new(), pagination: Pagination::default(), loading: true, error: None }
    }
}

/// Owner and single writer of one paginated user listing.
pub struct UsersManager {
    api: Arc<dyn RosterApi>,
    state: UsersState,
    last_local_id: i64,
}

impl UsersManager {
    #[must_use]
    pub fn new(api: Arc<dyn RosterApi>) -> Self {
        Self { api, state: UsersState::default(), last_local_id: 0 }
    }

    /// Current observable state.
    #[must_use]
    pub fn state(&self) -> &UsersState {
        &self.state
    }

    /// The one automatic fetch on activation.
    pub async fn activate(&mut self, initial_page: u32) {
        self.fetch(initial_page).await;
    }

    /// Load `page`, replacing items and pagination wholesale on success.
    ///
    /// A failure records the message in `error` and leaves the current
    /// items untouched.
    pub async fn fetch(&mut self, page: u32) {
        self.state.loading = true;
        self.state.error = None;
        match self.api.get_users(page, PAGE_SIZE).await {
            Ok(reply) => {
                self.state.items = reply.data;
                self.state.pagination = Pagination {
                    page: reply.page,
                    per_page: reply.per_page,
                    total: reply.total,
                    total_pages: reply.total_pages,
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, page, "user fetch failed");
                self.state.error = Some(e.to_string());
            }
        }
        self.state.loading = false;
    }

    /// Create a user and prepend it to the visible page.
    ///
    /// The upstream echoes only submitted fields, so the record is completed
    /// locally: input merged over the echo, a monotonic timestamp-based
    /// local id, and a generated avatar. The visible list is capped at the
    /// page size; pagination totals stay stale until the next fetch.
    ///
    /// # Errors
    ///
    /// Rethrows the remote error without touching local state.
    pub async fn create(&mut self, data: &NewUser) -> Result<User, ApiError> {
        let echo = self.api.create_user(data).await?;
        let email = echo.email.unwrap_or_else(|| data.email.clone());
        let first_name = echo.first_name.unwrap_or_else(|| data.first_name.clone());
        let last_name = echo.last_name.unwrap_or_else(|| data.last_name.clone());
        let user = User {
            id: self.next_local_id(),
            avatar: Some(avatar_url(&first_name, &last_name)),
            email,
            first_name,
            last_name,
        };
        self.state.items.insert(0, user.clone());
        self.state.items.truncate(PAGE_SIZE as usize);
        Ok(user)
    }

    /// Update a user and shallow-merge the patch into the matching item.
    ///
    /// Items keep their order; the avatar is regenerated when a name field
    /// changed.
    ///
    /// # Errors
    ///
    /// Rethrows the remote error without touching local state.
    pub async fn update(&mut self, id: i64, patch: &UserPatch) -> Result<(), ApiError> {
        self.api.update_user(id, patch).await?;
        if let Some(user) = self.state.items.iter_mut().find(|u| u.id == id) {
            if let Some(email) = &patch.email {
                user.email = email.clone();
            }
            if patch.first_name.is_some() || patch.last_name.is_some() {
                if let Some(first_name) = &patch.first_name {
                    user.first_name = first_name.clone();
                }
                if let Some(last_name) = &patch.last_name {
                    user.last_name = last_name.clone();
                }
                user.avatar = Some(avatar_url(&user.first_name, &user.last_name));
            }
        }
        Ok(())
    }

    /// Delete a user and remove the matching item.
    ///
    /// # Errors
    ///
    /// Rethrows the remote error without touching local state.
    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.api.delete_user(id).await?;
        self.state.items.retain(|u| u.id != id);
        Ok(())
    }

    /// Navigate to `page` if it is within bounds; out-of-range requests are
    /// a no-op that issues no fetch.
    pub async fn go_to_page(&mut self, page: u32) {
        if page >= 1 && page <= self.state.pagination.total_pages {
            self.fetch(page).await;
        }
    }

    /// Timestamp-based identifier for locally synthesized records;
    /// strictly increasing within this manager.
    fn next_local_id(&mut self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX));
        let id = now.max(self.last_local_id + 1);
        self.last_local_id = id;
        id
    }
}
