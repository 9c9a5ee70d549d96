use std::sync::Arc;
use std::sync::Mutex;

use super::*;
use crate::net::types::{
    AuthSession, DeleteReply, LoginCredentials, RegisterCredentials, UserEcho, UsersPage,
};

fn user(id: i64, first: &str, last: &str) -> User {
    User {
        id,
        email: format!("{}@example.com", first.to_lowercase()),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        avatar: None,
    }
}

fn page_of(users: Vec<User>) -> UsersPage {
    UsersPage { page: 1, per_page: PAGE_SIZE, total: 12, total_pages: 2, data: users }
}

fn status_error(message: &str) -> ApiError {
    ApiError::Status { status: 500, message: message.to_owned() }
}

/// Scripted `RosterApi` double for the resource manager: queued replies per
/// endpoint, recorded `get_users` calls.
#[derive(Default)]
struct StubApi {
    pages: Mutex<Vec<Result<UsersPage, ApiError>>>,
    creates: Mutex<Vec<Result<UserEcho, ApiError>>>,
    updates: Mutex<Vec<Result<UserEcho, ApiError>>>,
    deletes: Mutex<Vec<Result<DeleteReply, ApiError>>>,
    get_users_calls: Mutex<Vec<(u32, u32)>>,
}

impl StubApi {
    fn queue_page(&self, reply: Result<UsersPage, ApiError>) {
        self.pages.lock().unwrap().push(reply);
    }

    fn get_users_calls(&self) -> Vec<(u32, u32)> {
        self.get_users_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RosterApi for StubApi {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthSession, ApiError> {
        panic!("unexpected login call");
    }

    async fn register(&self, _credentials: &RegisterCredentials) -> Result<AuthSession, ApiError> {
        panic!("unexpected register call");
    }

    async fn get_user_by_email(&self, _email: &str) -> Result<User, ApiError> {
        panic!("unexpected get_user_by_email call");
    }

    async fn get_users(&self, page: u32, per_page: u32) -> Result<UsersPage, ApiError> {
        self.get_users_calls.lock().unwrap().push((page, per_page));
        let mut pages = self.pages.lock().unwrap();
        assert!(!pages.is_empty(), "unexpected get_users call");
        pages.remove(0)
    }

    async fn create_user(&self, _data: &NewUser) -> Result<UserEcho, ApiError> {
        let mut creates = self.creates.lock().unwrap();
        assert!(!creates.is_empty(), "unexpected create_user call");
        creates.remove(0)
    }

    async fn update_user(&self, _id: i64, _data: &UserPatch) -> Result<UserEcho, ApiError> {
        let mut updates = self.updates.lock().unwrap();
        assert!(!updates.is_empty(), "unexpected update_user call");
        updates.remove(0)
    }

    async fn delete_user(&self, _id: i64) -> Result<DeleteReply, ApiError> {
        let mut deletes = self.deletes.lock().unwrap();
        assert!(!deletes.is_empty(), "unexpected delete_user call");
        deletes.remove(0)
    }
}

fn manager(api: StubApi) -> (UsersManager, Arc<StubApi>) {
    let api = Arc::new(api);
    (UsersManager::new(api.clone()), api)
}

fn new_user_data() -> NewUser {
    NewUser {
        email: "jane@example.com".to_owned(),
        first_name: "Jane".to_owned(),
        last_name: "Smith".to_owned(),
        job: Some("Developer".to_owned()),
    }
}

// =============================================================================
// Fetch
// =============================================================================

#[tokio::test]
async fn activation_fetch_replaces_items_and_pagination() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe")])));
    let (mut mgr, api) = manager(api);
    assert!(mgr.state().loading);

    mgr.activate(1).await;

    assert_eq!(mgr.state().items, vec![user(1, "John", "Doe")]);
    assert_eq!(
        mgr.state().pagination,
        Pagination { page: 1, per_page: 6, total: 12, total_pages: 2 }
    );
    assert!(!mgr.state().loading);
    assert_eq!(mgr.state().error, None);
    assert_eq!(api.get_users_calls(), vec![(1, 6)]);
}

#[tokio::test]
async fn fetch_failure_records_error_and_keeps_items() {
    let api = StubApi::default();
    api.queue_page(Err(status_error("Failed to fetch users")));
    let (mut mgr, _api) = manager(api);

    mgr.activate(1).await;

    assert_eq!(mgr.state().error.as_deref(), Some("Failed to fetch users"));
    assert!(mgr.state().items.is_empty());
    assert!(!mgr.state().loading);
}

#[tokio::test]
async fn fetch_failure_preserves_previously_loaded_items() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe")])));
    api.queue_page(Err(status_error("Failed to fetch users")));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    mgr.fetch(2).await;

    assert_eq!(mgr.state().items, vec![user(1, "John", "Doe")]);
    assert_eq!(mgr.state().error.as_deref(), Some("Failed to fetch users"));
}

#[tokio::test]
async fn fetch_clears_previous_error() {
    let api = StubApi::default();
    api.queue_page(Err(status_error("Failed to fetch users")));
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe")])));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;
    assert!(mgr.state().error.is_some());

    mgr.fetch(1).await;

    assert_eq!(mgr.state().error, None);
}

// =============================================================================
// Page navigation
// =============================================================================

#[tokio::test]
async fn go_to_page_within_bounds_fetches_and_updates_page() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe")])));
    api.queue_page(Ok(UsersPage {
        page: 2,
        per_page: 6,
        total: 12,
        total_pages: 2,
        data: vec![user(7, "Grace", "Hopper")],
    }));
    let (mut mgr, api) = manager(api);
    mgr.activate(1).await;

    mgr.go_to_page(2).await;

    assert_eq!(api.get_users_calls(), vec![(1, 6), (2, 6)]);
    assert_eq!(mgr.state().pagination.page, 2);
    assert_eq!(mgr.state().items, vec![user(7, "Grace", "Hopper")]);
}

#[tokio::test]
async fn go_to_page_out_of_range_issues_no_fetch() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe")])));
    let (mut mgr, api) = manager(api);
    mgr.activate(1).await;

    mgr.go_to_page(0).await;
    mgr.go_to_page(3).await;

    assert_eq!(api.get_users_calls(), vec![(1, 6)]);
    assert_eq!(mgr.state().pagination.page, 1);
}

#[tokio::test]
async fn go_to_page_before_first_fetch_is_noop() {
    let (mut mgr, api) = manager(StubApi::default());

    mgr.go_to_page(1).await;

    assert!(api.get_users_calls().is_empty());
}

// =============================================================================
// Create — optimistic local patch
// =============================================================================

#[tokio::test]
async fn create_synthesizes_record_from_input_and_sparse_echo() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![])));
    api.creates.lock().unwrap().push(Ok(UserEcho {
        first_name: Some("Jane".to_owned()),
        ..UserEcho::default()
    }));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    let created = mgr.create(&new_user_data()).await.unwrap();

    assert_eq!(created.email, "jane@example.com");
    assert_eq!(created.first_name, "Jane");
    assert_eq!(created.last_name, "Smith");
    assert_eq!(
        created.avatar.as_deref(),
        Some("https://ui-avatars.com/api/?name=Jane+Smith&background=3b82f6&color=fff")
    );
    assert_eq!(mgr.state().items, vec![created]);
}

#[tokio::test]
async fn create_prepends_and_caps_visible_items_at_page_size() {
    let api = StubApi::default();
    let full_page: Vec<User> = (1..=6).map(|i| user(i, "User", "Six")).collect();
    api.queue_page(Ok(page_of(full_page)));
    api.creates.lock().unwrap().push(Ok(UserEcho::default()));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    let created = mgr.create(&new_user_data()).await.unwrap();

    assert_eq!(mgr.state().items.len(), 6);
    assert_eq!(mgr.state().items[0], created);
    // Oldest visible entry beyond the page size is dropped.
    assert!(!mgr.state().items.iter().any(|u| u.id == 6));
}

#[tokio::test]
async fn create_leaves_pagination_totals_stale() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe")])));
    api.creates.lock().unwrap().push(Ok(UserEcho::default()));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    mgr.create(&new_user_data()).await.unwrap();

    // Local-only patch: the counters reflect the last fetch, not the create.
    assert_eq!(mgr.state().pagination.total, 12);
    assert_eq!(mgr.state().pagination.total_pages, 2);
}

#[tokio::test]
async fn create_failure_leaves_items_untouched() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe")])));
    api.creates.lock().unwrap().push(Err(status_error("Failed to create user")));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    let err = mgr.create(&new_user_data()).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to create user");
    assert_eq!(mgr.state().items, vec![user(1, "John", "Doe")]);
}

#[tokio::test]
async fn local_ids_are_strictly_increasing() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![])));
    api.creates.lock().unwrap().push(Ok(UserEcho::default()));
    api.creates.lock().unwrap().push(Ok(UserEcho::default()));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    let first = mgr.create(&new_user_data()).await.unwrap();
    let second = mgr.create(&new_user_data()).await.unwrap();

    assert!(second.id > first.id);
}

// =============================================================================
// Update — in-place shallow merge
// =============================================================================

#[tokio::test]
async fn update_patches_matching_item_in_place() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe"), user(2, "Grace", "Hopper")])));
    api.updates.lock().unwrap().push(Ok(UserEcho::default()));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    let patch = UserPatch { first_name: Some("Johnny".to_owned()), ..UserPatch::default() };
    mgr.update(1, &patch).await.unwrap();

    // Order preserved, names merged, avatar regenerated from the new name.
    assert_eq!(mgr.state().items[0].id, 1);
    assert_eq!(mgr.state().items[0].first_name, "Johnny");
    assert_eq!(mgr.state().items[0].last_name, "Doe");
    assert_eq!(
        mgr.state().items[0].avatar.as_deref(),
        Some("https://ui-avatars.com/api/?name=Johnny+Doe&background=3b82f6&color=fff")
    );
    assert_eq!(mgr.state().items[1], user(2, "Grace", "Hopper"));
}

#[tokio::test]
async fn update_without_name_change_keeps_avatar() {
    let api = StubApi::default();
    let mut listed = user(1, "John", "Doe");
    listed.avatar = Some("https://example.com/original.png".to_owned());
    api.queue_page(Ok(page_of(vec![listed])));
    api.updates.lock().unwrap().push(Ok(UserEcho::default()));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    let patch = UserPatch { email: Some("john.doe@example.com".to_owned()), ..UserPatch::default() };
    mgr.update(1, &patch).await.unwrap();

    assert_eq!(mgr.state().items[0].email, "john.doe@example.com");
    assert_eq!(mgr.state().items[0].avatar.as_deref(), Some("https://example.com/original.png"));
}

#[tokio::test]
async fn update_failure_leaves_local_state_untouched() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe")])));
    api.updates.lock().unwrap().push(Err(status_error("Failed to update user")));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    let patch = UserPatch { first_name: Some("Johnny".to_owned()), ..UserPatch::default() };
    let err = mgr.update(1, &patch).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to update user");
    assert_eq!(mgr.state().items, vec![user(1, "John", "Doe")]);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_removes_exactly_the_matching_item() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe"), user(2, "Grace", "Hopper")])));
    api.deletes.lock().unwrap().push(Ok(DeleteReply { success: true }));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    mgr.delete(1).await.unwrap();

    assert_eq!(mgr.state().items, vec![user(2, "Grace", "Hopper")]);
}

#[tokio::test]
async fn delete_failure_keeps_items() {
    let api = StubApi::default();
    api.queue_page(Ok(page_of(vec![user(1, "John", "Doe")])));
    api.deletes.lock().unwrap().push(Err(status_error("Failed to delete user")));
    let (mut mgr, _api) = manager(api);
    mgr.activate(1).await;

    let err = mgr.delete(1).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to delete user");
    assert_eq!(mgr.state().items, vec![user(1, "John", "Doe")]);
}
