//! User-resource proxy routes — paginated listing and CRUD forwarding.

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use super::{internal_error, relay};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<u32>,
    per_page: Option<u32>,
}

/// Upstream listing path for a query, applying the 1/6 defaults.
fn list_path(query: &ListQuery) -> String {
    format!(
        "/users?page={}&per_page={}",
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(6)
    )
}

/// `GET /api/users?page=&per_page=` — forward the paginated listing.
pub async fn list_users(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    match state.upstream.get(&list_path(&query)).await {
        Ok(reply) => relay(reply, "Failed to fetch users"),
        Err(e) => {
            tracing::error!(error = %e, "users listing proxy failed");
            internal_error()
        }
    }
}

/// `POST /api/users` — forward a create.
pub async fn create_user(State(state): State<AppState>, Json(body): Json<serde_json::Value>) -> Response {
    match state.upstream.post("/users", &body).await {
        Ok(reply) => relay(reply, "Failed to create user"),
        Err(e) => {
            tracing::error!(error = %e, "user create proxy failed");
            internal_error()
        }
    }
}

/// `PUT /api/users/{id}` — forward an update.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    match state.upstream.put(&format!("/users/{id}"), &body).await {
        Ok(reply) => relay(reply, "Failed to update user"),
        Err(e) => {
            tracing::error!(error = %e, user_id = id, "user update proxy failed");
            internal_error()
        }
    }
}

/// `DELETE /api/users/{id}` — forward a delete; a success becomes
/// `{"success": true}` (the upstream replies with an empty 204).
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.upstream.delete(&format!("/users/{id}")).await {
        Ok(reply) if reply.is_success() => Json(serde_json::json!({ "success": true })).into_response(),
        Ok(reply) => relay(reply, "Failed to delete user"),
        Err(e) => {
            tracing::error!(error = %e, user_id = id, "user delete proxy failed");
            internal_error()
        }
    }
}
