//! Auth proxy routes — login, register, user lookup by email.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use super::{internal_error, relay};
use crate::state::AppState;

/// Page size used when walking the upstream listing for an email match.
const SCAN_PAGE_SIZE: u32 = 6;

/// `POST /api/auth/login` — pass the credentials through to the upstream.
pub async fn login(State(state): State<AppState>, Json(body): Json<serde_json::Value>) -> Response {
    match state.upstream.post("/login", &body).await {
        Ok(reply) => relay(reply, "Login failed"),
        Err(e) => {
            tracing::error!(error = %e, "login proxy failed");
            internal_error()
        }
    }
}

/// `POST /api/auth/register` — pass the registration fields through.
pub async fn register(State(state): State<AppState>, Json(body): Json<serde_json::Value>) -> Response {
    match state.upstream.post("/register", &body).await {
        Ok(reply) => relay(reply, "Registration failed"),
        Err(e) => {
            tracing::error!(error = %e, "register proxy failed");
            internal_error()
        }
    }
}

/// Find a user record by email in one page of the upstream listing.
fn find_by_email(body: &serde_json::Value, email: &str) -> Option<serde_json::Value> {
    body.get("data")?
        .as_array()?
        .iter()
        .find(|user| user.get("email").and_then(serde_json::Value::as_str) == Some(email))
        .cloned()
}

/// Total page count reported by a listing reply.
fn total_pages(body: &serde_json::Value) -> u64 {
    body.get("total_pages")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0)
}

/// `GET /api/auth/user/{email}` — linear scan of the full upstream listing.
///
/// The upstream has no lookup-by-email endpoint, so the proxy walks every
/// page until a match; absence is a 404.
pub async fn user_by_email(State(state): State<AppState>, Path(email): Path<String>) -> Response {
    let mut page = 1u64;
    loop {
        let path = format!("/users?page={page}&per_page={SCAN_PAGE_SIZE}");
        let reply = match state.upstream.get(&path).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "user lookup proxy failed");
                return internal_error();
            }
        };
        if !reply.is_success() {
            return relay(reply, "Failed to fetch users");
        }
        if let Some(user) = find_by_email(&reply.body, &email) {
            return (StatusCode::OK, Json(user)).into_response();
        }
        if page >= total_pages(&reply.body) {
            break;
        }
        page += 1;
    }

    (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "User not found" }))).into_response()
}
