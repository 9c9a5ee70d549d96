//! Router assembly and shared relay helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The proxy relays upstream status and body as-is on success; on a
//! non-success status it re-wraps the upstream's error message (or a
//! per-endpoint fallback) as `{"error": ...}`, and any transport failure
//! collapses to a 500 with a generic body.

pub mod auth;
pub mod users;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::upstream::UpstreamReply;
use crate::state::AppState;

/// API routes with a permissive CORS layer.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/user/{email}", get(auth::user_by_email))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/{id}", put(users::update_user).delete(users::delete_user))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Upstream-supplied error message, or the endpoint fallback.
pub(crate) fn error_or(body: &serde_json::Value, fallback: &str) -> String {
    body.get("error")
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| fallback.to_owned(), str::to_owned)
}

/// Relay an upstream reply: success passes status and body through,
/// non-success re-wraps the message as an error body.
pub(crate) fn relay(reply: UpstreamReply, fallback: &str) -> Response {
    if reply.is_success() {
        (reply.status, Json(reply.body)).into_response()
    } else {
        (reply.status, Json(serde_json::json!({ "error": error_or(&reply.body, fallback) })))
            .into_response()
    }
}

/// Generic 500 reply for unexpected proxy failures.
pub(crate) fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal server error" })),
    )
        .into_response()
}
