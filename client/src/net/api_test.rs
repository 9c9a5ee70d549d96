use super::*;

// =============================================================================
// Error-body message selection
// =============================================================================

#[test]
fn error_message_prefers_server_supplied_error() {
    let body = serde_json::json!({"error": "Invalid credentials"});
    assert_eq!(error_message(&body, 401), "Invalid credentials");
}

#[test]
fn error_message_falls_back_on_empty_body() {
    let body = serde_json::json!({});
    assert_eq!(error_message(&body, 404), "HTTP error, status 404");
}

#[test]
fn error_message_falls_back_on_non_string_error_field() {
    let body = serde_json::json!({"error": {"code": 7}});
    assert_eq!(error_message(&body, 500), "HTTP error, status 500");
}

#[test]
fn status_fallback_names_the_code() {
    assert_eq!(status_fallback_message(502), "HTTP error, status 502");
}

// =============================================================================
// ApiError display — callers surface `to_string` directly
// =============================================================================

#[test]
fn status_error_displays_message_only() {
    let err = ApiError::Status { status: 401, message: "Invalid credentials".to_owned() };
    assert_eq!(err.to_string(), "Invalid credentials");
}

// =============================================================================
// Client construction
// =============================================================================

#[test]
fn base_url_trailing_slash_is_normalized() {
    let client = ApiClient::new("http://localhost:3000/");
    assert_eq!(client.url("/api/users"), "http://localhost:3000/api/users");
}

#[test]
fn url_joins_path_verbatim() {
    let client = ApiClient::new("http://localhost:3000");
    assert_eq!(
        client.url("/api/users?page=2&per_page=6"),
        "http://localhost:3000/api/users?page=2&per_page=6"
    );
}
