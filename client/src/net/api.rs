//! REST client for the proxy's auth and user-resource endpoint groups.
//!
//! ERROR HANDLING
//! ==============
//! Every remote failure is normalized into [`ApiError`] carrying a
//! human-readable message; nothing is recovered here. Callers (the session
//! and resource managers) decide whether an error becomes state or is
//! rethrown.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use super::types::{
    AuthSession, DeleteReply, LoginCredentials, NewUser, RegisterCredentials, User, UserEcho,
    UserPatch, UsersPage,
};

/// Normalized remote-call failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP status with the server-supplied message, or the
    /// generic fallback when the error body was unparsable.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// Network, TLS, or response-decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub(crate) fn status_fallback_message(status: u16) -> String {
    format!("HTTP error, status {status}")
}

/// Extract the server-supplied `error` message from a parsed error body,
/// falling back to the generic status message.
pub(crate) fn error_message(body: &serde_json::Value, status: u16) -> String {
    body.get("error")
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| status_fallback_message(status), str::to_owned)
}

#[derive(Debug, serde::Deserialize)]
struct LoginReply {
    token: String,
}

#[derive(Debug, serde::Deserialize)]
struct RegisterReply {
    id: i64,
    token: String,
}

/// Remote access seam for the session and resource managers.
///
/// [`ApiClient`] is the production implementation; tests substitute
/// in-memory mocks.
#[async_trait::async_trait]
pub trait RosterApi: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, ApiError>;
    async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthSession, ApiError>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, ApiError>;
    async fn get_users(&self, page: u32, per_page: u32) -> Result<UsersPage, ApiError>;
    async fn create_user(&self, data: &NewUser) -> Result<UserEcho, ApiError>;
    async fn update_user(&self, id: i64, data: &UserPatch) -> Result<UserEcho, ApiError>;
    async fn delete_user(&self, id: i64) -> Result<DeleteReply, ApiError>;
}

/// HTTP client bound to a proxy base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the given base URL (e.g. `http://127.0.0.1:3000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http: reqwest::Client::new(), base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a prepared request and decode the JSON reply.
    ///
    /// On a non-success status the JSON error body is parsed (defaulting to
    /// an empty object) and surfaced as [`ApiError::Status`].
    async fn request<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let resp = req.header(CONTENT_TYPE, "application/json").send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body: serde_json::Value = resp.json().await.unwrap_or_else(|_| serde_json::json!({}));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body, status.as_u16()),
            });
        }

        Ok(resp.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl RosterApi for ApiClient {
    /// Authenticate and resolve the full user record.
    ///
    /// The login endpoint returns only a token, so a secondary lookup by
    /// email completes the session pair.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, ApiError> {
        let reply: LoginReply = self
            .request(self.http.post(self.url("/api/auth/login")).json(credentials))
            .await?;
        let user = self.get_user_by_email(&credentials.email).await?;
        Ok(AuthSession { token: reply.token, user })
    }

    /// Register a new account.
    ///
    /// The server echoes only an id and token; the user record is
    /// synthesized from the request's own input.
    async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthSession, ApiError> {
        let reply: RegisterReply = self
            .request(self.http.post(self.url("/api/auth/register")).json(credentials))
            .await?;
        let user = User {
            id: reply.id,
            email: credentials.email.clone(),
            first_name: credentials.first_name.clone(),
            last_name: credentials.last_name.clone(),
            avatar: None,
        };
        Ok(AuthSession { token: reply.token, user })
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, ApiError> {
        let path = format!("/api/auth/user/{}", urlencoding::encode(email));
        self.request(self.http.get(self.url(&path))).await
    }

    async fn get_users(&self, page: u32, per_page: u32) -> Result<UsersPage, ApiError> {
        let path = format!("/api/users?page={page}&per_page={per_page}");
        self.request(self.http.get(self.url(&path))).await
    }

    async fn create_user(&self, data: &NewUser) -> Result<UserEcho, ApiError> {
        self.request(self.http.post(self.url("/api/users")).json(data))
            .await
    }

    async fn update_user(&self, id: i64, data: &UserPatch) -> Result<UserEcho, ApiError> {
        let path = format!("/api/users/{id}");
        self.request(self.http.put(self.url(&path)).json(data)).await
    }

    async fn delete_user(&self, id: i64) -> Result<DeleteReply, ApiError> {
        let path = format!("/api/users/{id}");
        self.request(self.http.delete(self.url(&path))).await
    }
}
