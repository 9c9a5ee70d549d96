//! Upstream forwarding service — injects the secret header, relays JSON.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every proxied request goes through here so the secret key never leaves
//! the server process. Replies carry the upstream status plus the parsed
//! JSON body; an unparsable body defaults to an empty object so handlers
//! can relay error messages without special cases.

#[cfg(test)]
#[path = "upstream_test.rs"]
mod upstream_test;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use crate::config::UpstreamConfig;

/// Secret header name expected by the external API.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Relayed upstream reply.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl UpstreamReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Forwarding client bound to the configured upstream.
pub struct Upstream {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl Upstream {
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{path_and_query}", self.config.base_url)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<UpstreamReply, UpstreamError> {
        let resp = req
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        let status = resp.status();
        let body = resp
            .json::<serde_json::Value>()
            .await
            .unwrap_or_else(|_| serde_json::json!({}));
        Ok(UpstreamReply { status, body })
    }

    /// Forward a GET to `path_and_query` (e.g. `/users?page=1&per_page=6`).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on a transport failure; non-success HTTP
    /// statuses are relayed in the reply, not raised.
    pub async fn get(&self, path_and_query: &str) -> Result<UpstreamReply, UpstreamError> {
        self.send(self.http.get(self.url(path_and_query))).await
    }

    /// Forward a POST with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on a transport failure.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> Result<UpstreamReply, UpstreamError> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    /// Forward a PUT with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on a transport failure.
    pub async fn put(&self, path: &str, body: &serde_json::Value) -> Result<UpstreamReply, UpstreamError> {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    /// Forward a DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on a transport failure.
    pub async fn delete(&self, path: &str) -> Result<UpstreamReply, UpstreamError> {
        self.send(self.http.delete(self.url(path))).await
    }
}
