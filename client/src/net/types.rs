//! Shared wire DTOs for the proxy API boundary.
//!
//! DESIGN
//! ======
//! These types mirror the upstream demo API's JSON payloads so serde
//! round-trips stay lossless. Create/update echoes are deliberately partial:
//! the upstream only returns the fields it was sent, and the resource
//! manager completes the record locally.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A user identity record.
///
/// `id` and `email` are conventionally immutable after creation; the display
/// fields are editable through the user-resource endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Login email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar image URL, if available.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Login request payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Registration request payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCredentials {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// A bearer token paired with the authenticated user.
///
/// The two are only ever stored and cleared together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// One page of the paginated user listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPage {
    /// 1-based page number.
    pub page: u32,
    /// Page size requested.
    pub per_page: u32,
    /// Total records across all pages.
    pub total: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Records on this page, in listing order.
    pub data: Vec<User>,
}

/// Payload for creating a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
}

/// Partial payload for updating a user. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
}

/// Partial record echoed by the upstream from create/update calls.
///
/// Only submitted fields come back; anything the caller needs beyond that
/// must be synthesized locally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserEcho {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
}

/// Reply from the delete endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeleteReply {
    pub success: bool,
}
