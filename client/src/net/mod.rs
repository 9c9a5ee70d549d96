//! Networking modules for the proxy REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the HTTP calls and error normalization, `types` defines the
//! shared wire schema for the auth and user-resource endpoint groups.

pub mod api;
pub mod types;
