//! Server-side services.

pub mod upstream;
