//! # client
//!
//! Client-side state layer for the Roster dashboard: authentication session
//! management, a paginated user-resource manager, route guards, and the
//! persistent session store, all over a thin HTTP client for the proxy API.
//!
//! Rendering is out of scope here; front ends (the `cli` crate, tests)
//! observe the plain state structs and drive the managers directly.

pub mod net;
pub mod session;
pub mod state;
pub mod util;
