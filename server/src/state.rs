//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the upstream forwarding service behind an `Arc`; the proxy is
//! otherwise stateless.

use std::sync::Arc;

use crate::services::upstream::Upstream;

/// Shared application state. Clone is required by Axum; the inner service
/// is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<Upstream>,
}

impl AppState {
    #[must_use]
    pub fn new(upstream: Upstream) -> Self {
        Self { upstream: Arc::new(upstream) }
    }
}
