use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::BookStore;
use crate::metrics::Metrics;

/// The shared application state.
///
/// Built once in `main` and handed to the router; handlers receive a clone
/// through Axum's `State` extractor. Nothing in here is mutated per request
/// apart from the atomic metric counters.
#[derive(Clone)]
pub struct AppState {
    /// Storage access for the `books` table.
    pub store: BookStore,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Request counters exposed at `/metrics`.
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: BookStore, config: AppConfig) -> Self {
        Self { store, config: Arc::new(config), metrics: Metrics::new() }
    }
}
