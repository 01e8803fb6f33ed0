use std::sync::Arc;

use crate::catalog::store::CatalogStore;
use crate::config::Config;
use crate::search::narrator::Narrator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Catalog reads. Default: `PgCatalogStore`, one connection per call.
    pub store: Arc<dyn CatalogStore>,
    pub narrator: Narrator,
    pub config: Arc<Config>,
}
