use sqlx::SqlitePool;
use tower_cookies::Key;

use crate::catalog::CatalogStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Roadmap document; re-read from disk on every request.
    pub catalog: CatalogStore,
    /// Signs and verifies the session cookie.
    pub session_key: Key,
}
