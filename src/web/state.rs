//! Shared application state for the web API.

use sqlx::PgPool;

use crate::models::ItemRepository;

/// State shared across all request handlers. Clone-cheap: the repository
/// wraps the pool handle.
#[derive(Clone)]
pub struct AppState {
    pub repository: ItemRepository,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ItemRepository::new(pool),
        }
    }
}
