//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::service::PostService;

#[cfg(any(test, not(feature = "postgres")))]
use blog_infra::database::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use blog_infra::database::{Database, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Which post store backs the service; reported by the health endpoint.
    pub store_backend: &'static str,
}

impl AppState {
    /// Build the state on the database-backed post store.
    #[cfg(feature = "postgres")]
    pub fn new(db: &Database) -> Self {
        let repo = Arc::new(PostgresPostRepository::new(db.conn.clone()));
        Self {
            posts: PostService::new(repo),
            store_backend: "postgres",
        }
    }

    /// Build the state on the in-memory post store. Used when the crate is
    /// built without the `postgres` feature, and by handler tests.
    #[cfg(any(test, not(feature = "postgres")))]
    pub fn in_memory() -> Self {
        Self {
            posts: PostService::new(Arc::new(InMemoryPostRepository::new())),
            store_backend: "memory",
        }
    }
}
