//! Application state - shared across all handlers.

use std::sync::Arc;

use webboard_core::ports::Store;
use webboard_core::services::{CategoryCatalog, CommentService, PostService, UserDirectory};
use webboard_infra::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use webboard_infra::{PostgresStore, database::connect};

/// Shared application state. All services run over the same store.
#[derive(Clone)]
pub struct AppState {
    pub users: UserDirectory,
    pub categories: CategoryCatalog,
    pub posts: PostService,
    pub comments: CommentService,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store
    /// when no database is configured or reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let state = Self::with_store(open_store(db_config).await);
        tracing::info!("Application state initialized");
        state
    }

    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self {
            users: UserDirectory::new(store.clone()),
            categories: CategoryCatalog::new(store.clone()),
            posts: PostService::new(store.clone()),
            comments: CommentService::new(store),
        }
    }
}

#[cfg(feature = "postgres")]
async fn open_store(db_config: Option<&DatabaseConfig>) -> Arc<dyn Store> {
    let Some(config) = db_config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Arc::new(InMemoryStore::new());
    };

    match connect(config).await {
        Ok(db) => Arc::new(PostgresStore::new(db)),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            Arc::new(InMemoryStore::new())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_store(db_config: Option<&DatabaseConfig>) -> Arc<dyn Store> {
    if db_config.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
    }
    tracing::info!("Running without postgres feature - using in-memory store");
    Arc::new(InMemoryStore::new())
}
