//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use scribe_core::ports::{KeyValueStore, PostRepository};
use scribe_infra::{InMemoryStore, KvPostRepository};

#[cfg(feature = "redis")]
use scribe_infra::RedisStore;

use crate::config::AppConfig;
use crate::views::Views;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub store: Arc<dyn KeyValueStore>,
    pub views: Arc<Views>,
}

impl AppState {
    /// Connect the store and build the repository and templates on top of it.
    pub async fn new(config: &AppConfig) -> io::Result<Self> {
        let store = connect_store(config).await?;
        let views = Views::new().map_err(io::Error::other)?;

        tracing::info!("Application state initialized");
        Ok(Self::with_store(store, views))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>, views: Views) -> Self {
        Self {
            posts: Arc::new(KvPostRepository::new(store.clone())),
            store,
            views: Arc::new(views),
        }
    }
}

#[cfg(feature = "redis")]
async fn connect_store(config: &AppConfig) -> io::Result<Arc<dyn KeyValueStore>> {
    match RedisStore::new(config.redis.clone()).await {
        Ok(store) => Ok(Arc::new(store)),
        Err(e) if config.redis.fallback_to_memory => {
            tracing::warn!(
                error = %e,
                "Redis unavailable. Running on the in-memory store, posts will not survive a restart."
            );
            Ok(Arc::new(InMemoryStore::new()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Redis unavailable and fallback disabled");
            Err(io::Error::other(e))
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn connect_store(_config: &AppConfig) -> io::Result<Arc<dyn KeyValueStore>> {
    tracing::info!("Running without redis feature - using in-memory store");
    Ok(Arc::new(InMemoryStore::new()))
}
