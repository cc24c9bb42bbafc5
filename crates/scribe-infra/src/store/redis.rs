//! Redis key-value store implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use scribe_core::ports::{KeyValueStore, WriteCommand};
use scribe_core::StoreError;

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Whether to fallback to the in-memory store if Redis is unavailable
    pub fallback_to_memory: bool,
    /// Namespace prepended to every key, as `<prefix>:<key>`
    pub key_prefix: Option<String>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            fallback_to_memory: true,
            key_prefix: None,
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            fallback_to_memory: std::env::var("REDIS_FALLBACK_TO_MEMORY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            key_prefix: std::env::var("REDIS_KEY_PREFIX")
                .ok()
                .filter(|p| !p.is_empty()),
        }
    }
}

/// Redis-backed key-value store.
///
/// Holds one `ConnectionManager`; each operation clones it, which hands out a
/// multiplexed connection with automatic reconnection, and drops the clone
/// when the call returns.
pub struct RedisStore {
    conn: ConnectionManager,
    config: RedisConfig,
}

impl RedisStore {
    pub async fn new(config: RedisConfig) -> Result<Self, StoreError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| StoreError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| StoreError::Connection("Connection timed out".to_string()))?
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(
            url = %config.url,
            prefix = config.key_prefix.as_deref().unwrap_or(""),
            "Connected to Redis store"
        );

        Ok(Self { conn, config })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, StoreError> {
        Self::new(RedisConfig::from_env()).await
    }

    fn key(&self, key: &str) -> String {
        match &self.config.key_prefix {
            Some(prefix) => format!("{prefix}:{key}"),
            None => key.to_string(),
        }
    }
}

fn op_err(e: redis::RedisError) -> StoreError {
    StoreError::Operation(e.to_string())
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get(self.key(key)).await.map_err(op_err)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set(self.key(key), value).await.map_err(op_err)
    }

    async fn hash_get(&self, hash: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        conn.hget(self.key(hash), field).await.map_err(op_err)
    }

    async fn hash_get_many(
        &self,
        hash: &str,
        fields: &[String],
    ) -> Result<Vec<Option<Vec<u8>>>, StoreError> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }

        let hash = self.key(hash);
        let mut pipe = redis::pipe();
        for field in fields {
            pipe.hget(&hash, field);
        }

        let mut conn = self.conn.clone();
        let values: Vec<Option<Vec<u8>>> = pipe.query_async(&mut conn).await.map_err(op_err)?;
        tracing::trace!(hash = %hash, count = values.len(), "Pipelined HGET");
        Ok(values)
    }

    async fn hash_set(&self, hash: &str, field: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.hset(self.key(hash), field, value).await.map_err(op_err)
    }

    async fn increment(&self, counter: &str) -> Result<i64, StoreError> {
        let mut conn = self.conn.clone();
        conn.incr(self.key(counter), 1).await.map_err(op_err)
    }

    async fn sorted_set_add(
        &self,
        set: &str,
        score: i64,
        member: &str,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.zadd(self.key(set), member, score).await.map_err(op_err)
    }

    async fn sorted_set_range_desc(
        &self,
        set: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.zrevrange(self.key(set), start, stop)
            .await
            .map_err(op_err)
    }

    async fn transaction(&self, commands: Vec<WriteCommand>) -> Result<(), StoreError> {
        let mut pipe = redis::pipe();
        pipe.atomic();

        for command in commands {
            match command {
                WriteCommand::Set { key, value } => {
                    pipe.set(self.key(&key), value).ignore();
                }
                WriteCommand::HashSet { hash, field, value } => {
                    pipe.hset(self.key(&hash), field, value).ignore();
                }
                WriteCommand::SortedSetAdd { set, score, member } => {
                    pipe.zadd(self.key(&set), member, score).ignore();
                }
            }
        }

        let mut conn = self.conn.clone();
        let _: () = pipe
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Transaction(e.to_string()))?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    async fn get_test_store() -> Option<RedisStore> {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
            fallback_to_memory: false,
            key_prefix: Some(format!("scribe_test_{nonce}")),
        };

        RedisStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_store_set_get() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        store.set("key", b"value").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_store_increment() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };

        assert_eq!(store.increment("id:post").await.unwrap(), 1);
        assert_eq!(store.increment("id:post").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_redis_store_transaction_and_reads() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };

        store
            .transaction(vec![
                WriteCommand::hash_set("post", "1", b"first".to_vec()),
                WriteCommand::sorted_set_add("post:created_at", 100, "1"),
                WriteCommand::hash_set("post", "2", b"second".to_vec()),
                WriteCommand::sorted_set_add("post:created_at", 200, "2"),
            ])
            .await
            .unwrap();

        let ids = store
            .sorted_set_range_desc("post:created_at", 0, -1)
            .await
            .unwrap();
        assert_eq!(ids, vec!["2", "1"]);

        let fields = vec!["2".to_string(), "9".to_string(), "1".to_string()];
        let docs = store.hash_get_many("post", &fields).await.unwrap();
        assert_eq!(
            docs,
            vec![Some(b"second".to_vec()), None, Some(b"first".to_vec())]
        );

        assert!(store.ping().await.is_ok());
    }
}
