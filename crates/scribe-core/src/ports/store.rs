//! Store client port - the primitive key-value operations the repository
//! builds its indexes from.

use async_trait::async_trait;

use crate::error::StoreError;

/// A write queued inside a [`KeyValueStore::transaction`] batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCommand {
    /// `SET key value`
    Set { key: String, value: Vec<u8> },
    /// `HSET hash field value`
    HashSet {
        hash: String,
        field: String,
        value: Vec<u8>,
    },
    /// `ZADD set score member`
    SortedSetAdd {
        set: String,
        score: i64,
        member: String,
    },
}

impl WriteCommand {
    pub fn hash_set(hash: &str, field: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        WriteCommand::HashSet {
            hash: hash.to_string(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn sorted_set_add(set: &str, score: i64, member: impl Into<String>) -> Self {
        WriteCommand::SortedSetAdd {
            set: set.to_string(),
            score,
            member: member.into(),
        }
    }
}

/// Key-value backend abstraction (Redis, in-memory).
///
/// Every call acquires its own connection handle and releases it before
/// returning. Implementations never retry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a plain key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a plain key.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Read one field of a hash.
    async fn hash_get(&self, hash: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Read many fields of a hash in one round trip.
    /// The result has one slot per requested field, in request order.
    async fn hash_get_many(
        &self,
        hash: &str,
        fields: &[String],
    ) -> Result<Vec<Option<Vec<u8>>>, StoreError>;

    /// Write one field of a hash.
    async fn hash_set(&self, hash: &str, field: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Atomically increment a counter and return the new value.
    async fn increment(&self, counter: &str) -> Result<i64, StoreError>;

    /// Add or re-score a member of a sorted set.
    async fn sorted_set_add(&self, set: &str, score: i64, member: &str)
    -> Result<(), StoreError>;

    /// Members from `start` to `stop` (inclusive) in descending score order.
    /// Negative indices count from the end, as with `ZREVRANGE`.
    async fn sorted_set_range_desc(
        &self,
        set: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError>;

    /// Execute a batch of writes as one all-or-nothing unit.
    ///
    /// A failure is reported as [`StoreError::Transaction`]; nothing is
    /// rolled back on the caller's behalf.
    async fn transaction(&self, commands: Vec<WriteCommand>) -> Result<(), StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
