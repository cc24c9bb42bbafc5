//! In-memory key-value store - used when Redis is unavailable and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::ports::{KeyValueStore, WriteCommand};
use scribe_core::StoreError;

#[derive(Default)]
struct State {
    strings: HashMap<String, Vec<u8>>,
    hashes: HashMap<String, HashMap<String, Vec<u8>>>,
    sorted_sets: HashMap<String, HashMap<String, i64>>,
}

impl State {
    fn set(&mut self, key: &str, value: Vec<u8>) {
        self.strings.insert(key.to_string(), value);
    }

    fn hash_set(&mut self, hash: &str, field: &str, value: Vec<u8>) {
        self.hashes
            .entry(hash.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }

    fn sorted_set_add(&mut self, set: &str, score: i64, member: &str) {
        self.sorted_sets
            .entry(set.to_string())
            .or_default()
            .insert(member.to_string(), score);
    }

    fn apply(&mut self, command: WriteCommand) {
        match command {
            WriteCommand::Set { key, value } => self.set(&key, value),
            WriteCommand::HashSet { hash, field, value } => self.hash_set(&hash, &field, value),
            WriteCommand::SortedSetAdd { set, score, member } => {
                self.sorted_set_add(&set, score, &member)
            }
        }
    }
}

/// In-memory key-value store using hash maps behind an async RwLock.
///
/// Mirrors the Redis semantics the repository relies on: integer counters
/// stored as decimal strings, `ZREVRANGE` ordering, and transactions applied
/// under a single write lock.
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve `ZREVRANGE`-style inclusive indices against a set of `len` members.
fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start >= len || start > stop {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.state.read().await.strings.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.state.write().await.set(key, value.to_vec());
        Ok(())
    }

    async fn hash_get(&self, hash: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let state = self.state.read().await;
        Ok(state.hashes.get(hash).and_then(|h| h.get(field)).cloned())
    }

    async fn hash_get_many(
        &self,
        hash: &str,
        fields: &[String],
    ) -> Result<Vec<Option<Vec<u8>>>, StoreError> {
        let state = self.state.read().await;
        let entries = state.hashes.get(hash);
        Ok(fields
            .iter()
            .map(|field| entries.and_then(|h| h.get(field)).cloned())
            .collect())
    }

    async fn hash_set(&self, hash: &str, field: &str, value: &[u8]) -> Result<(), StoreError> {
        self.state.write().await.hash_set(hash, field, value.to_vec());
        Ok(())
    }

    async fn increment(&self, counter: &str) -> Result<i64, StoreError> {
        let mut state = self.state.write().await;

        let current = match state.strings.get(counter) {
            Some(raw) => std::str::from_utf8(raw)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| {
                    StoreError::Operation(format!("value at {counter} is not an integer"))
                })?,
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::Operation(format!("increment of {counter} overflows")))?;

        state.set(counter, next.to_string().into_bytes());
        Ok(next)
    }

    async fn sorted_set_add(
        &self,
        set: &str,
        score: i64,
        member: &str,
    ) -> Result<(), StoreError> {
        self.state.write().await.sorted_set_add(set, score, member);
        Ok(())
    }

    async fn sorted_set_range_desc(
        &self,
        set: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError> {
        let state = self.state.read().await;
        let Some(members) = state.sorted_sets.get(set) else {
            return Ok(Vec::new());
        };

        let mut ordered: Vec<(&String, i64)> = members.iter().map(|(m, s)| (m, *s)).collect();
        // Highest score first; equal scores fall back to reverse member order like Redis.
        ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(a.0)));

        Ok(match resolve_range(ordered.len(), start, stop) {
            Some((from, to)) => ordered[from..=to]
                .iter()
                .map(|(member, _)| (*member).clone())
                .collect(),
            None => Vec::new(),
        })
    }

    async fn transaction(&self, commands: Vec<WriteCommand>) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        for command in commands {
            state.apply(command);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryStore::new();
        store.set("key1", b"value1").await.unwrap();
        assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_increment_starts_at_one() {
        let store = InMemoryStore::new();
        assert_eq!(store.increment("counter").await.unwrap(), 1);
        assert_eq!(store.increment("counter").await.unwrap(), 2);
        assert_eq!(store.get("counter").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn test_increment_rejects_non_integer() {
        let store = InMemoryStore::new();
        store.set("counter", b"abc").await.unwrap();
        assert!(matches!(
            store.increment("counter").await,
            Err(StoreError::Operation(_))
        ));
    }

    #[tokio::test]
    async fn test_hash_get_many_keeps_request_order() {
        let store = InMemoryStore::new();
        store.hash_set("h", "a", b"1").await.unwrap();
        store.hash_set("h", "c", b"3").await.unwrap();

        let fields = vec!["c".to_string(), "b".to_string(), "a".to_string()];
        let values = store.hash_get_many("h", &fields).await.unwrap();
        assert_eq!(values, vec![Some(b"3".to_vec()), None, Some(b"1".to_vec())]);
    }

    #[tokio::test]
    async fn test_range_desc_orders_by_score() {
        let store = InMemoryStore::new();
        store.sorted_set_add("z", 20, "b").await.unwrap();
        store.sorted_set_add("z", 10, "a").await.unwrap();
        store.sorted_set_add("z", 30, "c").await.unwrap();

        assert_eq!(
            store.sorted_set_range_desc("z", 0, -1).await.unwrap(),
            vec!["c", "b", "a"]
        );
        assert_eq!(
            store.sorted_set_range_desc("z", 1, 1).await.unwrap(),
            vec!["b"]
        );
        assert_eq!(
            store.sorted_set_range_desc("z", -2, -1).await.unwrap(),
            vec!["b", "a"]
        );
        assert!(store.sorted_set_range_desc("z", 5, 10).await.unwrap().is_empty());
        assert!(store.sorted_set_range_desc("none", 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transaction_applies_every_command() {
        let store = InMemoryStore::new();
        store
            .transaction(vec![
                WriteCommand::hash_set("post", "1", b"doc".to_vec()),
                WriteCommand::sorted_set_add("post:created_at", 5, "1"),
                WriteCommand::Set {
                    key: "k".to_string(),
                    value: b"v".to_vec(),
                },
            ])
            .await
            .unwrap();

        assert_eq!(store.hash_get("post", "1").await.unwrap(), Some(b"doc".to_vec()));
        assert_eq!(
            store.sorted_set_range_desc("post:created_at", 0, -1).await.unwrap(),
            vec!["1"]
        );
        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_resolve_range() {
        assert_eq!(resolve_range(0, 0, -1), None);
        assert_eq!(resolve_range(3, 0, -1), Some((0, 2)));
        assert_eq!(resolve_range(3, -10, 100), Some((0, 2)));
        assert_eq!(resolve_range(3, 2, 1), None);
    }
}
