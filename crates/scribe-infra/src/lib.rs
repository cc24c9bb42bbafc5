//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`:
//! key-value stores and the post repository built on top of them.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `redis` - Redis-backed key-value store

pub mod repository;
pub mod store;

pub use repository::KvPostRepository;
pub use store::InMemoryStore;

#[cfg(feature = "redis")]
pub use store::{RedisConfig, RedisStore};
