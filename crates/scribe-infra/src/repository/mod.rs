//! Post repository over a key-value store.
//!
//! Persisted layout:
//!
//! | key               | type       | contents                          |
//! |-------------------|------------|-----------------------------------|
//! | `id:post`         | counter    | last assigned post id             |
//! | `post`            | hash       | id -> encoded post                |
//! | `post:created_at` | sorted set | member id, score creation nanos   |
//! | `link`            | hash       | link -> id                        |

mod kv;

pub use kv::{Clock, KvPostRepository};

/// Counter that hands out post ids.
pub const POST_ID_COUNTER: &str = "id:post";
/// Document map: id -> encoded post.
pub const POST_HASH: &str = "post";
/// Recency index: id scored by creation time in nanoseconds.
pub const RECENCY_INDEX: &str = "post:created_at";
/// Link map: link -> id.
pub const LINK_HASH: &str = "link";
