use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use scribe_core::codec;
use scribe_core::domain::{NewPost, Post};
use scribe_core::ports::{KeyValueStore, PostRepository, WriteCommand};
use scribe_core::RepoError;

use super::{LINK_HASH, POST_HASH, POST_ID_COUNTER, RECENCY_INDEX};

/// Source of creation timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Post repository that keeps the document map, the recency index, and the
/// link map in a single [`KeyValueStore`].
///
/// Creation is two-phase. The id is allocated first and is never handed back,
/// then the three index writes go out as one transaction. If the transaction
/// fails the id stays consumed and no index points at it.
///
/// Links are not checked for uniqueness: a second post with the same link
/// takes over the link map entry, and the first post is only reachable
/// through the recency listing.
#[derive(Clone)]
pub struct KvPostRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Clock,
}

impl KvPostRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the clock used to stamp `created_at`.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    async fn load(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let Some(bytes) = self.store.hash_get(POST_HASH, &id.to_string()).await? else {
            return Ok(None);
        };
        Ok(Some(codec::decode(&bytes)?))
    }
}

fn parse_id(raw: &[u8]) -> Option<i64> {
    std::str::from_utf8(raw).ok()?.trim().parse().ok()
}

#[async_trait]
impl PostRepository for KvPostRepository {
    async fn create(&self, draft: NewPost) -> Result<Post, RepoError> {
        let id = self.store.increment(POST_ID_COUNTER).await?;

        let post = Post::from_draft(id, draft, (self.clock)());
        let score = post.recency_score().ok_or_else(|| {
            RepoError::Storage(format!(
                "creation time {} cannot be indexed",
                post.created_at
            ))
        })?;
        let document = codec::encode(&post)?;
        let member = id.to_string();

        let result = self
            .store
            .transaction(vec![
                WriteCommand::hash_set(POST_HASH, member.clone(), document),
                WriteCommand::sorted_set_add(RECENCY_INDEX, score, member.clone()),
                WriteCommand::hash_set(LINK_HASH, post.link.clone(), member.into_bytes()),
            ])
            .await;

        if let Err(e) = result {
            tracing::error!(id, link = %post.link, error = %e, "Post index write failed, id left unused");
            return Err(e.into());
        }

        tracing::info!(id, link = %post.link, "Post created");
        Ok(post)
    }

    async fn find_by_link(&self, link: &str) -> Result<Post, RepoError> {
        let raw = self
            .store
            .hash_get(LINK_HASH, link)
            .await?
            .ok_or_else(|| RepoError::NotFound(link.to_string()))?;

        let id = parse_id(&raw)
            .ok_or_else(|| RepoError::Storage(format!("link {link} maps to a malformed id")))?;

        self.load(id).await?.ok_or_else(|| {
            RepoError::Storage(format!("link {link} maps to post {id} which has no document"))
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        self.load(id).await
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let ids = self.store.sorted_set_range_desc(RECENCY_INDEX, 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let documents = self.store.hash_get_many(POST_HASH, &ids).await?;

        let posts = ids
            .iter()
            .zip(documents)
            .map(|(id, document)| match document {
                Some(bytes) => codec::decode(&bytes).unwrap_or_else(|e| {
                    tracing::warn!(id = %id, error = %e, "Corrupt post document, listing placeholder");
                    Post::default()
                }),
                None => {
                    tracing::warn!(id = %id, "Indexed post has no document, listing placeholder");
                    Post::default()
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }
}
