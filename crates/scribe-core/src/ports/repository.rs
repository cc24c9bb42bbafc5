use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Post repository - the document map plus its recency and link indexes.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Allocate an id, stamp the creation time, and write the document and
    /// both indexes in one transaction.
    async fn create(&self, draft: NewPost) -> Result<Post, RepoError>;

    /// Resolve a link to its post. An unknown link is [`RepoError::NotFound`].
    async fn find_by_link(&self, link: &str) -> Result<Post, RepoError>;

    /// Fetch a post by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Every post, most recent first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;
}
