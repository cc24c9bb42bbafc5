use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a single blog post.
///
/// `Post::default()` is the zero-value post (id 0, empty fields, Unix epoch).
/// Listings use it as a placeholder when a document cannot be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub link: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Build a post from a draft once the store has assigned its id.
    pub fn from_draft(id: i64, draft: NewPost, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            link: draft.link,
            title: draft.title,
            body: draft.body,
            created_at,
        }
    }

    /// Score in the recency index: nanoseconds since the Unix epoch.
    ///
    /// `None` when `created_at` falls outside the range an `i64` of
    /// nanoseconds can represent (roughly years 1677 to 2262).
    pub fn recency_score(&self) -> Option<i64> {
        self.created_at.timestamp_nanos_opt()
    }
}

/// Fields supplied by the author when creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub link: String,
    pub body: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, link: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_is_zero_value() {
        let post = Post::default();
        assert_eq!(post.id, 0);
        assert!(post.link.is_empty());
        assert_eq!(post.created_at.timestamp_nanos_opt(), Some(0));
    }

    #[test]
    fn test_recency_score_keeps_nanoseconds() {
        let created_at = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let post = Post::from_draft(7, NewPost::new("T", "abc", "B"), created_at);
        assert_eq!(post.recency_score(), Some(1_700_000_000_123_456_789));
        assert_eq!(post.link, "abc");
    }
}
