//! Record codec - turns a [`Post`] into the bytes stored in the document map.
//!
//! The payload is JSON, so it carries its own field names and can be decoded
//! without an external schema. Timestamps are written as RFC 3339 with full
//! nanosecond precision.

use crate::domain::Post;
use crate::error::CodecError;

/// Encode a post into a self-describing byte payload.
pub fn encode(post: &Post) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(post).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode bytes produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<Post, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPost;
    use chrono::{TimeZone, Utc};

    fn sample() -> Post {
        let created_at = Utc.timestamp_opt(1_712_345_678, 987_654_321).unwrap();
        Post::from_draft(
            42,
            NewPost::new("Hello <world>", "hello-world", "line one\nline \"two\""),
            created_at,
        )
    }

    #[test]
    fn test_round_trip_keeps_every_field() {
        let post = sample();
        let decoded = decode(&encode(&post).unwrap()).unwrap();
        assert_eq!(decoded, post);
        assert_eq!(decoded.created_at.timestamp_subsec_nanos(), 987_654_321);
    }

    #[test]
    fn test_round_trip_zero_value() {
        let post = Post::default();
        assert_eq!(decode(&encode(&post).unwrap()).unwrap(), post);
    }

    #[test]
    fn test_truncated_input_fails() {
        let bytes = encode(&sample()).unwrap();
        let err = decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn test_garbage_input_fails() {
        assert!(matches!(decode(b"\x00\xffnot a post"), Err(CodecError::Decode(_))));
        assert!(matches!(decode(b""), Err(CodecError::Decode(_))));
    }
}
