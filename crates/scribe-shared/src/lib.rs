//! # Scribe Shared
//!
//! Wire types shared between the server and anything that talks to it.

pub mod dto;

pub use dto::{CreatePostForm, HealthResponse};
