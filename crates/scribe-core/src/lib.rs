//! # Scribe Core
//!
//! The domain layer of the Scribe blog.
//! This crate contains the post model, the record codec, and the ports that
//! storage adapters implement. It has no infrastructure dependencies.

pub mod codec;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::{CodecError, RepoError, StoreError};
