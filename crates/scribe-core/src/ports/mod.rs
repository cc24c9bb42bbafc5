//! Ports - trait definitions for external dependencies.
//! Infrastructure crates provide the implementations.

mod repository;
mod store;

pub use repository::PostRepository;
pub use store::{KeyValueStore, WriteCommand};
