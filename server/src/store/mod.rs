//! Persistence boundary for posts.
//!
//! Handlers only see [`PostStore`] and the tagged [`StoreError`]; which
//! backend sits behind the trait is decided once at startup by [`connect`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{NewPost, Post, PostPatch};

pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;

pub use memory::MemoryStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no post with that identifier")]
    NotFound,

    #[error("malformed post identifier")]
    Invalid,

    #[error("{0}")]
    Other(String),
}

pub type SharedStore = Arc<dyn PostStore>;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    async fn get(&self, id: &str) -> Result<Post, StoreError>;

    /// Assigns the identifier and creation timestamp.
    async fn insert(&self, input: NewPost) -> Result<Post, StoreError>;

    /// Fails with `NotFound` when the post does not exist, even for an empty patch.
    async fn update(&self, id: &str, patch: PostPatch) -> Result<Post, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Open the backend named by the connection string's scheme.
pub async fn connect(uri: &str) -> Result<SharedStore, StoreError> {
    if uri.starts_with("memory:") {
        tracing::info!("using in-memory post store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
        return connect_mongo(uri).await;
    }
    Err(StoreError::Other(format!("unsupported store connection string: {uri}")))
}

#[cfg(feature = "mongo")]
async fn connect_mongo(uri: &str) -> Result<SharedStore, StoreError> {
    let store = MongoStore::connect(uri).await?;
    tracing::info!("connected to MongoDB");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongo"))]
async fn connect_mongo(_uri: &str) -> Result<SharedStore, StoreError> {
    Err(StoreError::Other(
        "MongoDB support is not compiled in; rebuild with --features mongo".to_string(),
    ))
}
