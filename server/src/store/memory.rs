use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{SubsecRound, Utc};
use tokio::sync::RwLock;

use super::{PostStore, StoreError};
use crate::model::{NewPost, Post, PostPatch};

/// Process-local store keyed by object id. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<HashMap<ObjectId, Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::Invalid)
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;
        let mut entries: Vec<(&ObjectId, &Post)> = posts.iter().collect();
        // Object ids grow monotonically within a process, so they order posts
        // created in the same millisecond.
        entries.sort_by(|(a_id, a), (b_id, b)| {
            b.created_at.cmp(&a.created_at).then_with(|| b_id.cmp(a_id))
        });
        Ok(entries.into_iter().map(|(_, post)| post.clone()).collect())
    }

    async fn get(&self, id: &str) -> Result<Post, StoreError> {
        let oid = parse_id(id)?;
        let posts = self.posts.read().await;
        posts.get(&oid).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert(&self, input: NewPost) -> Result<Post, StoreError> {
        let oid = ObjectId::new();
        let post = Post {
            id: oid.to_hex(),
            title: input.title,
            content: input.content,
            image_url: input.image_url,
            created_at: Utc::now().trunc_subsecs(3),
        };
        self.posts.write().await.insert(oid, post.clone());
        Ok(post)
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<Post, StoreError> {
        let oid = parse_id(id)?;
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&oid).ok_or(StoreError::NotFound)?;
        patch.apply(post);
        Ok(post.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let oid = parse_id(id)?;
        let mut posts = self.posts.write().await;
        posts.remove(&oid).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "Body".to_string(),
            image_url: "http://x/img.png".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_hex_object_id() {
        let store = MemoryStore::new();
        let post = store.insert(new_post("Hello")).await.unwrap();
        assert_eq!(post.id.len(), 24);
        assert!(ObjectId::parse_str(&post.id).is_ok());
        assert_eq!(store.get(&post.id).await.unwrap(), post);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        let first = store.insert(new_post("first")).await.unwrap();
        let second = store.insert(new_post("second")).await.unwrap();
        let third = store.insert(new_post("third")).await.unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn malformed_id_is_invalid() {
        let store = MemoryStore::new();
        assert_eq!(store.get("not-an-id").await, Err(StoreError::Invalid));
        assert_eq!(store.delete("xyz").await, Err(StoreError::Invalid));
    }

    #[tokio::test]
    async fn well_formed_missing_id_is_not_found() {
        let store = MemoryStore::new();
        let id = "000000000000000000000000";
        assert_eq!(store.get(id).await, Err(StoreError::NotFound));
        assert_eq!(
            store.update(id, PostPatch::default()).await,
            Err(StoreError::NotFound)
        );
        assert_eq!(store.delete(id).await, Err(StoreError::NotFound));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_applies_patch_and_keeps_created_at() {
        let store = MemoryStore::new();
        let post = store.insert(new_post("Hello")).await.unwrap();
        let patch = PostPatch {
            title: Some("Renamed".to_string()),
            ..PostPatch::default()
        };
        let updated = store.update(&post.id, patch).await.unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn delete_removes_permanently() {
        let store = MemoryStore::new();
        let post = store.insert(new_post("Hello")).await.unwrap();
        store.delete(&post.id).await.unwrap();
        assert_eq!(store.get(&post.id).await, Err(StoreError::NotFound));
        assert_eq!(store.delete(&post.id).await, Err(StoreError::NotFound));
    }
}
