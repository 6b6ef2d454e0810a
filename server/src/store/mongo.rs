use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document},
    options::ReturnDocument,
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use super::{PostStore, StoreError};
use crate::model::{NewPost, Post, PostPatch};

const DEFAULT_DATABASE: &str = "blog";
const COLLECTION: &str = "posts";

/// On-disk shape of a post inside the `posts` collection.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    content: String,
    image_url: String,
    created_at: BsonDateTime,
}

impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Post {
            id: doc.id.to_hex(),
            title: doc.title,
            content: doc.content,
            image_url: doc.image_url,
            created_at: DateTime::from_timestamp_millis(doc.created_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

pub struct MongoStore {
    posts: Collection<PostDocument>,
}

impl MongoStore {
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await.map_err(other)?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        Ok(Self {
            posts: database.collection(COLLECTION),
        })
    }
}

fn other(err: mongodb::error::Error) -> StoreError {
    StoreError::Other(err.to_string())
}

fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::Invalid)
}

fn set_document(patch: PostPatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = patch.title {
        set.insert("title", title);
    }
    if let Some(content) = patch.content {
        set.insert("content", content);
    }
    if let Some(image_url) = patch.image_url {
        set.insert("imageUrl", image_url);
    }
    set
}

#[async_trait]
impl PostStore for MongoStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let cursor = self
            .posts
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(other)?;
        let docs: Vec<PostDocument> = cursor.try_collect().await.map_err(other)?;
        Ok(docs.into_iter().map(Post::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Post, StoreError> {
        let oid = parse_id(id)?;
        self.posts
            .find_one(doc! { "_id": oid })
            .await
            .map_err(other)?
            .map(Post::from)
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, input: NewPost) -> Result<Post, StoreError> {
        let created_at = Utc::now().trunc_subsecs(3);
        let document = PostDocument {
            id: ObjectId::new(),
            title: input.title,
            content: input.content,
            image_url: input.image_url,
            created_at: BsonDateTime::from_millis(created_at.timestamp_millis()),
        };
        self.posts.insert_one(&document).await.map_err(other)?;
        Ok(document.into())
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<Post, StoreError> {
        let oid = parse_id(id)?;
        let existing = self
            .posts
            .find_one(doc! { "_id": oid })
            .await
            .map_err(other)?
            .ok_or(StoreError::NotFound)?;
        if patch.is_empty() {
            return Ok(existing.into());
        }
        self.posts
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set_document(patch) })
            .return_document(ReturnDocument::After)
            .await
            .map_err(other)?
            .map(Post::from)
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let oid = parse_id(id)?;
        let result = self
            .posts
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(other)?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_becomes_set_document_with_wire_names() {
        let set = set_document(PostPatch {
            title: Some("T".to_string()),
            image_url: Some("u".to_string()),
            ..PostPatch::default()
        });
        assert_eq!(set, doc! { "title": "T", "imageUrl": "u" });
    }

    #[test]
    fn document_converts_to_post() {
        let oid = ObjectId::new();
        let post = Post::from(PostDocument {
            id: oid,
            title: "Hello".to_string(),
            content: "World".to_string(),
            image_url: "http://x/img.png".to_string(),
            created_at: BsonDateTime::from_millis(1_710_324_000_123),
        });
        assert_eq!(post.id, oid.to_hex());
        assert_eq!(post.created_at.timestamp_millis(), 1_710_324_000_123);
    }
}
