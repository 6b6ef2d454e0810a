//! Wire DTOs for the posts API.
//!
//! # Design
//! These mirror the server's JSON schema but are defined independently so the
//! client never links against axum. The live-server integration test catches
//! schema drift between the two crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Content split into paragraphs on newlines, blank lines dropped.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.lines().map(str::trim).filter(|line| !line.is_empty())
    }
}

/// Request payload for creating a post. All three fields are required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

/// Request payload for a partial update. Omitted fields are left untouched on
/// the server, and so are fields sent as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<NewPost> for PostPatch {
    fn from(post: NewPost) -> Self {
        PostPatch {
            title: Some(post.title),
            content: Some(post.content),
            image_url: Some(post.image_url),
        }
    }
}

/// The `{success, message, data?, error?}` wrapper around every response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// `data` of a successful delete.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DeletedPost {
    pub id: String,
}
