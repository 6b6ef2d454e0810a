use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A stored blog post as returned by every endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/posts`.
///
/// Every field is optional at the serde level so that a missing field ends up
/// in [`CreatePost::validate`] and produces the 400 envelope, not an extractor
/// rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Create input that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

impl CreatePost {
    pub fn validate(self) -> Result<NewPost, AppError> {
        match (non_empty(self.title), non_empty(self.content), non_empty(self.image_url)) {
            (Some(title), Some(content), Some(image_url)) => Ok(NewPost {
                title,
                content,
                image_url,
            }),
            _ => Err(AppError::Validation(
                "Please provide title, content and imageUrl".to_string(),
            )),
        }
    }
}

/// Body of `PUT /api/posts/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UpdatePost {
    /// Empty strings count as absent.
    pub fn into_patch(self) -> PostPatch {
        PostPatch {
            title: non_empty(self.title),
            content: non_empty(self.content),
            image_url: non_empty(self.image_url),
        }
    }
}

/// Fields to overwrite on an existing post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image_url.is_none()
    }

    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(image_url) = self.image_url {
            post.image_url = image_url;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
