//! Create/edit form input and its client-side validation.

use crate::types::{NewPost, Post};

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

/// Per-field messages; a `None` field passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.summary())]
pub struct FormErrors {
    pub title: Option<&'static str>,
    pub content: Option<&'static str>,
    pub image_url: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image_url.is_none()
    }

    pub fn messages(&self) -> impl Iterator<Item = &'static str> {
        [self.title, self.content, self.image_url].into_iter().flatten()
    }

    fn summary(&self) -> String {
        self.messages().collect::<Vec<_>>().join("; ")
    }
}

impl PostForm {
    /// Seed an edit form from the current post.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
        }
    }

    /// Every field is required; whitespace alone does not count.
    pub fn validate(&self) -> Result<NewPost, FormErrors> {
        let errors = FormErrors {
            title: self.title.trim().is_empty().then_some("Title is required"),
            content: self.content.trim().is_empty().then_some("Content is required"),
            image_url: self.image_url.trim().is_empty().then_some("Image URL is required"),
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewPost {
            title: self.title.clone(),
            content: self.content.clone(),
            image_url: self.image_url.clone(),
        })
    }
}
