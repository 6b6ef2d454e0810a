//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`, so
//! the I/O boundary stays explicit and the parsing is testable on canned
//! responses.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DeletedPost, Envelope, NewPost, Post, PostPatch};

/// Synchronous, stateless client for the posts API.
///
/// `base_url` is the API root including its `/api` prefix, for example
/// `http://localhost:5000/api`.
#[derive(Debug, Clone)]
pub struct PostClient {
    base_url: String,
}

impl PostClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/posts/{}", self.base_url, urlencoding::encode(id))
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        bare(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_post(&self, id: &str) -> HttpRequest {
        bare(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_post(&self, input: &NewPost) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_post(&self, id: &str, input: &PostPatch) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, self.item_url(id), input)
    }

    pub fn build_delete_post(&self, id: &str) -> HttpRequest {
        bare(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        parse_data(response, 200)
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_data(response, 200)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_data(response, 201)
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_data(response, 200)
    }

    /// Returns the identifier the server confirmed as removed.
    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<String, ApiError> {
        parse_data::<DeletedPost>(response, 200).map(|deleted| deleted.id)
    }
}

fn bare(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: Serialize>(method: HttpMethod, url: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_data<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    let envelope: Envelope<T> =
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    envelope
        .data
        .ok_or_else(|| ApiError::Deserialization("envelope has no data".to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let envelope = serde_json::from_str::<Envelope<serde_json::Value>>(&response.body).ok();
    Err(match (response.status, envelope) {
        (404, Some(envelope)) => ApiError::NotFound(envelope.message),
        (404, None) => ApiError::NotFound("resource not found".to_string()),
        (400, Some(envelope)) => ApiError::Validation(envelope.message),
        (status, Some(envelope)) => ApiError::Server {
            status,
            message: envelope.message,
            detail: envelope.error,
        },
        (status, None) => ApiError::HttpError {
            status,
            body: response.body.clone(),
        },
    })
}
