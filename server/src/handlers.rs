use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::envelope::{Deleted, Envelope};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::model::{CreatePost, Post, UpdatePost};
use crate::store::SharedStore;

type Reply<T> = Result<(StatusCode, Json<Envelope<T>>), AppError>;

fn reply<T>(status: StatusCode, message: &str, data: T) -> Reply<T> {
    Ok((status, Json(Envelope::ok(message, data))))
}

pub async fn root() -> &'static str {
    "Blog API is running"
}

/// Any path or method no route claims.
pub async fn not_found() -> (StatusCode, Json<Envelope<()>>) {
    (StatusCode::NOT_FOUND, Json(Envelope::failure("Route not found", None)))
}

pub async fn list_posts(State(store): State<SharedStore>) -> Reply<Vec<Post>> {
    let posts = store.list().await?;
    reply(StatusCode::OK, "Posts retrieved successfully", posts)
}

pub async fn get_post(State(store): State<SharedStore>, Path(id): Path<String>) -> Reply<Post> {
    let post = store.get(&id).await?;
    reply(StatusCode::OK, "Post retrieved successfully", post)
}

pub async fn create_post(
    State(store): State<SharedStore>,
    JsonBody(input): JsonBody<CreatePost>,
) -> Reply<Post> {
    let new_post = input.validate()?;
    let post = store.insert(new_post).await?;
    info!(id = %post.id, "post created");
    reply(StatusCode::CREATED, "Post created successfully", post)
}

pub async fn update_post(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdatePost>,
) -> Reply<Post> {
    let post = store.update(&id, input.into_patch()).await?;
    info!(id = %post.id, "post updated");
    reply(StatusCode::OK, "Post updated successfully", post)
}

pub async fn delete_post(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Reply<Deleted> {
    store.delete(&id).await?;
    info!(id = %id, "post removed");
    reply(StatusCode::OK, "Post removed successfully", Deleted { id })
}
