//! Post Service: a JSON REST API over a single blog post resource.
//!
//! # Design
//! Handlers never talk to a database directly. They go through the
//! [`store::PostStore`] trait, whose tagged errors map one-to-one onto the
//! 400/404/500 envelopes in [`error::AppError`].

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod store;

pub use config::Config;
pub use model::Post;
pub use store::{MemoryStore, PostStore, SharedStore, StoreError};

/// Routes and middleware over the given store.
///
/// Paths match with or without a trailing slash.
pub fn router(store: SharedStore) -> Router {
    let collection = get(handlers::list_posts).post(handlers::create_post);
    let item = get(handlers::get_post)
        .put(handlers::update_post)
        .delete(handlers::delete_post);
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/posts", collection.clone())
        .route("/api/posts/", collection)
        .route("/api/posts/{id}", item.clone())
        .route("/api/posts/{id}/", item)
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Router over a fresh in-memory store.
pub fn app() -> Router {
    router(Arc::new(MemoryStore::new()))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
    tracing::info!("shutting down");
}
