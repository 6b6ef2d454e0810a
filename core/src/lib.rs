//! Client core for the blog posts API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and mirrors server results in
//! a reducer-driven [`PostsState`] that views render from.
//!
//! # Design
//! - `PostClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit. A host [`Transport`] executes the request.
//! - [`PostsStore`] is an explicit, injectable container: one state value,
//!   one pure [`reduce`] function, no globals.
//! - DTOs are defined independently from the server crate; the live-server
//!   integration test catches schema drift.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod state;
pub mod store;
pub mod types;

pub use client::PostClient;
pub use error::ApiError;
pub use form::{FormErrors, PostForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use state::{reduce, Action, Operation, OperationStatus, Outcome, Phase, PostsState};
pub use store::PostsStore;
pub use types::{DeletedPost, Envelope, NewPost, Post, PostPatch};
