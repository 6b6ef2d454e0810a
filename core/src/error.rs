//! Error types for the posts API client.
//!
//! # Design
//! 404 and 400 get dedicated variants because views react to them
//! differently from a generic failure. Any other non-2xx response that still
//! carries the JSON envelope lands in `Server`; responses without an envelope
//! keep the raw status and body in `HttpError` for debugging.

/// Errors returned by `PostClient` parse methods and by transports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: no post matches the identifier.
    #[error("{0}")]
    NotFound(String),

    /// The server returned 400: the request body was rejected.
    #[error("{0}")]
    Validation(String),

    /// The server returned another non-2xx status with an envelope body.
    #[error("HTTP {status}: {message}")]
    Server {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    /// A non-2xx status whose body is not an envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// The human-readable message the server put in the envelope, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound(message)
            | ApiError::Validation(message)
            | ApiError::Server { message, .. } => Some(message),
            _ => None,
        }
    }
}
