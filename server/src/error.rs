use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::envelope::Envelope;
use crate::store::StoreError;

/// Errors a handler can answer with. Each variant maps to one status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required create field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Invalid request body; carries the extractor's explanation.
    #[error("Invalid request body: {0}")]
    BadBody(String),

    /// The identifier is malformed or matches no post.
    #[error("Post not found")]
    NotFound,

    /// Anything else the store reported.
    #[error("Server error: {0}")]
    Server(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound | StoreError::Invalid => AppError::NotFound,
            StoreError::Other(msg) => AppError::Server(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(msg) => Envelope::failure(&msg, None),
            AppError::BadBody(detail) => Envelope::failure("Invalid request body", Some(detail)),
            AppError::NotFound => Envelope::failure("Post not found", None),
            AppError::Server(detail) => {
                tracing::error!(error = %detail, "store operation failed");
                Envelope::failure("Server error", Some(detail))
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_and_missing_ids_collapse_to_not_found() {
        assert!(matches!(AppError::from(StoreError::NotFound), AppError::NotFound));
        assert!(matches!(AppError::from(StoreError::Invalid), AppError::NotFound));
        assert_eq!(AppError::from(StoreError::Invalid).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_store_errors_keep_their_message() {
        let err = AppError::from(StoreError::Other("connection reset".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, AppError::Server(ref msg) if msg == "connection reset"));
    }

    #[test]
    fn validation_is_bad_request() {
        assert_eq!(
            AppError::Validation("missing".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
