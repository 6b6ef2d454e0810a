use serde::Serialize;

/// Response body shared by every `/api/posts` endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn failure(message: &str, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            error,
        }
    }
}

/// Payload of a successful delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}
