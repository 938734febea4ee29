//! JSON bodies exchanged between the browser-side session and the relay routes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Relay route accepting a multipart PDF upload.
pub const UPLOAD_PATH: &str = "/api/upload";

/// Relay route accepting one chat turn.
pub const CHAT_PATH: &str = "/api/chat";

/// Liveness route.
pub const HEALTH_PATH: &str = "/health";

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "pdf";

/// Successful upload: the identifier issued by the document service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadRes {
    #[serde(rename = "sourceId")]
    pub source_id: String,
    pub message: String,
}

/// One chat turn against a previously uploaded document.
///
/// Missing fields deserialise to empty strings so that the relay can answer them with its own
/// `400` body instead of an extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatReq {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "sourceId", default)]
    pub source_id: String,
}

/// The assistant's reply text, and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatRes {
    pub reply: String,
}

/// Body of every `4xx`/`5xx` relay response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}
