//! HTTP client for the external document-conversation service.
//!
//! The service owns ingestion, embedding, retrieval and generation. This client only knows the
//! two endpoints the relays need:
//!
//! - `POST {base}/sources/add-file` (multipart) returning `{ "sourceId": … }`
//! - `POST {base}/chats/message` (JSON) returning `{ "content": … }`
//!
//! Both calls carry the pre-shared key in the `x-api-key` header. No timeout and no retry are
//! configured; a call either succeeds once or returns a [`RelayError`].

use crate::constants::{ADD_FILE_PATH, API_KEY_HEADER, CHAT_MESSAGE_PATH};
use crate::{CoreConfig, RelayError, RelayResult};
use pdfchat_types::{Role, SourceId};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A file received from the browser, ready to be forwarded unchanged.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Multipart field name the file arrived under.
    pub field_name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// One message of a conversation turn sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct MessageReq<'a> {
    #[serde(rename = "sourceId")]
    source_id: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct AddFileRes {
    #[serde(rename = "sourceId")]
    source_id: Option<String>,
}

// Other fields the service returns (references, usage) are ignored.
#[derive(Deserialize)]
struct MessageRes {
    content: Option<String>,
}

/// Client bound to one configured service endpoint and key.
#[derive(Clone, Debug)]
pub struct DocumentApiClient {
    http: reqwest::Client,
    cfg: Arc<CoreConfig>,
}

impl DocumentApiClient {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self::with_client(reqwest::Client::new(), cfg)
    }

    /// Reuse an existing `reqwest::Client` (and its connection pool).
    pub fn with_client(http: reqwest::Client, cfg: Arc<CoreConfig>) -> Self {
        Self { http, cfg }
    }

    /// Forward a file to the ingestion endpoint and return the issued identifier.
    ///
    /// The multipart part keeps the field name, file name and content type it arrived with.
    ///
    /// # Errors
    ///
    /// Returns `RelayError` if:
    /// - the content type cannot be used as a MIME type (`Form`),
    /// - the service is unreachable (`Transport`),
    /// - the service answers with a non-success status (`Status`),
    /// - the body is not JSON or lacks `sourceId` (`Decode`, `MissingField`).
    pub async fn add_file(&self, file: UploadFile) -> RelayResult<SourceId> {
        let mut part = Part::bytes(file.bytes);
        if let Some(file_name) = file.file_name {
            part = part.file_name(file_name);
        }
        if let Some(content_type) = file.content_type {
            part = part.mime_str(&content_type).map_err(RelayError::Form)?;
        }
        let form = Form::new().part(file.field_name, part);

        let response = self
            .http
            .post(self.cfg.endpoint(ADD_FILE_PATH))
            .header(API_KEY_HEADER, self.cfg.api_key())
            .multipart(form)
            .send()
            .await
            .map_err(RelayError::Transport)?;

        let body: AddFileRes = decode(response).await?;
        let source_id = body.source_id.ok_or(RelayError::MissingField("sourceId"))?;
        SourceId::new(source_id).map_err(|_| RelayError::MissingField("sourceId"))
    }

    /// Send a conversation turn and return the reply content.
    ///
    /// # Errors
    ///
    /// Same failure classes as [`DocumentApiClient::add_file`], with `content` as the
    /// required response field.
    pub async fn send_message(
        &self,
        source_id: &SourceId,
        messages: &[ChatMessage],
    ) -> RelayResult<String> {
        let request = MessageReq {
            source_id: source_id.as_str(),
            messages,
        };

        let response = self
            .http
            .post(self.cfg.endpoint(CHAT_MESSAGE_PATH))
            .header(API_KEY_HEADER, self.cfg.api_key())
            .json(&request)
            .send()
            .await
            .map_err(RelayError::Transport)?;

        let body: MessageRes = decode(response).await?;
        body.content.ok_or(RelayError::MissingField("content"))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> RelayResult<T> {
    let status = response.status();
    let body = response.text().await.map_err(RelayError::Transport)?;
    if !status.is_success() {
        return Err(RelayError::Status { status, body });
    }
    serde_json::from_str(&body).map_err(RelayError::Decode)
}
