//! Calls from the session to the two relay routes.
//!
//! [`RelayClient`] is the seam between session state and the network; [`HttpRelayClient`] is
//! the real implementation talking to a running relay server.

use crate::file::{PdfFile, PDF_MIME};
use api_shared::{ChatReq, ChatRes, UploadRes, CHAT_PATH, UPLOAD_FIELD, UPLOAD_PATH};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(reqwest::Error),
    #[error("Request failed with status code {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(serde_json::Error),
}

impl ClientError {
    /// Text shown after the alert prefix: a `message` field of the error body when the
    /// server sent one, otherwise the transport-level description.
    pub fn detail(&self) -> String {
        match self {
            ClientError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn upload(&self, file: PdfFile) -> Result<UploadRes, ClientError>;
    async fn chat(&self, req: &ChatReq) -> Result<ChatRes, ClientError>;
}

/// Relay client over HTTP.
///
/// No timeout is set; a request runs until the server or the transport gives up.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn upload(&self, file: PdfFile) -> Result<UploadRes, ClientError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(PDF_MIME)
            .map_err(ClientError::Transport)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        read_json(response).await
    }

    async fn chat(&self, req: &ChatReq) -> Result<ChatRes, ClientError> {
        let response = self
            .http
            .post(self.url(CHAT_PATH))
            .json(req)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        read_json(response).await
    }
}

// Optional `message` of a rejection body; the relay's own `{ error }` bodies have none.
#[derive(Deserialize)]
struct RejectionBody {
    message: Option<String>,
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(ClientError::Transport)?;
    if !status.is_success() {
        let message = serde_json::from_slice::<RejectionBody>(&bytes)
            .ok()
            .and_then(|body| body.message);
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        });
    }
    serde_json::from_slice(&bytes).map_err(ClientError::Decode)
}
