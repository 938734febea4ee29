//! Upload and chat relays.
//!
//! Each relay is a single pass-through call: check that the caller supplied what is required,
//! forward once to the document service, hand back the one field the browser needs. No retry,
//! no queueing, no state between calls.

use crate::document_api::{ChatMessage, DocumentApiClient, UploadFile};
use crate::{CoreConfig, RelayError, RelayResult};
use pdfchat_types::SourceId;
use std::sync::Arc;

/// Both relays, sharing one configured document-service client.
#[derive(Clone, Debug)]
pub struct RelayService {
    api: DocumentApiClient,
}

impl RelayService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self::with_api(DocumentApiClient::new(cfg))
    }

    pub fn with_api(api: DocumentApiClient) -> Self {
        Self { api }
    }

    /// Forward an uploaded file and return the identifier the service issued for it.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::MissingFile` when `file` is `None`, otherwise any downstream
    /// failure from [`DocumentApiClient::add_file`].
    pub async fn upload(&self, file: Option<UploadFile>) -> RelayResult<SourceId> {
        let file = file.ok_or(RelayError::MissingFile)?;
        tracing::info!(
            file_name = file.file_name.as_deref().unwrap_or("<unnamed>"),
            size_bytes = file.bytes.len(),
            "relaying upload"
        );

        let source_id = self.api.add_file(file).await?;
        tracing::info!(source_id = %source_id, "upload accepted");
        Ok(source_id)
    }

    /// Forward `message` as a single user turn about `source_id` and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::MissingParameters` when either argument is empty, otherwise any
    /// downstream failure from [`DocumentApiClient::send_message`].
    pub async fn chat(&self, message: &str, source_id: &str) -> RelayResult<String> {
        if message.is_empty() || source_id.is_empty() {
            return Err(RelayError::MissingParameters);
        }
        let source_id = SourceId::new(source_id).map_err(|_| RelayError::MissingParameters)?;
        tracing::info!(source_id = %source_id, "relaying chat message");

        self.api
            .send_message(&source_id, &[ChatMessage::user(message)])
            .await
    }
}
