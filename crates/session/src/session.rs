//! The conversation state behind the upload and chat views.
//!
//! [`ChatSession`] holds three independent groups of state, each updated directly by one
//! trigger:
//!
//! - the document: current [`SourceId`], mirrored to storage and the address (upload)
//! - the transcript plus the draft input (send)
//! - UI-only state: sidebar collapse and the preview page counter (toggles, page turns)
//!
//! There is no concurrency control. [`ChatSession::send`] serialises one turn, while
//! [`ChatSession::prepare_send`] / [`ChatSession::complete_send`] let a front end keep several
//! turns in flight; replies are then appended in whatever order they are completed.

use crate::client::{ClientError, RelayClient};
use crate::error::SessionError;
use crate::file::PdfFile;
use crate::input::KeyPress;
use crate::location::View;
use crate::preview::PagePreview;
use crate::storage::{KeyValueStore, SOURCE_ID_KEY};
use crate::transcript::Transcript;
use api_shared::{ChatReq, ChatRes};
use pdfchat_types::{Role, SourceId};

/// A user message already shown in the transcript and waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    message: String,
    source_id: SourceId,
}

impl PendingSend {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    /// Body for the chat relay.
    pub fn request(&self) -> ChatReq {
        ChatReq {
            message: self.message.clone(),
            source_id: self.source_id.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ChatSession<C, S> {
    client: C,
    store: S,
    view: View,
    source_id: Option<SourceId>,
    transcript: Transcript,
    input: String,
    uploading: bool,
    sidebar_collapsed: bool,
    preview: Option<PagePreview>,
}

impl<C: RelayClient, S: KeyValueStore> ChatSession<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self {
            client,
            store,
            view: View::Home,
            source_id: None,
            transcript: Transcript::new(),
            input: String::new(),
            uploading: false,
            sidebar_collapsed: false,
            preview: None,
        }
    }

    /// Open the session at an address, picking up `sourceId` from the chat view's query.
    ///
    /// Storage is not consulted and no transcript is restored.
    pub fn open(&mut self, location: &str) {
        self.view = View::parse(location);
        if let Some(source_id) = self.view.source_id() {
            tracing::info!(source_id = %source_id, "resuming conversation from address");
            self.source_id = Some(source_id.clone());
        }
    }

    /// Upload a picked file and switch to the chat view for it.
    ///
    /// On success the identifier is kept in memory, written to storage under
    /// [`SOURCE_ID_KEY`] and placed in the address; the transcript starts empty. The preview
    /// is sized from the file's page count when the bytes can be parsed.
    ///
    /// # Errors
    /// - `SessionError::NotPdf` if the file fails the picker filter (nothing is sent)
    /// - `SessionError::UploadFailed` if the relay call fails
    pub async fn upload(&mut self, file: PdfFile) -> Result<SourceId, SessionError> {
        if !file.is_pdf() {
            tracing::warn!(file_name = %file.name, "rejected non-PDF file");
            return Err(SessionError::NotPdf);
        }

        let preview = match PagePreview::from_pdf_bytes(&file.bytes) {
            Ok(preview) => Some(preview),
            Err(e) => {
                tracing::warn!("Could not read page count: {}", e);
                None
            }
        };

        self.uploading = true;
        let result = self.client.upload(file).await;
        self.uploading = false;

        let uploaded = result.map_err(|e| {
            tracing::error!("Upload error: {:?}", e);
            SessionError::UploadFailed(e)
        })?;
        let source_id = SourceId::new(uploaded.source_id).map_err(|_| {
            tracing::error!("Upload response carried an empty sourceId");
            SessionError::UploadFailed(ClientError::Rejected {
                status: 200,
                message: None,
            })
        })?;

        if let Err(e) = self.store.set(SOURCE_ID_KEY, source_id.as_str()) {
            tracing::warn!("Failed to persist source id: {}", e);
        }
        self.source_id = Some(source_id.clone());
        self.transcript.clear();
        self.preview = preview;
        self.view = View::Chat {
            source_id: Some(source_id.clone()),
        };
        Ok(source_id)
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// React to a key in the input box. Returns `Ok(true)` when the key triggered a send.
    ///
    /// # Errors
    /// Whatever [`ChatSession::send`] returns when the key submits.
    pub async fn handle_key(&mut self, key: KeyPress) -> Result<bool, SessionError> {
        if !key.submits() {
            return Ok(false);
        }
        self.send().await.map(|()| true)
    }

    /// Send the current input as one serialised turn.
    ///
    /// # Errors
    /// See [`ChatSession::prepare_send`] and [`ChatSession::complete_send`].
    pub async fn send(&mut self) -> Result<(), SessionError> {
        let pending = self.prepare_send()?;
        let outcome = self.client.chat(&pending.request()).await;
        self.complete_send(pending, outcome)
    }

    /// Validate the input and append it to the transcript straight away.
    ///
    /// # Errors
    /// - `SessionError::EmptyMessage` if the input is blank (the input is cleared)
    /// - `SessionError::NoSource` if no document is selected (the input is cleared)
    pub fn prepare_send(&mut self) -> Result<PendingSend, SessionError> {
        if self.input.trim().is_empty() {
            self.input.clear();
            return Err(SessionError::EmptyMessage);
        }
        let Some(source_id) = self.source_id.clone() else {
            self.input.clear();
            return Err(SessionError::NoSource);
        };

        let message = self.input.clone();
        self.transcript.push(Role::User, message.clone());
        Ok(PendingSend { message, source_id })
    }

    /// Record the relay's answer to a pending send.
    ///
    /// On success the reply is appended and the input cleared. On failure the user message
    /// stays in the transcript and the input is kept for another try.
    ///
    /// # Errors
    /// `SessionError::ChatFailed` carrying the alert detail.
    pub fn complete_send(
        &mut self,
        pending: PendingSend,
        outcome: Result<ChatRes, ClientError>,
    ) -> Result<(), SessionError> {
        match outcome {
            Ok(res) => {
                self.transcript.push(Role::Assistant, res.reply);
                self.input.clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!(source_id = %pending.source_id, "Chat error: {:?}", e);
                Err(SessionError::ChatFailed {
                    detail: e.detail(),
                    source: e,
                })
            }
        }
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }

    /// Report the page count of the previewed document, e.g. once a viewer has loaded it.
    pub fn set_page_count(&mut self, page_count: u32) {
        match self.preview.as_mut() {
            Some(preview) => preview.set_page_count(page_count),
            None => self.preview = Some(PagePreview::new(page_count)),
        }
    }

    /// Turn to the next page; `None` while no preview is loaded.
    pub fn next_page(&mut self) -> Option<u32> {
        self.preview.as_mut().map(PagePreview::next)
    }

    /// Turn to the previous page; `None` while no preview is loaded.
    pub fn previous_page(&mut self) -> Option<u32> {
        self.preview.as_mut().map(PagePreview::previous)
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Current address, e.g. `/chat?sourceId=src_1`.
    pub fn location(&self) -> String {
        self.view.to_location()
    }

    pub fn source_id(&self) -> Option<&SourceId> {
        self.source_id.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn preview(&self) -> Option<&PagePreview> {
        self.preview.as_ref()
    }
}
