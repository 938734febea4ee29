//! # PDF Chat Session
//!
//! Client-side state of a PDF Chat conversation: the selected document, the transcript, the
//! draft input and the preview pane. The session talks to the relay through [`RelayClient`]
//! and persists the current source identifier through [`KeyValueStore`].
//!
//! Front ends (the `pdfchat` CLI, or any embedder) drive a [`ChatSession`] with user actions
//! and render its accessors; the [`SessionError`] text is the alert to show.

pub mod client;
pub mod error;
pub mod file;
pub mod input;
pub mod location;
pub mod preview;
pub mod session;
pub mod storage;
pub mod transcript;

pub use client::{ClientError, HttpRelayClient, RelayClient};
pub use error::{PreviewError, SessionError, StorageError};
pub use file::PdfFile;
pub use input::{Key, KeyPress};
pub use location::View;
pub use preview::PagePreview;
pub use session::{ChatSession, PendingSend};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SOURCE_ID_KEY};
pub use transcript::{Message, Transcript};
