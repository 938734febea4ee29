//! Errors surfaced to the user.
//!
//! The `Display` text of [`SessionError`] is exactly what the front end shows in its blocking
//! alert, so front ends can print it as-is.

use crate::client::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("请输入消息内容")]
    EmptyMessage,
    #[error("请先上传或选择PDF文件")]
    NoSource,
    #[error("仅支持上传 PDF 文件")]
    NotPdf,
    #[error("上传失败")]
    UploadFailed(#[source] ClientError),
    #[error("聊天失败：{detail}")]
    ChatFailed {
        detail: String,
        #[source]
        source: ClientError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access state file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to (de)serialise state file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("failed to parse PDF: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("PDF has no pages")]
    NoPages,
}
