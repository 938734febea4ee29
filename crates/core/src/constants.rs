//! Constants used throughout the PDF Chat core crate.
//!
//! Endpoint paths of the document service and the fixed, user-facing relay messages live here
//! so the server and its tests agree on them.

/// Base URL of the document-conversation service when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.chatpdf.com/v1";

/// File-ingestion endpoint, relative to the base URL.
pub const ADD_FILE_PATH: &str = "/sources/add-file";

/// Message endpoint, relative to the base URL.
pub const CHAT_MESSAGE_PATH: &str = "/chats/message";

/// Header carrying the pre-shared service credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Returned alongside a freshly issued source identifier.
pub const MSG_UPLOAD_OK: &str = "PDF上传成功";

/// Upload request without a `pdf` field.
pub const MSG_NO_FILE: &str = "未上传文件";

/// Any downstream failure during upload.
pub const MSG_UPLOAD_FAILED: &str = "PDF上传失败";

/// Chat request without a message or source identifier.
pub const MSG_MISSING_PARAMS: &str = "缺少必要参数";

/// Any downstream failure during chat.
pub const MSG_CHAT_FAILED: &str = "聊天失败";
