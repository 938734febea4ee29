//! # API Shared
//!
//! Shared definitions for the PDF Chat relay API.
//!
//! Contains:
//! - Request/response bodies of the relay routes (`wire` module)
//! - Route paths and the multipart field name
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` on the server side and by `pdfchat-session` on the client side, so
//! both ends agree on the JSON shapes.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
