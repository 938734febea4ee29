//! # PDF Chat Core
//!
//! Relay logic for the PDF Chat server.
//!
//! This crate contains the part of the system that talks to the external document service:
//! - Startup configuration (`CoreConfig`)
//! - The document-service HTTP client (`DocumentApiClient`)
//! - The upload and chat relays (`RelayService`)
//!
//! **No API concerns**: routing, status codes and JSON response bodies belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod document_api;
pub mod error;
pub mod relay;

pub use config::CoreConfig;
pub use document_api::{ChatMessage, DocumentApiClient, UploadFile};
pub use error::{RelayError, RelayResult};
pub use relay::RelayService;
