//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read process-wide environment variables;
//! the binaries do that once and hand the result over.

use crate::constants::DEFAULT_BASE_URL;
use crate::{RelayError, RelayResult};

/// Core configuration resolved at startup.
#[derive(Clone)]
pub struct CoreConfig {
    api_key: String,
    base_url: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// Trailing slashes are removed from `base_url` so endpoint paths can be appended directly.
    pub fn new(api_key: String, base_url: String) -> RelayResult<Self> {
        if api_key.trim().is_empty() {
            return Err(RelayError::InvalidInput("api_key cannot be empty".into()));
        }

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(RelayError::InvalidInput("base_url cannot be empty".into()));
        }

        Ok(Self { api_key, base_url })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a document-service endpoint.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Resolve the document-service base URL from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_BASE_URL`].
pub fn base_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Validate the API key read from the environment.
///
/// # Errors
/// Returns `RelayError::InvalidInput` if the key is absent or blank.
pub fn api_key_from_env_value(value: Option<String>) -> RelayResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RelayError::InvalidInput("CHATPDF_API_KEY is not set".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let cfg = CoreConfig::new("key".into(), "http://localhost:9000/v1/".into()).unwrap();
        assert_eq!(cfg.base_url(), "http://localhost:9000/v1");
        assert_eq!(
            cfg.endpoint("/chats/message"),
            "http://localhost:9000/v1/chats/message"
        );
    }

    #[test]
    fn empty_key_or_url_is_rejected() {
        assert!(CoreConfig::new("  ".into(), "http://x".into()).is_err());
        assert!(CoreConfig::new("key".into(), "/".into()).is_err());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let cfg = CoreConfig::new("sec_abc".into(), "http://x".into()).unwrap();
        let debug = format!("{:?}", cfg);
        assert!(!debug.contains("sec_abc"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn env_values_fall_back_to_defaults() {
        assert_eq!(base_url_from_env_value(None), DEFAULT_BASE_URL);
        assert_eq!(base_url_from_env_value(Some("   ".into())), DEFAULT_BASE_URL);
        assert_eq!(
            base_url_from_env_value(Some(" http://local ".into())),
            "http://local"
        );
        assert!(api_key_from_env_value(None).is_err());
        assert_eq!(api_key_from_env_value(Some("k".into())).unwrap(), "k");
    }
}
