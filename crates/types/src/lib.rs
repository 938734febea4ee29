//! # PDF Chat Types
//!
//! Small validated value types shared by the relay server and the client session.
//!
//! - [`SourceId`]: the opaque handle the document service issues for an uploaded PDF
//! - [`Role`]: who wrote a transcript entry

/// Errors that can occur when creating validated identifiers.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input was empty
    #[error("Text cannot be empty")]
    Empty,
}

/// Identifier issued by the document service for one ingested PDF.
///
/// The format is owned by the service and is never inspected here. The only local rule is
/// that an identifier cannot be empty. The value is kept verbatim, without trimming, so it
/// round-trips to the service unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Wraps a service-issued identifier.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if `value` is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, TextError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> serde::Deserialize<'de> for SourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SourceId::new(s).map_err(serde::de::Error::custom)
    }
}

/// Author of one transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        let role: Role = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn source_id_is_kept_verbatim() {
        let id = SourceId::new(" src_abc ").unwrap();
        assert_eq!(id.as_str(), " src_abc ");
        assert_eq!(SourceId::new("").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn source_id_serde_is_a_plain_string() {
        let id: SourceId = serde_json::from_str("\"src_123\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"src_123\"");
        assert!(serde_json::from_str::<SourceId>("\"\"").is_err());
    }
}
