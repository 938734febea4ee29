#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no file was uploaded")]
    MissingFile,
    #[error("message and sourceId are required")]
    MissingParameters,
    #[error("failed to build multipart form: {0}")]
    Form(reqwest::Error),
    #[error("request to document service failed: {0}")]
    Transport(reqwest::Error),
    #[error("document service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode document service response: {0}")]
    Decode(serde_json::Error),
    #[error("document service response is missing `{0}`")]
    MissingField(&'static str),
}

impl RelayError {
    /// True when the caller supplied an incomplete request, as opposed to a downstream failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RelayError::MissingFile | RelayError::MissingParameters)
    }
}

pub type RelayResult<T> = std::result::Result<T, RelayError>;
