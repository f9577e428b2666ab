use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("API Key not found. Please select a key.")]
    CredentialMissing,

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Request error: {0}")]
    RequestError(String),

    #[error("No content received from generation model{0}")]
    MalformedResponse(String),

    #[error("No image data found in response{}", text_suffix(.0))]
    NoImageInResponse(Option<String>),

    #[error("API key selection failed: {0}")]
    SelectionFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn text_suffix(text: &Option<String>) -> String {
    text.as_deref()
        .map(|t| format!(": {}", t))
        .unwrap_or_default()
}

impl StudioError {
    /// Shorthand for the shared access classifier in [`crate::auth`].
    pub fn is_access_error(&self) -> bool {
        crate::auth::classify(self).is_access()
    }
}

impl From<reqwest::Error> for StudioError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        match err.status() {
            Some(status) => StudioError::ApiError {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => StudioError::RequestError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
