use crate::error::{Result, StudioError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// The uploaded garment photo. Passed through to the API untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Reads a file and guesses its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        log::debug!(
            "Loaded {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );
        Ok(Self { bytes, mime_type })
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

/// A generated studio image, always carried as a PNG data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub data_uri: String,
    /// Model that produced the image.
    pub model: String,
}

impl ImageResult {
    pub fn from_base64(data: &str, model: impl Into<String>) -> Self {
        Self {
            data_uri: format!("{}{}", PNG_DATA_URI_PREFIX, data),
            model: model.into(),
        }
    }

    pub fn base64_data(&self) -> &str {
        self.data_uri
            .strip_prefix(PNG_DATA_URI_PREFIX)
            .unwrap_or(&self.data_uri)
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(self.base64_data())
            .map_err(|e| StudioError::SerializationError(format!("invalid image data: {}", e)))
    }

    pub fn download_filename(&self) -> String {
        format!("modera-studio-{}.png", chrono::Utc::now().timestamp_millis())
    }

    /// Decodes the image and writes it into `dir` under a timestamped name.
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let bytes = self.decode()?;
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(self.download_filename());
        tokio::fs::write(&path, bytes).await?;
        log::info!("Saved generated image to {}", path.display());
        Ok(path)
    }
}
