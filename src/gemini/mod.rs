pub mod extract;
pub mod image_client;
pub mod transport;

use crate::{config::StudioConfig, error::Result};
use std::sync::Arc;

pub use extract::extract_image;
pub use image_client::ImageClient;
pub use transport::{GenerationTransport, HttpTransport};

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: &StudioConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Ok(Self::with_transport(transport, config))
    }

    pub fn with_transport(transport: Arc<dyn GenerationTransport>, config: &StudioConfig) -> Self {
        Self {
            image_client: ImageClient::new(transport, config),
        }
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
