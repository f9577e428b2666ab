use super::gemini::{Content, GenerateContentRequest, GenerationConfig, ImageConfig, Part};
use super::image::ImagePayload;

/// Request shape per model tier. Only the high quality tier may carry a
/// resolution directive; the standard tier rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityTier {
    HighQuality { image_size: String },
    Standard,
}

impl QualityTier {
    pub fn image_size(&self) -> Option<&str> {
        match self {
            QualityTier::HighQuality { image_size } => Some(image_size),
            QualityTier::Standard => None,
        }
    }
}

/// One attempt against one model. Built fresh for every attempt.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub image: &'a ImagePayload,
    pub model: &'a str,
    pub tier: QualityTier,
}

impl<'a> GenerationRequest<'a> {
    pub fn to_body(&self, aspect_ratio: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text(self.prompt),
                    Part::inline(self.image.to_base64(), self.image.mime_type.as_str()),
                ],
            }],
            generation_config: GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: aspect_ratio.to_string(),
                    image_size: self.tier.image_size().map(String::from),
                },
            },
        }
    }
}
