use super::{extract::extract_image, transport::GenerationTransport};
use crate::{
    auth::classify,
    config::{ApiKeySource, StudioConfig},
    error::{Result, StudioError},
    logger::timer,
    models::{AttributeSet, GenerationRequest, ImagePayload, ImageResult, QualityTier},
    prompt,
};
use std::sync::Arc;

/// Generates studio shots, trying the high quality model first and the
/// standard model once if the first one is not reachable with this key.
#[derive(Clone)]
pub struct ImageClient {
    transport: Arc<dyn GenerationTransport>,
    api_key: ApiKeySource,
    primary_model: String,
    fallback_model: String,
    image_size: String,
    aspect_ratio: String,
}

impl ImageClient {
    pub fn new(transport: Arc<dyn GenerationTransport>, config: &StudioConfig) -> Self {
        Self {
            transport,
            api_key: config.api_key.clone(),
            primary_model: config.primary_model.clone(),
            fallback_model: config.fallback_model.clone(),
            image_size: config.image_size.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
        }
    }

    /// Makes at most two remote calls. When the fallback runs, its error is
    /// the one returned.
    pub async fn generate(&self, image: ImagePayload, attrs: AttributeSet) -> Result<ImageResult> {
        let api_key = self
            .api_key
            .resolve()
            .ok_or(StudioError::CredentialMissing)?;

        let prompt = prompt::compose(&attrs);

        let primary = GenerationRequest {
            prompt: &prompt,
            image: &image,
            model: &self.primary_model,
            tier: QualityTier::HighQuality {
                image_size: self.image_size.clone(),
            },
        };

        log::info!("Generating with {}...", self.primary_model);
        let err = match self.attempt(&api_key, &primary).await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };
        log::warn!("HQ generation failed with error: {}", err);

        if !classify(&err).is_access() {
            return Err(err);
        }

        let fallback = GenerationRequest {
            model: &self.fallback_model,
            tier: QualityTier::Standard,
            ..primary
        };

        log::info!("Falling back to {}...", self.fallback_model);
        self.attempt(&api_key, &fallback).await.map_err(|e| {
            log::error!("Fallback generation with {} failed: {}", self.fallback_model, e);
            e
        })
    }

    async fn attempt(&self, api_key: &str, request: &GenerationRequest<'_>) -> Result<ImageResult> {
        let _timer = timer(&format!("generateContent {}", request.model));
        let body = request.to_body(&self.aspect_ratio);
        let response = self
            .transport
            .generate_content(request.model, api_key, &body)
            .await?;
        extract_image(&response, request.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{api_error, image_reply, text_reply, ScriptedTransport};

    fn client(transport: Arc<ScriptedTransport>) -> ImageClient {
        ImageClient::new(transport, &StudioConfig::new().with_api_key("test-key"))
    }

    fn garment() -> ImagePayload {
        ImagePayload::new(b"garment-bytes".to_vec(), "image/jpeg")
    }

    #[tokio::test]
    async fn test_primary_success_makes_one_call() {
        let transport = Arc::new(ScriptedTransport::new(vec![image_reply("abc123")]));
        let result = client(transport.clone())
            .generate(garment(), AttributeSet::default())
            .await
            .unwrap();

        assert_eq!(result.data_uri, "data:image/png;base64,abc123");
        assert_eq!(result.model, "gemini-3-pro-image-preview");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gemini-3-pro-image-preview");
        assert_eq!(calls[0].api_key, "test-key");
        assert_eq!(calls[0].image_size(), Some("2K"));
        assert_eq!(
            calls[0].body.generation_config.image_config.aspect_ratio,
            "3:4"
        );
        assert_eq!(
            calls[0].body.contents[0].parts[0].text.as_deref(),
            Some(prompt::compose(&AttributeSet::default()).as_str())
        );
    }

    #[tokio::test]
    async fn test_access_error_falls_back_once_without_image_size() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            api_error(403, "PERMISSION_DENIED: The caller does not have permission"),
            image_reply("xyz789"),
        ]));
        let result = client(transport.clone())
            .generate(garment(), AttributeSet::default())
            .await
            .unwrap();

        assert_eq!(result.data_uri, "data:image/png;base64,xyz789");
        assert_eq!(result.model, "gemini-2.5-flash-image");

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].model, "gemini-2.5-flash-image");
        assert_eq!(calls[1].image_size(), None);
        assert_eq!(calls[0].body.contents, calls[1].body.contents);
    }

    #[tokio::test]
    async fn test_other_error_is_returned_without_fallback() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            api_error(503, "UNAVAILABLE: The model is overloaded"),
            image_reply("never"),
        ]));
        let err = client(transport.clone())
            .generate(garment(), AttributeSet::default())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "API error (503): UNAVAILABLE: The model is overloaded"
        );
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_text_only_primary_does_not_fall_back() {
        let transport = Arc::new(ScriptedTransport::new(vec![text_reply("Refused")]));
        let err = client(transport.clone())
            .generate(garment(), AttributeSet::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StudioError::NoImageInResponse(_)));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_error_is_surfaced() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            api_error(404, "NOT_FOUND: model not found"),
            api_error(403, "PERMISSION_DENIED: API key not valid"),
        ]));
        let err = client(transport.clone())
            .generate(garment(), AttributeSet::default())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "API error (403): PERMISSION_DENIED: API key not valid"
        );
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_calls() {
        let transport = Arc::new(ScriptedTransport::new(vec![image_reply("abc123")]));
        let config = StudioConfig::new()
            .with_api_key_source(ApiKeySource::env("MODERA_IMAGE_CLIENT_TEST_UNSET_KEY"));
        let client = ImageClient::new(transport.clone(), &config);

        let err = client
            .generate(garment(), AttributeSet::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StudioError::CredentialMissing));
        assert!(transport.calls().is_empty());
    }
}
