use crate::{
    config::StudioConfig,
    error::{Result, StudioError},
    models::gemini::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
};
use async_trait::async_trait;

const MAX_ERROR_BODY: usize = 500;

/// One remote `generateContent` call. The seam the image client is tested
/// against.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &StudioConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StudioError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &text));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            StudioError::MalformedResponse(format!(" (unreadable response body: {})", e))
        })
    }
}

/// Turns a non-2xx body into an [`StudioError::ApiError`], keeping the
/// API's status name in the message so marker matching still works.
pub fn api_error(status: u16, body: &str) -> StudioError {
    let message = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(name) => format!("{}: {}", name, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => truncate(body, MAX_ERROR_BODY).to_string(),
    };
    StudioError::ApiError { status, message }
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
