use crate::error::{Result, StudioError};
use crate::gemini::GenerationTransport;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse, Part};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub api_key: String,
    pub body: GenerateContentRequest,
}

impl RecordedCall {
    pub fn image_size(&self) -> Option<&str> {
        self.body.generation_config.image_config.image_size.as_deref()
    }
}

/// Replays canned replies in order and records every call it receives.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<GenerateContentResponse>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationTransport for ScriptedTransport {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            api_key: api_key.to_string(),
            body: body.clone(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(StudioError::RequestError("no scripted reply left".into())))
    }
}

pub fn image_reply(data: &str) -> Result<GenerateContentResponse> {
    Ok(GenerateContentResponse::from_parts(vec![
        Part::text("Here is the photo."),
        Part::inline(data, "image/png"),
    ]))
}

pub fn text_reply(text: &str) -> Result<GenerateContentResponse> {
    Ok(GenerateContentResponse::from_parts(vec![Part::text(text)]))
}

pub fn api_error(status: u16, message: &str) -> Result<GenerateContentResponse> {
    Err(StudioError::ApiError {
        status,
        message: message.to_string(),
    })
}
