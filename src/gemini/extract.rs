use crate::{
    error::{Result, StudioError},
    models::{gemini::GenerateContentResponse, ImageResult},
};

/// Pulls the first inline image out of a response. The payload is always
/// labelled PNG, whatever MIME type the part claims.
pub fn extract_image(response: &GenerateContentResponse, model: &str) -> Result<ImageResult> {
    let parts = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| content.parts.as_slice())
        .unwrap_or_default();

    if parts.is_empty() {
        let detail = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
            .map(|reason| format!(" (prompt blocked: {})", reason))
            .unwrap_or_default();
        return Err(StudioError::MalformedResponse(detail));
    }

    if let Some(inline) = parts.iter().find_map(|p| p.inline_data.as_ref()) {
        return Ok(ImageResult::from_base64(&inline.data, model));
    }

    let text: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
    let text = if text.is_empty() {
        None
    } else {
        Some(text.join(" "))
    };
    Err(StudioError::NoImageInResponse(text))
}
