//! Conversions between Storie requests and the chat-completions format.

use super::{ChatMessage, ChatRequest, ChatResponse};
use storie_core::{GenerateRequest, GenerateResponse, TokenUsage};
use storie_error::{BuilderError, InvalidResponseError, StorieResult};

/// Converts a GenerateRequest to the chat format, filling in client defaults.
pub fn to_chat_request(
    req: &GenerateRequest,
    model: &str,
    temperature: f32,
) -> StorieResult<ChatRequest> {
    let messages = req
        .messages()
        .iter()
        .map(|msg| ChatMessage {
            role: msg.role.as_str().to_string(),
            content: Some(msg.content.clone()),
        })
        .collect::<Vec<_>>();

    let mut builder = ChatRequest::builder();
    builder
        .model(req.model().clone().unwrap_or_else(|| model.to_string()))
        .messages(messages)
        .temperature(Some(req.temperature().unwrap_or(temperature)));

    if let Some(max_tokens) = req.max_tokens() {
        builder.max_tokens(Some(*max_tokens));
    }

    Ok(builder.build().map_err(|e| BuilderError::rejected("ChatRequest", e))?)
}

/// Extracts the first choice's content.
pub fn from_chat_response(
    service: &str,
    response: &ChatResponse,
) -> Result<GenerateResponse, InvalidResponseError> {
    let content = response
        .choices
        .first()
        .ok_or_else(|| InvalidResponseError::new(service, "no choices in response"))?
        .message
        .content
        .clone()
        .ok_or_else(|| InvalidResponseError::new(service, "first choice has no content"))?;

    let usage = response.usage.as_ref().and_then(|u| {
        match (u.prompt_tokens, u.completion_tokens, u.total_tokens) {
            (Some(input_tokens), Some(output_tokens), Some(total_tokens)) => Some(TokenUsage {
                input_tokens,
                output_tokens,
                total_tokens,
            }),
            _ => None,
        }
    });

    Ok(GenerateResponse::new(content, usage))
}
