//! Chat-completions client.

use super::{ChatResponse, conversions};
use async_trait::async_trait;
use std::sync::Arc;
use storie_core::{GenerateRequest, GenerateResponse, TextConfig};
use storie_error::{JsonError, StorieResult, UpstreamError};
use storie_interface::{HttpTransport, TextDriver};
use tracing::{debug, error, instrument};

const SERVICE: &str = "openai";

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Failures are never retried here: a non-2xx status becomes an
/// `UpstreamError` and a 2xx body without choices becomes an
/// `InvalidResponseError`.
#[derive(Clone)]
pub struct OpenAIChatClient {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f32,
}

impl std::fmt::Debug for OpenAIChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIChatClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl OpenAIChatClient {
    /// Creates a client from explicit settings.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        temperature: f32,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let client = Self {
            transport,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
            temperature,
        };
        debug!(model = %client.model, url = %client.endpoint, "Created chat client");
        client
    }

    /// Creates a client from configuration, failing when the API key is unset.
    pub fn from_config(
        config: &TextConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> StorieResult<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(
            api_key,
            config.model.clone(),
            config.endpoint.clone(),
            config.temperature,
            transport,
        ))
    }
}

#[async_trait]
impl TextDriver for OpenAIChatClient {
    #[instrument(skip(self, req), fields(model = %self.model, messages = req.messages().len()))]
    async fn generate(&self, req: &GenerateRequest) -> StorieResult<GenerateResponse> {
        let chat_request = conversions::to_chat_request(req, &self.model, self.temperature)?;
        let body = serde_json::to_value(&chat_request)
            .map_err(|e| JsonError::encode("chat request", e))?;

        let response = self
            .transport
            .post_json(&self.endpoint, &self.api_key, &body)
            .await?;

        if !response.is_success() {
            error!(status = response.status, body = %response.body, "Chat completion failed");
            return Err(UpstreamError::new(SERVICE, response.status, response.body).into());
        }

        let chat_response: ChatResponse = response.json(SERVICE)?;
        debug!(choices = chat_response.choices.len(), "Received chat completion");

        Ok(conversions::from_chat_response(SERVICE, &chat_response)?)
    }

    fn provider_name(&self) -> &'static str {
        SERVICE
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
