//! Image generation with retry on rate limiting.

use super::linear_backoff;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use storie_core::{ImageConfig, ImagePayload, ImageRequest};
use storie_error::{
    InvalidResponseError, JsonError, RetryableError, StorieError, StorieResult, UpstreamError,
};
use storie_interface::{HttpResponse, HttpTransport, ImageDriver};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, info, instrument, warn};

const SERVICE: &str = "wavespeed";

/// Client for the Wavespeed synchronous image endpoint.
///
/// Each call makes up to `max_attempts` requests. Only HTTP 429 (and
/// transport failures with no response) are retried, waiting
/// `n * backoff_step` before the n-th retry. Any other non-2xx status fails
/// at once with `UpstreamError`; a 2xx body without a non-empty `outputs`
/// array fails at once with `InvalidResponseError`.
#[derive(Clone)]
pub struct WavespeedClient {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    endpoint: String,
    max_attempts: usize,
    backoff_step: Duration,
}

impl std::fmt::Debug for WavespeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WavespeedClient")
            .field("endpoint", &self.endpoint)
            .field("max_attempts", &self.max_attempts)
            .field("backoff_step", &self.backoff_step)
            .finish_non_exhaustive()
    }
}

impl WavespeedClient {
    /// Creates a client with the default retry budget (3 attempts, 2 s step).
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let defaults = ImageConfig::default();
        Self {
            transport,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            max_attempts: defaults.max_attempts,
            backoff_step: Duration::from_millis(defaults.backoff_step_ms),
        }
    }

    /// Creates a client from configuration, failing when the API key is unset.
    pub fn from_config(
        config: &ImageConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> StorieResult<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(api_key, config.endpoint.clone(), transport)
            .with_retry(config.max_attempts, Duration::from_millis(config.backoff_step_ms)))
    }

    /// Override the retry budget and backoff step.
    pub fn with_retry(mut self, max_attempts: usize, backoff_step: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff_step = backoff_step;
        self
    }

    /// Total attempts per request.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    async fn attempt(
        &self,
        body: &serde_json::Value,
        attempts: &AtomicUsize,
    ) -> Result<ImagePayload, RetryError<StorieError>> {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(attempt, max_attempts = self.max_attempts, "Requesting image");

        let response = match self.transport.post_json(&self.endpoint, &self.api_key, body).await {
            Ok(response) => response,
            Err(e) if e.is_retryable() => {
                warn!(attempt, error = %e, "Image request failed, will retry");
                return Err(RetryError::Transient {
                    err: e,
                    retry_after: None,
                });
            }
            Err(e) => return Err(RetryError::Permanent(e)),
        };

        if response.status == 429 {
            warn!(attempt, "Image API rate limited, will retry");
            return Err(RetryError::Transient {
                err: UpstreamError::new(SERVICE, response.status, response.body).into(),
                retry_after: None,
            });
        }

        if !response.is_success() {
            warn!(attempt, status = response.status, "Image API error, failing immediately");
            return Err(RetryError::Permanent(
                UpstreamError::new(SERVICE, response.status, response.body).into(),
            ));
        }

        extract_outputs(&response)
            .map(|outputs| ImagePayload { outputs })
            .map_err(|e| RetryError::Permanent(e.into()))
    }
}

#[async_trait]
impl ImageDriver for WavespeedClient {
    #[instrument(skip(self, req), fields(prompt_len = req.prompt().len()))]
    async fn generate_image(&self, req: &ImageRequest) -> StorieResult<ImagePayload> {
        let body = serde_json::to_value(req)
            .map_err(|e| JsonError::encode("image request", e))?;
        let attempts = AtomicUsize::new(0);
        let strategy = linear_backoff(self.max_attempts, self.backoff_step);

        let this = self;
        let body = &body;
        let counter = &attempts;
        let payload = Retry::spawn(strategy, move || this.attempt(body, counter)).await?;

        info!(
            attempts = attempts.load(Ordering::SeqCst),
            images = payload.outputs.len(),
            "Image generated"
        );
        Ok(payload)
    }

    fn provider_name(&self) -> &'static str {
        SERVICE
    }
}

/// Pull the `data.outputs` string array out of a 2xx response.
///
/// Missing or non-array `outputs`, non-string entries, and an empty array
/// are all invalid responses.
pub fn extract_outputs(response: &HttpResponse) -> Result<Vec<String>, InvalidResponseError> {
    let value: serde_json::Value = response.json(SERVICE)?;
    let outputs = value
        .pointer("/data/outputs")
        .and_then(|v| v.as_array())
        .ok_or_else(|| InvalidResponseError::new(SERVICE, "missing outputs array"))?;

    let outputs = outputs
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| InvalidResponseError::new(SERVICE, "non-string entry in outputs"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if outputs.is_empty() {
        return Err(InvalidResponseError::new(SERVICE, "no image generated"));
    }
    Ok(outputs)
}
