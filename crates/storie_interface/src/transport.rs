//! Minimal HTTP seam for provider clients.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use storie_error::{InvalidResponseError, StorieResult};

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("HTTP {}", status)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Build a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body, reporting failures as an invalid response from `service`.
    pub fn json<T: DeserializeOwned>(&self, service: &str) -> Result<T, InvalidResponseError> {
        serde_json::from_str(&self.body).map_err(|e| {
            InvalidResponseError::new(service, format!("unexpected body: {}", e))
        })
    }
}

/// Sends JSON POST requests with bearer authentication.
///
/// A non-2xx status is returned as an ordinary [`HttpResponse`]; only
/// failures to obtain a response at all are errors (`HttpError`).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST `body` to `url` with `Authorization: Bearer <bearer>`.
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> StorieResult<HttpResponse>;
}
