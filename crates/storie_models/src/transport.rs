//! reqwest-backed HTTP transport.

use async_trait::async_trait;
use reqwest::Client;
use storie_error::{HttpError, StorieResult};
use storie_interface::{HttpResponse, HttpTransport};
use tracing::{error, instrument};

/// [`HttpTransport`] over a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport over an existing client (connection pool shared with the caller).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, bearer, body))]
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> StorieResult<HttpResponse> {
        let response = self
            .client
            .post(url)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                HttpError::new(format!("Request to {} failed: {}", url, e))
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse::new(status, text))
    }
}
